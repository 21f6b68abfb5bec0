pub mod error;
pub mod filters;
pub mod generator;
pub mod quality;
pub mod runner;
pub mod spectrum;
pub mod types;

pub use error::{DenoiseError, Result};
pub use filters::{denoise, design, filtfilt, DenoiseConfig, FilterCoeffs, FilterSpec};
pub use generator::{generate, generate_seeded};
pub use quality::evaluate;
pub use runner::{run, run_with_rng};
pub use spectrum::compute_spectrum;
pub use types::*;
