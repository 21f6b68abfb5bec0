//! Analysis Runner
//!
//! Orchestrates a complete denoising run: signal generation, the filter
//! cascade, spectra of the noisy and filtered buffers, and the quality report,
//! assembled into a single plain-data result for downstream consumers
//! (plotting, report formatting).

use crate::error::Result;
use crate::filters;
use crate::generator;
use crate::quality;
use crate::spectrum;
use crate::types::{DenoiseRequest, DenoiseResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Run a complete denoising analysis.
///
/// The broadband noise source is seeded from `request.seed` when present,
/// otherwise from the operating system.
pub fn run(request: &DenoiseRequest) -> Result<DenoiseResult> {
    match request.seed {
        Some(seed) => run_with_rng(request, &mut StdRng::seed_from_u64(seed)),
        None => run_with_rng(request, &mut StdRng::from_os_rng()),
    }
}

/// Run a complete denoising analysis with a caller-owned random source.
///
/// # Arguments
/// * `request` - Signal and cascade configuration
/// * `rng` - Random source for the generator's broadband noise
///
/// # Returns
/// A `DenoiseResult` with all buffers, both spectra, and the quality report
pub fn run_with_rng<R: Rng>(request: &DenoiseRequest, rng: &mut R) -> Result<DenoiseResult> {
    let analysis_id = Uuid::new_v4().to_string();

    log::info!("Starting denoising analysis {}", analysis_id);
    log::debug!("Signal config: {:?}", request.signal);
    log::debug!("Denoise config: {:?}", request.denoise);

    let generated = generator::generate(&request.signal, rng)?;
    log::info!("Generated {} samples", generated.noisy.len());

    let sample_rate = request.signal.sample_rate;
    let filtered = filters::denoise(&generated.noisy, sample_rate, &request.denoise)?;
    log::info!("Filter cascade complete");

    // the two spectra are independent of each other
    let (noisy_spectrum, filtered_spectrum) = rayon::join(
        || spectrum::compute_spectrum(&generated.noisy, sample_rate),
        || spectrum::compute_spectrum(&filtered, sample_rate),
    );
    let noisy_spectrum = noisy_spectrum?;
    let filtered_spectrum = filtered_spectrum?;

    let quality = quality::evaluate(&generated.clean, &generated.noisy, &filtered)?;
    log::info!(
        "SNR before {:.2} dB, after {:.2} dB, improvement {:.2} dB",
        quality.snr_before_db,
        quality.snr_after_db,
        quality.improvement_db
    );

    Ok(DenoiseResult::new(
        analysis_id,
        request.signal.clone(),
        request.denoise.clone(),
        generated,
        filtered,
        noisy_spectrum,
        filtered_spectrum,
        quality,
    ))
}
