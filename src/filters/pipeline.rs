//! Denoising Filter Cascade
//!
//! Fixed three-stage zero-phase cascade:
//! 1. Notch filter (power-line interference removal)
//! 2. Butterworth high-pass (baseline drift removal)
//! 3. Butterworth low-pass (broadband noise removal)
//!
//! Each stage designs its filter and applies it; the output of one stage is
//! the input of the next. The first failing stage aborts the whole cascade.

use crate::error::Result;
use crate::filters::design::{design, FilterSpec};
use crate::filters::filtfilt::filtfilt;
use serde::{Deserialize, Serialize};

/// Configuration for the denoising cascade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenoiseConfig {
    /// Notch center frequency, typically 50 or 60 Hz
    #[serde(default = "default_notch_freq")]
    pub notch_freq: f64,

    /// Q factor for the notch (higher = narrower rejection band)
    #[serde(default = "default_notch_q")]
    pub notch_q: f64,

    /// High-pass cutoff frequency (Hz)
    #[serde(default = "default_highpass_cutoff")]
    pub highpass_cutoff: f64,

    /// High-pass filter order
    #[serde(default = "default_highpass_order")]
    pub highpass_order: usize,

    /// Low-pass cutoff frequency (Hz)
    #[serde(default = "default_lowpass_cutoff")]
    pub lowpass_cutoff: f64,

    /// Low-pass filter order
    #[serde(default = "default_lowpass_order")]
    pub lowpass_order: usize,
}

fn default_notch_freq() -> f64 {
    50.0
}
fn default_notch_q() -> f64 {
    30.0
}
fn default_highpass_cutoff() -> f64 {
    0.5
}
fn default_highpass_order() -> usize {
    4
}
fn default_lowpass_cutoff() -> f64 {
    10.0
}
fn default_lowpass_order() -> usize {
    4
}

impl Default for DenoiseConfig {
    fn default() -> Self {
        Self {
            notch_freq: 50.0,
            notch_q: 30.0,
            highpass_cutoff: 0.5,
            highpass_order: 4,
            lowpass_cutoff: 10.0,
            lowpass_order: 4,
        }
    }
}

/// Run the notch -> high-pass -> low-pass cascade over `noisy`.
///
/// # Arguments
/// * `noisy` - Input samples
/// * `sample_rate` - Sampling rate in Hz
/// * `config` - Cascade parameters
///
/// # Returns
/// A new buffer of identical length, or the first stage's error
pub fn denoise(noisy: &[f64], sample_rate: f64, config: &DenoiseConfig) -> Result<Vec<f64>> {
    let notch = design(
        &FilterSpec::Notch {
            center_freq: config.notch_freq,
            q: config.notch_q,
        },
        sample_rate,
    )?;
    let after_notch = filtfilt(&notch, noisy)?;

    let highpass = design(
        &FilterSpec::HighPass {
            cutoff: config.highpass_cutoff,
            order: config.highpass_order,
        },
        sample_rate,
    )?;
    let after_highpass = filtfilt(&highpass, &after_notch)?;

    let lowpass = design(
        &FilterSpec::LowPass {
            cutoff: config.lowpass_cutoff,
            order: config.lowpass_order,
        },
        sample_rate,
    )?;
    filtfilt(&lowpass, &after_highpass)
}
