//! Synthetic PPG Signal Generator
//!
//! Produces a clean pulse waveform (fundamental plus second harmonic) and a
//! noisy observation corrupted by baseline drift, motion artifacts, power-line
//! interference, and broadband Gaussian noise. The broadband noise source is
//! injected by the caller so runs are reproducible.

use crate::error::{DenoiseError, Result};
use crate::types::{GeneratedSignal, SignalConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::f64::consts::PI;

/// Relative amplitude of the pulse's second harmonic
const SECOND_HARMONIC_AMPLITUDE: f64 = 0.3;

/// Baseline drift (respiration band): amplitude and frequency in Hz
const BASELINE_DRIFT_AMPLITUDE: f64 = 0.5;
const BASELINE_DRIFT_FREQ: f64 = 0.25;

/// Motion artifact: amplitude and frequency in Hz
const MOTION_AMPLITUDE: f64 = 0.3;
const MOTION_FREQ: f64 = 0.1;

/// Power-line interference: amplitude and frequency in Hz
const POWERLINE_AMPLITUDE: f64 = 0.2;
const POWERLINE_FREQ: f64 = 50.0;

/// Standard deviation of the broadband Gaussian noise
const BROADBAND_NOISE_STD: f64 = 0.1;

/// Generate a clean/noisy PPG signal pair from the given configuration,
/// drawing broadband noise from `rng`.
///
/// # Arguments
/// * `config` - Duration, sample rate, and pulse frequency
/// * `rng` - Caller-owned random source for the broadband noise
///
/// # Returns
/// The time axis and both buffers; length is `floor(sample_rate * duration)`
pub fn generate<R: Rng>(config: &SignalConfig, rng: &mut R) -> Result<GeneratedSignal> {
    if !config.duration_secs.is_finite() || config.duration_secs <= 0.0 {
        return Err(DenoiseError::InvalidParameter(format!(
            "Duration ({} s) must be positive",
            config.duration_secs
        )));
    }
    if !config.sample_rate.is_finite() || config.sample_rate <= 0.0 {
        return Err(DenoiseError::InvalidParameter(format!(
            "Sample rate ({} Hz) must be positive",
            config.sample_rate
        )));
    }
    if !config.heart_rate_hz.is_finite() || config.heart_rate_hz <= 0.0 {
        return Err(DenoiseError::InvalidParameter(format!(
            "Heart rate ({} Hz) must be positive",
            config.heart_rate_hz
        )));
    }

    let n = (config.sample_rate * config.duration_secs).floor() as usize;
    if n == 0 {
        return Err(DenoiseError::InvalidParameter(format!(
            "Configuration yields an empty buffer ({} s at {} Hz)",
            config.duration_secs, config.sample_rate
        )));
    }

    let f0 = config.heart_rate_hz;
    let mut time = Vec::with_capacity(n);
    let mut clean = Vec::with_capacity(n);
    let mut noisy = Vec::with_capacity(n);

    for i in 0..n {
        let t = i as f64 / config.sample_rate;

        let pulse = (2.0 * PI * f0 * t).sin()
            + SECOND_HARMONIC_AMPLITUDE * (4.0 * PI * f0 * t).sin();

        let baseline_drift = BASELINE_DRIFT_AMPLITUDE * (2.0 * PI * BASELINE_DRIFT_FREQ * t).sin();
        let motion = MOTION_AMPLITUDE * (2.0 * PI * MOTION_FREQ * t).sin();
        let powerline = POWERLINE_AMPLITUDE * (2.0 * PI * POWERLINE_FREQ * t).sin();
        let broadband: f64 = rng.sample(StandardNormal);

        time.push(t);
        clean.push(pulse);
        noisy.push(pulse + baseline_drift + motion + powerline + BROADBAND_NOISE_STD * broadband);
    }

    Ok(GeneratedSignal { time, clean, noisy })
}

/// Generate with a deterministic rng seeded from `seed`.
pub fn generate_seeded(config: &SignalConfig, seed: u64) -> Result<GeneratedSignal> {
    generate(config, &mut StdRng::seed_from_u64(seed))
}
