//! Spectrum Analyzer
//!
//! One-sided magnitude spectrum of a real-valued buffer. The FFT runs at the
//! buffer's exact length so the bin resolution is `sample_rate / len`; the
//! redundant negative-frequency half of the conjugate-symmetric spectrum is
//! dropped (for even lengths that includes the Nyquist bin), and magnitudes
//! are scaled by `2 / len` so a bin-aligned unit sinusoid reads ~1.

use crate::error::{DenoiseError, Result};
use crate::types::Spectrum;
use rustfft::{num_complex::Complex, FftPlanner};

/// Compute the one-sided magnitude spectrum of `x`.
///
/// # Arguments
/// * `x` - Input samples
/// * `sample_rate` - Sampling rate in Hz
///
/// # Returns
/// Frequencies (Hz, ascending from 0) and their magnitudes
pub fn compute_spectrum(x: &[f64], sample_rate: f64) -> Result<Spectrum> {
    if x.is_empty() {
        return Err(DenoiseError::InvalidInput(
            "Cannot compute the spectrum of an empty buffer".to_string(),
        ));
    }
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(DenoiseError::InvalidParameter(format!(
            "Sample rate ({} Hz) must be positive",
            sample_rate
        )));
    }

    let n = x.len();
    let mut buffer: Vec<Complex<f64>> = x.iter().map(|&v| Complex::new(v, 0.0)).collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    let n_bins = (n + 1) / 2;
    let bin_hz = sample_rate / n as f64;
    let scale = 2.0 / n as f64;

    let frequencies = (0..n_bins).map(|k| k as f64 * bin_hz).collect();
    let magnitudes = buffer[..n_bins].iter().map(|c| scale * c.norm()).collect();

    Ok(Spectrum {
        frequencies,
        magnitudes,
    })
}
