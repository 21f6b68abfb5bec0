//! Quality Evaluator
//!
//! Signal-to-noise ratio of the noisy and filtered buffers against the known
//! clean reference, in decibels, plus the improvement of the cascade.

use crate::error::{DenoiseError, Result};
use crate::types::QualityReport;

/// Evaluate SNR before and after filtering against the clean reference.
///
/// # Arguments
/// * `clean` - Known noise-free reference
/// * `noisy` - Observation before filtering
/// * `filtered` - Cascade output
///
/// # Returns
/// `SNR = 10 * log10(var(clean) / var(residual))` for both residuals, and
/// their difference
pub fn evaluate(clean: &[f64], noisy: &[f64], filtered: &[f64]) -> Result<QualityReport> {
    if clean.is_empty() {
        return Err(DenoiseError::InvalidInput(
            "Cannot evaluate SNR on empty buffers".to_string(),
        ));
    }
    if noisy.len() != clean.len() || filtered.len() != clean.len() {
        return Err(DenoiseError::InvalidInput(format!(
            "Buffer lengths differ (clean {}, noisy {}, filtered {})",
            clean.len(),
            noisy.len(),
            filtered.len()
        )));
    }

    let signal_power = variance(clean);
    if signal_power == 0.0 {
        return Err(DenoiseError::Undefined(
            "Clean reference has zero variance".to_string(),
        ));
    }

    let snr_before_db = snr_db(signal_power, residual_variance(noisy, clean), "noisy")?;
    let snr_after_db = snr_db(signal_power, residual_variance(filtered, clean), "filtered")?;

    Ok(QualityReport {
        snr_before_db,
        snr_after_db,
        improvement_db: snr_after_db - snr_before_db,
    })
}

fn snr_db(signal_power: f64, noise_power: f64, label: &str) -> Result<f64> {
    if noise_power == 0.0 {
        return Err(DenoiseError::Undefined(format!(
            "Residual of the {} buffer has zero variance",
            label
        )));
    }
    Ok(10.0 * (signal_power / noise_power).log10())
}

/// Population variance (mean removed).
fn variance(x: &[f64]) -> f64 {
    let mean = x.iter().sum::<f64>() / x.len() as f64;
    x.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / x.len() as f64
}

/// Population variance of the elementwise difference `x - reference`.
fn residual_variance(x: &[f64], reference: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mean = x
        .iter()
        .zip(reference.iter())
        .map(|(a, b)| a - b)
        .sum::<f64>()
        / n;
    x.iter()
        .zip(reference.iter())
        .map(|(a, b)| {
            let d = a - b - mean;
            d * d
        })
        .sum::<f64>()
        / n
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn tone(freq: f64, fs: f64, n: usize, amp: f64) -> Vec<f64> {
        (0..n)
            .map(|i| amp * (2.0 * PI * freq * i as f64 / fs).sin())
            .collect()
    }

    #[test]
    fn test_known_snr_values() {
        let n = 1000;
        let clean = tone(5.0, 1000.0, n, 1.0);
        let noise = tone(50.0, 1000.0, n, 0.1);
        let noisy: Vec<f64> = clean.iter().zip(noise.iter()).map(|(c, e)| c + e).collect();
        let half_noise: Vec<f64> = clean
            .iter()
            .zip(noise.iter())
            .map(|(c, e)| c + 0.5 * e)
            .collect();

        let report = evaluate(&clean, &noisy, &half_noise).unwrap();

        // amplitude ratio 10 -> power ratio 100 -> 20 dB
        assert!((report.snr_before_db - 20.0).abs() < 0.1);
        // halving the residual amplitude buys ~6.02 dB
        assert!((report.improvement_db - 6.02).abs() < 0.1);
        assert!(
            (report.improvement_db - (report.snr_after_db - report.snr_before_db)).abs() < 1e-12
        );
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let clean = vec![1.0, 2.0, 3.0];
        assert!(matches!(
            evaluate(&clean, &clean[..2], &clean),
            Err(DenoiseError::InvalidInput(_))
        ));
        assert!(matches!(
            evaluate(&[], &[], &[]),
            Err(DenoiseError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_zero_variance_residual_is_undefined() {
        let clean = tone(5.0, 1000.0, 100, 1.0);
        let noisy: Vec<f64> = clean.iter().map(|c| c + 0.1).collect();

        // perfect reconstruction: filtered residual has zero variance
        assert!(matches!(
            evaluate(&clean, &noisy, &clean),
            Err(DenoiseError::Undefined(_))
        ));

        // a constant offset has zero variance too (variance is mean-removed)
        assert!(matches!(
            evaluate(&clean, &noisy, &noisy),
            Err(DenoiseError::Undefined(_))
        ));
    }

    #[test]
    fn test_zero_variance_reference_is_undefined() {
        let clean = vec![1.0; 100];
        let other = tone(5.0, 1000.0, 100, 1.0);
        assert!(matches!(
            evaluate(&clean, &other, &other),
            Err(DenoiseError::Undefined(_))
        ));
    }
}
