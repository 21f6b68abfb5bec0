//! IIR Filter Design
//!
//! Designs notch and Butterworth high-pass/low-pass filters as Z-domain
//! transfer functions. Butterworth designs are built from bilinear-transformed
//! second-order sections (plus a first-order section for odd orders) whose
//! polynomials are convolved into the cascade-equivalent `(b, a)` pair.

use crate::error::{DenoiseError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Filter specification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterSpec {
    /// Narrow band-reject at `center_freq`; bandwidth is `center_freq / q`
    Notch { center_freq: f64, q: f64 },
    /// Butterworth high-pass with half-power point at `cutoff`
    HighPass { cutoff: f64, order: usize },
    /// Butterworth low-pass with half-power point at `cutoff`
    LowPass { cutoff: f64, order: usize },
}

/// Transfer-function coefficients
/// `H(z) = (b[0] + b[1]*z^-1 + ...) / (a[0] + a[1]*z^-1 + ...)`, `a[0] = 1`
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoeffs {
    /// Feed-forward (numerator) coefficients
    pub b: Vec<f64>,
    /// Feedback (denominator) coefficients
    pub a: Vec<f64>,
}

/// Second-order section used during Butterworth design
#[derive(Debug, Clone, Copy)]
struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

/// Design filter coefficients for the given specification.
///
/// # Arguments
/// * `spec` - Filter family and parameters
/// * `sample_rate` - Sampling rate in Hz
///
/// # Returns
/// Stable transfer-function coefficients; pure function of its inputs
pub fn design(spec: &FilterSpec, sample_rate: f64) -> Result<FilterCoeffs> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(DenoiseError::InvalidParameter(format!(
            "Sample rate ({} Hz) must be positive",
            sample_rate
        )));
    }
    let nyquist = sample_rate / 2.0;

    match *spec {
        FilterSpec::Notch { center_freq, q } => {
            check_frequency(center_freq, nyquist, "Notch frequency")?;
            if !q.is_finite() || q <= 0.0 {
                return Err(DenoiseError::InvalidParameter(format!(
                    "Quality factor ({}) must be positive",
                    q
                )));
            }
            Ok(design_notch(center_freq / nyquist, q))
        }
        FilterSpec::HighPass { cutoff, order } => {
            check_frequency(cutoff, nyquist, "Cutoff frequency")?;
            check_order(order)?;
            let wn = prewarp(cutoff, sample_rate);
            Ok(collapse_sections(&butterworth_sections(
                wn,
                order,
                BandKind::HighPass,
            )))
        }
        FilterSpec::LowPass { cutoff, order } => {
            check_frequency(cutoff, nyquist, "Cutoff frequency")?;
            check_order(order)?;
            let wn = prewarp(cutoff, sample_rate);
            Ok(collapse_sections(&butterworth_sections(
                wn,
                order,
                BandKind::LowPass,
            )))
        }
    }
}

fn check_frequency(freq: f64, nyquist: f64, label: &str) -> Result<()> {
    if !freq.is_finite() || freq <= 0.0 || freq >= nyquist {
        return Err(DenoiseError::InvalidParameter(format!(
            "{} ({} Hz) must be strictly between 0 and Nyquist ({} Hz)",
            label, freq, nyquist
        )));
    }
    Ok(())
}

fn check_order(order: usize) -> Result<()> {
    if order == 0 {
        return Err(DenoiseError::InvalidParameter(
            "Filter order must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Prewarp a cutoff frequency for the bilinear transform
fn prewarp(freq: f64, sample_rate: f64) -> f64 {
    (PI * freq / sample_rate).tan()
}

#[derive(Clone, Copy)]
enum BandKind {
    LowPass,
    HighPass,
}

/// Second-order IIR notch (scipy `iirnotch` formulation).
///
/// `w0_norm` is the center frequency normalized to Nyquist (0..1). The design
/// has an exact null at the center frequency and unity gain at DC and Nyquist.
fn design_notch(w0_norm: f64, q: f64) -> FilterCoeffs {
    let bw = (w0_norm / q) * PI;
    let w0 = w0_norm * PI;

    let beta = (bw / 2.0).tan();
    let gain = 1.0 / (1.0 + beta);

    let b = vec![gain, -2.0 * gain * w0.cos(), gain];
    let a = vec![1.0, -2.0 * gain * w0.cos(), 2.0 * gain - 1.0];

    FilterCoeffs { b, a }
}

/// Butterworth sections for the prewarped cutoff `wn`.
///
/// Conjugate pole pairs have damping `2*sin(theta_k)` with
/// `theta_k = pi*(2k+1)/(2*order)`; odd orders add one first-order section
/// with its pole at `-wn`.
fn butterworth_sections(wn: f64, order: usize, kind: BandKind) -> Vec<Biquad> {
    let pairs = order / 2;
    let mut sections = Vec::with_capacity(pairs + order % 2);

    for k in 0..pairs {
        let theta = PI * (2.0 * k as f64 + 1.0) / (2.0 * order as f64);
        let damping = 2.0 * theta.sin();

        let wn2 = wn * wn;
        let denom = 1.0 + damping * wn + wn2;
        let a1 = 2.0 * (wn2 - 1.0) / denom;
        let a2 = (1.0 - damping * wn + wn2) / denom;

        let section = match kind {
            BandKind::LowPass => Biquad {
                b0: wn2 / denom,
                b1: 2.0 * wn2 / denom,
                b2: wn2 / denom,
                a1,
                a2,
            },
            BandKind::HighPass => Biquad {
                b0: 1.0 / denom,
                b1: -2.0 / denom,
                b2: 1.0 / denom,
                a1,
                a2,
            },
        };
        sections.push(section);
    }

    if order % 2 == 1 {
        let a1 = (wn - 1.0) / (wn + 1.0);
        let section = match kind {
            BandKind::LowPass => {
                let k = wn / (1.0 + wn);
                Biquad {
                    b0: k,
                    b1: k,
                    b2: 0.0,
                    a1,
                    a2: 0.0,
                }
            }
            BandKind::HighPass => {
                let k = 1.0 / (1.0 + wn);
                Biquad {
                    b0: k,
                    b1: -k,
                    b2: 0.0,
                    a1,
                    a2: 0.0,
                }
            }
        };
        sections.push(section);
    }

    sections
}

/// Convolve section polynomials into one cascade-equivalent transfer function.
fn collapse_sections(sections: &[Biquad]) -> FilterCoeffs {
    let mut b = vec![1.0];
    let mut a = vec![1.0];

    for section in sections {
        // first-order sections carry a zero trailing coefficient
        if section.b2 == 0.0 && section.a2 == 0.0 {
            b = polymul(&b, &[section.b0, section.b1]);
            a = polymul(&a, &[1.0, section.a1]);
        } else {
            b = polymul(&b, &[section.b0, section.b1, section.b2]);
            a = polymul(&a, &[1.0, section.a1, section.a2]);
        }
    }

    FilterCoeffs { b, a }
}

fn polymul(p: &[f64], q: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; p.len() + q.len() - 1];
    for (i, &pi) in p.iter().enumerate() {
        for (j, &qj) in q.iter().enumerate() {
            out[i + j] += pi * qj;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// |H(e^{j*2*pi*freq/fs})| from the transfer-function polynomials
    fn magnitude_response(coeffs: &FilterCoeffs, freq: f64, sample_rate: f64) -> f64 {
        let w = 2.0 * PI * freq / sample_rate;
        let eval = |poly: &[f64]| {
            let (mut re, mut im) = (0.0, 0.0);
            for (k, &c) in poly.iter().enumerate() {
                re += c * (w * k as f64).cos();
                im -= c * (w * k as f64).sin();
            }
            (re * re + im * im).sqrt()
        };
        eval(&coeffs.b) / eval(&coeffs.a)
    }

    #[test]
    fn test_notch_nulls_center_and_passes_neighbors() {
        let spec = FilterSpec::Notch {
            center_freq: 50.0,
            q: 30.0,
        };
        let coeffs = design(&spec, 1000.0).unwrap();

        assert!(magnitude_response(&coeffs, 50.0, 1000.0) < 1e-10);
        assert!((magnitude_response(&coeffs, 150.0, 1000.0) - 1.0).abs() < 0.01);
        assert!((magnitude_response(&coeffs, 5.0, 1000.0) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_lowpass_gain_profile() {
        let spec = FilterSpec::LowPass {
            cutoff: 10.0,
            order: 4,
        };
        let coeffs = design(&spec, 1000.0).unwrap();

        // unity at DC, half power at the cutoff, strong rejection well above it
        assert!((magnitude_response(&coeffs, 1e-9, 1000.0) - 1.0).abs() < 1e-6);
        assert!((magnitude_response(&coeffs, 10.0, 1000.0) - 1.0 / 2f64.sqrt()).abs() < 1e-6);
        assert!(magnitude_response(&coeffs, 100.0, 1000.0) < 1e-3);
    }

    #[test]
    fn test_highpass_gain_profile() {
        let spec = FilterSpec::HighPass {
            cutoff: 0.5,
            order: 4,
        };
        let coeffs = design(&spec, 1000.0).unwrap();

        assert!(magnitude_response(&coeffs, 1e-9, 1000.0) < 1e-6);
        assert!((magnitude_response(&coeffs, 0.5, 1000.0) - 1.0 / 2f64.sqrt()).abs() < 1e-6);
        assert!((magnitude_response(&coeffs, 50.0, 1000.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_odd_order_designs() {
        for order in [1, 3, 5] {
            let spec = FilterSpec::LowPass {
                cutoff: 20.0,
                order,
            };
            let coeffs = design(&spec, 1000.0).unwrap();
            assert_eq!(coeffs.b.len(), order + 1);
            assert_eq!(coeffs.a.len(), order + 1);
            assert!((magnitude_response(&coeffs, 20.0, 1000.0) - 1.0 / 2f64.sqrt()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_design_is_deterministic() {
        let spec = FilterSpec::HighPass {
            cutoff: 0.5,
            order: 4,
        };
        let first = design(&spec, 1000.0).unwrap();
        let second = design(&spec, 1000.0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_denominator_is_monic() {
        let specs = [
            FilterSpec::Notch {
                center_freq: 50.0,
                q: 30.0,
            },
            FilterSpec::LowPass {
                cutoff: 10.0,
                order: 4,
            },
            FilterSpec::HighPass {
                cutoff: 0.5,
                order: 3,
            },
        ];
        for spec in specs {
            let coeffs = design(&spec, 1000.0).unwrap();
            assert!((coeffs.a[0] - 1.0).abs() < 1e-12);
            assert_eq!(coeffs.a.len(), coeffs.b.len());
        }
    }

    #[test]
    fn test_rejects_frequency_at_or_above_nyquist() {
        let spec = FilterSpec::HighPass {
            cutoff: 600.0,
            order: 4,
        };
        assert!(matches!(
            design(&spec, 1000.0),
            Err(DenoiseError::InvalidParameter(_))
        ));

        let spec = FilterSpec::LowPass {
            cutoff: 500.0,
            order: 2,
        };
        assert!(matches!(
            design(&spec, 1000.0),
            Err(DenoiseError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_degenerate_parameters() {
        assert!(design(
            &FilterSpec::LowPass {
                cutoff: 10.0,
                order: 0
            },
            1000.0
        )
        .is_err());
        assert!(design(
            &FilterSpec::Notch {
                center_freq: 50.0,
                q: 0.0
            },
            1000.0
        )
        .is_err());
        assert!(design(
            &FilterSpec::Notch {
                center_freq: 0.0,
                q: 30.0
            },
            1000.0
        )
        .is_err());
        assert!(design(
            &FilterSpec::LowPass {
                cutoff: 10.0,
                order: 4
            },
            0.0
        )
        .is_err());
    }
}
