//! Zero-Phase Filter Application
//!
//! Applies a designed transfer function forward and backward in time so the
//! net phase shift is zero. Boundary transients are suppressed by odd-reflecting
//! the signal at both ends and starting each pass from the filter's
//! steady-state step-response state, scaled to the first sample of the pass.

use crate::error::{DenoiseError, Result};
use crate::filters::design::FilterCoeffs;
use nalgebra::{DMatrix, DVector};

/// Number of reflected samples per edge, per pass
fn pad_length(b: &[f64], a: &[f64]) -> usize {
    3 * b.len().max(a.len())
}

/// Apply `coeffs` to `x` with zero-phase (forward-backward) filtering.
///
/// # Arguments
/// * `coeffs` - Designed transfer function (stable denominator)
/// * `x` - Input samples; returned buffer has identical length
///
/// # Returns
/// A newly allocated filtered buffer; the input is not modified
pub fn filtfilt(coeffs: &FilterCoeffs, x: &[f64]) -> Result<Vec<f64>> {
    let (b, a) = normalize(coeffs)?;
    let pad = pad_length(&b, &a);

    if x.is_empty() {
        return Err(DenoiseError::InvalidInput(
            "Cannot filter an empty buffer".to_string(),
        ));
    }
    if x.len() <= pad {
        return Err(DenoiseError::InvalidInput(format!(
            "Buffer of {} samples is too short for zero-phase filtering (needs more than {})",
            x.len(),
            pad
        )));
    }

    let zi = lfilter_zi(&b, &a)?;
    let ext = odd_ext(x, pad);

    // forward pass from the steady state of the first sample
    let mut y = lfilter(&b, &a, &ext, &scaled(&zi, ext[0]));

    // identical pass over the reversed output cancels the phase shift
    y.reverse();
    let head = y[0];
    let mut y = lfilter(&b, &a, &y, &scaled(&zi, head));
    y.reverse();

    Ok(y[pad..pad + x.len()].to_vec())
}

/// Pad `b`/`a` to equal length and normalize so `a[0] = 1`.
fn normalize(coeffs: &FilterCoeffs) -> Result<(Vec<f64>, Vec<f64>)> {
    let a0 = coeffs.a.first().copied().unwrap_or(0.0);
    if a0 == 0.0 || coeffs.b.is_empty() {
        return Err(DenoiseError::InvalidParameter(
            "Filter coefficients must have a non-zero leading feedback term".to_string(),
        ));
    }
    let n = coeffs.b.len().max(coeffs.a.len());
    let mut b = vec![0.0; n];
    let mut a = vec![0.0; n];
    for (dst, src) in b.iter_mut().zip(coeffs.b.iter()) {
        *dst = src / a0;
    }
    for (dst, src) in a.iter_mut().zip(coeffs.a.iter()) {
        *dst = src / a0;
    }
    Ok((b, a))
}

/// Odd reflection of `x` by `pad` samples at each end.
fn odd_ext(x: &[f64], pad: usize) -> Vec<f64> {
    let n = x.len();
    let first = x[0];
    let last = x[n - 1];

    let mut ext = Vec::with_capacity(n + 2 * pad);
    for i in 0..pad {
        ext.push(2.0 * first - x[pad - i]);
    }
    ext.extend_from_slice(x);
    for i in 0..pad {
        ext.push(2.0 * last - x[n - 2 - i]);
    }
    ext
}

/// Single causal pass of the difference equation (direct form II transposed)
/// starting from state `zi`.
fn lfilter(b: &[f64], a: &[f64], x: &[f64], zi: &[f64]) -> Vec<f64> {
    let mut z = zi.to_vec();
    let mut y = Vec::with_capacity(x.len());

    for &xm in x {
        let ym = b[0] * xm + z.first().copied().unwrap_or(0.0);
        for i in 0..z.len() {
            let carry = if i + 1 < z.len() { z[i + 1] } else { 0.0 };
            z[i] = b[i + 1] * xm + carry - a[i + 1] * ym;
        }
        y.push(ym);
    }
    y
}

/// Steady-state step-response state of the filter (unit step input).
///
/// Solves `(I - C^T) zi = B` where `C` is the companion matrix of `a` and
/// `B = b[1..] - a[1..] * b[0]`.
fn lfilter_zi(b: &[f64], a: &[f64]) -> Result<Vec<f64>> {
    let m = b.len() - 1;
    if m == 0 {
        return Ok(Vec::new());
    }

    let mut system = DMatrix::<f64>::identity(m, m);
    for i in 0..m {
        system[(i, 0)] += a[i + 1];
        if i + 1 < m {
            system[(i, i + 1)] -= 1.0;
        }
    }
    let rhs = DVector::from_iterator(m, (0..m).map(|i| b[i + 1] - a[i + 1] * b[0]));

    let zi = system.lu().solve(&rhs).ok_or_else(|| {
        DenoiseError::InvalidParameter(
            "Feedback coefficients do not admit a steady-state initial condition".to_string(),
        )
    })?;
    Ok(zi.iter().copied().collect())
}

fn scaled(zi: &[f64], x0: f64) -> Vec<f64> {
    zi.iter().map(|z| z * x0).collect()
}
