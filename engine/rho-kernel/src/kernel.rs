//! Closed-form rho math.
//!
//! All functions are pure and allocation free. The operation order matches
//! `(1 + (beta * beta) * ((cdot * cdot) - 1)).sqrt() - beta * cdot` so results
//! are bit-for-bit reproducible against the reference formula.

use crate::error::{Result, RhoError};

/// Expression under the square root: `1 + beta^2 * (cdot^2 - 1)`.
///
/// At most `1` whenever `|cdot| <= 1`; negative once `beta^2 * (1 - cdot^2) > 1`.
#[inline]
pub fn radicand(cdot: f64, beta: f64) -> f64 {
    1.0 + (beta * beta) * ((cdot * cdot) - 1.0)
}

/// True when [`try_calc_rho`] succeeds: finite inputs, a finite non-negative
/// radicand and a finite result.
#[inline]
pub fn is_in_domain(cdot: f64, beta: f64) -> bool {
    try_calc_rho(cdot, beta).is_ok()
}

/// `rho = sqrt(1 + beta^2 * (cdot^2 - 1)) - beta * cdot`
///
/// No validation: a negative radicand yields NaN, and NaN inputs pass through.
#[inline]
pub fn calc_rho(cdot: f64, beta: f64) -> f64 {
    radicand(cdot, beta).sqrt() - beta * cdot
}

/// Checked variant of [`calc_rho`].
///
/// Returns [`RhoError::NonFiniteInput`] for NaN or infinite inputs,
/// [`RhoError::Overflow`] when finite inputs push the radicand or the result
/// out of f64 range, and [`RhoError::NegativeRadicand`] when the root is not
/// real. `Ok` values are always finite.
#[inline]
pub fn try_calc_rho(cdot: f64, beta: f64) -> Result<f64> {
    if !cdot.is_finite() || !beta.is_finite() {
        return Err(RhoError::NonFiniteInput { index: None, cdot, beta });
    }
    let r = radicand(cdot, beta);
    // inf from an overflowed square, or NaN from inf * 0 when cdot^2 - 1 == 0
    if !r.is_finite() {
        return Err(RhoError::Overflow { index: None, cdot, beta });
    }
    if r < 0.0 {
        return Err(RhoError::NegativeRadicand { index: None, cdot, beta, radicand: r });
    }
    let rho = r.sqrt() - beta * cdot;
    if !rho.is_finite() {
        return Err(RhoError::Overflow { index: None, cdot, beta });
    }
    Ok(rho)
}
