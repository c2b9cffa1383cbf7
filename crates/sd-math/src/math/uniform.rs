//! Continuous uniform distribution on `[a, b]`.
//!
//! Also provides the `U[a, b)` draw that every inverse-transform sampler in
//! this crate starts from.

use rand::Rng;

use super::stable::{is_probability, log_if, zero_if};
use crate::engine::unit_uniform;

fn valid_bounds(a: f64, b: f64) -> bool {
    a.is_finite() && b.is_finite() && a < b
}

/// `(b - a) / 2`, which stays finite for any finite bounds.
fn half_width(a: f64, b: f64) -> f64 {
    0.5 * b - 0.5 * a
}

fn density(x: f64, a: f64, b: f64, log_form: bool) -> f64 {
    if x.is_nan() || !valid_bounds(a, b) {
        return f64::NAN;
    }
    if x < a || x > b {
        return zero_if(log_form);
    }
    log_if(0.5 / half_width(a, b), log_form)
}

/// Uniform PDF: `1/(b-a)` on `[a, b]`, 0 elsewhere.
///
/// NaN when either bound is NaN or infinite, or when `a >= b`.
pub fn uniform_pdf(x: f64, a: f64, b: f64) -> f64 {
    density(x, a, b, false)
}

/// Log of the uniform PDF.
pub fn uniform_log_pdf(x: f64, a: f64, b: f64) -> f64 {
    density(x, a, b, true)
}

/// Uniform CDF, clamped to 0 below `a` and 1 above `b`.
pub fn uniform_cdf(x: f64, a: f64, b: f64) -> f64 {
    if x.is_nan() || !valid_bounds(a, b) {
        return f64::NAN;
    }
    if x <= a {
        return 0.0;
    }
    if x >= b {
        return 1.0;
    }
    (0.5 * x - 0.5 * a) / half_width(a, b)
}

/// Uniform quantile `a + p (b - a)`. NaN for `p` outside `[0, 1]`.
pub fn uniform_quantile(p: f64, a: f64, b: f64) -> f64 {
    if !valid_bounds(a, b) || !is_probability(p) {
        return f64::NAN;
    }
    // Weighted form stays finite when b - a overflows.
    ((1.0 - p) * a + p * b).clamp(a, b)
}

/// One draw from `U[a, b)`.
pub fn uniform_sample<R: Rng + ?Sized>(a: f64, b: f64, rng: &mut R) -> f64 {
    if !valid_bounds(a, b) {
        return f64::NAN;
    }
    let u = unit_uniform(rng);
    let width = b - a;
    if width.is_finite() {
        a + width * u
    } else {
        let step = half_width(a, b) * u;
        a + step + step
    }
}

/// Mean `(a + b) / 2`.
pub fn uniform_mean(a: f64, b: f64) -> f64 {
    if !valid_bounds(a, b) {
        return f64::NAN;
    }
    0.5 * a + 0.5 * b
}

/// Variance `(b - a)^2 / 12`.
pub fn uniform_var(a: f64, b: f64) -> f64 {
    if !valid_bounds(a, b) {
        return f64::NAN;
    }
    let half = half_width(a, b);
    half * half / 3.0
}
