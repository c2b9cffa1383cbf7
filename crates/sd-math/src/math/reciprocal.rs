//! Reciprocal (log-uniform) distribution on `[a, b]`, `0 < a < b < inf`.
//!
//! `ln X` is uniform on `[ln a, ln b]`, so the density is
//! `f(x) = 1 / (x ln(b/a))` and sampling is a plain inverse transform.

use rand::Rng;

use super::stable::{is_probability, zero_if};
use crate::engine::unit_uniform;

/// Parameter check shared by every reciprocal function.
///
/// Rejects NaN, `a <= 0` (which also covers `a = -inf`), `a >= b` (covers
/// `a = b = +inf`) and `b = +inf`, where the density cannot be normalized.
pub(crate) fn valid_params(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    a > 0.0 && a < b && b.is_finite()
}

/// `ln(hi / lo)` for `0 < lo <= hi`, falling back to `ln hi - ln lo` when
/// the ratio overflows.
fn log_ratio(hi: f64, lo: f64) -> f64 {
    let ratio = hi / lo;
    if ratio.is_finite() {
        ratio.ln()
    } else {
        hi.ln() - lo.ln()
    }
}

fn density(x: f64, a: f64, b: f64, log_form: bool) -> f64 {
    if x.is_nan() || !valid_params(a, b) {
        return f64::NAN;
    }
    if x < a || x > b {
        return zero_if(log_form);
    }
    let q = log_ratio(b, a);
    if log_form {
        -(x.ln() + q.ln())
    } else {
        1.0 / (x * q)
    }
}

/// Reciprocal PDF at x.
///
/// # Example
/// ```
/// use sd_math::reciprocal::reciprocal_pdf;
///
/// let d = reciprocal_pdf(5.0, 2.0, 30.0);
/// assert!((d - 0.073853874613771).abs() < 1e-14);
/// assert_eq!(reciprocal_pdf(1.9, 2.0, 30.0), 0.0);
/// ```
pub fn reciprocal_pdf(x: f64, a: f64, b: f64) -> f64 {
    density(x, a, b, false)
}

/// Log of the reciprocal PDF at x.
pub fn reciprocal_log_pdf(x: f64, a: f64, b: f64) -> f64 {
    density(x, a, b, true)
}

/// Reciprocal CDF `ln(x/a) / ln(b/a)`, clamped outside `[a, b]`.
pub fn reciprocal_cdf(x: f64, a: f64, b: f64) -> f64 {
    if x.is_nan() || !valid_params(a, b) {
        return f64::NAN;
    }
    if x <= a {
        return 0.0;
    }
    if x >= b {
        return 1.0;
    }
    log_ratio(x, a) / log_ratio(b, a)
}

/// Reciprocal quantile `exp(p ln b + (1-p) ln a)`.
///
/// `p = 0` maps to `a`, `p = 1` to `b`; NaN outside `[0, 1]`.
pub fn reciprocal_quantile(p: f64, a: f64, b: f64) -> f64 {
    if !valid_params(a, b) || !is_probability(p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return a;
    }
    if p == 1.0 {
        return b;
    }
    // Rounding in exp can step one ulp outside the support.
    (p * b.ln() + (1.0 - p) * a.ln()).exp().clamp(a, b)
}

/// One draw by inverse transform of a `U[0, 1)` variate.
pub fn reciprocal_sample<R: Rng + ?Sized>(a: f64, b: f64, rng: &mut R) -> f64 {
    if !valid_params(a, b) {
        return f64::NAN;
    }
    reciprocal_quantile(unit_uniform(rng), a, b)
}

/// Mean `(b - a) / ln(b/a)`.
pub fn reciprocal_mean(a: f64, b: f64) -> f64 {
    if !valid_params(a, b) {
        return f64::NAN;
    }
    (b - a) / log_ratio(b, a)
}

/// Variance `(b - a)(b(q - 2) + a(q + 2)) / (2 q^2)` with `q = ln(b/a)`.
pub fn reciprocal_var(a: f64, b: f64) -> f64 {
    if !valid_params(a, b) {
        return f64::NAN;
    }
    let q = log_ratio(b, a);
    (b - a) / (2.0 * q) * ((b * (q - 2.0) + a * (q + 2.0)) / q)
}
