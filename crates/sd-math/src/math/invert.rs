//! Numerical inversion of CDFs that have no closed-form quantile.

/// Lower end of every log-scale bracket; `e^-745` rounds to 0.
pub(crate) const LN_FLOOR: f64 = -745.0;

const MAX_ITERS: usize = 200;

/// Finds `x` with `cdf(x) = p` by bisecting `ln x` over `[e^ln_low, e^ln_high]`.
///
/// `cdf` must be non-decreasing on the bracket. Each step halves the ratio
/// `x_high / x_low`, so quantiles hundreds of decades below the upper end
/// converge as fast as ones near it. Stops once the bracket is below machine
/// epsilon in `ln x` or the midpoint no longer moves.
pub(crate) fn bisect_ln<F>(cdf: F, p: f64, mut ln_low: f64, mut ln_high: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    for _ in 0..MAX_ITERS {
        if ln_high - ln_low <= f64::EPSILON {
            break;
        }
        let ln_mid = 0.5 * (ln_low + ln_high);
        if ln_mid <= ln_low || ln_mid >= ln_high {
            break;
        }
        if cdf(ln_mid.exp()) < p {
            ln_low = ln_mid;
        } else {
            ln_high = ln_mid;
        }
    }
    (0.5 * (ln_low + ln_high)).exp()
}
