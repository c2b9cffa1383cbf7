//! Exponential distribution with rate `lambda > 0`.
//!
//! `lambda = +inf` is accepted as the point mass at 0.

use rand::Rng;

use super::stable::{is_probability, zero_if};
use crate::engine::unit_uniform;

fn valid_rate(rate: f64) -> bool {
    !rate.is_nan() && rate > 0.0
}

fn density(x: f64, rate: f64, log_form: bool) -> f64 {
    if x.is_nan() || !valid_rate(rate) {
        return f64::NAN;
    }
    if x < 0.0 {
        return zero_if(log_form);
    }
    if rate == f64::INFINITY {
        return if x == 0.0 { f64::INFINITY } else { zero_if(log_form) };
    }
    let log_d = rate.ln() - rate * x;
    if log_form {
        log_d
    } else {
        log_d.exp()
    }
}

/// Exponential PDF `lambda e^(-lambda x)` for `x >= 0`.
pub fn exponential_pdf(x: f64, rate: f64) -> f64 {
    density(x, rate, false)
}

/// Log of the exponential PDF.
pub fn exponential_log_pdf(x: f64, rate: f64) -> f64 {
    density(x, rate, true)
}

/// Exponential CDF `1 - e^(-lambda x)`.
pub fn exponential_cdf(x: f64, rate: f64) -> f64 {
    if x.is_nan() || !valid_rate(rate) {
        return f64::NAN;
    }
    if x <= 0.0 {
        return if x == 0.0 && rate == f64::INFINITY { 1.0 } else { 0.0 };
    }
    -(-rate * x).exp_m1()
}

/// Exponential quantile `-ln(1 - p) / lambda`.
pub fn exponential_quantile(p: f64, rate: f64) -> f64 {
    if !valid_rate(rate) || !is_probability(p) {
        return f64::NAN;
    }
    if p == 0.0 || rate == f64::INFINITY {
        return 0.0;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }
    -(-p).ln_1p() / rate
}

/// One draw by inverse transform.
pub fn exponential_sample<R: Rng + ?Sized>(rate: f64, rng: &mut R) -> f64 {
    if !valid_rate(rate) {
        return f64::NAN;
    }
    exponential_quantile(unit_uniform(rng), rate)
}

/// Mean `1 / lambda`.
pub fn exponential_mean(rate: f64) -> f64 {
    if !valid_rate(rate) {
        return f64::NAN;
    }
    1.0 / rate
}

/// Variance `1 / lambda^2`.
pub fn exponential_var(rate: f64) -> f64 {
    if !valid_rate(rate) {
        return f64::NAN;
    }
    1.0 / (rate * rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::engine_from_seed;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return false;
        }
        (a - b).abs() <= tol
    }

    #[test]
    fn pdf_and_cdf_values() {
        assert!(approx_eq(exponential_pdf(1.0, 2.0), 2.0 * (-2.0f64).exp(), 1e-15));
        assert!(approx_eq(exponential_cdf(0.5, 2.0), 1.0 - (-1.0f64).exp(), 1e-15));
        assert_eq!(exponential_pdf(-1.0, 2.0), 0.0);
        assert_eq!(exponential_log_pdf(-1.0, 2.0), f64::NEG_INFINITY);
        assert_eq!(exponential_cdf(-1.0, 2.0), 0.0);
    }

    #[test]
    fn invalid_rate_is_nan() {
        assert!(exponential_pdf(1.0, 0.0).is_nan());
        assert!(exponential_cdf(1.0, -2.0).is_nan());
        assert!(exponential_quantile(0.5, f64::NAN).is_nan());
        assert!(exponential_mean(-1.0).is_nan());
    }

    #[test]
    fn quantile_boundaries() {
        assert_eq!(exponential_quantile(0.0, 3.0), 0.0);
        assert_eq!(exponential_quantile(1.0, 3.0), f64::INFINITY);
        assert!(exponential_quantile(1.5, 3.0).is_nan());
        let median = exponential_quantile(0.5, 3.0);
        assert!(approx_eq(median, 2.0f64.ln() / 3.0, 1e-15));
    }

    #[test]
    fn infinite_rate_is_point_mass_at_zero() {
        let inf = f64::INFINITY;
        assert_eq!(exponential_pdf(0.0, inf), inf);
        assert_eq!(exponential_pdf(0.1, inf), 0.0);
        assert_eq!(exponential_cdf(0.0, inf), 1.0);
        assert_eq!(exponential_quantile(0.7, inf), 0.0);
        assert_eq!(exponential_mean(inf), 0.0);
    }

    #[test]
    fn sample_mean_close_to_inverse_rate() {
        let mut rng = engine_from_seed(17);
        let n = 20_000;
        let mean = (0..n).map(|_| exponential_sample(4.0, &mut rng)).sum::<f64>() / n as f64;
        assert!(approx_eq(mean, 0.25, 0.01), "mean {}", mean);
    }
}
