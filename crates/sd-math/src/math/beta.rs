//! Beta distribution on `[0, 1]` with shapes `alpha > 0`, `beta > 0`.
//!
//! The CDF is the regularized incomplete beta function. The quantile has no
//! closed form, so it is found by bisection on `ln x` followed by a short
//! Newton polish that may not leave the bisection bracket. Sampling stays on
//! the same inverse-transform path as the closed-form distributions.

use rand::Rng;

use super::incomplete::inc_beta;
use super::invert::{bisect_ln, LN_FLOOR};
use super::stable::{is_probability, log_beta};
use crate::engine::unit_uniform;

const NEWTON_ITERS: usize = 4;
const NEWTON_WINDOW: f64 = 1e-12;
const QUANTILE_TOL: f64 = 1e-15;

fn valid_shapes(alpha: f64, beta: f64) -> bool {
    !(alpha.is_nan() || beta.is_nan()) && alpha > 0.0 && beta > 0.0 && (alpha + beta).is_finite()
}

/// Log of the Beta PDF at x.
pub fn beta_log_pdf(x: f64, alpha: f64, beta: f64) -> f64 {
    if x.is_nan() || !valid_shapes(alpha, beta) {
        return f64::NAN;
    }
    if !(0.0..=1.0).contains(&x) {
        return f64::NEG_INFINITY;
    }
    // At an endpoint only one shape matters: < 1 diverges, > 1 vanishes.
    if x == 0.0 || x == 1.0 {
        let shape = if x == 0.0 { alpha } else { beta };
        return if shape < 1.0 {
            f64::INFINITY
        } else if shape > 1.0 {
            f64::NEG_INFINITY
        } else {
            -log_beta(alpha, beta)
        };
    }
    (alpha - 1.0) * x.ln() + (beta - 1.0) * (-x).ln_1p() - log_beta(alpha, beta)
}

/// Beta PDF at x.
pub fn beta_pdf(x: f64, alpha: f64, beta: f64) -> f64 {
    let log_pdf = beta_log_pdf(x, alpha, beta);
    if log_pdf.is_nan() {
        return f64::NAN;
    }
    if log_pdf == f64::INFINITY {
        return f64::INFINITY;
    }
    log_pdf.exp()
}

/// Beta CDF, `I_x(alpha, beta)`.
pub fn beta_cdf(x: f64, alpha: f64, beta: f64) -> f64 {
    if x.is_nan() || !valid_shapes(alpha, beta) {
        return f64::NAN;
    }
    inc_beta(x, alpha, beta)
}

/// Beta quantile (inverse CDF).
pub fn beta_quantile(p: f64, alpha: f64, beta: f64) -> f64 {
    if !valid_shapes(alpha, beta) || !is_probability(p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return 0.0;
    }
    if p == 1.0 {
        return 1.0;
    }

    let x = bisect_ln(|x| inc_beta(x, alpha, beta), p, LN_FLOOR, 0.0);
    let low = x * (1.0 - NEWTON_WINDOW);
    let high = (x * (1.0 + NEWTON_WINDOW)).min(1.0);
    newton_polish(x, p, alpha, beta, low, high)
}

/// A few Newton steps on `I_x - p`, rejecting any step that leaves `(low, high)`.
fn newton_polish(mut x: f64, p: f64, alpha: f64, beta: f64, low: f64, high: f64) -> f64 {
    for _ in 0..NEWTON_ITERS {
        let density = beta_pdf(x, alpha, beta);
        if !density.is_finite() || density <= 0.0 {
            break;
        }
        let next = x - (inc_beta(x, alpha, beta) - p) / density;
        if !(next > low && next < high) {
            break;
        }
        if (next - x).abs() <= QUANTILE_TOL * x {
            return next;
        }
        x = next;
    }
    x
}

/// One draw by inverse transform.
pub fn beta_sample<R: Rng + ?Sized>(alpha: f64, beta: f64, rng: &mut R) -> f64 {
    if !valid_shapes(alpha, beta) {
        return f64::NAN;
    }
    beta_quantile(unit_uniform(rng), alpha, beta)
}

/// Mean of Beta(alpha, beta) = alpha / (alpha + beta).
pub fn beta_mean(alpha: f64, beta: f64) -> f64 {
    if !valid_shapes(alpha, beta) {
        return f64::NAN;
    }
    alpha / (alpha + beta)
}

/// Variance of Beta(alpha, beta).
pub fn beta_var(alpha: f64, beta: f64) -> f64 {
    if !valid_shapes(alpha, beta) {
        return f64::NAN;
    }
    let sum = alpha + beta;
    (alpha * beta) / (sum * sum * (sum + 1.0))
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
    fn mean_and_var_match_closed_form() {
        assert!(approx_eq(beta_mean(2.0, 5.0), 2.0 / 7.0, 1e-12));
        assert!(approx_eq(beta_var(2.0, 5.0), 10.0 / 392.0, 1e-12));
    }

    #[test]
    fn pdf_known_value_beta_2_5() {
        // 30 x (1-x)^4 at x = 0.2
        assert!(approx_eq(beta_pdf(0.2, 2.0, 5.0), 2.4576, 1e-12));
    }

    #[test]
    fn pdf_symmetry() {
        let (a, b, x) = (2.3, 4.7, 0.27);
        assert!(approx_eq(beta_pdf(x, a, b), beta_pdf(1.0 - x, b, a), 1e-12));
    }

    #[test]
    fn pdf_endpoints() {
        assert_eq!(beta_pdf(0.0, 0.5, 2.0), f64::INFINITY);
        assert_eq!(beta_pdf(0.0, 2.0, 2.0), 0.0);
        assert!(approx_eq(beta_pdf(1.0, 3.0, 1.0), 3.0, 1e-12));
        assert_eq!(beta_pdf(1.2, 2.0, 2.0), 0.0);
    }

    #[test]
    fn invalid_shapes_are_nan() {
        assert!(beta_pdf(0.5, 0.0, 1.0).is_nan());
        assert!(beta_cdf(0.5, 1.0, -1.0).is_nan());
        assert!(beta_quantile(0.5, f64::NAN, 1.0).is_nan());
        assert!(beta_quantile(0.5, f64::INFINITY, 1.0).is_nan());
        assert!(beta_mean(-1.0, 1.0).is_nan());
    }

    #[test]
    fn quantile_inverts_cdf() {
        for (a, b) in [(2.0, 5.0), (0.5, 0.5), (8.0, 2.0), (50.0, 5.0)] {
            for p in [0.01, 0.25, 0.5, 0.95] {
                let x = beta_quantile(p, a, b);
                assert!(approx_eq(beta_cdf(x, a, b), p, 1e-10), "a={} b={} p={}", a, b, p);
            }
        }
    }

    #[test]
    fn small_shape_quantile_stays_off_zero() {
        // Beta(a, 1) has CDF x^a, so the median is 0.5^(1/a).
        let q = beta_quantile(0.5, 0.02, 1.0);
        let expected = 0.5f64.powi(50);
        assert!(q > 0.0);
        assert!(((q - expected) / expected).abs() < 1e-10, "q = {:e}", q);
        assert!(approx_eq(beta_cdf(q, 0.02, 1.0), 0.5, 1e-12));

        let q = beta_quantile(0.5, 1.0, 0.02);
        assert!(approx_eq(1.0 - q, expected, 3e-16), "1 - q = {:e}", 1.0 - q);
    }

    #[test]
    fn small_shape_draws_are_not_all_zero() {
        let mut rng = engine_from_seed(8);
        let draws: Vec<f64> = (0..200).map(|_| beta_sample(0.05, 1.0, &mut rng)).collect();
        assert!(draws.iter().filter(|&&x| x > 0.0).count() > 190);
        assert!(draws.iter().all(|&x| (0.0..=1.0).contains(&x)));
    }

    #[test]
    fn quantile_uniform_is_identity() {
        assert!(approx_eq(beta_quantile(0.73, 1.0, 1.0), 0.73, 1e-12));
        assert_eq!(beta_quantile(0.0, 2.0, 3.0), 0.0);
        assert_eq!(beta_quantile(1.0, 2.0, 3.0), 1.0);
        assert!(beta_quantile(-0.5, 2.0, 3.0).is_nan());
    }

    #[test]
    fn sample_mean_matches() {
        let mut rng = engine_from_seed(23);
        let n = 5_000;
        let mean = (0..n).map(|_| beta_sample(2.0, 5.0, &mut rng)).sum::<f64>() / n as f64;
        assert!(approx_eq(mean, 2.0 / 7.0, 0.01), "mean {}", mean);
    }
}
