//! Gamma distribution utilities.
//!
//! Provides PDF, CDF, survival, hazard, quantile and sampling for the Gamma
//! distribution.
//!
//! # Parameterization
//!
//! Uses **rate parameterization**: `Gamma(α, β)` where:
//! - `α` = shape parameter (α > 0)
//! - `β` = rate parameter (β > 0)
//!
//! The density is: `f(t) = β^α / Γ(α) * t^(α-1) * e^(-βt)`
//!
//! This is equivalent to scale parameterization with `θ = 1/β`.

use rand::Rng;

use super::incomplete::{gamma_p, gamma_q};
use super::invert::{bisect_ln, LN_FLOOR};
use super::stable::{is_probability, log_gamma};
use crate::engine::unit_uniform;

fn valid_params(alpha: f64, beta: f64) -> bool {
    !(alpha.is_nan() || beta.is_nan())
        && alpha > 0.0
        && beta > 0.0
        && alpha.is_finite()
        && beta.is_finite()
}

/// Log of the Gamma distribution PDF at t.
///
/// # Arguments
/// * `t` - The value at which to evaluate
/// * `alpha` - Shape parameter (α > 0)
/// * `beta` - Rate parameter (β > 0)
pub fn gamma_log_pdf(t: f64, alpha: f64, beta: f64) -> f64 {
    if t.is_nan() || !valid_params(alpha, beta) {
        return f64::NAN;
    }
    if t < 0.0 || t == f64::INFINITY {
        return f64::NEG_INFINITY;
    }
    if t == 0.0 {
        return if alpha < 1.0 {
            f64::INFINITY
        } else if alpha == 1.0 {
            beta.ln()
        } else {
            f64::NEG_INFINITY
        };
    }
    alpha * beta.ln() - log_gamma(alpha) + (alpha - 1.0) * t.ln() - beta * t
}

/// Gamma distribution PDF at t.
pub fn gamma_pdf(t: f64, alpha: f64, beta: f64) -> f64 {
    let log_pdf = gamma_log_pdf(t, alpha, beta);
    if log_pdf.is_nan() {
        return f64::NAN;
    }
    if log_pdf == f64::INFINITY {
        return f64::INFINITY;
    }
    log_pdf.exp()
}

/// CDF of the Gamma distribution, `P(α, βt)`.
pub fn gamma_cdf(t: f64, alpha: f64, beta: f64) -> f64 {
    if t.is_nan() || !valid_params(alpha, beta) {
        return f64::NAN;
    }
    if t <= 0.0 {
        return 0.0;
    }
    gamma_p(alpha, beta * t)
}

/// Log of the Gamma CDF.
pub fn gamma_log_cdf(t: f64, alpha: f64, beta: f64) -> f64 {
    let cdf = gamma_cdf(t, alpha, beta);
    if cdf.is_nan() {
        return f64::NAN;
    }
    cdf.ln()
}

/// Survival function `S(t) = Q(α, βt)`.
pub fn gamma_survival(t: f64, alpha: f64, beta: f64) -> f64 {
    if t.is_nan() || !valid_params(alpha, beta) {
        return f64::NAN;
    }
    if t <= 0.0 {
        return 1.0;
    }
    gamma_q(alpha, beta * t)
}

/// Log of the survival function.
pub fn gamma_log_survival(t: f64, alpha: f64, beta: f64) -> f64 {
    let surv = gamma_survival(t, alpha, beta);
    if surv.is_nan() {
        return f64::NAN;
    }
    surv.ln()
}

/// Hazard rate `h(t) = f(t) / S(t)`, computed in the log domain.
pub fn gamma_hazard(t: f64, alpha: f64, beta: f64) -> f64 {
    if t.is_nan() || !valid_params(alpha, beta) || t < 0.0 {
        return f64::NAN;
    }
    if t == 0.0 {
        return if alpha < 1.0 {
            f64::INFINITY
        } else if alpha == 1.0 {
            beta
        } else {
            0.0
        };
    }
    let log_pdf = gamma_log_pdf(t, alpha, beta);
    let log_surv = gamma_log_survival(t, alpha, beta);
    if log_surv == f64::NEG_INFINITY {
        return f64::INFINITY;
    }
    if log_pdf == f64::NEG_INFINITY {
        return 0.0;
    }
    (log_pdf - log_surv).exp()
}

/// Cumulative hazard `H(t) = -ln S(t)`.
pub fn gamma_cum_hazard(t: f64, alpha: f64, beta: f64) -> f64 {
    -gamma_log_survival(t, alpha, beta)
}

/// Gamma quantile (inverse CDF).
///
/// Doubles an upper bracket from the mean until it covers `p`, then bisects
/// `ln t` on `P(α, t)` down to the smallest positive double. `p = 1` returns
/// +inf.
pub fn gamma_quantile(p: f64, alpha: f64, beta: f64) -> f64 {
    if !valid_params(alpha, beta) || !is_probability(p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return 0.0;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    // Work on the unit-rate scale and divide by β at the end.
    let mut high = alpha.max(1.0);
    while gamma_p(alpha, high) < p {
        high *= 2.0;
        if !high.is_finite() {
            return f64::INFINITY;
        }
    }

    bisect_ln(|t| gamma_p(alpha, t), p, LN_FLOOR, high.ln()) / beta
}

/// One draw from Gamma(α, β) by Marsaglia–Tsang.
///
/// Shapes below 1 are boosted to α + 1 and corrected with `U^(1/α)`.
pub fn gamma_sample<R: Rng + ?Sized>(alpha: f64, beta: f64, rng: &mut R) -> f64 {
    if !valid_params(alpha, beta) {
        return f64::NAN;
    }
    standard_gamma(alpha, rng) / beta
}

fn standard_gamma<R: Rng + ?Sized>(alpha: f64, rng: &mut R) -> f64 {
    if alpha < 1.0 {
        let u = unit_uniform(rng);
        return standard_gamma(alpha + 1.0, rng) * u.powf(1.0 / alpha);
    }

    let d = alpha - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();
    loop {
        let z = standard_normal(rng);
        let v = 1.0 + c * z;
        if v <= 0.0 {
            continue;
        }
        let v = v * v * v;
        let u = unit_uniform(rng);
        if u < 1.0 - 0.0331 * z.powi(4) {
            return d * v;
        }
        if u > 0.0 && u.ln() < 0.5 * z * z + d * (1.0 - v + v.ln()) {
            return d * v;
        }
    }
}

/// Box–Muller draw from N(0, 1).
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - U lies in (0, 1], so the log is finite.
    let u1 = 1.0 - unit_uniform(rng);
    let u2 = unit_uniform(rng);
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Mean of Gamma(α, β): α / β.
pub fn gamma_mean(alpha: f64, beta: f64) -> f64 {
    if !valid_params(alpha, beta) {
        return f64::NAN;
    }
    alpha / beta
}

/// Variance of Gamma(α, β): α / β².
pub fn gamma_var(alpha: f64, beta: f64) -> f64 {
    if !valid_params(alpha, beta) {
        return f64::NAN;
    }
    alpha / (beta * beta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::engine_from_seed;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return false;
        }
        if a.is_infinite() && b.is_infinite() {
            return a.is_sign_positive() == b.is_sign_positive();
        }
        (a - b).abs() <= tol
    }

    // ==================== Exponential special case ====================

    #[test]
    fn exponential_pdf_matches_gamma_1_beta() {
        let beta: f64 = 2.5;
        let t: f64 = 1.0;
        let expected = beta.ln() - beta * t;
        assert!(approx_eq(gamma_log_pdf(t, 1.0, beta), expected, 1e-10));
    }

    #[test]
    fn exponential_hazard_is_constant_beta() {
        for t in [0.0, 0.5, 1.0, 2.0, 5.0] {
            let h = gamma_hazard(t, 1.0, 3.0);
            assert!(approx_eq(h, 3.0, 1e-8), "hazard at t={}: {}", t, h);
        }
    }

    // ==================== Golden values ====================

    #[test]
    fn gamma_pdf_known_values() {
        // Gamma(3, 2) at t=0.5: 8/2 * 0.25 * e^-1 = e^-1
        assert!(approx_eq(gamma_pdf(0.5, 3.0, 2.0), (-1.0f64).exp(), 1e-12));
        assert!(approx_eq(gamma_pdf(1.0, 2.0, 1.0), (-1.0f64).exp(), 1e-12));
    }

    #[test]
    fn cdf_and_survival_complement() {
        let (alpha, beta, t) = (2.5, 1.5, 1.2);
        let total = gamma_cdf(t, alpha, beta) + gamma_survival(t, alpha, beta);
        assert!(approx_eq(total, 1.0, 1e-12));
        assert!(approx_eq(gamma_cum_hazard(t, alpha, beta), -gamma_log_survival(t, alpha, beta), 1e-15));
        assert!(approx_eq(gamma_log_cdf(t, alpha, beta), gamma_cdf(t, alpha, beta).ln(), 1e-15));
    }

    // ==================== Quantile ====================

    #[test]
    fn quantile_inverts_cdf() {
        for (alpha, beta) in [(0.5, 1.0), (2.0, 3.0), (9.0, 0.5), (100.0, 2.0)] {
            for p in [0.001, 0.1, 0.5, 0.9, 0.999] {
                let t = gamma_quantile(p, alpha, beta);
                let back = gamma_cdf(t, alpha, beta);
                assert!(approx_eq(back, p, 1e-10), "α={} β={} p={}: cdf(q)={}", alpha, beta, p, back);
            }
        }
    }

    #[test]
    fn quantile_tiny_shape_reaches_deep_lower_tail() {
        for alpha in [0.01, 0.005] {
            for p in [0.05, 0.3, 0.5, 0.9] {
                let t = gamma_quantile(p, alpha, 1.0);
                assert!(t > 0.0 && t.is_finite(), "α={} p={}: t={:e}", alpha, p, t);
                let back = gamma_cdf(t, alpha, 1.0);
                assert!(approx_eq(back, p, 1e-10), "α={} p={}: cdf(q)={}", alpha, p, back);
            }
        }
        // P(α, t) ≈ t^α / Γ(α+1) this far down.
        let t = gamma_quantile(0.3, 0.005, 1.0);
        assert!(t < 1e-100, "t = {:e}", t);
    }

    #[test]
    fn quantile_exponential_closed_form() {
        let t = gamma_quantile(0.5, 1.0, 2.0);
        assert!(approx_eq(t, 2.0f64.ln() / 2.0, 1e-12));
    }

    #[test]
    fn quantile_boundaries() {
        assert_eq!(gamma_quantile(0.0, 2.0, 1.0), 0.0);
        assert_eq!(gamma_quantile(1.0, 2.0, 1.0), f64::INFINITY);
        assert!(gamma_quantile(1.01, 2.0, 1.0).is_nan());
        assert!(gamma_quantile(0.5, 0.0, 1.0).is_nan());
    }

    // ==================== Edge cases ====================

    #[test]
    fn invalid_params_return_nan() {
        assert!(gamma_log_pdf(1.0, -1.0, 1.0).is_nan());
        assert!(gamma_cdf(1.0, -1.0, 1.0).is_nan());
        assert!(gamma_log_pdf(1.0, 0.0, 1.0).is_nan());
        assert!(gamma_survival(1.0, 1.0, -1.0).is_nan());
        assert!(gamma_hazard(1.0, 1.0, 0.0).is_nan());
        assert!(gamma_log_pdf(f64::NAN, 1.0, 1.0).is_nan());
    }

    #[test]
    fn negative_t_boundaries() {
        assert_eq!(gamma_log_pdf(-1.0, 2.0, 1.0), f64::NEG_INFINITY);
        assert_eq!(gamma_cdf(-1.0, 2.0, 1.0), 0.0);
        assert_eq!(gamma_survival(0.0, 2.0, 1.0), 1.0);
        assert_eq!(gamma_log_pdf(0.0, 0.5, 1.0), f64::INFINITY);
        assert_eq!(gamma_log_pdf(0.0, 2.0, 1.0), f64::NEG_INFINITY);
    }

    // ==================== Sampling ====================

    #[test]
    fn sample_moments() {
        for (alpha, beta) in [(0.4, 1.0), (3.0, 2.0)] {
            let mut rng = engine_from_seed(31);
            let n = 20_000;
            let draws: Vec<f64> = (0..n).map(|_| gamma_sample(alpha, beta, &mut rng)).collect();
            assert!(draws.iter().all(|&x| x >= 0.0));
            let mean = draws.iter().sum::<f64>() / n as f64;
            let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
            assert!(approx_eq(mean, gamma_mean(alpha, beta), 0.03), "α={} mean {}", alpha, mean);
            assert!(approx_eq(var, gamma_var(alpha, beta), 0.08), "α={} var {}", alpha, var);
        }
    }
}
