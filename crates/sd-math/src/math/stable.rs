//! Numerically stable scalar primitives shared by the distribution modules.

use std::f64::consts::{LN_2, PI};

const LOG_SQRT_2PI: f64 = 0.918_938_533_204_672_8; // 0.5 * ln(2*pi)
const LANCZOS_G: f64 = 7.0;
#[allow(clippy::excessive_precision)] // These are published numerical constants
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// Natural log of the Gamma function (log |Gamma(z)|).
///
/// Lanczos approximation, with the reflection formula for z < 0.5.
/// Poles (zero and the negative integers) return NaN.
pub fn log_gamma(z: f64) -> f64 {
    if z.is_nan() || z == f64::NEG_INFINITY {
        return f64::NAN;
    }
    if z == f64::INFINITY {
        return f64::INFINITY;
    }
    if z <= 0.0 && z == z.round() {
        return f64::NAN;
    }
    if z < 0.5 {
        let sin_pi = (PI * z).sin();
        if sin_pi == 0.0 {
            return f64::NAN;
        }
        return PI.ln() - sin_pi.abs().ln() - log_gamma(1.0 - z);
    }

    let shifted = z - 1.0;
    let series = LANCZOS_COEFFS
        .iter()
        .enumerate()
        .skip(1)
        .fold(LANCZOS_COEFFS[0], |acc, (i, coeff)| {
            acc + coeff / (shifted + i as f64)
        });
    let t = shifted + LANCZOS_G + 0.5;
    LOG_SQRT_2PI + (shifted + 0.5) * t.ln() - t + series.ln()
}

/// Alias for [`log_gamma`], matching the C `lgamma` name.
pub fn lgamma(x: f64) -> f64 {
    log_gamma(x)
}

/// Gamma function for positive arguments, computed as `exp(log_gamma(z))`.
///
/// Non-positive arguments return NaN; overflow returns +inf.
pub fn gamma_fn(z: f64) -> f64 {
    if z.is_nan() || z <= 0.0 {
        return f64::NAN;
    }
    log_gamma(z).exp()
}

/// log Beta(a, b) = log Gamma(a) + log Gamma(b) - log Gamma(a+b).
pub fn log_beta(a: f64, b: f64) -> f64 {
    log_gamma(a) + log_gamma(b) - log_gamma(a + b)
}

/// `ln(1 - exp(x))` for `x <= 0`.
///
/// Switches between `ln(-expm1(x))` and `ln1p(-exp(x))` at `-ln 2`
/// (Mächler, 2012). Positive `x` returns NaN.
pub fn log1m_exp(x: f64) -> f64 {
    if x.is_nan() || x > 0.0 {
        return f64::NAN;
    }
    if x == 0.0 {
        return f64::NEG_INFINITY;
    }
    if x > -LN_2 {
        (-x.exp_m1()).ln()
    } else {
        (-x.exp()).ln_1p()
    }
}

/// Stable log(sum(exp(values))). Empty input is the log of an empty sum.
pub fn log_sum_exp(values: &[f64]) -> f64 {
    if values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max.is_infinite() {
        return max;
    }
    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}

/// Stable log(exp(a) + exp(b)).
pub fn log_add_exp(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    if lo == f64::NEG_INFINITY || hi == f64::INFINITY {
        return hi;
    }
    hi + (lo - hi).exp().ln_1p()
}

/// Stable log(exp(a) - exp(b)). Requires a > b for a real-valued result.
pub fn log_sub_exp(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() || a < b {
        return f64::NAN;
    }
    if b == f64::NEG_INFINITY {
        return a;
    }
    if a == b {
        return f64::NEG_INFINITY;
    }
    if a == f64::INFINITY {
        return f64::INFINITY;
    }
    a + log1m_exp(b - a)
}

/// Log-domain value for an impossible outcome, or its linear-domain zero.
pub(crate) fn zero_if(log_form: bool) -> f64 {
    if log_form {
        f64::NEG_INFINITY
    } else {
        0.0
    }
}

/// Returns `value` or its natural log.
pub(crate) fn log_if(value: f64, log_form: bool) -> f64 {
    if log_form {
        value.ln()
    } else {
        value
    }
}

/// True when `p` is a probability (not NaN and inside `[0, 1]`).
pub(crate) fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return false;
        }
        (a - b).abs() <= tol
    }

    #[test]
    fn log_gamma_known_values() {
        assert!(approx_eq(log_gamma(1.0), 0.0, 1e-12));
        assert!(approx_eq(log_gamma(0.5), 0.5 * PI.ln(), 1e-10));
        assert!(approx_eq(log_gamma(5.0), 24.0f64.ln(), 1e-10));
    }

    #[test]
    fn log_gamma_poles_are_nan() {
        assert!(log_gamma(0.0).is_nan());
        assert!(log_gamma(-2.0).is_nan());
        assert!(log_gamma(f64::NEG_INFINITY).is_nan());
    }

    #[test]
    fn gamma_fn_matches_factorial() {
        assert!(approx_eq(gamma_fn(6.0), 120.0, 1e-8));
        assert!(approx_eq(gamma_fn(0.5), PI.sqrt(), 1e-10));
        assert!(gamma_fn(-0.5).is_nan());
    }

    #[test]
    fn log_beta_unit() {
        assert!(approx_eq(log_beta(1.0, 1.0), 0.0, 1e-12));
        // B(2, 3) = 1/12
        assert!(approx_eq(log_beta(2.0, 3.0), (1.0f64 / 12.0).ln(), 1e-10));
    }

    #[test]
    fn log1m_exp_both_branches() {
        for x in [-1e-3f64, -0.1, -0.5, -1.0, -5.0, -40.0] {
            let expected = (1.0 - x.exp()).ln();
            let tol = 1e-9 * expected.abs().max(1.0);
            assert!(approx_eq(log1m_exp(x), expected, tol), "x={}", x);
        }
        assert_eq!(log1m_exp(0.0), f64::NEG_INFINITY);
        assert_eq!(log1m_exp(f64::NEG_INFINITY), 0.0);
        assert!(log1m_exp(0.5).is_nan());
    }

    #[test]
    fn log_sum_exp_and_add_exp_agree() {
        assert!(approx_eq(log_sum_exp(&[0.0, 0.0]), LN_2, 1e-12));
        assert!(approx_eq(log_add_exp(0.0, 0.0), LN_2, 1e-12));
        assert!(approx_eq(log_sum_exp(&[1.0, 2.0]), log_add_exp(2.0, 1.0), 1e-12));
        assert_eq!(log_sum_exp(&[]), f64::NEG_INFINITY);
        assert_eq!(log_add_exp(f64::NEG_INFINITY, -3.0), -3.0);
        assert!(log_sum_exp(&[0.0, f64::NAN]).is_nan());
    }

    #[test]
    fn log_sub_exp_basic() {
        let out = log_sub_exp(2.0, 1.0);
        let expected = (2.0f64.exp() - 1.0f64.exp()).ln();
        assert!(approx_eq(out, expected, 1e-12));
        assert!(log_sub_exp(1.0, 2.0).is_nan());
        assert_eq!(log_sub_exp(2.0, 2.0), f64::NEG_INFINITY);
    }
}
