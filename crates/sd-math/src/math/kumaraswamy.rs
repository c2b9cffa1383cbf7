//! Kumaraswamy distribution on `[0, 1]` with shapes `a >= 0`, `b >= 0`.
//!
//! `F(x) = 1 - (1 - x^a)^b`, which inverts in closed form:
//! `Q(p) = (1 - (1 - p)^(1/b))^(1/a)`.
//!
//! Zero and infinite shapes are accepted. They collapse the distribution onto
//! point masses, and every function returns the matching limiting value:
//!
//! | shapes                         | limit                          |
//! |--------------------------------|--------------------------------|
//! | `a = 0` and `b = 0`            | half the mass at 0, half at 1  |
//! | `a = 0`, or `b = inf`, a finite | all mass at 0                 |
//! | `b = 0`, or `a = inf`, b finite | all mass at 1                 |
//! | `a = b = inf`                  | all mass at 0.5                |

use rand::Rng;

use super::stable::{is_probability, log1m_exp, log_beta, log_if, zero_if};
use crate::engine::unit_uniform;

/// Where a degenerate Kumaraswamy puts its mass.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Atom {
    Zero,
    One,
    Half,
    ZeroAndOne,
}

impl Atom {
    fn cdf(self, x: f64) -> f64 {
        let step = |at: f64| if x < at { 0.0 } else { 1.0 };
        match self {
            Atom::Zero => step(0.0),
            Atom::One => step(1.0),
            Atom::Half => step(0.5),
            Atom::ZeroAndOne => 0.5 * (step(0.0) + step(1.0)),
        }
    }

    fn quantile(self, p: f64) -> f64 {
        match self {
            Atom::Zero => 0.0,
            Atom::One => 1.0,
            Atom::Half => 0.5,
            Atom::ZeroAndOne if p < 0.5 => 0.0,
            Atom::ZeroAndOne if p > 0.5 => 1.0,
            Atom::ZeroAndOne => 0.5,
        }
    }

    fn density(self, x: f64, log_form: bool) -> f64 {
        let on_atom = match self {
            Atom::Zero => x == 0.0,
            Atom::One => x == 1.0,
            Atom::Half => x == 0.5,
            Atom::ZeroAndOne => x == 0.0 || x == 1.0,
        };
        if on_atom {
            f64::INFINITY
        } else {
            zero_if(log_form)
        }
    }

    fn mean(self) -> f64 {
        match self {
            Atom::Zero => 0.0,
            Atom::One => 1.0,
            Atom::Half | Atom::ZeroAndOne => 0.5,
        }
    }

    fn variance(self) -> f64 {
        match self {
            Atom::ZeroAndOne => 0.25,
            _ => 0.0,
        }
    }
}

fn valid_params(a: f64, b: f64) -> bool {
    !(a.is_nan() || b.is_nan() || a < 0.0 || b < 0.0)
}

/// Classifies validated shapes; `None` means the regular case `0 < a, b < inf`.
fn atom(a: f64, b: f64) -> Option<Atom> {
    let a_inf = a == f64::INFINITY;
    let b_inf = b == f64::INFINITY;
    if a == 0.0 && b == 0.0 {
        Some(Atom::ZeroAndOne)
    } else if a == 0.0 || (b_inf && !a_inf) {
        Some(Atom::Zero)
    } else if b == 0.0 || (a_inf && !b_inf) {
        Some(Atom::One)
    } else if a_inf && b_inf {
        Some(Atom::Half)
    } else {
        None
    }
}

fn density(x: f64, a: f64, b: f64, log_form: bool) -> f64 {
    if x.is_nan() || !valid_params(a, b) {
        return f64::NAN;
    }
    if let Some(atom) = atom(a, b) {
        return atom.density(x, log_form);
    }
    if !(0.0..=1.0).contains(&x) {
        return zero_if(log_form);
    }
    // Endpoints: the factor with a zero base decides the limit.
    if x == 0.0 || x == 1.0 {
        let exponent = if x == 0.0 { a - 1.0 } else { b - 1.0 };
        return if exponent < 0.0 {
            f64::INFINITY
        } else if exponent > 0.0 {
            zero_if(log_form)
        } else {
            log_if(a * b, log_form)
        };
    }
    if log_form {
        let log_x = x.ln();
        a.ln() + b.ln() + (a - 1.0) * log_x + (b - 1.0) * log1m_exp(a * log_x)
    } else {
        a * b * x.powf(a - 1.0) * (1.0 - x.powf(a)).powf(b - 1.0)
    }
}

/// Kumaraswamy PDF `a b x^(a-1) (1 - x^a)^(b-1)` on `[0, 1]`.
pub fn kumaraswamy_pdf(x: f64, a: f64, b: f64) -> f64 {
    density(x, a, b, false)
}

/// Log of the Kumaraswamy PDF, evaluated in the log domain.
pub fn kumaraswamy_log_pdf(x: f64, a: f64, b: f64) -> f64 {
    density(x, a, b, true)
}

/// Kumaraswamy CDF `1 - (1 - x^a)^b`.
pub fn kumaraswamy_cdf(x: f64, a: f64, b: f64) -> f64 {
    if x.is_nan() || !valid_params(a, b) {
        return f64::NAN;
    }
    if let Some(atom) = atom(a, b) {
        return atom.cdf(x);
    }
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    -(b * (-x.powf(a)).ln_1p()).exp_m1()
}

/// Below this probability the quantile switches to the cancellation-free form.
const SMALL_P: f64 = 1e-8;

/// Kumaraswamy quantile function.
///
/// Order of checks: invalid shapes → NaN; `p` NaN or outside `[0, 1]` → NaN;
/// `p = 0` → 0; `p = 1` → 1; zero or infinite shapes → the limits in the
/// module table; otherwise the closed form.
///
/// # Example
/// ```
/// use sd_math::kumaraswamy::kumaraswamy_quantile;
///
/// let q = kumaraswamy_quantile(0.5, 3.0, 2.0);
/// assert!((q - 0.6641045243088701).abs() < 1e-15);
/// assert_eq!(kumaraswamy_quantile(0.3, 0.0, 0.0), 0.0);
/// ```
pub fn kumaraswamy_quantile(p: f64, a: f64, b: f64) -> f64 {
    if !valid_params(a, b) || !is_probability(p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return 0.0;
    }
    if p == 1.0 {
        return 1.0;
    }
    if let Some(atom) = atom(a, b) {
        return atom.quantile(p);
    }
    // 1 - (1-p)^(1/b) cancels to 0 for tiny p; the expm1/ln1p form does not.
    let inner = if p < SMALL_P {
        -((-p).ln_1p() / b).exp_m1()
    } else {
        1.0 - (1.0 - p).powf(1.0 / b)
    };
    inner.powf(1.0 / a)
}

/// One draw by inverse transform of a `U[0, 1)` variate.
pub fn kumaraswamy_sample<R: Rng + ?Sized>(a: f64, b: f64, rng: &mut R) -> f64 {
    if !valid_params(a, b) {
        return f64::NAN;
    }
    kumaraswamy_quantile(unit_uniform(rng), a, b)
}

/// Mean `b B(1 + 1/a, b)`.
pub fn kumaraswamy_mean(a: f64, b: f64) -> f64 {
    if !valid_params(a, b) {
        return f64::NAN;
    }
    if let Some(atom) = atom(a, b) {
        return atom.mean();
    }
    raw_moment(1.0, a, b)
}

/// Variance `b B(1 + 2/a, b) - mean^2`.
pub fn kumaraswamy_var(a: f64, b: f64) -> f64 {
    if !valid_params(a, b) {
        return f64::NAN;
    }
    if let Some(atom) = atom(a, b) {
        return atom.variance();
    }
    let mean = raw_moment(1.0, a, b);
    raw_moment(2.0, a, b) - mean * mean
}

/// `E[X^n] = b B(1 + n/a, b)`.
fn raw_moment(n: f64, a: f64, b: f64) -> f64 {
    (b.ln() + log_beta(1.0 + n / a, b)).exp()
}
