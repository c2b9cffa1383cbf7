//! Validated distribution objects.
//!
//! The free functions accept any parameters and answer NaN for bad ones.
//! These types check parameters once, in `new`, and then forward to the
//! free functions.

use rand::Rng;
use serde::Serialize;

use crate::containers::{cdf_each, log_pdf_each, pdf_each, quantile_each, Elementwise};
use crate::engine::unit_uniform;
use crate::error::{DistError, Result};
use crate::math::{beta, exponential, gamma, kumaraswamy, reciprocal, uniform};

#[cfg(feature = "ndarray")]
use ndarray::Array2;

/// A univariate continuous distribution with fixed parameters.
pub trait ContinuousDistribution {
    /// Catalog name, e.g. `"reciprocal"`.
    fn name(&self) -> &'static str;

    fn pdf(&self, x: f64) -> f64;

    fn log_pdf(&self, x: f64) -> f64;

    fn cdf(&self, x: f64) -> f64;

    /// Inverse CDF. NaN for `p` outside `[0, 1]`.
    fn quantile(&self, p: f64) -> f64;

    fn mean(&self) -> f64;

    fn variance(&self) -> f64;

    /// One draw. Defaults to inverse-transform sampling.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64
    where
        Self: Sized,
    {
        self.quantile(unit_uniform(rng))
    }

    fn pdf_all<C: Elementwise + ?Sized>(&self, xs: &C) -> C::Output
    where
        Self: Sized,
    {
        pdf_each(self, xs)
    }

    fn log_pdf_all<C: Elementwise + ?Sized>(&self, xs: &C) -> C::Output
    where
        Self: Sized,
    {
        log_pdf_each(self, xs)
    }

    fn cdf_all<C: Elementwise + ?Sized>(&self, xs: &C) -> C::Output
    where
        Self: Sized,
    {
        cdf_each(self, xs)
    }

    fn quantile_all<C: Elementwise + ?Sized>(&self, ps: &C) -> C::Output
    where
        Self: Sized,
    {
        quantile_each(self, ps)
    }

    /// `n` independent draws.
    fn sample_n<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<f64>
    where
        Self: Sized,
    {
        (0..n).map(|_| self.sample(rng)).collect()
    }

    /// A `rows x cols` matrix of independent draws, filled in row-major order.
    #[cfg(feature = "ndarray")]
    fn sample_matrix<R: Rng + ?Sized>(&self, rows: usize, cols: usize, rng: &mut R) -> Array2<f64>
    where
        Self: Sized,
    {
        Array2::from_shape_fn((rows, cols), |_| self.sample(rng))
    }
}

fn check_not_nan(name: &'static str, values: &[(&str, f64)]) -> Result<()> {
    match values.iter().find(|(_, v)| v.is_nan()) {
        Some((label, _)) => Err(DistError::invalid(name, format!("{label} is NaN"))),
        None => Ok(()),
    }
}

// ============================================================================
// Uniform
// ============================================================================

/// Continuous uniform on `[a, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Uniform {
    a: f64,
    b: f64,
}

impl Uniform {
    pub const NAME: &'static str = "uniform";

    /// Requires finite bounds with `a < b`.
    pub fn new(a: f64, b: f64) -> Result<Self> {
        check_not_nan(Self::NAME, &[("a", a), ("b", b)])?;
        if !(a.is_finite() && b.is_finite()) {
            return Err(DistError::invalid(Self::NAME, "bounds must be finite"));
        }
        if a >= b {
            return Err(DistError::invalid(Self::NAME, format!("a ({a}) must be below b ({b})")));
        }
        Ok(Self { a, b })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }
}

impl ContinuousDistribution for Uniform {
    fn name(&self) -> &'static str {
        Self::NAME
    }
    fn pdf(&self, x: f64) -> f64 {
        uniform::uniform_pdf(x, self.a, self.b)
    }
    fn log_pdf(&self, x: f64) -> f64 {
        uniform::uniform_log_pdf(x, self.a, self.b)
    }
    fn cdf(&self, x: f64) -> f64 {
        uniform::uniform_cdf(x, self.a, self.b)
    }
    fn quantile(&self, p: f64) -> f64 {
        uniform::uniform_quantile(p, self.a, self.b)
    }
    fn mean(&self) -> f64 {
        uniform::uniform_mean(self.a, self.b)
    }
    fn variance(&self) -> f64 {
        uniform::uniform_var(self.a, self.b)
    }
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        uniform::uniform_sample(self.a, self.b, rng)
    }
}

// ============================================================================
// Reciprocal
// ============================================================================

/// Log-uniform on `[a, b]` with `0 < a < b < inf`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reciprocal {
    a: f64,
    b: f64,
}

impl Reciprocal {
    pub const NAME: &'static str = "reciprocal";

    pub fn new(a: f64, b: f64) -> Result<Self> {
        check_not_nan(Self::NAME, &[("a", a), ("b", b)])?;
        if a <= 0.0 {
            return Err(DistError::invalid(Self::NAME, format!("a ({a}) must be positive")));
        }
        if !b.is_finite() {
            return Err(DistError::invalid(Self::NAME, "b must be finite"));
        }
        if a >= b {
            return Err(DistError::invalid(Self::NAME, format!("a ({a}) must be below b ({b})")));
        }
        debug_assert!(reciprocal::valid_params(a, b));
        Ok(Self { a, b })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }
}

impl ContinuousDistribution for Reciprocal {
    fn name(&self) -> &'static str {
        Self::NAME
    }
    fn pdf(&self, x: f64) -> f64 {
        reciprocal::reciprocal_pdf(x, self.a, self.b)
    }
    fn log_pdf(&self, x: f64) -> f64 {
        reciprocal::reciprocal_log_pdf(x, self.a, self.b)
    }
    fn cdf(&self, x: f64) -> f64 {
        reciprocal::reciprocal_cdf(x, self.a, self.b)
    }
    fn quantile(&self, p: f64) -> f64 {
        reciprocal::reciprocal_quantile(p, self.a, self.b)
    }
    fn mean(&self) -> f64 {
        reciprocal::reciprocal_mean(self.a, self.b)
    }
    fn variance(&self) -> f64 {
        reciprocal::reciprocal_var(self.a, self.b)
    }
}

// ============================================================================
// Kumaraswamy
// ============================================================================

/// Kumaraswamy on `[0, 1]`. Zero and infinite shapes are the point-mass limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kumaraswamy {
    a: f64,
    b: f64,
}

impl Kumaraswamy {
    pub const NAME: &'static str = "kumaraswamy";

    pub fn new(a: f64, b: f64) -> Result<Self> {
        check_not_nan(Self::NAME, &[("a", a), ("b", b)])?;
        if a < 0.0 || b < 0.0 {
            return Err(DistError::invalid(Self::NAME, "shapes must be non-negative"));
        }
        Ok(Self { a, b })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }
}

impl ContinuousDistribution for Kumaraswamy {
    fn name(&self) -> &'static str {
        Self::NAME
    }
    fn pdf(&self, x: f64) -> f64 {
        kumaraswamy::kumaraswamy_pdf(x, self.a, self.b)
    }
    fn log_pdf(&self, x: f64) -> f64 {
        kumaraswamy::kumaraswamy_log_pdf(x, self.a, self.b)
    }
    fn cdf(&self, x: f64) -> f64 {
        kumaraswamy::kumaraswamy_cdf(x, self.a, self.b)
    }
    fn quantile(&self, p: f64) -> f64 {
        kumaraswamy::kumaraswamy_quantile(p, self.a, self.b)
    }
    fn mean(&self) -> f64 {
        kumaraswamy::kumaraswamy_mean(self.a, self.b)
    }
    fn variance(&self) -> f64 {
        kumaraswamy::kumaraswamy_var(self.a, self.b)
    }
}

// ============================================================================
// Exponential
// ============================================================================

/// Exponential with rate `lambda > 0`; `+inf` is the point mass at 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Exponential {
    rate: f64,
}

impl Exponential {
    pub const NAME: &'static str = "exponential";

    pub fn new(rate: f64) -> Result<Self> {
        check_not_nan(Self::NAME, &[("rate", rate)])?;
        if rate <= 0.0 {
            return Err(DistError::invalid(Self::NAME, format!("rate ({rate}) must be positive")));
        }
        Ok(Self { rate })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl ContinuousDistribution for Exponential {
    fn name(&self) -> &'static str {
        Self::NAME
    }
    fn pdf(&self, x: f64) -> f64 {
        exponential::exponential_pdf(x, self.rate)
    }
    fn log_pdf(&self, x: f64) -> f64 {
        exponential::exponential_log_pdf(x, self.rate)
    }
    fn cdf(&self, x: f64) -> f64 {
        exponential::exponential_cdf(x, self.rate)
    }
    fn quantile(&self, p: f64) -> f64 {
        exponential::exponential_quantile(p, self.rate)
    }
    fn mean(&self) -> f64 {
        exponential::exponential_mean(self.rate)
    }
    fn variance(&self) -> f64 {
        exponential::exponential_var(self.rate)
    }
}

// ============================================================================
// Beta
// ============================================================================

/// Beta(alpha, beta) on `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Beta {
    alpha: f64,
    beta: f64,
}

impl Beta {
    pub const NAME: &'static str = "beta";

    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        check_not_nan(Self::NAME, &[("alpha", alpha), ("beta", beta)])?;
        if alpha <= 0.0 || beta <= 0.0 {
            return Err(DistError::invalid(Self::NAME, "shapes must be positive"));
        }
        if !(alpha + beta).is_finite() {
            return Err(DistError::invalid(Self::NAME, "shapes must be finite"));
        }
        Ok(Self { alpha, beta })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }
}

impl ContinuousDistribution for Beta {
    fn name(&self) -> &'static str {
        Self::NAME
    }
    fn pdf(&self, x: f64) -> f64 {
        beta::beta_pdf(x, self.alpha, self.beta)
    }
    fn log_pdf(&self, x: f64) -> f64 {
        beta::beta_log_pdf(x, self.alpha, self.beta)
    }
    fn cdf(&self, x: f64) -> f64 {
        beta::beta_cdf(x, self.alpha, self.beta)
    }
    fn quantile(&self, p: f64) -> f64 {
        beta::beta_quantile(p, self.alpha, self.beta)
    }
    fn mean(&self) -> f64 {
        beta::beta_mean(self.alpha, self.beta)
    }
    fn variance(&self) -> f64 {
        beta::beta_var(self.alpha, self.beta)
    }
}

// ============================================================================
// Gamma
// ============================================================================

/// Gamma with shape `alpha` and rate `beta`, both positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gamma {
    shape: f64,
    rate: f64,
}

impl Gamma {
    pub const NAME: &'static str = "gamma";

    pub fn new(shape: f64, rate: f64) -> Result<Self> {
        check_not_nan(Self::NAME, &[("shape", shape), ("rate", rate)])?;
        if shape <= 0.0 || rate <= 0.0 {
            return Err(DistError::invalid(Self::NAME, "shape and rate must be positive"));
        }
        if !(shape.is_finite() && rate.is_finite()) {
            return Err(DistError::invalid(Self::NAME, "shape and rate must be finite"));
        }
        Ok(Self { shape, rate })
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// `S(t) = 1 - F(t)`, computed from the upper incomplete gamma.
    pub fn survival(&self, t: f64) -> f64 {
        gamma::gamma_survival(t, self.shape, self.rate)
    }

    pub fn hazard(&self, t: f64) -> f64 {
        gamma::gamma_hazard(t, self.shape, self.rate)
    }

    pub fn cum_hazard(&self, t: f64) -> f64 {
        gamma::gamma_cum_hazard(t, self.shape, self.rate)
    }
}

impl ContinuousDistribution for Gamma {
    fn name(&self) -> &'static str {
        Self::NAME
    }
    fn pdf(&self, x: f64) -> f64 {
        gamma::gamma_pdf(x, self.shape, self.rate)
    }
    fn log_pdf(&self, x: f64) -> f64 {
        gamma::gamma_log_pdf(x, self.shape, self.rate)
    }
    fn cdf(&self, x: f64) -> f64 {
        gamma::gamma_cdf(x, self.shape, self.rate)
    }
    fn quantile(&self, p: f64) -> f64 {
        gamma::gamma_quantile(p, self.shape, self.rate)
    }
    fn mean(&self) -> f64 {
        gamma::gamma_mean(self.shape, self.rate)
    }
    fn variance(&self) -> f64 {
        gamma::gamma_var(self.shape, self.rate)
    }
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        gamma::gamma_sample(self.shape, self.rate, rng)
    }
}

/// Lets each typed object plug into `rng.sample(dist)` and `sample_iter`.
macro_rules! impl_rand_distribution {
    ($($ty:ty),* $(,)?) => {
        $(
            impl rand::distr::Distribution<f64> for $ty {
                fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
                    ContinuousDistribution::sample(self, rng)
                }
            }
        )*
    };
}

impl_rand_distribution!(Uniform, Reciprocal, Kumaraswamy, Exponential, Beta, Gamma);
