//! Element-wise evaluation over scalars, sequences and matrices.
//!
//! Output element `i` is the scalar function applied to input element `i`;
//! the output has the shape of the input.

#[cfg(feature = "ndarray")]
use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::distribution::ContinuousDistribution;

/// A container of `f64` values that can be mapped element by element.
pub trait Elementwise {
    /// Container produced by mapping; same shape as `Self`.
    type Output;

    fn map_elements<F>(&self, f: F) -> Self::Output
    where
        F: Fn(f64) -> f64;
}

impl Elementwise for f64 {
    type Output = f64;

    fn map_elements<F>(&self, f: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        f(*self)
    }
}

impl Elementwise for [f64] {
    type Output = Vec<f64>;

    fn map_elements<F>(&self, f: F) -> Vec<f64>
    where
        F: Fn(f64) -> f64,
    {
        self.iter().map(|&x| f(x)).collect()
    }
}

impl Elementwise for Vec<f64> {
    type Output = Vec<f64>;

    fn map_elements<F>(&self, f: F) -> Vec<f64>
    where
        F: Fn(f64) -> f64,
    {
        self.as_slice().map_elements(f)
    }
}

impl<const N: usize> Elementwise for [f64; N] {
    type Output = [f64; N];

    fn map_elements<F>(&self, f: F) -> [f64; N]
    where
        F: Fn(f64) -> f64,
    {
        self.map(f)
    }
}

#[cfg(feature = "ndarray")]
impl<S, D> Elementwise for ArrayBase<S, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    type Output = Array<f64, D>;

    fn map_elements<F>(&self, f: F) -> Array<f64, D>
    where
        F: Fn(f64) -> f64,
    {
        self.mapv(f)
    }
}

/// Density of `dist` at every element of `xs`.
pub fn pdf_each<D, C>(dist: &D, xs: &C) -> C::Output
where
    D: ContinuousDistribution + ?Sized,
    C: Elementwise + ?Sized,
{
    xs.map_elements(|x| dist.pdf(x))
}

/// Log-density of `dist` at every element of `xs`.
pub fn log_pdf_each<D, C>(dist: &D, xs: &C) -> C::Output
where
    D: ContinuousDistribution + ?Sized,
    C: Elementwise + ?Sized,
{
    xs.map_elements(|x| dist.log_pdf(x))
}

/// CDF of `dist` at every element of `xs`.
pub fn cdf_each<D, C>(dist: &D, xs: &C) -> C::Output
where
    D: ContinuousDistribution + ?Sized,
    C: Elementwise + ?Sized,
{
    xs.map_elements(|x| dist.cdf(x))
}

/// Quantile of `dist` at every probability in `ps`.
pub fn quantile_each<D, C>(dist: &D, ps: &C) -> C::Output
where
    D: ContinuousDistribution + ?Sized,
    C: Elementwise + ?Sized,
{
    ps.map_elements(|p| dist.quantile(p))
}
