//! statdist math: closed-form univariate continuous distributions.
//!
//! Every distribution is available three ways:
//! - free scalar functions (`reciprocal_pdf(x, a, b)`), which return NaN
//!   instead of failing,
//! - element-wise over slices, vectors and `ndarray` arrays via
//!   [`containers::Elementwise`],
//! - validated typed objects implementing [`ContinuousDistribution`].

pub mod catalog;
pub mod containers;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod math;

pub use math::beta;
pub use math::exponential;
pub use math::gamma;
pub use math::kumaraswamy;
pub use math::reciprocal;
pub use math::uniform;

pub use math::incomplete::{gamma_p, gamma_q, inc_beta};
pub use math::stable::*;

pub use catalog::{Dist, DistInfo};
pub use containers::Elementwise;
pub use distribution::{Beta, ContinuousDistribution, Exponential, Gamma, Kumaraswamy, Reciprocal, Uniform};
pub use engine::{engine_from_entropy, engine_from_seed, entropy_seed, unit_uniform, RandEngine};
pub use error::{DistError, Result};
