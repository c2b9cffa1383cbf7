//! Scalar distribution functions and the special functions behind them.

pub mod stable;
pub mod incomplete;
mod invert;
pub mod uniform;
pub mod reciprocal;
pub mod kumaraswamy;
pub mod exponential;
pub mod beta;
pub mod gamma;
