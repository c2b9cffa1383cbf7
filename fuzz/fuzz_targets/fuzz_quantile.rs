//! Fuzz target for quantile functions.
//!
//! Any parameters and probability must give NaN or a point inside the
//! distribution's support, never a panic.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sd_math::{beta, exponential, gamma, kumaraswamy, reciprocal, uniform};

#[derive(Arbitrary, Debug)]
struct Input {
    which: u8,
    first: f64,
    second: f64,
    p: f64,
}

fuzz_target!(|input: Input| {
    let Input { which, first, second, p } = input;
    let (x, lo, hi) = match which % 6 {
        0 => (uniform::uniform_quantile(p, first, second), first, second),
        1 => (reciprocal::reciprocal_quantile(p, first, second), first, second),
        2 => (kumaraswamy::kumaraswamy_quantile(p, first, second), 0.0, 1.0),
        3 => (exponential::exponential_quantile(p, first), 0.0, f64::INFINITY),
        4 => (beta::beta_quantile(p, first, second), 0.0, 1.0),
        _ => (gamma::gamma_quantile(p, first, second), 0.0, f64::INFINITY),
    };
    if !x.is_nan() {
        assert!(x >= lo && x <= hi, "quantile {x} outside [{lo}, {hi}]");
    }
});
