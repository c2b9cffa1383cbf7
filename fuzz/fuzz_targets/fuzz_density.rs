//! Fuzz target for densities and CDFs through the runtime catalog.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sd_math::{ContinuousDistribution, Dist};

#[derive(Arbitrary, Debug)]
struct Input {
    name: String,
    params: Vec<f64>,
    x: f64,
}

fuzz_target!(|input: Input| {
    // Construction may fail; it must not panic.
    let Ok(dist) = Dist::from_name(&input.name, &input.params) else {
        return;
    };
    let density = dist.pdf(input.x);
    assert!(density.is_nan() || density >= 0.0);
    let cdf = dist.cdf(input.x);
    assert!(cdf.is_nan() || (0.0..=1.0).contains(&cdf));
    let _ = dist.log_pdf(input.x);
});
