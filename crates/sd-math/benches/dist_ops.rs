//! Criterion benchmarks for `sd-math`.
//!
//! Scalar kernels, the iterative quantiles, and container throughput.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sd_math::beta::beta_quantile;
use sd_math::gamma::{gamma_quantile, gamma_sample};
use sd_math::kumaraswamy::{kumaraswamy_log_pdf, kumaraswamy_quantile};
use sd_math::reciprocal::reciprocal_pdf;
use sd_math::{engine_from_seed, ContinuousDistribution, Kumaraswamy, Reciprocal};

fn bench_closed_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("closed_form");

    group.bench_function("reciprocal_pdf", |b| {
        b.iter(|| black_box(reciprocal_pdf(black_box(5.0), black_box(2.0), black_box(30.0))));
    });
    group.bench_function("kumaraswamy_quantile", |b| {
        b.iter(|| black_box(kumaraswamy_quantile(black_box(0.95), black_box(3.0), black_box(2.0))));
    });
    group.bench_function("kumaraswamy_log_pdf", |b| {
        b.iter(|| black_box(kumaraswamy_log_pdf(black_box(0.42), black_box(3.0), black_box(2.0))));
    });

    group.finish();
}

fn bench_iterative(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterative");

    for (name, alpha, beta) in [
        ("symmetric", 2.0, 2.0),
        ("skewed", 2.0, 8.0),
        ("concentrated", 50.0, 5.0),
    ] {
        group.bench_with_input(
            BenchmarkId::new("beta_quantile", name),
            &(alpha, beta),
            |b, &(a, bta)| {
                b.iter(|| black_box(beta_quantile(black_box(0.95), black_box(a), black_box(bta))));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("gamma_quantile", name),
            &(alpha, beta),
            |b, &(shape, rate)| {
                b.iter(|| black_box(gamma_quantile(black_box(0.95), black_box(shape), black_box(rate))));
            },
        );
    }

    let mut rng = engine_from_seed(1);
    group.bench_function("gamma_sample", |b| {
        b.iter(|| black_box(gamma_sample(black_box(0.7), black_box(1.0), &mut rng)));
    });

    group.finish();
}

fn bench_containers(c: &mut Criterion) {
    let mut group = c.benchmark_group("containers");

    for n in [16usize, 1024, 65_536] {
        let xs: Vec<f64> = (0..n).map(|i| 2.0 + 28.0 * i as f64 / n as f64).collect();
        let dist = Reciprocal::new(2.0, 30.0).expect("valid parameters");
        group.bench_with_input(BenchmarkId::new("reciprocal_pdf_all", n), &xs, |b, xs| {
            b.iter(|| black_box(dist.pdf_all(xs)));
        });

        let kum = Kumaraswamy::new(3.0, 2.0).expect("valid parameters");
        group.bench_with_input(BenchmarkId::new("kumaraswamy_sample_n", n), &n, |b, &n| {
            let mut rng = engine_from_seed(7);
            b.iter(|| black_box(kum.sample_n(n, &mut rng)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_closed_form, bench_iterative, bench_containers);
criterion_main!(benches);
