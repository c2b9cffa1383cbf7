//! Subcommand arguments and their implementations.
//!
//! Each command builds a [`Report`]; printing is left to the caller.

use clap::Args;
use sd_math::{engine_from_seed, entropy_seed, ContinuousDistribution, Dist};

use crate::error::{CliError, Result};
use crate::output::{Evaluation, Function, Point, Report, SampleValues, Samples, Summary};

/// Upper bound on draws per invocation.
pub const MAX_DRAWS: usize = 10_000_000;

/// Distribution selection shared by every evaluating command.
#[derive(Args, Debug, Clone)]
pub struct DistArgs {
    /// Distribution name or alias (see `statdist list`)
    pub distribution: String,

    /// Comma-separated parameters in catalog order, e.g. `--params 2,30`
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub params: Vec<f64>,
}

#[derive(Args, Debug, Clone)]
pub struct PdfArgs {
    #[command(flatten)]
    pub dist: DistArgs,

    /// Comma-separated points to evaluate
    #[arg(long = "x", value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub x: Vec<f64>,

    /// Report the log-density instead
    #[arg(long)]
    pub log: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CdfArgs {
    #[command(flatten)]
    pub dist: DistArgs,

    /// Comma-separated points to evaluate
    #[arg(long = "x", value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub x: Vec<f64>,
}

#[derive(Args, Debug, Clone)]
pub struct QuantileArgs {
    #[command(flatten)]
    pub dist: DistArgs,

    /// Comma-separated probabilities in [0, 1]
    #[arg(long = "p", value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub p: Vec<f64>,
}

#[derive(Args, Debug, Clone)]
pub struct SampleArgs {
    #[command(flatten)]
    pub dist: DistArgs,

    /// Number of draws
    #[arg(short = 'n', long = "count", default_value_t = 1)]
    pub count: usize,

    /// Draw a rows x cols matrix instead of a vector
    #[arg(long, requires = "cols")]
    pub rows: Option<usize>,

    #[arg(long, requires = "rows")]
    pub cols: Option<usize>,

    /// Seed for reproducible draws (env: STATDIST_SEED)
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Resolves the distribution named on the command line.
pub fn build_dist(args: &DistArgs) -> Result<Dist> {
    let dist = Dist::from_name(&args.distribution, &args.params)?;
    tracing::debug!(distribution = dist.name(), params = ?args.params, "distribution resolved");
    Ok(dist)
}

fn evaluation(dist: Dist, function: Function, inputs: &[f64], values: Vec<f64>) -> Report {
    let nan_count = values.iter().filter(|v| v.is_nan()).count();
    if nan_count > 0 {
        tracing::warn!(
            function = function.as_str(),
            nan_count,
            "some inputs are outside the function's domain"
        );
    }
    let points = inputs
        .iter()
        .zip(values)
        .map(|(&input, value)| Point { input, value })
        .collect();
    Report::Evaluation(Evaluation {
        distribution: dist,
        function,
        points,
    })
}

pub fn pdf(args: &PdfArgs) -> Result<Report> {
    let dist = build_dist(&args.dist)?;
    let (function, values) = if args.log {
        (Function::LogPdf, dist.log_pdf_all(&args.x))
    } else {
        (Function::Pdf, dist.pdf_all(&args.x))
    };
    Ok(evaluation(dist, function, &args.x, values))
}

pub fn cdf(args: &CdfArgs) -> Result<Report> {
    let dist = build_dist(&args.dist)?;
    let values = dist.cdf_all(&args.x);
    Ok(evaluation(dist, Function::Cdf, &args.x, values))
}

pub fn quantile(args: &QuantileArgs) -> Result<Report> {
    let dist = build_dist(&args.dist)?;
    let values = dist.quantile_all(&args.p);
    Ok(evaluation(dist, Function::Quantile, &args.p, values))
}

/// Draws samples. Seed precedence: `--seed`, then the configured seed, then fresh entropy.
pub fn sample(args: &SampleArgs, configured_seed: Option<u64>) -> Result<Report> {
    let dist = build_dist(&args.dist)?;
    let seed = args.seed.or(configured_seed).unwrap_or_else(entropy_seed);
    let mut rng = engine_from_seed(seed);

    let (shape, values) = match (args.rows, args.cols) {
        (Some(rows), Some(cols)) => {
            check_draws(rows.checked_mul(cols))?;
            let matrix = dist.sample_matrix(rows, cols, &mut rng);
            let rows_out = matrix.outer_iter().map(|row| row.to_vec()).collect();
            (vec![rows, cols], SampleValues::Matrix(rows_out))
        }
        _ => {
            check_draws(Some(args.count))?;
            (vec![args.count], SampleValues::Vector(dist.sample_n(args.count, &mut rng)))
        }
    };
    tracing::info!(distribution = dist.name(), seed, shape = ?shape, "samples drawn");

    Ok(Report::Samples(Samples {
        distribution: dist,
        seed,
        shape,
        values,
    }))
}

fn check_draws(total: Option<usize>) -> Result<()> {
    match total {
        Some(n) if n <= MAX_DRAWS => Ok(()),
        _ => Err(CliError::InvalidInput(format!(
            "at most {MAX_DRAWS} draws per invocation"
        ))),
    }
}

pub fn summary(args: &DistArgs) -> Result<Report> {
    let dist = build_dist(args)?;
    Ok(Report::Summary(Summary {
        distribution: dist,
        support: dist.info().support,
        mean: dist.mean(),
        variance: dist.variance(),
    }))
}

pub fn list() -> Report {
    Report::Catalog(Dist::catalog().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist_args(name: &str, params: &[f64]) -> DistArgs {
        DistArgs {
            distribution: name.to_string(),
            params: params.to_vec(),
        }
    }

    #[test]
    fn pdf_reports_each_point() {
        let args = PdfArgs {
            dist: dist_args("reciprocal", &[2.0, 30.0]),
            x: vec![2.0, 5.0, 31.0],
            log: false,
        };
        let Report::Evaluation(eval) = pdf(&args).unwrap() else {
            panic!("expected an evaluation");
        };
        assert_eq!(eval.function, Function::Pdf);
        assert_eq!(eval.points.len(), 3);
        assert!((eval.points[1].value - 0.073853874613771).abs() < 1e-14);
        assert_eq!(eval.points[2].value, 0.0);
    }

    #[test]
    fn log_flag_switches_function() {
        let args = PdfArgs {
            dist: dist_args("reciprocal", &[2.0, 30.0]),
            x: vec![5.0],
            log: true,
        };
        let Report::Evaluation(eval) = pdf(&args).unwrap() else {
            panic!("expected an evaluation");
        };
        assert_eq!(eval.function, Function::LogPdf);
        assert!((eval.points[0].value - 0.073853874613771f64.ln()).abs() < 1e-13);
    }

    #[test]
    fn quantile_out_of_range_is_nan_not_error() {
        let args = QuantileArgs {
            dist: dist_args("kumaraswamy", &[3.0, 2.0]),
            p: vec![0.5, 1.5],
        };
        let Report::Evaluation(eval) = quantile(&args).unwrap() else {
            panic!("expected an evaluation");
        };
        assert!((eval.points[0].value - 0.6641045243088701).abs() < 1e-14);
        assert!(eval.points[1].value.is_nan());
    }

    #[test]
    fn bad_parameters_are_errors() {
        let err = summary(&dist_args("reciprocal", &[30.0, 2.0])).unwrap_err();
        assert!(matches!(err, CliError::Distribution(_)));
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let args = SampleArgs {
            dist: dist_args("gamma", &[2.0, 1.0]),
            count: 5,
            rows: None,
            cols: None,
            seed: None,
        };
        let first = sample(&args, Some(12)).unwrap();
        let second = sample(&args, Some(12)).unwrap();
        let (Report::Samples(a), Report::Samples(b)) = (first, second) else {
            panic!("expected samples");
        };
        assert_eq!(a.seed, 12);
        let (SampleValues::Vector(va), SampleValues::Vector(vb)) = (a.values, b.values) else {
            panic!("expected vectors");
        };
        assert_eq!(va, vb);
        assert_eq!(va.len(), 5);
    }

    #[test]
    fn explicit_seed_beats_configured_seed() {
        let args = SampleArgs {
            dist: dist_args("uniform", &[0.0, 1.0]),
            count: 1,
            rows: None,
            cols: None,
            seed: Some(3),
        };
        let Report::Samples(s) = sample(&args, Some(99)).unwrap() else {
            panic!("expected samples");
        };
        assert_eq!(s.seed, 3);
    }

    #[test]
    fn matrix_shape_is_reported() {
        let args = SampleArgs {
            dist: dist_args("reciprocal", &[1.0, 3.0]),
            count: 1,
            rows: Some(2),
            cols: Some(3),
            seed: Some(1),
        };
        let Report::Samples(s) = sample(&args, None).unwrap() else {
            panic!("expected samples");
        };
        assert_eq!(s.shape, vec![2, 3]);
        let SampleValues::Matrix(rows) = s.values else {
            panic!("expected a matrix");
        };
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == 3));
    }

    #[test]
    fn too_many_draws_is_rejected() {
        let args = SampleArgs {
            dist: dist_args("uniform", &[0.0, 1.0]),
            count: MAX_DRAWS + 1,
            rows: None,
            cols: None,
            seed: Some(1),
        };
        assert!(matches!(sample(&args, None), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn summary_and_list() {
        let Report::Summary(s) = summary(&dist_args("exp", &[4.0])).unwrap() else {
            panic!("expected a summary");
        };
        assert_eq!(s.mean, 0.25);
        assert_eq!(s.variance, 0.0625);
        let Report::Catalog(entries) = list() else {
            panic!("expected the catalog");
        };
        assert_eq!(entries.len(), 6);
    }
}
