//! statdist - evaluate probability distributions from the command line
//!
//! Density, CDF, quantile, sampling and moments for the distributions in
//! `sd-math`, printed as text or JSON.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sd_cli::commands::{self, CdfArgs, DistArgs, PdfArgs, QuantileArgs, SampleArgs};
use sd_cli::config::{load_config, ResolvedConfig};
use sd_cli::error::{CliError, Result};
use sd_cli::exit_codes::ExitCode;
use sd_cli::logging::{init_logging, level_from_flags, LogConfig, LogFormat};
use sd_cli::output::{HumanStyle, OutputFormat, Report};

/// Closed-form probability distributions: pdf, cdf, quantile, sample
#[derive(Parser)]
#[command(name = "statdist")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to statdist.toml (env: STATDIST_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format [default: human]
    #[arg(long, short = 'f', global = true)]
    format: Option<OutputFormat>,

    /// Digits after the decimal point in human output
    #[arg(long, global = true)]
    precision: Option<usize>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Prefix human log lines with timestamps
    #[arg(long, global = true)]
    log_timestamps: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Probability density (or log-density with --log) at each x
    Pdf(PdfArgs),

    /// Cumulative probability at each x
    Cdf(CdfArgs),

    /// Inverse CDF at each probability
    Quantile(QuantileArgs),

    /// Draw random variates
    Sample(SampleArgs),

    /// Support, mean and variance
    Summary(DistArgs),

    /// List the available distributions
    List,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if !err.use_stderr() {
                let _ = err.print();
                std::process::exit(ExitCode::Clean.as_i32());
            }
            let args: Vec<String> = std::env::args().collect();
            if OutputFormat::requested_in(&args) == Some(OutputFormat::Json) {
                let usage = CliError::usage(&err.to_string());
                println!("{}", usage.to_json());
            } else {
                let _ = err.print();
            }
            std::process::exit(ExitCode::ArgsError.as_i32());
        }
    };

    let exit_code = run(cli);
    std::process::exit(exit_code.as_i32());
}

fn run(cli: Cli) -> ExitCode {
    let cli_level = level_from_flags(cli.global.verbose, cli.global.quiet);

    let config = match load_config(cli.global.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            init_logging(&LogConfig::from_env(cli_level, None, None, None));
            return report_error(&err, cli.global.format.unwrap_or_default());
        }
    };

    let format = cli
        .global
        .format
        .or(config.settings.format)
        .unwrap_or_default();

    // JSON on stdout implies JSON lines on stderr unless configured otherwise.
    let cli_log_format = (cli.global.format == Some(OutputFormat::Json)).then_some(LogFormat::Json);
    let log_config = LogConfig::from_env(
        cli_level,
        cli_log_format,
        config.settings.log_level,
        config.settings.log_format,
    )
    .with_timestamps(cli.global.log_timestamps);
    init_logging(&log_config);

    tracing::debug!(
        source = %config.source,
        path = ?config.path,
        "configuration resolved"
    );

    let style = HumanStyle {
        precision: cli.global.precision.or(config.settings.precision),
    };

    let result = dispatch(cli.command, &config).and_then(|report| {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        report.write_to(&mut handle, format, style)
    });

    match result {
        Ok(()) => ExitCode::Clean,
        Err(err) => report_error(&err, format),
    }
}

fn dispatch(command: Commands, config: &ResolvedConfig) -> Result<Report> {
    match command {
        Commands::Pdf(args) => commands::pdf(&args),
        Commands::Cdf(args) => commands::cdf(&args),
        Commands::Quantile(args) => commands::quantile(&args),
        Commands::Sample(args) => commands::sample(&args, config.settings.seed),
        Commands::Summary(args) => commands::summary(&args),
        Commands::List => Ok(commands::list()),
    }
}

fn report_error(err: &CliError, format: OutputFormat) -> ExitCode {
    let code = err.exit_code();
    if code.is_internal_error() {
        tracing::error!(code = code.code_name(), error = ?err, "command failed");
    } else if code.is_user_error() {
        tracing::debug!(code = code.code_name(), error = ?err, "command rejected");
    }
    match format {
        OutputFormat::Json => println!("{}", err.to_json()),
        OutputFormat::Human => eprintln!("error: {err}"),
    }
    code
}
