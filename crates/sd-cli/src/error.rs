//! CLI error type and its exit-code mapping.

use std::path::PathBuf;

use sd_math::DistError;
use thiserror::Error;

use crate::exit_codes::ExitCode;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Distribution(#[from] DistError),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Usage(String),

    #[error("config file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {variable}: {value:?}")]
    InvalidEnv { variable: &'static str, value: String },

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Distribution(_) | CliError::InvalidInput(_) | CliError::Usage(_) => {
                ExitCode::ArgsError
            }
            CliError::ConfigNotFound { .. }
            | CliError::ConfigRead { .. }
            | CliError::ConfigParse { .. }
            | CliError::InvalidEnv { .. } => ExitCode::ConfigError,
            CliError::Encode(_) => ExitCode::InternalError,
            CliError::Io(_) => ExitCode::IoError,
        }
    }

    /// Wraps a rendered command-line parse error, keeping its first paragraph.
    pub fn usage(rendered: &str) -> Self {
        let rendered = rendered.trim_start();
        let rendered = rendered.strip_prefix("error: ").unwrap_or(rendered);
        let message = rendered
            .lines()
            .map(str::trim)
            .take_while(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        CliError::Usage(message)
    }

    /// Machine-readable error document for `--format json`.
    pub fn to_json(&self) -> serde_json::Value {
        let code = self.exit_code();
        serde_json::json!({
            "error": {
                "code": code.code_name(),
                "exit_code": code.as_i32(),
                "message": self.to_string(),
            }
        })
    }
}
