//! statdist command-line front end.
//!
//! Evaluates the `sd-math` distributions from the shell:
//! - Subcommand arguments and runners (`commands`)
//! - `statdist.toml` discovery and loading (`config`)
//! - Stable exit codes and the error type mapped onto them
//! - tracing setup for stderr logs
//! - Human and JSON rendering of results (`output`)
//!
//! The binary entry point is in `main.rs`.

pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod output;
