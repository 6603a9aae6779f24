// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::ConfigOverrides;

/// Command-line arguments for `gha2argo`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gha2argo",
    version,
    about = "Convert GitHub Actions workflows into Argo Workflows, one-shot or as an HTTP service.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML). Built-in defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Address to listen on, overriding `[server].listen`.
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Number of conversion workers, overriding `[pool].workers`.
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Maximum number of queued jobs, overriding `[pool].queue_capacity`.
    #[arg(long, value_name = "N")]
    pub queue_capacity: Option<usize>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `GHA2ARGO_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Convert a single workflow file and exit instead of serving HTTP.
    #[arg(long, value_name = "FILE")]
    pub convert: Option<PathBuf>,

    /// Write the converted document into this directory instead of stdout.
    #[arg(long, value_name = "DIR", requires = "convert")]
    pub output_dir: Option<PathBuf>,
}

impl CliArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            listen: self.listen.clone(),
            workers: self.workers,
            queue_capacity: self.queue_capacity,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
