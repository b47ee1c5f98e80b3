//! Command-line argument parsing for the Stackelberg solver
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use crate::config::OutputFormat;
use crate::errors::{Result, StackelbergError};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stackelberg allocation solver
#[derive(Parser, Debug)]
#[command(name = "stackelberg")]
#[command(version)]
#[command(about = "Compute Stackelberg-equilibrium prices and budget allocations", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (overrides configuration)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress everything except results and errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve from positional values: budget, client count and three lists
    Evaluation {
        /// Total shared budget B
        #[arg(value_name = "B", allow_negative_numbers = true)]
        budget: f64,

        /// Number of clients C
        #[arg(value_name = "C")]
        clients: usize,

        /// Weights, e.g. "[1,1,5]"
        #[arg(value_name = "W")]
        weights: String,

        /// Cost coefficients varrho
        #[arg(value_name = "VARRHO")]
        varrho: String,

        /// Efficiency coefficients eta
        #[arg(value_name = "ETA")]
        eta: String,
    },

    /// Solve a problem file (.json or .toml)
    Solve {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Default `tracing` filter directive for this level
    pub fn log_directive(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::VeryVerbose => "debug",
        }
    }

    /// Check if should show the solve summary
    pub fn show_summary(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }

    /// Check if should show every elimination round
    pub fn show_rounds(&self) -> bool {
        matches!(self, Verbosity::VeryVerbose)
    }
}

/// Parse a numeric list such as `[1, 2.5,3]` or `1,2.5,3`
pub fn parse_list(raw: &str) -> Result<Vec<f64>> {
    let trimmed = raw.trim().trim_start_matches('[').trim_end_matches(']').trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    trimmed
        .split(',')
        .map(|item| {
            let item = item.trim();
            item.parse::<f64>().map_err(|e| {
                StackelbergError::InvalidInput(format!("cannot parse '{}' as a number: {}", item, e))
            })
        })
        .collect()
}
