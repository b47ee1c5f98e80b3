//! Logging and terminal summaries
//!
//! Structured events go through `tracing` to stderr; stdout is reserved for
//! results.

use crate::cli::Verbosity;
use crate::types::{Allocation, GameInput};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` overrides the level derived from `verbosity`. `color` applies to
/// both the log formatter and every `colored` string. Returns `false` if a
/// subscriber was already installed.
pub fn init_logging(verbosity: Verbosity, color: bool) -> bool {
    colored::control::set_override(color);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .with_target(false)
        .try_init()
        .is_ok()
}

/// Summary of a finished solve
#[derive(Debug, Clone, PartialEq)]
pub struct SolveStats {
    pub clients: usize,
    pub survivors: usize,
    pub rounds: usize,
    pub alpha: f64,
    pub budget: f64,
    pub total_allocated: f64,
    pub max_residual: f64,
}

impl SolveStats {
    pub fn collect(input: &GameInput, allocation: &Allocation) -> Self {
        let max_residual = allocation
            .identity_residuals(input)
            .iter()
            .fold(0.0_f64, |acc, r| acc.max(r.abs()));

        Self {
            clients: input.client_count(),
            survivors: allocation.active_count(),
            rounds: allocation.rounds.len(),
            alpha: allocation.alpha,
            budget: input.budget,
            total_allocated: allocation.total_allocated(),
            max_residual,
        }
    }
}

/// Terminal display of solve statistics, written to stderr
pub struct TelemetryDisplay {
    verbosity: Verbosity,
}

impl TelemetryDisplay {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Display summary statistics
    pub fn display_summary(&self, input: &GameInput, allocation: &Allocation) {
        if !self.verbosity.show_summary() {
            return;
        }

        let stats = SolveStats::collect(input, allocation);
        eprintln!("\n{}", "Stackelberg Equilibrium".bold());
        eprintln!("─────────────────────────────────────");
        eprintln!("Clients:           {} ({} eliminated)", stats.clients, stats.clients - stats.survivors);
        eprintln!("Rounds:            {}", stats.rounds);
        eprintln!("Alpha:             {:.6e}", stats.alpha);
        eprintln!("Budget:            {}", stats.budget);
        eprintln!("Allocated:         {}", stats.total_allocated);
        eprintln!("Max residual:      {:.3e}", stats.max_residual);

        if self.verbosity.show_rounds() {
            for round in &allocation.rounds {
                let outcome = match round.removed {
                    Some(client) => format!("removed client {}", client).yellow(),
                    None => "accepted".green(),
                };
                eprintln!(
                    "  round {:>3}: {:>4} active, alpha {:.6e}, min B_c {:.6e} → {}",
                    round.round, round.active_count, round.alpha, round.min_allocation, outcome
                );
            }
        }
        eprintln!();
    }
}
