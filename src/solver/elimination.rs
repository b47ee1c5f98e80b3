//! Worst-first elimination solver
//! Recomputes the closed-form equilibrium and drops the client with the most
//! negative allocation until every remaining allocation is non-negative.

use crate::errors::{Result, StackelbergError};
use crate::solver::equilibrium;
use crate::solver::types::SolverConfig;
use crate::types::{Allocation, GameInput, RoundSummary};
use tracing::{debug, info};

/// Stackelberg allocation solver
#[derive(Debug, Clone, Default)]
pub struct StackelbergSolver {
    config: SolverConfig,
}

impl StackelbergSolver {
    /// Create solver with default configuration
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    /// Create solver with custom configuration
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve the allocation game for `input`
    ///
    /// Guarantees on success:
    /// - Feasibility: every surviving client has `B_c >= 0`
    /// - Sentinel: every eliminated client has `p == 0` and `B_c == 0`
    /// - Progress: each rejected round removes exactly one client, so at
    ///   most `C` rounds run
    pub fn solve(&self, input: &GameInput) -> Result<Allocation> {
        input.validate()?;

        let clients = input.client_count();
        let mut active = vec![true; clients];
        let mut remaining = clients;
        let mut prices = vec![0.0; clients];
        let mut allocations = vec![0.0; clients];
        let mut eliminated = Vec::new();
        let mut rounds = Vec::new();

        loop {
            let round = rounds.len() + 1;
            if round > clients {
                return Err(StackelbergError::NonConvergence { rounds: rounds.len() });
            }

            let alpha = equilibrium::multiplier(input, &active)?;
            for c in (0..clients).filter(|&c| active[c]) {
                let (price, allocation) = equilibrium::price_and_allocation(c, input.client(c), alpha)?;
                prices[c] = price;
                allocations[c] = allocation;
            }

            let (worst, min_allocation) = lowest_allocation(&allocations, &active)
                .ok_or(StackelbergError::Infeasible { clients })?;

            debug!(round, active = remaining, alpha, min_allocation, "equilibrium round");

            if min_allocation >= 0.0 {
                rounds.push(RoundSummary {
                    round,
                    active_count: remaining,
                    alpha,
                    min_allocation,
                    removed: None,
                });

                let allocation = Allocation {
                    prices,
                    allocations,
                    active,
                    alpha,
                    eliminated,
                    rounds,
                };

                if self.config.verify {
                    self.verify(input, &allocation)?;
                }

                return Ok(allocation);
            }

            info!(client = worst, allocation = min_allocation, "eliminating client");

            active[worst] = false;
            prices[worst] = 0.0;
            allocations[worst] = 0.0;
            remaining -= 1;
            eliminated.push(worst);

            rounds.push(RoundSummary {
                round,
                active_count: remaining + 1,
                alpha,
                min_allocation,
                removed: Some(worst),
            });

            if remaining + eliminated.len() != clients {
                return Err(StackelbergError::NonConvergence { rounds: rounds.len() });
            }
            if remaining == 0 {
                return Err(StackelbergError::Infeasible { clients });
            }
        }
    }

    /// Check `w = p·(B_c + varrho/eta)` per surviving client and `Σ B_c = B`
    fn verify(&self, input: &GameInput, allocation: &Allocation) -> Result<()> {
        let tolerance = self.config.identity_tolerance;
        let residuals = allocation.identity_residuals(input);

        let mut cost = 0.0;
        for c in allocation.active_clients() {
            let params = input.client(c);
            cost += params.cost_ratio();

            let scale = params.weight + allocation.prices[c] * params.cost_ratio();
            if residuals[c].abs() > tolerance * scale.max(1.0) {
                return Err(StackelbergError::InvariantViolation(format!(
                    "client {} residual {} exceeds tolerance",
                    c, residuals[c]
                )));
            }
        }

        let total = allocation.total_allocated();
        let scale = input.budget + cost;
        if (total - input.budget).abs() > tolerance * scale.max(1.0) {
            return Err(StackelbergError::InvariantViolation(format!(
                "allocations sum to {} but budget is {}",
                total, input.budget
            )));
        }

        Ok(())
    }
}

/// First active client holding the smallest allocation
///
/// Strict `<` keeps the lowest index on ties.
fn lowest_allocation(allocations: &[f64], active: &[bool]) -> Option<(usize, f64)> {
    let mut lowest: Option<(usize, f64)> = None;
    for (c, &allocation) in allocations.iter().enumerate() {
        if !active[c] {
            continue;
        }
        match lowest {
            Some((_, min)) if allocation >= min => {}
            _ => lowest = Some((c, allocation)),
        }
    }
    lowest
}
