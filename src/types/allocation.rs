//! Solver output: prices, allocations and the elimination history

use crate::types::input::GameInput;
use serde::{Deserialize, Serialize};

/// Snapshot of one pass of the elimination loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// 1-based round number
    pub round: usize,

    /// Clients active when the round started
    pub active_count: usize,

    /// Shared multiplier computed this round
    pub alpha: f64,

    /// Smallest allocation among active clients
    pub min_allocation: f64,

    /// Client removed at the end of the round, `None` for the accepting round
    pub removed: Option<usize>,
}

/// Equilibrium prices and budget shares for every input client
///
/// Eliminated clients keep `0.0` in both `prices` and `allocations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Unit price `p_c` per client
    pub prices: Vec<f64>,

    /// Budget share `B_c` per client
    pub allocations: Vec<f64>,

    /// `true` for clients that survived elimination
    pub active: Vec<bool>,

    /// Multiplier of the accepted round
    pub alpha: f64,

    /// Clients in the order they were removed
    pub eliminated: Vec<usize>,

    /// Per-round history, last entry is the accepting round
    pub rounds: Vec<RoundSummary>,
}

impl Allocation {
    /// Indices of surviving clients in ascending order
    pub fn active_clients(&self) -> Vec<usize> {
        self.active
            .iter()
            .enumerate()
            .filter(|(_, active)| **active)
            .map(|(c, _)| c)
            .collect()
    }

    /// Number of surviving clients
    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|a| **a).count()
    }

    /// Whether client `c` was removed
    pub fn is_eliminated(&self, c: usize) -> bool {
        !self.active.get(c).copied().unwrap_or(false)
    }

    /// Sum of all allocations; equals the budget at equilibrium
    pub fn total_allocated(&self) -> f64 {
        self.allocations.iter().sum()
    }

    /// `w - p * (B_c + varrho/eta)` per client, `0.0` for eliminated clients
    pub fn identity_residuals(&self, input: &GameInput) -> Vec<f64> {
        input
            .clients()
            .enumerate()
            .map(|(c, params)| {
                if self.active[c] {
                    params.weight - self.prices[c] * (self.allocations[c] + params.cost_ratio())
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Split into the `(prices, allocations)` pair
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.prices, self.allocations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Allocation {
        Allocation {
            prices: vec![0.0, 0.0, 50.0],
            allocations: vec![0.0, 0.0, 1.0],
            active: vec![false, false, true],
            alpha: 5.0,
            eliminated: vec![0, 1],
            rounds: vec![],
        }
    }

    #[test]
    fn test_active_clients() {
        let allocation = sample();
        assert_eq!(allocation.active_clients(), vec![2]);
        assert_eq!(allocation.active_count(), 1);
        assert!(allocation.is_eliminated(0));
        assert!(!allocation.is_eliminated(2));
        assert!(allocation.is_eliminated(99));
    }

    #[test]
    fn test_total_and_residuals() {
        let allocation = sample();
        let input = GameInput::new(1.0, vec![1.0, 1.0, 100.0], vec![1.0; 3], vec![1.0; 3]);
        assert_eq!(allocation.total_allocated(), 1.0);
        assert_eq!(allocation.identity_residuals(&input), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_into_parts() {
        let (prices, allocations) = sample().into_parts();
        assert_eq!(prices, vec![0.0, 0.0, 50.0]);
        assert_eq!(allocations, vec![0.0, 0.0, 1.0]);
    }
}
