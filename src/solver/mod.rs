//! Stackelberg allocation solver
//! Closed-form equilibrium pricing with iterative worst-first client elimination

pub mod elimination;
pub mod equilibrium;
pub mod types;

pub use elimination::StackelbergSolver;
pub use types::SolverConfig;

use crate::errors::Result;
use crate::types::GameInput;

/// Solve the five-value contract `(B, C, w, varrho, eta) -> (p, B_c)`
///
/// `clients` must match the length of every parameter sequence.
pub fn solve(
    budget: f64,
    clients: usize,
    weights: &[f64],
    varrho: &[f64],
    eta: &[f64],
) -> Result<(Vec<f64>, Vec<f64>)> {
    let input = GameInput::new(budget, weights.to_vec(), varrho.to_vec(), eta.to_vec());
    input.check_shape(clients)?;

    let allocation = StackelbergSolver::new().solve(&input)?;
    Ok(allocation.into_parts())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StackelbergError;

    #[test]
    fn test_solve_contract() {
        let (prices, allocations) = solve(1.0, 3, &[1.0, 1.0, 100.0], &[1.0; 3], &[1.0; 3]).unwrap();
        assert_eq!(prices.len(), 3);
        assert_eq!(allocations.len(), 3);
        assert_eq!(&prices[..2], &[0.0, 0.0]);
        assert_eq!(&allocations[..2], &[0.0, 0.0]);
    }

    #[test]
    fn test_solve_rejects_wrong_count() {
        let result = solve(1.0, 4, &[1.0; 3], &[1.0; 3], &[1.0; 3]);
        assert!(matches!(
            result,
            Err(StackelbergError::ShapeMismatch { expected: 4, .. })
        ));
    }
}
