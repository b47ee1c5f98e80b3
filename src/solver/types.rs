//! Solver configuration

use serde::{Deserialize, Serialize};

/// Configuration for the elimination solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Relative tolerance of the post-solve identity check (default: 1e-9)
    pub identity_tolerance: f64,

    /// Run the identity check after convergence (default: true)
    pub verify: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            identity_tolerance: 1e-9,
            verify: true,
        }
    }
}
