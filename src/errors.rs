//! Error types for the Stackelberg solver
//!
//! One error enum covers input validation, numeric failures of the
//! equilibrium computation, fixed-point encoding and the game lifecycle.

use thiserror::Error;

/// Main error type for the solver and game board
#[derive(Error, Debug)]
pub enum StackelbergError {
    /// Parameter sequences disagree with the declared client count
    #[error("Input shape mismatch: expected {expected} clients, got w={weights}, varrho={varrho}, eta={eta}")]
    ShapeMismatch {
        expected: usize,
        weights: usize,
        varrho: usize,
        eta: usize,
    },

    /// Malformed or out-of-range input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Non-positive or non-finite parameter, or a degenerate price
    #[error("Domain error for client {client}: {reason}")]
    Domain { client: usize, reason: String },

    /// Shared multiplier collapsed to zero or lost finiteness
    #[error("Degenerate equilibrium: {0}")]
    Degenerate(String),

    /// Elimination loop failed to make progress
    #[error("Elimination did not converge after {rounds} rounds")]
    NonConvergence { rounds: usize },

    /// Every client was eliminated without reaching a feasible allocation
    #[error("Infeasible allocation: all {clients} clients were eliminated")]
    Infeasible { clients: usize },

    /// Post-solve identity check failed
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Fixed-point conversion errors
    #[error("Fixed-point error: {0}")]
    FixedPoint(String),

    /// Caller lacks the role required for a game operation
    #[error("Unauthorized: {caller} cannot {action}")]
    Unauthorized { caller: String, action: String },

    /// Game state machine transition errors
    #[error("Invalid state transition from {from:?} to {to:?}: {reason}")]
    InvalidTransition {
        from: String,
        to: String,
        reason: String,
    },

    /// Game id never initialized
    #[error("Unknown game: {0}")]
    UnknownGame(u64),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for solver operations
pub type Result<T> = std::result::Result<T, StackelbergError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StackelbergError::ShapeMismatch {
            expected: 3,
            weights: 3,
            varrho: 2,
            eta: 3,
        };
        assert!(err.to_string().contains("expected 3"));
        assert!(err.to_string().contains("varrho=2"));
    }

    #[test]
    fn test_domain_error() {
        let err = StackelbergError::Domain {
            client: 4,
            reason: "eta must be positive".to_string(),
        };
        assert!(err.to_string().contains("client 4"));
        assert!(err.to_string().contains("eta"));
    }

    #[test]
    fn test_invalid_transition_error() {
        let err = StackelbergError::InvalidTransition {
            from: "Undefined".to_string(),
            to: "Evaluation".to_string(),
            reason: "game not started".to_string(),
        };
        assert!(err.to_string().contains("Undefined"));
        assert!(err.to_string().contains("Evaluation"));
    }
}
