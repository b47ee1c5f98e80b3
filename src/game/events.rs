//! Events recorded by the game board

use serde::{Deserialize, Serialize};

/// Successful board mutations, in the order they happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // Lifecycle events
    Start { id: u64 },
    Input { id: u64, operator: String, eta: f64, weight: f64, varrho: f64 },
    InitEvaluation { id: u64 },
    Output { id: u64, prices: Vec<f64>, allocations: Vec<f64> },

    // Role events
    OperatorGranted { operator: String },
    OperatorRevoked { operator: String },
}

impl GameEvent {
    /// Game the event belongs to, `None` for role changes
    pub fn game_id(&self) -> Option<u64> {
        match self {
            GameEvent::Start { id }
            | GameEvent::Input { id, .. }
            | GameEvent::InitEvaluation { id }
            | GameEvent::Output { id, .. } => Some(*id),
            GameEvent::OperatorGranted { .. } | GameEvent::OperatorRevoked { .. } => None,
        }
    }
}
