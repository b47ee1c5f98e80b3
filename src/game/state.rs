//! Game lifecycle state machine
//!
//! Valid transitions:
//! 1. Undefined  → Started     (on: Initialize)
//! 2. Started    → Started     (on: Input)
//! 3. Started    → Evaluation  (on: InitEvaluation)
//! 4. Evaluation → Finished    (on: Publish)
//!
//! Everything else is rejected; `Finished` is terminal.

use crate::errors::{Result, StackelbergError};
use serde::{Deserialize, Serialize};

/// Lifecycle states of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameState {
    /// Game id not yet initialized
    #[default]
    Undefined,

    /// Budget set, operators may submit inputs
    Started,

    /// Inputs closed, waiting for results
    Evaluation,

    /// Prices and allocations published (terminal)
    Finished,
}

/// Actions that drive the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Initialize,
    Input,
    InitEvaluation,
    Publish,
}

impl GameState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameState::Finished)
    }

    /// Attempt a transition, rejecting actions not allowed in this state
    pub fn transition(&self, action: GameAction) -> Result<GameState> {
        use GameAction::*;
        use GameState::*;

        let next_state = match (self, action) {
            (Undefined, Initialize) => Started,
            (Started, Input) => Started,
            (Started, InitEvaluation) => Evaluation,
            (Evaluation, Publish) => Finished,

            (from, action) => {
                return Err(StackelbergError::InvalidTransition {
                    from: format!("{:?}", from),
                    to: format!("(via {:?})", action),
                    reason: format!("{:?} is not allowed while the game is {:?}", action, from),
                });
            }
        };

        Ok(next_state)
    }

    /// Numeric code matching the published state enumeration
    pub fn code(&self) -> u8 {
        match self {
            GameState::Undefined => 0,
            GameState::Started => 1,
            GameState::Evaluation => 2,
            GameState::Finished => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert_eq!(
            GameState::Undefined.transition(GameAction::Initialize).unwrap(),
            GameState::Started
        );
        assert_eq!(
            GameState::Started.transition(GameAction::Input).unwrap(),
            GameState::Started
        );
        assert_eq!(
            GameState::Started.transition(GameAction::InitEvaluation).unwrap(),
            GameState::Evaluation
        );
        assert_eq!(
            GameState::Evaluation.transition(GameAction::Publish).unwrap(),
            GameState::Finished
        );
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(GameState::Started.transition(GameAction::Initialize).is_err());
        assert!(GameState::Undefined.transition(GameAction::InitEvaluation).is_err());
        assert!(GameState::Evaluation.transition(GameAction::Input).is_err());
        assert!(GameState::Started.transition(GameAction::Publish).is_err());
    }

    #[test]
    fn test_finished_is_terminal() {
        assert!(GameState::Finished.is_terminal());
        for action in [
            GameAction::Initialize,
            GameAction::Input,
            GameAction::InitEvaluation,
            GameAction::Publish,
        ] {
            assert!(GameState::Finished.transition(action).is_err());
        }
    }

    #[test]
    fn test_codes() {
        assert_eq!(GameState::default().code(), 0);
        assert_eq!(GameState::Finished.code(), 3);
    }
}
