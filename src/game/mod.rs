//! Game lifecycle: provider/operator roles, input collection and publication
//! of equilibrium results

pub mod board;
pub mod events;
pub mod state;

pub use board::GameBoard;
pub use events::GameEvent;
pub use state::{GameAction, GameState};
