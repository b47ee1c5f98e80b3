//! Type definitions module
//!
//! Problem inputs and solver outputs shared by the solver, game board and CLI.

pub mod input;
pub use input::{ClientParams, GameInput};

pub mod allocation;
pub use allocation::{Allocation, RoundSummary};
