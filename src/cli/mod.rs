//! CLI module for the Stackelberg solver
//!
//! Handles command-line argument parsing and result rendering.

pub mod args;
pub mod output;

pub use args::{parse_list, Args, Commands, Verbosity};
pub use output::render;
