//! Stackelberg - equilibrium price and budget allocation
//!
//! Computes the closed-form Stackelberg equilibrium for clients sharing a
//! finite budget, removing the client with the most negative allocation and
//! recomputing until every remaining allocation is non-negative.
//!
//! # Architecture
//!
//! - **solver**: closed-form equilibrium + worst-first elimination
//! - **game**: provider/operator lifecycle around a solve
//! - **fixed**: fixed-point encoding for publishing results
//! - **cli / config / telemetry**: the binary's argument, config and logging layers

pub mod errors;
pub mod types;
pub mod solver;

// Re-export commonly used types
pub use errors::{Result, StackelbergError};
pub use solver::{solve, SolverConfig, StackelbergSolver};
pub use types::{Allocation, ClientParams, GameInput, RoundSummary};

pub mod fixed;
pub mod game;

pub mod cli;
pub mod config;
pub mod telemetry;
