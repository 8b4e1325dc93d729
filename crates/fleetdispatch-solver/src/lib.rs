//! Fleetdispatch Solver Engine
//!
//! This crate provides the round-based assignment optimizer:
//! - `AssignmentModel`: per-round decision variables, objective and constraints
//! - `search`: deterministic branch-and-bound solve with a wall-clock deadline
//! - `repair`: the capacity-relaxation feasibility-repair loop
//! - `DispatchEngine`: the round state machine that mutates the world
//!
//! Logging levels:
//! - **INFO**: round solved/applied summaries
//! - **WARN**: relaxation retries, with `reason` telling timeout from infeasibility
//! - **DEBUG**: round start scale, solve statistics

pub mod engine;
pub mod model;
pub mod repair;
pub mod search;


pub use engine::DispatchEngine;
pub use model::AssignmentModel;
pub use repair::solve_round;
pub use search::{RoundSolution, SolveOutcome, SolveStatus};
