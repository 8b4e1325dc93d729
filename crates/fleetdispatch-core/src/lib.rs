//! Fleetdispatch Core - Domain model and world state
//!
//! This crate provides the shared building blocks for the dispatch optimizer:
//! - Typed entities for locations, vehicles and container orders
//! - A precomputed Manhattan distance matrix
//! - `WorldState`, the single owner of all mutable entity state
//! - The core error taxonomy

pub mod domain;
pub mod error;
pub mod matrix;
pub mod world;

#[cfg(test)]
mod world_tests;

pub use domain::{Assignment, Location, LocationKind, Order, RoundRecord, Vehicle};
pub use error::{DispatchError, Result};
pub use matrix::DistanceMatrix;
pub use world::WorldState;
