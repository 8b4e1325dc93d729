//! Typed domain entities for the dispatch problem.
//!
//! These are plain value structs: the external metadata loader produces them
//! and `WorldState` takes ownership. All ids are plain strings matched
//! exactly against the loaded records.

use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, Result};

/// Terminal-area kind, derived from the uppercase prefix of a location name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    /// Quay crane transfer point (`QC*`).
    QuayCrane,
    /// Yard stack block (`ST*`).
    Stack,
    /// Landside gate lane (`GT*`).
    Gate,
    /// Parking / buffer area (`PK*`).
    Park,
}

impl LocationKind {
    /// Derives the kind from a location name prefix.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the name does not start with a
    /// known terminal-area prefix.
    pub fn from_name(name: &str) -> Result<Self> {
        let prefix: String = name.chars().take_while(|c| c.is_ascii_uppercase()).collect();
        match prefix.as_str() {
            "QC" => Ok(LocationKind::QuayCrane),
            "ST" => Ok(LocationKind::Stack),
            "GT" => Ok(LocationKind::Gate),
            "PK" => Ok(LocationKind::Park),
            _ => Err(DispatchError::configuration(format!(
                "unknown location kind for name '{name}'"
            ))),
        }
    }
}

/// A fixed point in the terminal.
///
/// `capacity` limits how many accepted pairs may reference this location as
/// origin (resp. destination) within a single round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Unique location name, e.g. `QC03`.
    pub name: String,
    /// X coordinate in mm.
    pub x: i64,
    /// Y coordinate in mm.
    pub y: i64,
    /// Terminal-area kind derived from the name prefix.
    pub kind: LocationKind,
    /// Maximum concurrent vehicle references per round side.
    pub capacity: u32,
}

impl Location {
    /// Creates a location, deriving its kind from the name prefix.
    pub fn new(name: impl Into<String>, x: i64, y: i64, capacity: u32) -> Result<Self> {
        let name = name.into();
        let kind = LocationKind::from_name(&name)?;
        Ok(Self { name, x, y, kind, capacity })
    }
}

/// A mobile resource, assignable to at most one order per round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique vehicle id.
    pub id: String,
    /// Current location name. Overwritten after each applied round.
    pub location: String,
    /// Log-on time (epoch seconds). Informational, not enforced.
    pub log_on: i64,
    /// Log-off time (epoch seconds). Informational, not enforced.
    pub log_off: i64,
}

/// A request to move one container from an origin to a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique container order id.
    pub id: String,
    /// Origin location name.
    pub origin: String,
    /// Destination location name.
    pub destination: String,
    /// Container length in mm.
    pub length_mm: u32,
    /// Time the order first became known (epoch seconds).
    pub time_first_known: i64,
    /// Delivery flag; flips to true exactly once over a run.
    pub delivered: bool,
}

/// One accepted (vehicle, order) pair within a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assigned vehicle id.
    pub vehicle_id: String,
    /// Served order id.
    pub order_id: String,
}

/// Outcome of one successful round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Accepted pairs, in deterministic solve order.
    pub assignments: Vec<Assignment>,
    /// Total reposition + haul distance over the accepted pairs.
    pub objective: u64,
    /// Capacity relaxation factor in effect when the round solved.
    pub relaxation: f64,
}
