//! Fleetdispatch - Round-based vehicle dispatch for container terminals
//!
//! Repeatedly assigns a fleet of vehicles to pending container orders over a
//! network of fixed locations, minimizing total travel distance under
//! vehicle, order and location-capacity constraints, until every order is
//! served.
//!
//! # Example
//!
//! ```
//! use fleetdispatch::prelude::*;
//!
//! let world = WorldState::new(
//!     vec![
//!         Location::new("QC01", 0, 0, 1).unwrap(),
//!         Location::new("ST01", 750, 0, 1).unwrap(),
//!     ],
//!     vec![Vehicle { id: "SC1".into(), location: "QC01".into(), log_on: 0, log_off: 0 }],
//!     vec![Order {
//!         id: "CO1".into(),
//!         origin: "QC01".into(),
//!         destination: "ST01".into(),
//!         length_mm: 6_058,
//!         time_first_known: 0,
//!         delivered: false,
//!     }],
//! )
//! .unwrap();
//!
//! let mut engine = DispatchEngine::new(world, DispatchConfig::default());
//! while !engine.opt_ended() {
//!     engine.optimize().unwrap();
//!     engine.update_environment().unwrap();
//! }
//! assert_eq!(engine.history()[0].objective, 750);
//! ```

pub use fleetdispatch_config::{ConfigError, DispatchConfig};
pub use fleetdispatch_core::{
    Assignment, DispatchError, DistanceMatrix, Location, LocationKind, Order, Result,
    RoundRecord, Vehicle, WorldState,
};
pub use fleetdispatch_solver::{
    AssignmentModel, DispatchEngine, RoundSolution, SolveOutcome, SolveStatus,
};

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use fleetdispatch_config::DispatchConfig;
    pub use fleetdispatch_core::{
        Assignment, DispatchError, Location, LocationKind, Order, Result, RoundRecord, Vehicle,
        WorldState,
    };
    pub use fleetdispatch_solver::DispatchEngine;
}
