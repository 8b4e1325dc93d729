//! Round orchestration: solve, apply, terminate.

use tracing::{debug, info};

use fleetdispatch_config::DispatchConfig;
use fleetdispatch_core::{DispatchError, Result, RoundRecord, WorldState};

use crate::repair;

/// Engine lifecycle state.
///
/// `Ready -> Solved -> {Ready | Terminal}`; applying a round is the
/// transition out of `Solved`, not a state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    Ready,
    Solved,
    Terminal,
}

/// Drives assignment rounds against an exclusively owned world state.
///
/// One round is in flight at a time: `optimize` produces a round record and
/// `update_environment` applies it before the next round may start. The
/// caller loops on the pair until [`DispatchEngine::opt_ended`] reports that
/// every order is delivered.
///
/// # Example
///
/// ```
/// use fleetdispatch_config::DispatchConfig;
/// use fleetdispatch_core::{Location, Order, Vehicle, WorldState};
/// use fleetdispatch_solver::DispatchEngine;
///
/// let world = WorldState::new(
///     vec![
///         Location::new("QC01", 0, 0, 1).unwrap(),
///         Location::new("ST01", 500, 0, 1).unwrap(),
///     ],
///     vec![Vehicle { id: "SC1".into(), location: "QC01".into(), log_on: 0, log_off: 0 }],
///     vec![Order {
///         id: "CO1".into(),
///         origin: "QC01".into(),
///         destination: "ST01".into(),
///         length_mm: 6_058,
///         time_first_known: 0,
///         delivered: false,
///     }],
/// )
/// .unwrap();
///
/// let mut engine = DispatchEngine::new(world, DispatchConfig::default());
/// while !engine.opt_ended() {
///     engine.optimize().unwrap();
///     engine.update_environment().unwrap();
/// }
/// assert_eq!(engine.history().len(), 1);
/// ```
#[derive(Debug)]
pub struct DispatchEngine {
    world: WorldState,
    config: DispatchConfig,
    state: EngineState,
    /// Index into `history` of the solved-but-unapplied round, if any.
    pending: Option<usize>,
    history: Vec<RoundRecord>,
}

impl DispatchEngine {
    /// Creates an engine owning the given world.
    ///
    /// A world with no undelivered orders starts terminal.
    pub fn new(world: WorldState, config: DispatchConfig) -> Self {
        let state = if world.remaining_orders().is_empty() {
            EngineState::Terminal
        } else {
            EngineState::Ready
        };
        Self { world, config, state, pending: None, history: Vec::new() }
    }

    /// Solves one round against the current world state.
    ///
    /// On success the round is appended to the history and held pending
    /// until [`DispatchEngine::update_environment`] applies it.
    ///
    /// # Errors
    ///
    /// - `ProtocolViolation` when called with an unapplied round pending or
    ///   after termination
    /// - `Configuration` when orders remain but no vehicle exists to serve
    ///   them (such a run could never terminate)
    /// - `RelaxationExhausted` from the repair loop
    pub fn optimize(&mut self) -> Result<&RoundRecord> {
        match self.state {
            EngineState::Ready => {}
            EngineState::Solved => {
                return Err(DispatchError::protocol(
                    "optimize called again before the pending round was applied",
                ));
            }
            EngineState::Terminal => {
                return Err(DispatchError::protocol("optimize called after termination"));
            }
        }
        if self.world.vehicles().is_empty() {
            return Err(DispatchError::configuration(
                "orders remain but no vehicles are available to serve them",
            ));
        }

        debug!(
            event = "round_start",
            round = self.history.len() + 1,
            remaining = self.world.remaining_orders().len(),
        );

        let record = repair::solve_round(&self.world, &self.config)?;
        self.history.push(record);
        let idx = self.history.len() - 1;
        self.pending = Some(idx);
        self.state = EngineState::Solved;
        Ok(&self.history[idx])
    }

    /// Applies the pending round: marks each accepted order delivered and
    /// moves its vehicle to the order's destination.
    ///
    /// Application is all-or-nothing: every pair is re-validated against the
    /// world before the first mutation.
    ///
    /// # Errors
    ///
    /// `ProtocolViolation` when there is no unconsumed solved round, i.e.
    /// when called from `Ready` or after `Terminal`.
    pub fn update_environment(&mut self) -> Result<()> {
        match self.state {
            EngineState::Solved => {}
            EngineState::Ready => {
                return Err(DispatchError::protocol(
                    "update_environment called without a preceding optimize",
                ));
            }
            EngineState::Terminal => {
                return Err(DispatchError::protocol(
                    "update_environment called after termination",
                ));
            }
        }
        let idx = self
            .pending
            .take()
            .ok_or_else(|| DispatchError::protocol("no solved round to apply"))?;
        let record = &self.history[idx];

        // Validate every pair before mutating anything.
        for assignment in &record.assignments {
            let order = self.world.order(&assignment.order_id)?;
            if order.delivered {
                return Err(DispatchError::protocol(format!(
                    "round references already-delivered order '{}'",
                    order.id
                )));
            }
            self.world.vehicle(&assignment.vehicle_id)?;
        }

        for assignment in &record.assignments {
            let order = self.world.order(&assignment.order_id)?;
            self.world.mark_delivered(&assignment.order_id)?;
            self.world.update_vehicle_location(&assignment.vehicle_id, &order.destination)?;
        }
        let pairs = record.assignments.len();

        let remaining = self.world.remaining_orders().len();
        self.state = if remaining == 0 { EngineState::Terminal } else { EngineState::Ready };

        info!(event = "round_applied", round = idx + 1, pairs, remaining);
        Ok(())
    }

    /// True iff no undelivered orders remain.
    pub fn opt_ended(&self) -> bool {
        self.world.remaining_orders().is_empty()
    }

    /// Read access to the world state.
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Append-only history of solved rounds, oldest first.
    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    /// Consumes the engine, yielding the final world and the round history
    /// for the external reporting layer.
    pub fn into_parts(self) -> (WorldState, Vec<RoundRecord>) {
        (self.world, self.history)
    }
}
