//! Capacity-relaxation feasibility-repair loop.
//!
//! Location capacity is a soft operational target: when a round is
//! infeasible at the current factor (typically because too many orders
//! converge on one location), the loop relaxes capacity and rebuilds the
//! whole model rather than refusing to schedule, which would stall the
//! fleet. Every round starts unrelaxed; the retry count is bounded and
//! exhausting it is a hard failure, not an endless loop.

use std::time::Instant;

use tracing::{debug, info, warn};

use fleetdispatch_config::DispatchConfig;
use fleetdispatch_core::{Assignment, DispatchError, Result, RoundRecord, WorldState};

use crate::model::AssignmentModel;
use crate::search::{self, SolveStatus};

/// Solves one round against the current world state.
///
/// Builds the assignment model at relaxation factor 1.0 and solves it under
/// the configured time limit; on a non-optimal outcome the factor grows by
/// `relaxation_growth` and the model is rebuilt from scratch (fresh
/// variables and constraints, no warm start).
///
/// # Errors
///
/// Returns [`DispatchError::RelaxationExhausted`] when
/// `max_relaxation_attempts` solve attempts all end non-optimal.
pub fn solve_round(world: &WorldState, config: &DispatchConfig) -> Result<RoundRecord> {
    let mut factor = 1.0;

    for attempt in 1..=config.max_relaxation_attempts {
        let model = AssignmentModel::build(world, factor)?;
        debug!(
            event = "solve_attempt",
            attempt,
            relaxation = factor,
            vehicles = model.vehicle_count(),
            orders = model.order_count(),
            target_pairs = model.target_pairs(),
        );

        let deadline = Instant::now() + config.solve_time_limit();
        let outcome = search::solve(&model, deadline);

        match outcome.status {
            SolveStatus::Optimal(solution) => {
                info!(
                    event = "round_solved",
                    attempt,
                    relaxation = factor,
                    pairs = solution.pairs.len(),
                    objective = solution.objective,
                    nodes = outcome.nodes_explored,
                );
                let assignments = solution
                    .pairs
                    .iter()
                    .map(|&(v, o)| Assignment {
                        vehicle_id: model.vehicles()[v].id.clone(),
                        order_id: model.orders()[o].id.clone(),
                    })
                    .collect();
                return Ok(RoundRecord {
                    assignments,
                    objective: solution.objective,
                    relaxation: factor,
                });
            }
            SolveStatus::TimedOut => {
                // Operators need to tell "solver too slow" from "too
                // constrained"; the retry path is the same.
                warn!(
                    event = "solve_retry",
                    reason = "timeout",
                    attempt,
                    relaxation = factor,
                    nodes = outcome.nodes_explored,
                );
            }
            SolveStatus::Infeasible => {
                warn!(
                    event = "solve_retry",
                    reason = "infeasible",
                    attempt,
                    relaxation = factor,
                    nodes = outcome.nodes_explored,
                );
            }
        }

        if attempt < config.max_relaxation_attempts {
            factor *= config.relaxation_growth;
        }
    }

    Err(DispatchError::RelaxationExhausted {
        attempts: config.max_relaxation_attempts,
        factor,
    })
}
