//! Deterministic branch-and-bound solve for one assignment model.
//!
//! The search branches over vehicles in load order. At each vehicle it tries
//! every still-assignable order in (cost, load index) order, then a skip
//! branch when enough vehicles remain to reach saturation. Branches are
//! pruned when they cannot reach the exact target pair count, when a
//! location capacity would be exceeded, or when an admissible lower bound
//! already meets the incumbent objective.
//!
//! The wall-clock deadline is polled on a node-count stride; hitting it
//! leaves the result unproven and reports a timeout, which the repair loop
//! treats like infeasibility but logs distinctly.

use std::time::Instant;

use crate::model::AssignmentModel;

/// Deadline poll stride in explored nodes.
const DEADLINE_STRIDE: u64 = 4096;

/// Terminal status of one solve attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveStatus {
    /// Search space exhausted with a proven-optimal solution.
    Optimal(RoundSolution),
    /// Search space exhausted without any feasible saturated assignment.
    Infeasible,
    /// Deadline hit before optimality was proven.
    TimedOut,
}

/// A proven-optimal set of accepted pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSolution {
    /// Accepted `(vehicle index, order index)` pairs into the model's
    /// snapshots, ascending by vehicle.
    pub pairs: Vec<(usize, usize)>,
    /// Sum of reposition + haul cost over the accepted pairs.
    pub objective: u64,
}

/// Result of one solve attempt, with search statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    /// Terminal status, carrying the solution when optimal.
    pub status: SolveStatus,
    /// Number of search nodes expanded.
    pub nodes_explored: u64,
}

/// Solves the model to proven optimality or until the deadline.
pub fn solve(model: &AssignmentModel, deadline: Instant) -> SolveOutcome {
    if Instant::now() >= deadline {
        return SolveOutcome { status: SolveStatus::TimedOut, nodes_explored: 0 };
    }

    let mut search = Search::new(model, deadline);
    search.descend(0, 0, 0);

    let status = if search.timed_out {
        SolveStatus::TimedOut
    } else {
        match search.best.take() {
            Some(solution) => SolveStatus::Optimal(solution),
            None => SolveStatus::Infeasible,
        }
    };
    SolveOutcome { status, nodes_explored: search.nodes }
}

struct Search<'a> {
    model: &'a AssignmentModel,
    deadline: Instant,
    timed_out: bool,
    nodes: u64,
    best: Option<RoundSolution>,
    /// Per vehicle, order indices sorted by (cost, load index).
    candidates: Vec<Vec<usize>>,
    /// Per vehicle, cheapest cost over all orders; basis of the lower bound.
    row_min: Vec<u64>,
    order_used: Vec<bool>,
    origin_count: Vec<u32>,
    destination_count: Vec<u32>,
    chosen: Vec<(usize, usize)>,
    bound_scratch: Vec<u64>,
}

impl<'a> Search<'a> {
    fn new(model: &'a AssignmentModel, deadline: Instant) -> Self {
        let vehicles = model.vehicle_count();
        let orders = model.order_count();

        let candidates = (0..vehicles)
            .map(|v| {
                let mut sorted: Vec<usize> = (0..orders).collect();
                sorted.sort_by_key(|&o| (model.cost(v, o), o));
                sorted
            })
            .collect();
        let row_min = (0..vehicles)
            .map(|v| (0..orders).map(|o| model.cost(v, o)).min().unwrap_or(0))
            .collect();

        Self {
            model,
            deadline,
            timed_out: false,
            nodes: 0,
            best: None,
            candidates,
            row_min,
            order_used: vec![false; orders],
            origin_count: vec![0; model.location_count()],
            destination_count: vec![0; model.location_count()],
            chosen: Vec::with_capacity(model.target_pairs()),
            bound_scratch: Vec::with_capacity(vehicles),
        }
    }

    fn descend(&mut self, vehicle: usize, assigned: usize, cost: u64) {
        if self.timed_out {
            return;
        }
        self.nodes += 1;
        if self.nodes % DEADLINE_STRIDE == 0 && Instant::now() >= self.deadline {
            self.timed_out = true;
            return;
        }

        let target = self.model.target_pairs();
        let needed = target - assigned;

        if vehicle == self.model.vehicle_count() {
            if needed == 0 {
                let better = self.best.as_ref().map_or(true, |b| cost < b.objective);
                if better {
                    self.best = Some(RoundSolution { pairs: self.chosen.clone(), objective: cost });
                }
            }
            return;
        }

        let remaining = self.model.vehicle_count() - vehicle;
        if remaining < needed {
            // Saturation can no longer be reached down this branch.
            return;
        }
        if let Some(best_objective) = self.best.as_ref().map(|b| b.objective) {
            if cost + self.lower_bound(vehicle, needed) >= best_objective {
                return;
            }
        }

        if needed > 0 {
            for idx in 0..self.candidates[vehicle].len() {
                let order = self.candidates[vehicle][idx];
                if self.order_used[order] {
                    continue;
                }
                let origin = self.model.order_origin(order);
                let destination = self.model.order_destination(order);
                if self.origin_count[origin] >= self.model.effective_capacity(origin)
                    || self.destination_count[destination]
                        >= self.model.effective_capacity(destination)
                {
                    continue;
                }

                self.order_used[order] = true;
                self.origin_count[origin] += 1;
                self.destination_count[destination] += 1;
                self.chosen.push((vehicle, order));

                let pair_cost = self.model.cost(vehicle, order);
                self.descend(vehicle + 1, assigned + 1, cost + pair_cost);

                self.chosen.pop();
                self.destination_count[destination] -= 1;
                self.origin_count[origin] -= 1;
                self.order_used[order] = false;

                if self.timed_out {
                    return;
                }
            }
        }

        // Leave this vehicle idle, if saturation is still reachable without it.
        if remaining - 1 >= needed {
            self.descend(vehicle + 1, assigned, cost);
        }
    }

    /// Admissible lower bound on the extra cost of the `needed` pairs still
    /// to be placed among vehicles `from..`: the sum of the `needed`
    /// smallest per-vehicle row minima. Row minima range over all orders,
    /// so the bound never exceeds the true completion cost.
    fn lower_bound(&mut self, from: usize, needed: usize) -> u64 {
        if needed == 0 {
            return 0;
        }
        self.bound_scratch.clear();
        self.bound_scratch.extend_from_slice(&self.row_min[from..]);
        self.bound_scratch.sort_unstable();
        self.bound_scratch.iter().take(needed).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetdispatch_core::{Location, Order, Vehicle, WorldState};
    use std::time::Duration;

    fn order(id: &str, origin: &str, destination: &str) -> Order {
        Order {
            id: id.into(),
            origin: origin.into(),
            destination: destination.into(),
            length_mm: 6_058,
            time_first_known: 0,
            delivered: false,
        }
    }

    fn vehicle(id: &str, location: &str) -> Vehicle {
        Vehicle { id: id.into(), location: location.into(), log_on: 0, log_off: 0 }
    }

    fn far_deadline() -> Instant {
        Instant::now() + Duration::from_secs(60)
    }

    fn solve_world(world: &WorldState, relaxation: f64) -> SolveOutcome {
        let model = AssignmentModel::build(world, relaxation).unwrap();
        solve(&model, far_deadline())
    }

    #[test]
    fn picks_cheapest_vehicle_for_single_order() {
        // Three vehicles, one order: saturation forces exactly one pair and
        // the solver must pick the cheapest of the three candidates.
        let locations = vec![
            Location::new("QC01", 0, 0, 3).unwrap(),
            Location::new("ST01", 100, 0, 3).unwrap(),
            Location::new("ST02", 5_000, 0, 3).unwrap(),
            Location::new("ST03", 900, 0, 3).unwrap(),
        ];
        let vehicles =
            vec![vehicle("SC1", "ST02"), vehicle("SC2", "ST03"), vehicle("SC3", "ST01")];
        let orders = vec![order("CO1", "QC01", "ST01")];
        let world = WorldState::new(locations, vehicles, orders).unwrap();

        let outcome = solve_world(&world, 1.0);
        match outcome.status {
            SolveStatus::Optimal(solution) => {
                // SC3 at ST01: reposition 100 + haul 100.
                assert_eq!(solution.pairs, vec![(2, 0)]);
                assert_eq!(solution.objective, 200);
            }
            other => panic!("expected optimal, got {other:?}"),
        }
    }

    #[test]
    fn saturation_assigns_min_of_vehicles_and_orders() {
        let locations = vec![
            Location::new("QC01", 0, 0, 5).unwrap(),
            Location::new("ST01", 10, 0, 5).unwrap(),
        ];
        let vehicles = vec![vehicle("SC1", "QC01"), vehicle("SC2", "QC01")];
        let orders = vec![
            order("CO1", "QC01", "ST01"),
            order("CO2", "QC01", "ST01"),
            order("CO3", "QC01", "ST01"),
        ];
        let world = WorldState::new(locations, vehicles, orders).unwrap();

        let model = AssignmentModel::build(&world, 1.0).unwrap();
        assert_eq!(model.target_pairs(), 2);
        match solve(&model, far_deadline()).status {
            SolveStatus::Optimal(solution) => assert_eq!(solution.pairs.len(), 2),
            other => panic!("expected optimal, got {other:?}"),
        }
    }

    #[test]
    fn shared_origin_over_capacity_is_infeasible_until_relaxed() {
        // Two orders out of the same capacity-1 location: no saturated
        // assignment exists at factor 1.
        let locations = vec![
            Location::new("QC01", 0, 0, 1).unwrap(),
            Location::new("ST01", 100, 0, 2).unwrap(),
            Location::new("ST02", 0, 100, 2).unwrap(),
        ];
        let vehicles = vec![vehicle("SC1", "ST01"), vehicle("SC2", "ST02")];
        let orders = vec![order("CO1", "QC01", "ST01"), order("CO2", "QC01", "ST02")];
        let world = WorldState::new(locations, vehicles, orders).unwrap();

        assert_eq!(solve_world(&world, 1.0).status, SolveStatus::Infeasible);

        match solve_world(&world, 2.0).status {
            SolveStatus::Optimal(solution) => {
                assert_eq!(solution.pairs.len(), 2);
                let through_origin = solution
                    .pairs
                    .iter()
                    .filter(|&&(_, o)| [0, 1].contains(&o))
                    .count();
                assert!(through_origin <= 2);
            }
            other => panic!("expected optimal after relaxation, got {other:?}"),
        }
    }

    #[test]
    fn no_order_or_vehicle_is_paired_twice() {
        let locations = vec![
            Location::new("QC01", 0, 0, 4).unwrap(),
            Location::new("ST01", 50, 0, 4).unwrap(),
            Location::new("ST02", 0, 80, 4).unwrap(),
        ];
        let vehicles =
            vec![vehicle("SC1", "QC01"), vehicle("SC2", "ST01"), vehicle("SC3", "ST02")];
        let orders = vec![
            order("CO1", "QC01", "ST01"),
            order("CO2", "ST01", "ST02"),
            order("CO3", "ST02", "QC01"),
        ];
        let world = WorldState::new(locations, vehicles, orders).unwrap();

        match solve_world(&world, 1.0).status {
            SolveStatus::Optimal(solution) => {
                let mut vehicles_seen: Vec<_> = solution.pairs.iter().map(|p| p.0).collect();
                let mut orders_seen: Vec<_> = solution.pairs.iter().map(|p| p.1).collect();
                vehicles_seen.dedup();
                orders_seen.sort_unstable();
                orders_seen.dedup();
                assert_eq!(vehicles_seen.len(), 3);
                assert_eq!(orders_seen.len(), 3);
            }
            other => panic!("expected optimal, got {other:?}"),
        }
    }

    #[test]
    fn empty_order_set_solves_trivially() {
        let locations = vec![Location::new("QC01", 0, 0, 1).unwrap()];
        let world = WorldState::new(locations, vec![vehicle("SC1", "QC01")], vec![]).unwrap();

        match solve_world(&world, 1.0).status {
            SolveStatus::Optimal(solution) => {
                assert!(solution.pairs.is_empty());
                assert_eq!(solution.objective, 0);
            }
            other => panic!("expected optimal, got {other:?}"),
        }
    }

    #[test]
    fn expired_deadline_reports_timeout() {
        let locations = vec![
            Location::new("QC01", 0, 0, 1).unwrap(),
            Location::new("ST01", 10, 0, 1).unwrap(),
        ];
        let vehicles = vec![vehicle("SC1", "QC01")];
        let orders = vec![order("CO1", "QC01", "ST01")];
        let world = WorldState::new(locations, vehicles, orders).unwrap();

        let model = AssignmentModel::build(&world, 1.0).unwrap();
        let outcome = solve(&model, Instant::now());
        assert_eq!(outcome.status, SolveStatus::TimedOut);
    }
}
