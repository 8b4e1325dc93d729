//! Per-round assignment model.
//!
//! The model is rebuilt from scratch every round: the remaining-order set
//! shrinks round over round, so prior-round variables would reference
//! already-delivered orders. This is a known performance trade-off (no
//! incremental reuse, no warm start) kept for correctness.

use fleetdispatch_core::{Order, Result, Vehicle, WorldState};

/// One round's decision space, objective coefficients and constraint data.
///
/// Decision variables are the full (vehicle, remaining order) cross product;
/// a variable at value 1 means the vehicle serves that order this round.
/// The constraint set is:
///
/// 1. saturation: accepted pairs == `min(#vehicles, #remaining orders)`
/// 2. each order paired with at most one vehicle
/// 3. each vehicle paired with at most one order
/// 4. per location, origin-side and destination-side accepted pairs each
///    bounded by `floor(capacity * relaxation)`
#[derive(Debug, Clone)]
pub struct AssignmentModel {
    vehicles: Vec<Vehicle>,
    orders: Vec<Order>,
    /// Pair costs, vehicle-major: reposition leg + haul leg.
    costs: Vec<u64>,
    target_pairs: usize,
    /// Effective per-location capacity under the current relaxation factor,
    /// applied independently to the origin side and the destination side.
    effective_capacity: Vec<u32>,
    /// Per order, index of its origin location.
    order_origin: Vec<usize>,
    /// Per order, index of its destination location.
    order_destination: Vec<usize>,
    relaxation: f64,
}

impl AssignmentModel {
    /// Builds the model for the current world state.
    ///
    /// Vehicles and remaining orders are taken as snapshots in load order,
    /// which fixes the variable ordering and keeps tie-breaking
    /// reproducible.
    pub fn build(world: &WorldState, relaxation: f64) -> Result<Self> {
        debug_assert!(relaxation >= 1.0, "relaxation factor must be at least 1.0");

        let locations = world.locations();
        let vehicles = world.vehicles();
        let orders = world.remaining_orders();

        let mut costs = Vec::with_capacity(vehicles.len() * orders.len());
        for vehicle in &vehicles {
            for order in &orders {
                let reposition = world.distance(&vehicle.location, &order.origin)?;
                let haul = world.distance(&order.origin, &order.destination)?;
                costs.push(reposition + haul);
            }
        }

        let location_idx = |name: &str| -> Result<usize> {
            locations.iter().position(|l| l.name == name).ok_or_else(|| {
                fleetdispatch_core::DispatchError::configuration(format!("unknown location '{name}'"))
            })
        };
        let order_origin =
            orders.iter().map(|o| location_idx(&o.origin)).collect::<Result<Vec<_>>>()?;
        let order_destination =
            orders.iter().map(|o| location_idx(&o.destination)).collect::<Result<Vec<_>>>()?;

        let effective_capacity =
            locations.iter().map(|l| (f64::from(l.capacity) * relaxation) as u32).collect();

        let target_pairs = vehicles.len().min(orders.len());

        Ok(Self {
            vehicles,
            orders,
            costs,
            target_pairs,
            effective_capacity,
            order_origin,
            order_destination,
            relaxation,
        })
    }

    /// Cost of assigning vehicle `v` to order `o` (snapshot indices).
    pub fn cost(&self, v: usize, o: usize) -> u64 {
        self.costs[v * self.orders.len() + o]
    }

    /// Exact number of pairs a feasible round must accept.
    pub fn target_pairs(&self) -> usize {
        self.target_pairs
    }

    /// Number of vehicles in this round's snapshot.
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Number of remaining orders in this round's snapshot.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of locations covered by the capacity constraints.
    pub fn location_count(&self) -> usize {
        self.effective_capacity.len()
    }

    /// Effective capacity of a location under the current relaxation.
    pub fn effective_capacity(&self, location: usize) -> u32 {
        self.effective_capacity[location]
    }

    /// Origin location index of an order.
    pub fn order_origin(&self, o: usize) -> usize {
        self.order_origin[o]
    }

    /// Destination location index of an order.
    pub fn order_destination(&self, o: usize) -> usize {
        self.order_destination[o]
    }

    /// The vehicle snapshot backing this model, in load order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// The remaining-order snapshot backing this model, in load order.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Relaxation factor this model was built with.
    pub fn relaxation(&self) -> f64 {
        self.relaxation
    }
}
