//! World state: the single owner of all mutable entity state.

use std::collections::HashMap;

use crate::domain::{Location, Order, Vehicle};
use crate::error::{DispatchError, Result};
use crate::matrix::DistanceMatrix;

/// Owns locations, vehicles and orders plus the precomputed distance matrix.
///
/// All reads hand out snapshots (owned copies); the only way to mutate the
/// world is through [`WorldState::mark_delivered`] and
/// [`WorldState::update_vehicle_location`]. The solver and engine hold a
/// reference only for the duration of a round and rebuild their view from
/// fresh snapshots every round.
#[derive(Debug, Clone)]
pub struct WorldState {
    locations: Vec<Location>,
    vehicles: Vec<Vehicle>,
    orders: Vec<Order>,
    location_index: HashMap<String, usize>,
    vehicle_index: HashMap<String, usize>,
    order_index: HashMap<String, usize>,
    matrix: DistanceMatrix,
}

impl WorldState {
    /// Builds the world from loaded entity records and precomputes the
    /// distance matrix.
    ///
    /// # Errors
    ///
    /// Returns a configuration error on duplicate keys or on any vehicle
    /// location / order origin / order destination that does not resolve to
    /// a known location name.
    pub fn new(locations: Vec<Location>, vehicles: Vec<Vehicle>, orders: Vec<Order>) -> Result<Self> {
        let location_index = build_index(locations.iter().map(|l| l.name.clone()), "location")?;
        let vehicle_index = build_index(vehicles.iter().map(|v| v.id.clone()), "vehicle")?;
        let order_index = build_index(orders.iter().map(|o| o.id.clone()), "order")?;

        for vehicle in &vehicles {
            if !location_index.contains_key(&vehicle.location) {
                return Err(DispatchError::configuration(format!(
                    "vehicle '{}' starts at unknown location '{}'",
                    vehicle.id, vehicle.location
                )));
            }
        }
        for order in &orders {
            for name in [&order.origin, &order.destination] {
                if !location_index.contains_key(name) {
                    return Err(DispatchError::configuration(format!(
                        "order '{}' references unknown location '{name}'",
                        order.id
                    )));
                }
            }
        }

        let matrix = DistanceMatrix::from_locations(&locations);

        Ok(Self { locations, vehicles, orders, location_index, vehicle_index, order_index, matrix })
    }

    /// Returns the Manhattan distance between two locations by name.
    pub fn distance(&self, from: &str, to: &str) -> Result<u64> {
        let i = self.location_idx(from)?;
        let j = self.location_idx(to)?;
        Ok(self.matrix.get(i, j))
    }

    /// Returns the undelivered orders, preserving original load order.
    ///
    /// Iteration order matters: the assignment model builds its decision
    /// variables from this sequence, which keeps objective tie-breaking
    /// reproducible across runs.
    pub fn remaining_orders(&self) -> Vec<Order> {
        self.orders.iter().filter(|o| !o.delivered).cloned().collect()
    }

    /// Marks an order as delivered.
    ///
    /// A delivered order is never un-delivered: calling this twice for the
    /// same order is a caller error and fails with a protocol violation.
    pub fn mark_delivered(&mut self, order_id: &str) -> Result<()> {
        let idx = self.order_idx(order_id)?;
        let order = &mut self.orders[idx];
        if order.delivered {
            return Err(DispatchError::protocol(format!("order '{order_id}' already delivered")));
        }
        order.delivered = true;
        Ok(())
    }

    /// Moves a vehicle to a new current location.
    pub fn update_vehicle_location(&mut self, vehicle_id: &str, location: &str) -> Result<()> {
        if !self.location_index.contains_key(location) {
            return Err(DispatchError::configuration(format!("unknown location '{location}'")));
        }
        let idx = self.vehicle_idx(vehicle_id)?;
        self.vehicles[idx].location = location.to_string();
        Ok(())
    }

    /// Snapshot of all locations, in load order.
    pub fn locations(&self) -> Vec<Location> {
        self.locations.clone()
    }

    /// Snapshot of all vehicles, in load order.
    pub fn vehicles(&self) -> Vec<Vehicle> {
        self.vehicles.clone()
    }

    /// Snapshot of all orders (delivered included), in load order.
    pub fn orders(&self) -> Vec<Order> {
        self.orders.clone()
    }

    /// Snapshot of the precomputed distance matrix.
    pub fn distance_matrix(&self) -> DistanceMatrix {
        self.matrix.clone()
    }

    /// Snapshot of a single location by name.
    pub fn location(&self, name: &str) -> Result<Location> {
        self.location_idx(name).map(|i| self.locations[i].clone())
    }

    /// Snapshot of a single vehicle by id.
    pub fn vehicle(&self, id: &str) -> Result<Vehicle> {
        self.vehicle_idx(id).map(|i| self.vehicles[i].clone())
    }

    /// Snapshot of a single order by id.
    pub fn order(&self, id: &str) -> Result<Order> {
        self.order_idx(id).map(|i| self.orders[i].clone())
    }

    fn location_idx(&self, name: &str) -> Result<usize> {
        self.location_index
            .get(name)
            .copied()
            .ok_or_else(|| DispatchError::configuration(format!("unknown location '{name}'")))
    }

    fn vehicle_idx(&self, id: &str) -> Result<usize> {
        self.vehicle_index
            .get(id)
            .copied()
            .ok_or_else(|| DispatchError::configuration(format!("unknown vehicle '{id}'")))
    }

    fn order_idx(&self, id: &str) -> Result<usize> {
        self.order_index
            .get(id)
            .copied()
            .ok_or_else(|| DispatchError::configuration(format!("unknown order '{id}'")))
    }
}

fn build_index(keys: impl Iterator<Item = String>, entity: &str) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::new();
    for (i, key) in keys.enumerate() {
        if index.insert(key.clone(), i).is_some() {
            return Err(DispatchError::configuration(format!("duplicate {entity} key '{key}'")));
        }
    }
    Ok(index)
}
