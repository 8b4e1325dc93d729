//! Tests for world state queries, mutators and snapshot semantics.

use crate::domain::{Location, Order, Vehicle};
use crate::error::DispatchError;
use crate::world::WorldState;

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
    Vehicle { id: id.into(), location: location.into(), log_on: 0, log_off: 86_400 }
}

fn world() -> WorldState {
    let locations = vec![
        Location::new("QC01", 0, 0, 2).unwrap(),
        Location::new("ST01", 1_000, 0, 1).unwrap(),
        Location::new("ST02", 0, 2_000, 1).unwrap(),
    ];
    let vehicles = vec![vehicle("SC1", "QC01"), vehicle("SC2", "ST01")];
    let orders = vec![order("CO1", "QC01", "ST01"), order("CO2", "ST01", "ST02")];
    WorldState::new(locations, vehicles, orders).unwrap()
}

#[test]
fn distance_is_symmetric_and_checked() {
    let world = world();
    assert_eq!(world.distance("QC01", "ST01").unwrap(), 1_000);
    assert_eq!(world.distance("ST01", "QC01").unwrap(), 1_000);
    assert_eq!(world.distance("QC01", "QC01").unwrap(), 0);

    let err = world.distance("QC01", "ST99").unwrap_err();
    assert!(matches!(err, DispatchError::Configuration(_)));
}

#[test]
fn remaining_orders_preserve_load_order() {
    let mut world = world();
    let ids: Vec<_> = world.remaining_orders().into_iter().map(|o| o.id).collect();
    assert_eq!(ids, vec!["CO1", "CO2"]);

    world.mark_delivered("CO1").unwrap();
    let ids: Vec<_> = world.remaining_orders().into_iter().map(|o| o.id).collect();
    assert_eq!(ids, vec!["CO2"]);
}

#[test]
fn mark_delivered_is_single_shot() {
    let mut world = world();
    world.mark_delivered("CO1").unwrap();
    assert!(world.order("CO1").unwrap().delivered);

    // A second mark must not silently un-deliver or no-op.
    let err = world.mark_delivered("CO1").unwrap_err();
    assert!(matches!(err, DispatchError::ProtocolViolation(_)));
    assert!(world.order("CO1").unwrap().delivered);
}

#[test]
fn mark_delivered_unknown_order() {
    let mut world = world();
    let err = world.mark_delivered("CO99").unwrap_err();
    assert!(matches!(err, DispatchError::Configuration(_)));
}

#[test]
fn update_vehicle_location_moves_vehicle() {
    let mut world = world();
    world.update_vehicle_location("SC1", "ST02").unwrap();
    assert_eq!(world.vehicle("SC1").unwrap().location, "ST02");

    assert!(world.update_vehicle_location("SC9", "ST02").is_err());
    assert!(world.update_vehicle_location("SC1", "ST99").is_err());
}

#[test]
fn accessors_return_snapshots() {
    let world = world();
    let mut vehicles = world.vehicles();
    vehicles[0].location = "ST02".into();

    // Mutating the snapshot must not leak back into the world.
    assert_eq!(world.vehicle("SC1").unwrap().location, "QC01");

    let mut orders = world.orders();
    orders[0].delivered = true;
    assert!(!world.order("CO1").unwrap().delivered);
}

#[test]
fn construction_rejects_duplicate_keys() {
    let locations = vec![Location::new("QC01", 0, 0, 1).unwrap(), Location::new("QC01", 5, 5, 1).unwrap()];
    let err = WorldState::new(locations, vec![], vec![]).unwrap_err();
    assert!(matches!(err, DispatchError::Configuration(_)));
}

#[test]
fn construction_rejects_dangling_references() {
    let locations = vec![Location::new("QC01", 0, 0, 1).unwrap()];

    let err = WorldState::new(locations.clone(), vec![vehicle("SC1", "ST01")], vec![]).unwrap_err();
    assert!(matches!(err, DispatchError::Configuration(_)));

    let err =
        WorldState::new(locations, vec![], vec![order("CO1", "QC01", "ST01")]).unwrap_err();
    assert!(matches!(err, DispatchError::Configuration(_)));
}
