//! Terminal Dispatch Example
//!
//! Builds a small quay/stack scenario, then runs assignment rounds until
//! every container order is delivered. Set `RUST_LOG=debug` to see the
//! per-attempt solver events.

use fleetdispatch::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn build_world() -> Result<WorldState> {
    let locations = vec![
        Location::new("QC01", 0, 0, 1)?,
        Location::new("QC02", 2_400, 0, 1)?,
        Location::new("ST01", 400, 1_800, 2)?,
        Location::new("ST02", 1_600, 1_800, 2)?,
        Location::new("GT01", 2_800, 3_200, 1)?,
        Location::new("PK01", 0, 3_000, 2)?,
    ];

    let vehicles = vec![
        Vehicle { id: "SC1".into(), location: "PK01".into(), log_on: 21_600, log_off: 50_400 },
        Vehicle { id: "SC2".into(), location: "PK01".into(), log_on: 21_600, log_off: 50_400 },
        Vehicle { id: "SC3".into(), location: "GT01".into(), log_on: 25_200, log_off: 54_000 },
    ];

    let order = |id: &str, origin: &str, destination: &str, length_mm| Order {
        id: id.into(),
        origin: origin.into(),
        destination: destination.into(),
        length_mm,
        time_first_known: 21_600,
        delivered: false,
    };
    let orders = vec![
        order("CO01", "QC01", "ST01", 6_058),
        order("CO02", "QC01", "ST02", 12_192),
        order("CO03", "QC02", "ST02", 6_058),
        order("CO04", "ST01", "GT01", 12_192),
        order("CO05", "ST02", "GT01", 6_058),
        order("CO06", "GT01", "ST01", 12_192),
        order("CO07", "QC02", "PK01", 6_058),
    ];

    WorldState::new(locations, vehicles, orders)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = DispatchConfig::load("dispatch.toml").unwrap_or_default();
    let mut engine = DispatchEngine::new(build_world()?, config);

    while !engine.opt_ended() {
        let record = engine.optimize()?.clone();
        engine.update_environment()?;
        info!(
            event = "round_complete",
            pairs = record.assignments.len(),
            objective = record.objective,
            relaxation = record.relaxation,
        );
    }

    let (world, history) = engine.into_parts();
    println!("\nDispatch finished in {} rounds:", history.len());
    for (i, round) in history.iter().enumerate() {
        println!(
            "  round {:>2}: {} pairs, objective {} mm, relaxation x{}",
            i + 1,
            round.assignments.len(),
            round.objective,
            round.relaxation,
        );
        for assignment in &round.assignments {
            println!("    {} -> {}", assignment.vehicle_id, assignment.order_id);
        }
    }

    println!("\nFinal vehicle positions:");
    for vehicle in world.vehicles() {
        println!("  {} at {}", vehicle.id, vehicle.location);
    }
    Ok(())
}
