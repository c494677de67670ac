//! End-to-end mission example.
//!
//! Demonstrates: build config → MissionEngine → tick → read stats, for
//! a routed mission and a sweep mission over the same airspace.
//!
//! Run with `RUST_LOG=debug` to see routing decisions.

use sortie_bench::{reference_profile, sweep_profile};
use sortie_engine::{MissionEngine, TickOutcome};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn main() {
    init_tracing();
    println!("=== Sortie Quickstart ===\n");

    // --- Mission 1: four drones on partitioned waypoints ---
    let mut engine = MissionEngine::new(reference_profile(42)).unwrap();
    let stats = engine.airspace().stats();
    println!(
        "Airspace {}x{}: {} zones blocking {} cells, {} targets",
        stats.rows, stats.cols, stats.zone_count, stats.blocked_cells, stats.target_count
    );

    let mut outcome = TickOutcome::Continue;
    while outcome.is_running() && engine.current_tick().0 < 2_000 {
        outcome = engine.tick();
        let tick = engine.current_tick().0;
        if tick % 50 == 0 || !outcome.is_running() {
            let s = engine.stats();
            println!(
                "  tick {tick:4}: found={} remaining={} battery={} finished={}",
                s.targets_found, s.targets_remaining, s.total_battery, s.drones_finished
            );
        }
    }
    println!("Waypoint mission: {outcome:?}\n");

    for f in engine.flight_statuses() {
        println!(
            "  drone {} at {}: battery {} ({:?}), {} targets, {} waypoints left{}",
            f.drone.id,
            f.drone.position,
            f.drone.battery,
            f.drone.battery_status,
            f.drone.targets_found,
            f.drone.waypoints_remaining,
            if f.critical { ", critical" } else { "" },
        );
    }

    // --- Mission 2: two drones sweeping ---
    let mut engine = MissionEngine::new(sweep_profile(42)).unwrap();
    let outcome = engine.run(10_000);
    let s = engine.stats();
    println!(
        "\nSweep mission: {outcome:?} after {} ticks, found {} of {}",
        s.tick,
        s.targets_found,
        s.targets_found + s.targets_remaining
    );
}
