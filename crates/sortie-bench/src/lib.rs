//! Benchmark profiles and utilities for Sortie.
//!
//! Provides pre-built [`MissionConfig`] profiles for benchmarks and
//! examples:
//!
//! - [`reference_profile`]: 64x64 grid, four routed drones
//! - [`sweep_profile`]: 64x64 grid, two sweeping drones
//! - [`scatter_zones`]: deterministic zone placement via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use sortie_core::{NoFlyZone, Position, Target, Waypoint};
use sortie_engine::{DroneConfig, MissionConfig, SearchPattern, WaypointAssignment};

const SIDE: u32 = 64;

/// Build the reference profile: 64x64 grid, 40 zones, 60 targets, and
/// four drones splitting 24 waypoints between them.
pub fn reference_profile(seed: u64) -> MissionConfig {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let zones = scatter_zones(&mut rng, SIDE, SIDE, 40);
    let targets = scatter_targets(&mut rng, SIDE, SIDE, 60);
    let waypoints = (0..24)
        .map(|_| {
            Waypoint::new((
                rng.random_range(0..SIDE as i32),
                rng.random_range(0..SIDE as i32),
            ))
        })
        .collect();

    MissionConfig {
        rows: SIDE,
        cols: SIDE,
        battery: 2_000,
        zones,
        targets,
        waypoints,
        drones: corner_drones(4),
        search: SearchPattern::Waypoints,
        assignment: WaypointAssignment::Partitioned,
        ..MissionConfig::default()
    }
}

/// Build the sweep profile: same grid shape as [`reference_profile`]
/// but every drone runs a lawnmower sweep.
pub fn sweep_profile(seed: u64) -> MissionConfig {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut config = MissionConfig {
        rows: SIDE,
        cols: SIDE,
        battery: 10_000,
        zones: scatter_zones(&mut rng, SIDE, SIDE, 40),
        targets: scatter_targets(&mut rng, SIDE, SIDE, 60),
        drones: corner_drones(2),
        search: SearchPattern::Sweep,
        ..MissionConfig::default()
    };
    config.sweep.attempt_cap = 5_000;
    config
}

/// Generate `n` zones of side 1 to 4 anywhere on the grid except the
/// four corner cells, which drones launch from. The grid needs at least
/// one cell that is not a corner.
pub fn scatter_zones(rng: &mut ChaCha8Rng, rows: u32, cols: u32, n: usize) -> Vec<NoFlyZone> {
    let (r_max, c_max) = (rows as i32, cols as i32);
    let corners = [
        Position::new(0, 0),
        Position::new(0, c_max - 1),
        Position::new(r_max - 1, 0),
        Position::new(r_max - 1, c_max - 1),
    ];
    let mut zones = Vec::with_capacity(n);
    while zones.len() < n {
        let top = rng.random_range(0..r_max);
        let left = rng.random_range(0..c_max);
        let zone = NoFlyZone::new(
            Position::new(top, left),
            Position::new(top + rng.random_range(0..4), left + rng.random_range(0..4)),
            "bench",
        );
        if corners.iter().any(|&c| zone.contains(c)) {
            continue;
        }
        zones.push(zone);
    }
    zones
}

fn scatter_targets(rng: &mut ChaCha8Rng, rows: u32, cols: u32, n: usize) -> Vec<Target> {
    (0..n)
        .map(|_| {
            Target::new((
                rng.random_range(0..rows as i32),
                rng.random_range(0..cols as i32),
            ))
        })
        .collect()
}

fn corner_drones(n: u32) -> Vec<DroneConfig> {
    let last = SIDE as i32 - 1;
    let starts = [(0, 0), (0, last), (last, 0), (last, last)];
    (0..n)
        .map(|i| DroneConfig::new(i, starts[i as usize % starts.len()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortie_engine::MissionEngine;

    #[test]
    fn reference_profile_validates() {
        reference_profile(42).validate().unwrap();
        assert!(MissionEngine::new(reference_profile(42)).is_ok());
    }

    #[test]
    fn sweep_profile_validates() {
        sweep_profile(42).validate().unwrap();
    }

    #[test]
    fn zones_never_cover_launch_corners() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let zones = scatter_zones(&mut rng, 16, 16, 50);
        assert_eq!(zones.len(), 50);
        for z in &zones {
            for corner in [(0, 0), (0, 15), (15, 0), (15, 15)] {
                assert!(!z.contains(corner.into()));
            }
        }
    }

    #[test]
    fn profiles_are_deterministic() {
        let a = reference_profile(9);
        let b = reference_profile(9);
        assert_eq!(a.zones, b.zones);
        assert_eq!(a.targets, b.targets);
        assert_eq!(a.waypoints, b.waypoints);
    }
}
