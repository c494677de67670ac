//! Test fixtures and scenario builders for Sortie development.
//!
//! Canned airspaces for the routing scenarios that come up again and
//! again (open grid, solid wall, wall with a gap), a seeded random
//! airspace generator, and a few assertion helpers for routes.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use sortie_core::{NoFlyZone, Position};
use sortie_space::Airspace;

/// An empty `rows x cols` airspace.
///
/// # Panics
///
/// Panics if either dimension is zero.
pub fn open_airspace(rows: u32, cols: u32) -> Airspace {
    Airspace::new(rows, cols).unwrap()
}

/// 5x5 airspace split by a solid wall on column 2, rows 0 to 4.
pub fn wall_airspace() -> Airspace {
    let mut space = open_airspace(5, 5);
    space.add_nfz(NoFlyZone::new(Position::new(0, 2), Position::new(4, 2), "wall"));
    space
}

/// 5x5 airspace with a wall on column 2 that leaves row 4 open.
pub fn gapped_wall_airspace() -> Airspace {
    let mut space = open_airspace(5, 5);
    space.add_nfz(NoFlyZone::new(Position::new(0, 2), Position::new(3, 2), "wall"));
    space
}

/// Deterministic random airspace: `zones` rectangles of side 1 to 3 and
/// `targets` targets on open cells.
///
/// The same seed always yields the same airspace. Cell `(0, 0)` is never
/// blocked so it can serve as a launch cell; zones that would cover it
/// are redrawn, so tiny grids may end up with fewer zones.
pub fn random_airspace(seed: u64, rows: u32, cols: u32, zones: usize, targets: usize) -> Airspace {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut space = open_airspace(rows, cols);
    let (r_max, c_max) = (rows as i32, cols as i32);

    // A 1x1 grid has nowhere to put a zone; give up after a few misses.
    let mut placed = 0;
    for _ in 0..zones.saturating_mul(16) {
        if placed == zones {
            break;
        }
        let top = rng.random_range(0..r_max);
        let left = rng.random_range(0..c_max);
        let zone = NoFlyZone::new(
            Position::new(top, left),
            Position::new(top + rng.random_range(0..3), left + rng.random_range(0..3)),
            "random",
        );
        if zone.contains(Position::new(0, 0)) {
            continue;
        }
        space.add_nfz(zone);
        placed += 1;
    }

    let open: Vec<Position> = (0..r_max)
        .flat_map(|r| (0..c_max).map(move |c| Position::new(r, c)))
        .filter(|&p| space.is_valid(p) && p != Position::new(0, 0))
        .collect();
    for p in open.choose_multiple(&mut rng, targets) {
        space.add_target(*p);
    }
    space
}

/// Asserts that consecutive cells of `route`, starting from `from`, are
/// exactly one grid step apart.
pub fn assert_unit_steps(from: Position, route: &[Position]) {
    let mut prev = from;
    for &p in route {
        assert_eq!(prev.manhattan(p), 1, "{prev} -> {p} is not a unit step");
        prev = p;
    }
}

/// Asserts that every cell of `route` is valid in `space`.
pub fn assert_all_valid(space: &Airspace, route: &[Position]) {
    for &p in route {
        assert!(space.is_valid(p), "{p} is not valid airspace");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_airspace_is_deterministic() {
        let a = random_airspace(7, 12, 12, 4, 5);
        let b = random_airspace(7, 12, 12, 4, 5);
        assert_eq!(a.stats(), b.stats());
        assert_eq!(a.targets().collect::<Vec<_>>(), b.targets().collect::<Vec<_>>());
        assert!(a.is_valid(Position::new(0, 0)));
        assert_eq!(a.stats().zone_count, 4);
        assert_eq!(a.target_count(), 5);
    }

    #[test]
    fn targets_sit_on_open_cells() {
        let space = random_airspace(99, 8, 8, 6, 10);
        assert!(space.targets().all(|p| space.is_valid(p)));
    }
}
