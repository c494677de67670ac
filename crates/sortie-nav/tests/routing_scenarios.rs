//! Integration test: navigators driven the way the mission engine
//! drives them, over fixture and seeded random airspaces.

use proptest::prelude::*;
use sortie_core::{DroneId, NoFlyZone, Position, Waypoint};
use sortie_nav::{CoverageSweep, Drone, Navigator, WaypointRouter};
use sortie_space::Airspace;
use sortie_test_utils::{assert_all_valid, gapped_wall_airspace, random_airspace, wall_airspace};

/// Step `nav` until it returns `None` or `max_steps` is reached, moving
/// only to valid cells. Returns whether it finished.
fn drive(nav: &mut dyn Navigator, drone: &mut Drone, space: &Airspace, max_steps: usize) -> bool {
    for _ in 0..max_steps {
        match nav.next_position(drone, space) {
            None => return true,
            Some(p) if space.is_valid(p) => {
                drone.move_to(p);
            }
            Some(_) => {}
        }
    }
    false
}

fn drone_with(waypoints: &[(i32, i32)]) -> Drone {
    let mut d = Drone::new(DroneId(0), Position::new(0, 0), 1_000);
    d.assign_waypoints(waypoints.iter().map(|&w| Waypoint::new(w)).collect());
    d
}

#[test]
fn walled_off_waypoint_is_skipped_and_next_one_reached() {
    let space = wall_airspace();
    let mut d = drone_with(&[(0, 4), (4, 0)]);
    let mut router = WaypointRouter::default();
    assert!(drive(&mut router, &mut d, &space, 100));
    assert_eq!(d.position(), Position::new(4, 0));
    assert_eq!(d.waypoints_remaining(), 0);
    assert!(d.path_history().iter().all(|p| p.col < 2));
}

#[test]
fn gapped_wall_is_crossed_through_the_gap() {
    let space = gapped_wall_airspace();
    let mut d = drone_with(&[(0, 4)]);
    let mut router = WaypointRouter::default();
    assert!(drive(&mut router, &mut d, &space, 100));
    assert_eq!(d.position(), Position::new(0, 4));
    assert!(d.path_history().contains(&Position::new(4, 2)));
    assert_all_valid(&space, d.path_history());
}

#[test]
fn router_detours_round_a_box_between_waypoints() {
    let mut space = Airspace::new(9, 9).unwrap();
    space.add_nfz(NoFlyZone::new(Position::new(3, 3), Position::new(5, 5), "hangar"));
    let mut d = drone_with(&[(4, 0), (4, 8), (0, 0)]);
    let mut router = WaypointRouter::default();
    assert!(drive(&mut router, &mut d, &space, 200));
    assert_eq!(d.position(), Position::new(0, 0));
    assert!(d.path_history().contains(&Position::new(4, 8)));
    assert_all_valid(&space, d.path_history());
}

#[test]
fn sweep_covers_every_open_cell_round_a_post() {
    let mut space = Airspace::new(6, 7).unwrap();
    space.add_nfz(NoFlyZone::new(Position::new(2, 3), Position::new(2, 3), "post"));
    let mut d = Drone::new(DroneId(0), Position::new(0, 0), 1_000);
    let mut sweep = CoverageSweep::default();
    assert!(drive(&mut sweep, &mut d, &space, 500));
    for r in 0..6 {
        for c in 0..7 {
            let p = Position::new(r, c);
            if space.is_valid(p) {
                assert!(d.path_history().contains(&p), "{p} never visited");
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn router_cursor_only_moves_forward(
        seed in any::<u64>(),
        zones in 0usize..10,
        waypoints in proptest::collection::vec((0i32..10, 0i32..10), 1..6),
    ) {
        let space = random_airspace(seed, 10, 10, zones, 0);
        let mut d = drone_with(&waypoints);
        let mut router = WaypointRouter::default();
        let mut cursor = d.waypoint_cursor();
        for _ in 0..300 {
            let next = router.next_position(d.position(), &mut d, &space);
            prop_assert!(d.waypoint_cursor() >= cursor);
            cursor = d.waypoint_cursor();
            match next {
                None => {
                    prop_assert_eq!(d.waypoints_remaining(), 0);
                    break;
                }
                Some(p) if space.is_valid(p) => {
                    d.move_to(p);
                }
                Some(_) => {}
            }
        }
    }
}
