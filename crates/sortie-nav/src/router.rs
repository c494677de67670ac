//! Waypoint following with no-fly-zone bypass and loop breaking.

use indexmap::IndexSet;
use sortie_core::Position;
use sortie_space::Airspace;
use tracing::{debug, info};

use crate::drone::Drone;
use crate::navigator::Navigator;
use crate::planner::BypassPlanner;

/// Tuning knobs for [`WaypointRouter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouterConfig {
    /// Size of the recent-cell memory used for loop detection. The
    /// memory is cleared when it grows past this. Default: 20.
    pub recent_capacity: usize,
    /// Consecutive revisits tolerated before the router stops trusting
    /// the greedy step and makes an escape move instead. Default: 3.
    pub stuck_threshold: u32,
    /// Step budget of the greedy bypass search. Default: 20.
    pub greedy_step_cap: usize,
    /// Step budget of each straight bypass leg. Default: 30.
    pub direct_step_cap: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            recent_capacity: 20,
            stuck_threshold: 3,
            greedy_step_cap: 20,
            direct_step_cap: 30,
        }
    }
}

/// Follows a drone's waypoints, detouring around no-fly zones.
///
/// Each call to [`next_position`](WaypointRouter::next_position):
///
/// 1. remembers the current cell for loop detection;
/// 2. replays the next cell of an active bypass route, if any;
/// 3. otherwise takes the drone's greedy waypoint step, and
///    - makes an escape move if the drone keeps revisiting cells,
///    - plans a full bypass to the waypoint if the step is blocked,
///    - skips the waypoint if no bypass strategy works.
///
/// One router per drone; all state is local to the instance.
#[derive(Clone, Debug)]
pub struct WaypointRouter {
    config: RouterConfig,
    planner: BypassPlanner,
    bypass: Vec<Position>,
    bypass_cursor: usize,
    recent: IndexSet<Position>,
    stuck_count: u32,
}

impl WaypointRouter {
    /// A router with the given tuning.
    pub fn new(config: RouterConfig) -> Self {
        let planner = BypassPlanner::new(config.greedy_step_cap, config.direct_step_cap);
        Self {
            config,
            planner,
            bypass: Vec::new(),
            bypass_cursor: 0,
            recent: IndexSet::new(),
            stuck_count: 0,
        }
    }

    /// The tuning this router was built with.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Whether a bypass route is being replayed.
    pub fn is_bypassing(&self) -> bool {
        self.bypass_cursor < self.bypass.len()
    }

    /// Cells of the active bypass route still to be flown.
    pub fn pending_bypass(&self) -> &[Position] {
        &self.bypass[self.bypass_cursor.min(self.bypass.len())..]
    }

    /// Current count of consecutive revisits.
    pub fn stuck_count(&self) -> u32 {
        self.stuck_count
    }

    /// Next cell for `drone` standing at `current`, or `None` once its
    /// waypoints are exhausted.
    ///
    /// May advance the drone's waypoint cursor: reached waypoints are
    /// consumed and unreachable ones are skipped.
    pub fn next_position(
        &mut self,
        current: Position,
        drone: &mut Drone,
        airspace: &Airspace,
    ) -> Option<Position> {
        self.remember(current);

        // Every pass that does not return skips a waypoint, so this runs
        // at most once per remaining waypoint.
        loop {
            if let Some(next) = self.next_bypass_cell() {
                return Some(next);
            }

            let desired = drone.next_waypoint_step(current)?;
            let goal = drone.current_waypoint().map_or(desired, |w| w.position);

            if self.recent.contains(&desired) {
                self.stuck_count += 1;
                if self.stuck_count > self.config.stuck_threshold {
                    let escape = escape_move(current, goal, airspace);
                    debug!(
                        drone = %drone.id(),
                        %current,
                        %escape,
                        stuck = self.stuck_count,
                        "revisit loop detected, making escape move"
                    );
                    return Some(escape);
                }
            } else {
                self.stuck_count = 0;
            }

            if airspace.is_valid(desired) {
                return Some(desired);
            }

            match self.planner.plan(current, goal, airspace) {
                Some((strategy, route)) => {
                    debug!(
                        drone = %drone.id(),
                        %current,
                        %goal,
                        %strategy,
                        len = route.len(),
                        "bypass route installed"
                    );
                    self.bypass = route;
                    self.bypass_cursor = 0;
                }
                None => {
                    info!(drone = %drone.id(), %goal, "no bypass found, skipping waypoint");
                    drone.skip_waypoint();
                }
            }
        }
    }

    fn remember(&mut self, current: Position) {
        self.recent.insert(current);
        if self.recent.len() > self.config.recent_capacity {
            self.recent.clear();
            self.recent.insert(current);
        }
    }

    fn next_bypass_cell(&mut self) -> Option<Position> {
        match self.bypass.get(self.bypass_cursor) {
            Some(&next) => {
                self.bypass_cursor += 1;
                Some(next)
            }
            None => {
                self.bypass.clear();
                self.bypass_cursor = 0;
                None
            }
        }
    }
}

impl Default for WaypointRouter {
    fn default() -> Self {
        Self::new(RouterConfig::default())
    }
}

impl Navigator for WaypointRouter {
    fn name(&self) -> &str {
        "waypoint_router"
    }

    fn next_position(&mut self, drone: &mut Drone, airspace: &Airspace) -> Option<Position> {
        WaypointRouter::next_position(self, drone.position(), drone, airspace)
    }
}

/// One escape step: the valid neighbour closest to `goal`, else
/// any in-bounds neighbour, else stay put.
fn escape_move(current: Position, goal: Position, airspace: &Airspace) -> Position {
    airspace
        .valid_neighbours(current)
        .into_iter()
        .reduce(|best, n| {
            if n.manhattan(goal) < best.manhattan(goal) {
                n
            } else {
                best
            }
        })
        .or_else(|| airspace.neighbours(current).first().copied())
        .unwrap_or(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortie_core::{DroneId, NoFlyZone, Waypoint};
    use sortie_test_utils::{gapped_wall_airspace, open_airspace, wall_airspace};

    fn drone(start: (i32, i32), waypoints: &[(i32, i32)]) -> Drone {
        let mut d = Drone::new(DroneId(1), start.into(), 400);
        d.assign_waypoints(waypoints.iter().map(|&w| Waypoint::new(w)).collect());
        d
    }

    /// Drive `router` like the engine does, returning the cells flown.
    fn fly(
        router: &mut WaypointRouter,
        d: &mut Drone,
        space: &Airspace,
        max_steps: usize,
    ) -> Vec<Position> {
        let mut flown = Vec::new();
        for _ in 0..max_steps {
            let Some(next) = Navigator::next_position(router, d, space) else {
                break;
            };
            assert!(space.is_valid(next), "router proposed invalid {next}");
            d.move_to(next);
            flown.push(next);
        }
        flown
    }

    #[test]
    fn open_grid_reaches_waypoint_then_finishes() {
        let space = open_airspace(5, 5);
        let mut d = drone((0, 0), &[(0, 4)]);
        let mut router = WaypointRouter::default();
        let flown = fly(&mut router, &mut d, &space, 4);
        assert_eq!(flown.len(), 4);
        assert_eq!(d.position(), Position::new(0, 4));
        assert_eq!(d.waypoint_cursor(), 0);

        assert_eq!(router.next_position(d.position(), &mut d, &space), None);
        assert_eq!(d.waypoint_cursor(), 1);
        assert_eq!(router.next_position(d.position(), &mut d, &space), None);
    }

    #[test]
    fn solid_wall_skips_the_waypoint() {
        let space = wall_airspace();
        let mut d = drone((0, 0), &[(0, 4)]);
        let mut router = WaypointRouter::default();
        let flown = fly(&mut router, &mut d, &space, 50);
        assert_eq!(flown, vec![Position::new(0, 1)]);
        assert_eq!(d.waypoint_cursor(), 1);
        assert!(d.path_history().iter().all(|p| p.col < 2));
    }

    #[test]
    fn skipped_waypoint_falls_through_to_the_next() {
        let space = wall_airspace();
        let mut d = drone((0, 0), &[(0, 4), (3, 0)]);
        let mut router = WaypointRouter::default();
        let flown = fly(&mut router, &mut d, &space, 50);
        assert_eq!(flown.last(), Some(&Position::new(3, 0)));
        assert_eq!(d.waypoint_cursor(), 2);
    }

    #[test]
    fn bypass_through_gap_ends_on_waypoint() {
        let space = gapped_wall_airspace();
        let mut d = drone((0, 0), &[(0, 4)]);
        let mut router = WaypointRouter::default();

        assert_eq!(
            router.next_position(d.position(), &mut d, &space),
            Some(Position::new(0, 1))
        );
        d.move_to(Position::new(0, 1));

        let first = router.next_position(d.position(), &mut d, &space).unwrap();
        assert!(router.is_bypassing());
        let mut route = vec![first];
        route.extend_from_slice(router.pending_bypass());
        assert_eq!(route.last(), Some(&Position::new(0, 4)));
        assert!(route.iter().all(|&p| space.is_valid(p)));

        d.move_to(first);
        let rest = fly(&mut router, &mut d, &space, 100);
        assert_eq!(d.position(), Position::new(0, 4));
        assert_eq!(rest.len() + 1, route.len());
        assert!(!router.is_bypassing());
        assert_eq!(d.waypoint_cursor(), 1);
    }

    #[test]
    fn extreme_waypoint_is_approached_then_skipped() {
        let space = open_airspace(5, 5);
        let mut d = drone((1, 0), &[(i32::MIN, 0)]);
        let mut router = WaypointRouter::default();
        assert_eq!(
            router.next_position(d.position(), &mut d, &space),
            Some(Position::new(0, 0))
        );
        d.move_to(Position::new(0, 0));
        assert_eq!(router.next_position(d.position(), &mut d, &space), None);
        assert_eq!(d.waypoint_cursor(), 1);
        assert!(!router.is_bypassing());
    }

    #[test]
    fn distant_off_grid_waypoints_are_skipped_quickly() {
        let space = gapped_wall_airspace();
        let mut d = drone(
            (0, 1),
            &[(-50_000_000, 0), (0, i32::MAX), (i32::MAX, i32::MIN), (4, 4)],
        );
        let mut router = WaypointRouter::default();
        let flown = fly(&mut router, &mut d, &space, 200);
        assert_eq!(d.position(), Position::new(4, 4));
        assert_eq!(d.waypoint_cursor(), 4);
        assert!(flown.iter().all(|&p| space.is_valid(p)));
    }

    #[test]
    fn bypass_takes_precedence_over_waypoints() {
        let space = gapped_wall_airspace();
        let mut d = drone((0, 1), &[(0, 4)]);
        let mut router = WaypointRouter::default();
        router.next_position(d.position(), &mut d, &space).unwrap();
        let pending = router.pending_bypass().to_vec();
        // Replaying ignores the position passed in.
        for &expected in &pending {
            assert_eq!(
                router.next_position(Position::new(0, 0), &mut d, &space),
                Some(expected)
            );
        }
        assert!(!router.is_bypassing());
    }

    #[test]
    fn revisits_trigger_escape_after_threshold() {
        let space = open_airspace(5, 5);
        let mut d = drone((2, 2), &[(2, 4)]);
        let mut router = WaypointRouter::new(RouterConfig {
            stuck_threshold: 1,
            ..RouterConfig::default()
        });
        // Seed the memory so the greedy step (2,3) counts as a revisit.
        router.remember(Position::new(2, 3));
        assert_eq!(
            router.next_position(Position::new(2, 2), &mut d, &space),
            Some(Position::new(2, 3))
        );
        assert_eq!(router.stuck_count(), 1);
        let escape = router.next_position(Position::new(2, 2), &mut d, &space);
        assert_eq!(router.stuck_count(), 2);
        assert_eq!(escape, Some(Position::new(2, 3)));
    }

    #[test]
    fn fresh_step_resets_stuck_count() {
        let space = open_airspace(5, 5);
        let mut d = drone((0, 0), &[(0, 4)]);
        let mut router = WaypointRouter::default();
        router.remember(Position::new(0, 1));
        router.next_position(Position::new(0, 0), &mut d, &space);
        assert_eq!(router.stuck_count(), 1);
        router.next_position(Position::new(0, 1), &mut d, &space);
        assert_eq!(router.stuck_count(), 0);
    }

    #[test]
    fn memory_resets_past_capacity() {
        let mut router = WaypointRouter::new(RouterConfig {
            recent_capacity: 3,
            ..RouterConfig::default()
        });
        for c in 0..4 {
            router.remember(Position::new(0, c));
        }
        assert_eq!(router.recent.len(), 1);
        assert!(router.recent.contains(&Position::new(0, 3)));
    }

    #[test]
    fn escape_prefers_valid_then_in_bounds() {
        let mut space = open_airspace(3, 3);
        assert_eq!(
            escape_move(Position::new(1, 1), Position::new(1, 2), &space),
            Position::new(1, 2)
        );
        space.add_nfz(NoFlyZone::new(Position::new(0, 0), Position::new(2, 2), "all"));
        assert_eq!(
            escape_move(Position::new(0, 0), Position::new(2, 2), &space),
            Position::new(1, 0)
        );
        let single = open_airspace(1, 1);
        assert_eq!(
            escape_move(Position::new(0, 0), Position::new(0, 0), &single),
            Position::new(0, 0)
        );
    }
}
