//! The multi-drone tick scheduler.
//!
//! [`MissionEngine`] owns the airspace and one flight (drone plus its
//! navigator) per configured drone. Each [`tick()`](MissionEngine::tick)
//! visits the flights in construction order and lets each one move once.
//!
//! # Ordering
//!
//! Drones move sequentially within a tick against the live airspace:
//! a target collected by an earlier drone is already gone when a later
//! drone scans the same cell in that tick. There is no snapshotting.

use indexmap::IndexSet;
use sortie_core::{Position, TickId};
use sortie_nav::{CoverageSweep, Drone, Navigator, WaypointRouter};
use sortie_space::Airspace;
use tracing::{debug, info, warn};

use crate::config::{BatteryPolicy, ConfigError, MissionConfig, SearchPattern};
use crate::stats::{FlightStatus, MissionStats, TickOutcome};

// MissionEngine must stay Send so a driver can own it on any thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<MissionEngine>();
    }
};

// ── Flight ──────────────────────────────────────────────────────

struct Flight {
    drone: Drone,
    navigator: Box<dyn Navigator>,
    finished: bool,
    critical: bool,
}

impl Flight {
    fn status(&self) -> FlightStatus {
        FlightStatus {
            drone: self.drone.status(),
            finished: self.finished,
            critical: self.critical,
        }
    }
}

// ── MissionEngine ───────────────────────────────────────────────

/// Single-threaded mission runner.
///
/// # Example
///
/// ```
/// use sortie_core::Waypoint;
/// use sortie_engine::{MissionConfig, MissionEngine, TickOutcome};
///
/// let config = MissionConfig {
///     rows: 5,
///     cols: 5,
///     waypoints: vec![Waypoint::new((0, 4))],
///     ..MissionConfig::default()
/// };
/// let mut engine = MissionEngine::new(config).unwrap();
/// assert_eq!(engine.run(100), TickOutcome::Completed);
/// assert_eq!(engine.stats().tick.0, 5);
/// ```
pub struct MissionEngine {
    airspace: Airspace,
    flights: Vec<Flight>,
    battery_policy: BatteryPolicy,
    tick: TickId,
    completed: bool,
    aborted: bool,
    rejected_moves: u64,
}

impl MissionEngine {
    /// Build a mission from a [`MissionConfig`].
    ///
    /// Validates the configuration, builds the airspace (zones, then
    /// targets), launches the drones in list order with their share of
    /// the waypoints, and gives each its own navigator.
    pub fn new(config: MissionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut airspace = Airspace::new(config.rows, config.cols)?;
        for zone in &config.zones {
            airspace.add_nfz(zone.clone());
        }
        for target in &config.targets {
            if !airspace.add_target(target.position) {
                debug!(position = %target.position, "duplicate target ignored");
            }
        }

        let mut flights = Vec::with_capacity(config.drones.len());
        for (i, dc) in config.drones.iter().enumerate() {
            if !airspace.is_valid(dc.start) {
                warn!(drone = %dc.id, start = %dc.start, "drone launches outside valid airspace");
            }
            let mut drone = Drone::new(dc.id, dc.start, config.battery).with_color(dc.color.as_str());
            drone.assign_waypoints(config.waypoints_for(i));
            let navigator: Box<dyn Navigator> = match config.search {
                SearchPattern::Waypoints => Box::new(WaypointRouter::new(config.router.clone())),
                SearchPattern::Sweep => Box::new(CoverageSweep::new(config.sweep.clone())),
            };
            flights.push((drone, navigator));
        }

        Self::with_navigators(airspace, flights, config.battery_policy)
    }

    /// Build a mission from ready-made parts, for custom navigators.
    ///
    /// Flights move in the order given. Drone ids must be unique.
    pub fn with_navigators(
        airspace: Airspace,
        flights: Vec<(Drone, Box<dyn Navigator>)>,
        battery_policy: BatteryPolicy,
    ) -> Result<Self, ConfigError> {
        if flights.is_empty() {
            return Err(ConfigError::NoDrones);
        }
        let mut ids = IndexSet::with_capacity(flights.len());
        for (drone, _) in &flights {
            if !ids.insert(drone.id()) {
                return Err(ConfigError::DuplicateDrone { id: drone.id() });
            }
        }

        let flights = flights
            .into_iter()
            .map(|(drone, navigator)| Flight {
                drone,
                navigator,
                finished: false,
                critical: false,
            })
            .collect::<Vec<_>>();
        info!(
            drones = flights.len(),
            rows = airspace.rows(),
            cols = airspace.cols(),
            cells = airspace.cell_count(),
            targets = airspace.target_count(),
            "mission ready"
        );

        Ok(Self {
            airspace,
            flights,
            battery_policy,
            tick: TickId::default(),
            completed: false,
            aborted: false,
            rejected_moves: 0,
        })
    }

    /// Advance every unfinished drone by one step.
    ///
    /// For each flight in order: ask its navigator for a candidate; a
    /// `None` marks the flight finished; a candidate failing
    /// [`Airspace::is_valid`] is refused and counted; otherwise the drone
    /// moves and scans. A drone whose battery turns critical is flagged
    /// once, and under [`BatteryPolicy::AbortMission`] ends the mission
    /// on the spot.
    ///
    /// Once the mission has completed or aborted, further calls change
    /// nothing and repeat the final outcome.
    pub fn tick(&mut self) -> TickOutcome {
        if let Some(outcome) = self.final_outcome() {
            return outcome;
        }
        self.tick = self.tick.next();
        let tick = self.tick;

        for flight in &mut self.flights {
            if flight.finished {
                continue;
            }
            let id = flight.drone.id();
            match flight
                .navigator
                .next_position(&mut flight.drone, &self.airspace)
            {
                None => {
                    flight.finished = true;
                    info!(%tick, drone = %id, navigator = flight.navigator.name(), "drone finished");
                }
                Some(candidate) if !self.airspace.is_valid(candidate) => {
                    self.rejected_moves += 1;
                    warn!(%tick, drone = %id, %candidate, "invalid candidate refused");
                }
                Some(candidate) => {
                    flight.drone.move_to(candidate);
                    flight.drone.scan(&mut self.airspace);
                    let status = flight.drone.battery_status();
                    if !flight.critical && status.is_critical() {
                        flight.critical = true;
                        warn!(
                            %tick,
                            drone = %id,
                            battery = flight.drone.battery(),
                            ?status,
                            "battery critical"
                        );
                        if self.battery_policy == BatteryPolicy::AbortMission {
                            self.aborted = true;
                            break;
                        }
                    }
                }
            }
        }

        if self.aborted {
            info!(%tick, "mission aborted on critical battery");
            return TickOutcome::Aborted;
        }
        if self.flights.iter().all(|f| f.finished) {
            self.completed = true;
            info!(%tick, targets_remaining = self.airspace.target_count(), "mission complete");
            return TickOutcome::Completed;
        }
        TickOutcome::Continue
    }

    /// Tick until the mission completes, aborts, or `max_ticks` more
    /// ticks have run.
    pub fn run(&mut self, max_ticks: u64) -> TickOutcome {
        if let Some(outcome) = self.final_outcome() {
            return outcome;
        }
        for _ in 0..max_ticks {
            let outcome = self.tick();
            if !outcome.is_running() {
                return outcome;
            }
        }
        debug!(tick = %self.tick, max_ticks, "tick limit reached");
        TickOutcome::Continue
    }

    fn final_outcome(&self) -> Option<TickOutcome> {
        if self.aborted {
            Some(TickOutcome::Aborted)
        } else if self.completed {
            Some(TickOutcome::Completed)
        } else {
            None
        }
    }

    /// Aggregate statistics as of the last tick.
    pub fn stats(&self) -> MissionStats {
        MissionStats {
            tick: self.tick,
            targets_found: self
                .flights
                .iter()
                .map(|f| f.drone.found_targets().len())
                .sum(),
            targets_remaining: self.airspace.target_count(),
            total_battery: self.flights.iter().map(|f| f.drone.battery()).sum(),
            mission_completed: self.completed,
            mission_aborted: self.aborted,
            drones_powered: self.flights.iter().filter(|f| f.drone.battery() > 0).count(),
            drones_finished: self.flights.iter().filter(|f| f.finished).count(),
            rejected_moves: self.rejected_moves,
        }
    }

    /// Per-drone status with the engine's flags, in tick order.
    pub fn flight_statuses(&self) -> Vec<FlightStatus> {
        self.flights.iter().map(Flight::status).collect()
    }

    /// The drones, in tick order.
    pub fn drones(&self) -> impl Iterator<Item = &Drone> + '_ {
        self.flights.iter().map(|f| &f.drone)
    }

    /// Current positions, in tick order.
    pub fn positions(&self) -> Vec<Position> {
        self.drones().map(Drone::position).collect()
    }

    /// The shared airspace.
    pub fn airspace(&self) -> &Airspace {
        &self.airspace
    }

    /// Ticks executed so far.
    pub fn current_tick(&self) -> TickId {
        self.tick
    }

    /// Whether every drone has finished.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether the battery policy ended the mission.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }
}

impl std::fmt::Debug for MissionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MissionEngine")
            .field("tick", &self.tick)
            .field("drones", &self.flights.len())
            .field("completed", &self.completed)
            .field("aborted", &self.aborted)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DroneConfig, WaypointAssignment};
    use sortie_core::{DroneId, NoFlyZone, Target, Waypoint};
    use sortie_test_utils::open_airspace;

    fn waypoint_mission(drones: Vec<DroneConfig>, waypoints: &[(i32, i32)]) -> MissionConfig {
        MissionConfig {
            rows: 5,
            cols: 5,
            waypoints: waypoints.iter().map(|&w| Waypoint::new(w)).collect(),
            drones,
            ..MissionConfig::default()
        }
    }

    /// Returns a fixed script of candidates, then `None`.
    struct Scripted(Vec<Position>);

    impl Navigator for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn next_position(&mut self, _drone: &mut Drone, _airspace: &Airspace) -> Option<Position> {
            if self.0.is_empty() {
                None
            } else {
                Some(self.0.remove(0))
            }
        }
    }

    #[test]
    fn single_drone_reaches_waypoint_then_completes() {
        let cfg = waypoint_mission(vec![DroneConfig::new(0, (0, 0))], &[(0, 4)]);
        let mut engine = MissionEngine::new(cfg).unwrap();
        for _ in 0..4 {
            assert_eq!(engine.tick(), TickOutcome::Continue);
        }
        assert_eq!(engine.positions(), vec![Position::new(0, 4)]);
        assert!(!engine.is_completed());
        assert_eq!(engine.tick(), TickOutcome::Completed);
        let stats = engine.stats();
        assert_eq!(stats.tick, TickId(5));
        assert!(stats.mission_completed);
        assert_eq!(stats.total_battery, 196);
        assert_eq!(stats.drones_finished, 1);
    }

    #[test]
    fn mission_waits_for_the_slowest_drone() {
        let cfg = waypoint_mission(
            vec![
                DroneConfig::new(1, (0, 0)),
                DroneConfig::new(2, (0, 0)).with_color("red"),
            ],
            &[(0, 1), (4, 4)],
        );
        let mut engine = MissionEngine::new(cfg).unwrap();
        assert_eq!(engine.airspace().cell_count(), 25);
        assert_eq!(engine.tick(), TickOutcome::Continue);
        assert_eq!(engine.tick(), TickOutcome::Continue);
        let statuses = engine.flight_statuses();
        assert_eq!(statuses[0].drone.color, "blue");
        assert_eq!(statuses[1].drone.color, "red");
        assert!(statuses[0].finished);
        assert!(!statuses[1].finished);
        assert!(!engine.stats().mission_completed);

        for _ in 2..8 {
            assert_eq!(engine.tick(), TickOutcome::Continue);
            assert!(!engine.stats().mission_completed);
        }
        assert_eq!(engine.positions()[1], Position::new(4, 4));
        assert_eq!(engine.tick(), TickOutcome::Completed);
        assert_eq!(engine.current_tick(), TickId(9));
    }

    #[test]
    fn later_drone_sees_targets_taken_earlier_in_the_tick() {
        let mut cfg = waypoint_mission(
            vec![DroneConfig::new(1, (0, 0)), DroneConfig::new(2, (0, 0))],
            &[(0, 2)],
        );
        cfg.assignment = WaypointAssignment::Shared;
        cfg.targets = vec![Target::new((0, 1))];
        let mut engine = MissionEngine::new(cfg).unwrap();
        engine.tick();
        let found: Vec<_> = engine.drones().map(|d| d.found_targets().len()).collect();
        assert_eq!(found, vec![1, 0]);
        let stats = engine.stats();
        assert_eq!(stats.targets_found, 1);
        assert_eq!(stats.targets_remaining, 0);
    }

    #[test]
    fn invalid_candidates_are_refused_and_counted() {
        let mut space = open_airspace(3, 3);
        space.add_nfz(NoFlyZone::new(Position::new(1, 1), Position::new(1, 1), "post"));
        let drone = Drone::new(DroneId(7), Position::new(0, 0), 50);
        let script = Scripted(vec![
            Position::new(-1, 0),
            Position::new(1, 1),
            Position::new(0, 1),
        ]);
        let mut engine = MissionEngine::with_navigators(
            space,
            vec![(drone, Box::new(script) as Box<dyn Navigator>)],
            BatteryPolicy::Continue,
        )
        .unwrap();
        assert_eq!(engine.run(10), TickOutcome::Completed);
        let stats = engine.stats();
        assert_eq!(stats.rejected_moves, 2);
        assert_eq!(stats.tick, TickId(4));
        let d = engine.drones().next().unwrap();
        assert_eq!(
            d.path_history(),
            &[Position::new(0, 0), Position::new(0, 1)]
        );
    }

    fn low_battery_mission(policy: BatteryPolicy) -> MissionEngine {
        let cfg = MissionConfig {
            rows: 1,
            cols: 10,
            battery: 22,
            waypoints: vec![Waypoint::new((0, 9))],
            battery_policy: policy,
            ..MissionConfig::default()
        };
        MissionEngine::new(cfg).unwrap()
    }

    #[test]
    fn critical_drone_is_flagged_and_keeps_flying() {
        let mut engine = low_battery_mission(BatteryPolicy::Continue);
        assert_eq!(engine.tick(), TickOutcome::Continue);
        assert!(!engine.flight_statuses()[0].critical);
        assert_eq!(engine.tick(), TickOutcome::Continue);
        assert!(engine.flight_statuses()[0].critical);
        assert_eq!(engine.run(100), TickOutcome::Completed);
        assert_eq!(engine.positions(), vec![Position::new(0, 9)]);
        assert_eq!(engine.stats().total_battery, 13);
    }

    #[test]
    fn abort_policy_ends_mission_on_critical() {
        let mut engine = low_battery_mission(BatteryPolicy::AbortMission);
        assert_eq!(engine.tick(), TickOutcome::Continue);
        assert_eq!(engine.tick(), TickOutcome::Aborted);
        let stats = engine.stats();
        assert!(stats.mission_aborted);
        assert!(!stats.mission_completed);
        assert_eq!(engine.tick(), TickOutcome::Aborted);
        assert_eq!(engine.current_tick(), TickId(2));
    }

    #[test]
    fn sweep_mission_collects_every_target() {
        let cfg = MissionConfig {
            rows: 4,
            cols: 4,
            targets: vec![
                Target::new((0, 3)),
                Target::new((2, 1)),
                Target::new((3, 3)),
            ],
            search: SearchPattern::Sweep,
            ..MissionConfig::default()
        };
        let mut engine = MissionEngine::new(cfg).unwrap();
        assert_eq!(engine.run(100), TickOutcome::Completed);
        let stats = engine.stats();
        assert_eq!(stats.targets_found, 3);
        assert_eq!(stats.targets_remaining, 0);
        assert_eq!(stats.tick, TickId(16));
        assert_eq!(engine.positions(), vec![Position::new(3, 0)]);
    }

    #[test]
    fn run_stops_at_the_tick_limit() {
        let cfg = waypoint_mission(vec![DroneConfig::new(0, (0, 0))], &[(4, 4)]);
        let mut engine = MissionEngine::new(cfg).unwrap();
        assert_eq!(engine.run(3), TickOutcome::Continue);
        assert_eq!(engine.current_tick(), TickId(3));
        assert_eq!(engine.run(100), TickOutcome::Completed);
        assert_eq!(engine.run(100), TickOutcome::Completed);
        assert_eq!(engine.current_tick(), TickId(9));
    }

    #[test]
    fn parts_must_be_unique_and_non_empty() {
        let err = MissionEngine::with_navigators(open_airspace(2, 2), vec![], BatteryPolicy::Continue)
            .unwrap_err();
        assert_eq!(err, ConfigError::NoDrones);

        let flights: Vec<(Drone, Box<dyn Navigator>)> = vec![
            (
                Drone::new(DroneId(1), Position::new(0, 0), 9),
                Box::new(Scripted(vec![])) as Box<dyn Navigator>,
            ),
            (
                Drone::new(DroneId(1), Position::new(1, 1), 9),
                Box::new(Scripted(vec![])) as Box<dyn Navigator>,
            ),
        ];
        let err = MissionEngine::with_navigators(open_airspace(2, 2), flights, BatteryPolicy::Continue)
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateDrone { id: DroneId(1) });
    }
}
