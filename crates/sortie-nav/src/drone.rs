//! Per-drone mission state.

use sortie_core::{DroneId, Position, Waypoint};
use sortie_space::Airspace;
use tracing::info;

/// Coarse battery classification.
///
/// Classification never stops a drone by itself; halting on a low
/// battery is a scheduler policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BatteryStatus {
    /// More than 50 units left.
    Normal,
    /// 21 to 50 units left.
    Low,
    /// 1 to 20 units left.
    Critical,
    /// Zero or below.
    Dead,
}

impl BatteryStatus {
    /// Classify a raw battery level.
    pub fn classify(battery: i64) -> Self {
        match battery {
            b if b > 50 => BatteryStatus::Normal,
            b if b > 20 => BatteryStatus::Low,
            b if b > 0 => BatteryStatus::Critical,
            _ => BatteryStatus::Dead,
        }
    }

    /// `true` for [`Critical`](BatteryStatus::Critical) and [`Dead`](BatteryStatus::Dead).
    pub fn is_critical(self) -> bool {
        matches!(self, BatteryStatus::Critical | BatteryStatus::Dead)
    }
}

/// Read-only status snapshot of a [`Drone`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DroneStatus {
    /// Drone id.
    pub id: DroneId,
    /// Display color.
    pub color: String,
    /// Current cell.
    pub position: Position,
    /// Remaining battery (may be negative).
    pub battery: i64,
    /// Classification of `battery`.
    pub battery_status: BatteryStatus,
    /// Number of targets this drone has collected.
    pub targets_found: usize,
    /// Total Manhattan distance flown.
    pub distance_travelled: u64,
    /// Waypoints not yet reached or skipped.
    pub waypoints_remaining: usize,
}

/// A single drone: where it is, what it has done, and where it is going.
///
/// The path history starts with the launch cell and grows by exactly
/// one entry per [`move_to`](Drone::move_to). The waypoint cursor only
/// ever moves forward.
#[derive(Clone, Debug)]
pub struct Drone {
    id: DroneId,
    color: String,
    position: Position,
    battery: i64,
    distance_travelled: u64,
    path_history: Vec<Position>,
    found_targets: Vec<Position>,
    waypoints: Vec<Waypoint>,
    waypoint_cursor: usize,
}

impl Drone {
    /// A drone at `start` with `battery` units and no waypoints.
    pub fn new(id: DroneId, start: Position, battery: i64) -> Self {
        Self {
            id,
            color: String::from("blue"),
            position: start,
            battery,
            distance_travelled: 0,
            path_history: vec![start],
            found_targets: Vec::new(),
            waypoints: Vec::new(),
            waypoint_cursor: 0,
        }
    }

    /// Set the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Drone id.
    pub fn id(&self) -> DroneId {
        self.id
    }

    /// Display color; cosmetic only.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Current cell.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Remaining battery. Not clamped at zero.
    pub fn battery(&self) -> i64 {
        self.battery
    }

    /// Total Manhattan distance flown so far.
    pub fn distance_travelled(&self) -> u64 {
        self.distance_travelled
    }

    /// Every cell occupied so far, launch cell first.
    pub fn path_history(&self) -> &[Position] {
        &self.path_history
    }

    /// Targets collected, in discovery order.
    pub fn found_targets(&self) -> &[Position] {
        &self.found_targets
    }

    /// The assigned waypoint list, including ones already passed.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Index of the waypoint currently being pursued.
    pub fn waypoint_cursor(&self) -> usize {
        self.waypoint_cursor
    }

    /// Waypoints not yet reached or skipped.
    pub fn waypoints_remaining(&self) -> usize {
        self.waypoints.len().saturating_sub(self.waypoint_cursor)
    }

    /// Move to `new_position`, charging one battery unit per grid step.
    ///
    /// Performs no validation: navigators check the airspace before
    /// proposing a cell, and the scheduler checks again before calling
    /// this. Never fails; returns the Manhattan distance flown.
    pub fn move_to(&mut self, new_position: Position) -> u32 {
        let distance = self.position.manhattan(new_position);
        self.position = new_position;
        self.path_history.push(new_position);
        self.distance_travelled += u64::from(distance);
        self.battery -= i64::from(distance);
        distance
    }

    /// Collect a target at the current cell, if there is one.
    ///
    /// The target is removed from the shared airspace, so no other
    /// drone can collect it afterwards.
    pub fn scan(&mut self, airspace: &mut Airspace) -> bool {
        if !airspace.remove_target(self.position) {
            return false;
        }
        self.found_targets.push(self.position);
        info!(drone = %self.id, position = %self.position, "target found");
        true
    }

    /// Classification of the current battery level.
    pub fn battery_status(&self) -> BatteryStatus {
        BatteryStatus::classify(self.battery)
    }

    /// Replace the waypoint list and restart from its first entry.
    pub fn assign_waypoints(&mut self, waypoints: Vec<Waypoint>) {
        self.waypoints = waypoints;
        self.waypoint_cursor = 0;
    }

    /// The waypoint currently being pursued, if any remain.
    pub fn current_waypoint(&self) -> Option<Waypoint> {
        self.waypoints.get(self.waypoint_cursor).copied()
    }

    /// Give up on the current waypoint and move the cursor past it.
    ///
    /// Returns the skipped waypoint, or `None` when the list was already
    /// exhausted (the cursor is left unchanged).
    pub fn skip_waypoint(&mut self) -> Option<Waypoint> {
        let skipped = self.current_waypoint()?;
        self.waypoint_cursor += 1;
        Some(skipped)
    }

    /// Greedy one-cell step from `current` towards the current waypoint.
    ///
    /// Waypoints already at `current` are consumed without producing a
    /// move, so coincident waypoints cost no tick. The step closes the
    /// row gap before the column gap. Returns `None` once every waypoint
    /// has been consumed.
    ///
    /// Knows nothing about no-fly zones; see
    /// [`WaypointRouter`](crate::WaypointRouter) for obstacle handling.
    pub fn next_waypoint_step(&mut self, current: Position) -> Option<Position> {
        // Each pass either returns or advances the cursor, so this runs
        // at most `waypoints.len()` times.
        while let Some(waypoint) = self.current_waypoint() {
            if current == waypoint.position {
                self.waypoint_cursor += 1;
                continue;
            }
            return Some(current.step_toward(waypoint.position));
        }
        None
    }

    /// Status snapshot for reporting.
    pub fn status(&self) -> DroneStatus {
        DroneStatus {
            id: self.id,
            color: self.color().to_owned(),
            position: self.position,
            battery: self.battery,
            battery_status: self.battery_status(),
            targets_found: self.found_targets.len(),
            distance_travelled: self.distance_travelled,
            waypoints_remaining: self.waypoints_remaining(),
        }
    }
}
