//! Mission-level statistics and per-tick outcomes.

use sortie_core::TickId;
use sortie_nav::DroneStatus;

/// What a call to [`MissionEngine::tick()`](crate::MissionEngine::tick)
/// concluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// At least one drone is still flying.
    Continue,
    /// Every drone's navigator has returned `None`.
    Completed,
    /// A drone turned critical under [`BatteryPolicy::AbortMission`](crate::BatteryPolicy::AbortMission).
    Aborted,
}

impl TickOutcome {
    /// Whether further ticks can make progress.
    pub fn is_running(self) -> bool {
        self == TickOutcome::Continue
    }
}

/// Aggregate, read-only snapshot of a mission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MissionStats {
    /// Ticks executed so far.
    pub tick: TickId,
    /// Targets collected across all drones.
    pub targets_found: usize,
    /// Targets still in the airspace.
    pub targets_remaining: usize,
    /// Sum of all drones' batteries.
    pub total_battery: i64,
    /// Every drone has finished.
    pub mission_completed: bool,
    /// The battery policy ended the mission.
    pub mission_aborted: bool,
    /// Drones with battery above zero.
    pub drones_powered: usize,
    /// Drones whose navigator has returned `None`.
    pub drones_finished: usize,
    /// Candidates refused because they failed the validity check.
    pub rejected_moves: u64,
}

/// A drone's status together with the engine's flags for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlightStatus {
    /// The drone's own snapshot.
    pub drone: DroneStatus,
    /// Its navigator has returned `None`.
    pub finished: bool,
    /// Its battery has been seen at critical or below.
    pub critical: bool,
}
