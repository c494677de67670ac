//! Mission configuration, validation, and error types.
//!
//! [`MissionConfig`] is the plain-data input for building a
//! [`MissionEngine`](crate::MissionEngine). Loading it from files is the
//! caller's business; [`validate()`](MissionConfig::validate) checks the
//! structural invariants before anything is allocated.

use std::error::Error;
use std::fmt;

use indexmap::IndexSet;
use sortie_core::{DroneId, NoFlyZone, Position, Target, Waypoint};
use sortie_nav::{RouterConfig, SweepConfig};
use sortie_space::{Airspace, SpaceError};

// ── Mission options ────────────────────────────────────────────────

/// Which navigator each drone flies with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchPattern {
    /// Follow assigned waypoints with a [`WaypointRouter`](sortie_nav::WaypointRouter).
    #[default]
    Waypoints,
    /// Lawnmower coverage with a [`CoverageSweep`](sortie_nav::CoverageSweep).
    Sweep,
}

/// How the mission's waypoint list is shared out between drones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WaypointAssignment {
    /// Every drone gets the full list.
    Shared,
    /// Contiguous chunks: drone `i` of `n` gets `[i*len/n, (i+1)*len/n)`.
    #[default]
    Partitioned,
}

/// What the engine does when a drone's battery turns critical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BatteryPolicy {
    /// Flag the drone and keep flying.
    #[default]
    Continue,
    /// End the whole mission at the first critical drone.
    AbortMission,
}

// ── DroneConfig ────────────────────────────────────────────────────

/// Launch parameters for one drone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DroneConfig {
    /// Unique id within the mission.
    pub id: DroneId,
    /// Launch cell.
    pub start: Position,
    /// Display color. Default: `"blue"`.
    pub color: String,
}

impl DroneConfig {
    /// A blue drone launching from `start`.
    pub fn new(id: u32, start: impl Into<Position>) -> Self {
        Self {
            id: DroneId(id),
            start: start.into(),
            color: String::from("blue"),
        }
    }

    /// Set the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`MissionConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The grid dimensions are unusable.
    Space(SpaceError),
    /// The mission has no drones.
    NoDrones,
    /// Two drones share an id.
    DuplicateDrone {
        /// The repeated id.
        id: DroneId,
    },
    /// A [`RouterConfig`] invariant is violated.
    InvalidRouter {
        /// Which invariant.
        reason: String,
    },
    /// A [`SweepConfig`] invariant is violated.
    InvalidSweep {
        /// Which invariant.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "airspace: {e}"),
            Self::NoDrones => write!(f, "mission has no drones"),
            Self::DuplicateDrone { id } => write!(f, "drone id {id} is used more than once"),
            Self::InvalidRouter { reason } => write!(f, "invalid router config: {reason}"),
            Self::InvalidSweep { reason } => write!(f, "invalid sweep config: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

// ── MissionConfig ──────────────────────────────────────────────────

/// Complete description of a mission.
///
/// Zones are registered before targets, and drones launch in list
/// order, which is also the order they move in each tick.
#[derive(Clone, Debug)]
pub struct MissionConfig {
    /// Grid rows.
    pub rows: u32,
    /// Grid columns.
    pub cols: u32,
    /// Starting battery of every drone. Default: 200.
    pub battery: i64,
    /// No-fly zones. Parts off the grid are ignored.
    pub zones: Vec<NoFlyZone>,
    /// Targets to find.
    pub targets: Vec<Target>,
    /// Mission waypoints, in visiting order.
    pub waypoints: Vec<Waypoint>,
    /// Drones, in tick order.
    pub drones: Vec<DroneConfig>,
    /// Navigator used by every drone.
    pub search: SearchPattern,
    /// How `waypoints` is shared out.
    pub assignment: WaypointAssignment,
    /// Reaction to a critical battery.
    pub battery_policy: BatteryPolicy,
    /// Router tuning, used with [`SearchPattern::Waypoints`].
    pub router: RouterConfig,
    /// Sweep tuning, used with [`SearchPattern::Sweep`].
    pub sweep: SweepConfig,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            battery: 200,
            zones: Vec::new(),
            targets: Vec::new(),
            waypoints: Vec::new(),
            drones: vec![DroneConfig::new(0, (0, 0))],
            search: SearchPattern::default(),
            assignment: WaypointAssignment::default(),
            battery_policy: BatteryPolicy::default(),
            router: RouterConfig::default(),
            sweep: SweepConfig::default(),
        }
    }
}

impl MissionConfig {
    /// Validate all structural invariants.
    ///
    /// Positions are not checked: a target or launch cell outside the
    /// grid is legal and simply never valid airspace.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Airspace::check_dimensions(self.rows, self.cols)?;

        if self.drones.is_empty() {
            return Err(ConfigError::NoDrones);
        }
        let mut seen = IndexSet::with_capacity(self.drones.len());
        for d in &self.drones {
            if !seen.insert(d.id) {
                return Err(ConfigError::DuplicateDrone { id: d.id });
            }
        }

        let r = &self.router;
        if r.recent_capacity == 0 {
            return Err(ConfigError::InvalidRouter {
                reason: "recent_capacity must be at least 1".to_string(),
            });
        }
        if r.greedy_step_cap == 0 || r.direct_step_cap == 0 {
            return Err(ConfigError::InvalidRouter {
                reason: format!(
                    "step caps must be at least 1, got greedy={} direct={}",
                    r.greedy_step_cap, r.direct_step_cap,
                ),
            });
        }

        let s = &self.sweep;
        if s.attempt_cap == 0 {
            return Err(ConfigError::InvalidSweep {
                reason: "attempt_cap must be at least 1".to_string(),
            });
        }
        if s.row_lookahead == 0 {
            return Err(ConfigError::InvalidSweep {
                reason: "row_lookahead must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Waypoints for the drone at `index` in [`drones`](Self::drones),
    /// according to [`assignment`](Self::assignment).
    pub fn waypoints_for(&self, index: usize) -> Vec<Waypoint> {
        match self.assignment {
            WaypointAssignment::Shared => self.waypoints.clone(),
            WaypointAssignment::Partitioned => {
                partition(&self.waypoints, index, self.drones.len()).to_vec()
            }
        }
    }
}

/// Chunk `index` of `parts` contiguous chunks of `items`. Earlier chunks
/// are never longer than later ones.
fn partition<T>(items: &[T], index: usize, parts: usize) -> &[T] {
    if parts == 0 || index >= parts {
        return &[];
    }
    let len = items.len();
    &items[index * len / parts..(index + 1) * len / parts]
}
