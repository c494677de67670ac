//! Sortie: a grid drone mission simulator.
//!
//! Drones fly over a bounded grid, collecting targets while keeping out
//! of rectangular no-fly zones on a limited battery. Each drone is
//! steered either by a waypoint router that plans detours around zones
//! or by a lawnmower sweep that covers the whole grid.
//!
//! This is the facade crate that re-exports the public API from all
//! Sortie sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use sortie::prelude::*;
//!
//! let config = MissionConfig {
//!     rows: 6,
//!     cols: 6,
//!     zones: vec![NoFlyZone::new(Position::new(0, 3), Position::new(4, 3), "tower")],
//!     targets: vec![Target::new((0, 5))],
//!     waypoints: vec![Waypoint::new((0, 5))],
//!     drones: vec![DroneConfig::new(1, (0, 0)).with_color("red")],
//!     ..MissionConfig::default()
//! };
//! let mut engine = MissionEngine::new(config).unwrap();
//! assert_eq!(engine.run(200), TickOutcome::Completed);
//!
//! let stats = engine.stats();
//! assert_eq!(stats.targets_found, 1);
//! assert_eq!(engine.positions(), vec![Position::new(0, 5)]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `sortie-core` | Positions, zones, targets, waypoints, ids |
//! | [`space`] | `sortie-space` | The [`space::Airspace`] grid |
//! | [`nav`] | `sortie-nav` | Drones, the router, the sweep, the [`nav::Navigator`] trait |
//! | [`engine`] | `sortie-engine` | Mission configuration and the tick loop |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value types (`sortie-core`).
pub use sortie_core as types;

/// Grid bounds, no-fly-zone occupancy and targets (`sortie-space`).
pub use sortie_space as space;

/// Drone state and navigators (`sortie-nav`).
///
/// [`nav::WaypointRouter`] follows waypoints and plans bypass routes;
/// [`nav::CoverageSweep`] covers the grid row by row. Implement
/// [`nav::Navigator`] to plug in your own.
pub use sortie_nav as nav;

/// Mission configuration and the multi-drone tick loop (`sortie-engine`).
pub use sortie_engine as engine;

/// Common imports for typical Sortie usage.
///
/// ```rust
/// use sortie::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use sortie_core::{Direction, DroneId, NoFlyZone, Position, Priority, Target, TickId, Waypoint};

    // Airspace
    pub use sortie_space::{Airspace, AirspaceStats, SpaceError};

    // Navigation
    pub use sortie_nav::{
        BatteryStatus, CoverageSweep, Drone, DroneStatus, Navigator, RouterConfig, SweepConfig,
        WaypointRouter,
    };

    // Engine
    pub use sortie_engine::{
        BatteryPolicy, ConfigError, DroneConfig, FlightStatus, MissionConfig, MissionEngine,
        MissionStats, SearchPattern, TickOutcome, WaypointAssignment,
    };
}
