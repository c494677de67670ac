//! Mission engine for Sortie.
//!
//! Turns a [`MissionConfig`] into a running [`MissionEngine`]: one
//! navigator per drone, ticked sequentially against a shared
//! [`Airspace`](sortie_space::Airspace), with [`MissionStats`] for
//! reporting after each tick.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod stats;

pub use config::{
    BatteryPolicy, ConfigError, DroneConfig, MissionConfig, SearchPattern, WaypointAssignment,
};
pub use engine::MissionEngine;
pub use stats::{FlightStatus, MissionStats, TickOutcome};
