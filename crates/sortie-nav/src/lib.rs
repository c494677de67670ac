//! Navigation for Sortie drones.
//!
//! - [`Drone`]: per-agent state (position, battery, history, waypoints)
//!   and the greedy [`next_waypoint_step`](Drone::next_waypoint_step)
//!   primitive.
//! - [`WaypointRouter`]: wraps the greedy primitive with no-fly-zone
//!   bypass planning and loop breaking.
//! - [`CoverageSweep`]: boustrophedon ("lawnmower") coverage with a
//!   local obstacle-avoidance state machine.
//!
//! Both navigators implement [`Navigator`], the seam the mission engine
//! drives once per drone per tick.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod drone;
pub mod navigator;
pub mod planner;
pub mod router;
pub mod sweep;

pub use drone::{BatteryStatus, Drone, DroneStatus};
pub use navigator::Navigator;
pub use planner::{BypassPlanner, Strategy};
pub use router::{RouterConfig, WaypointRouter};
pub use sweep::{Avoidance, CoverageSweep, SweepConfig, SweepDirection};
