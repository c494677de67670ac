//! Core types for the Sortie drone mission simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the value types shared by every layer of the workspace: grid
//! positions and directions, no-fly zones, targets and waypoints, and
//! strongly-typed identifiers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod mission;
pub mod position;
pub mod zone;

pub use error::ParsePriorityError;
pub use id::{DroneId, TickId};
pub use mission::{Priority, Target, Waypoint};
pub use position::{Direction, Position};
pub use zone::NoFlyZone;
