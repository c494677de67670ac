//! Spatial index for Sortie missions.
//!
//! [`Airspace`] owns the grid bounds, a dense occupancy mask built from
//! no-fly zones, and the shared target set. Every navigator validates
//! its candidates through [`Airspace::is_valid`], which is O(1).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod airspace;
pub mod error;

pub use airspace::{Airspace, AirspaceStats, Neighbours};
pub use error::SpaceError;
