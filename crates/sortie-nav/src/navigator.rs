//! The [`Navigator`] trait.
//!
//! A navigator decides where its drone goes next. The mission engine
//! owns one navigator per drone and calls it once per tick; navigators
//! never move the drone themselves.

use sortie_core::Position;
use sortie_space::Airspace;

use crate::drone::Drone;

/// Per-drone movement policy queried once per tick.
///
/// # Contract
///
/// - `next_position()` is called with the drone's *current* state; the
///   candidate it returns is validated by the caller before the drone
///   moves.
/// - Returning `None` means this drone's mission is over. The engine
///   stops querying a navigator after its first `None`.
/// - Navigators may advance the drone's waypoint cursor (consuming or
///   skipping waypoints) but must not move it.
/// - Every internal search is bounded, so a call always returns.
///
/// # Object safety
///
/// This trait is object-safe; the engine stores navigators as
/// `Box<dyn Navigator>`.
///
/// # Examples
///
/// A navigator that flies straight east until it leaves valid airspace:
///
/// ```
/// use sortie_core::{Direction, DroneId, Position};
/// use sortie_nav::{Drone, Navigator};
/// use sortie_space::Airspace;
///
/// struct DueEast;
///
/// impl Navigator for DueEast {
///     fn name(&self) -> &str { "due_east" }
///
///     fn next_position(&mut self, drone: &mut Drone, airspace: &Airspace) -> Option<Position> {
///         let next = drone.position().step(Direction::East);
///         airspace.is_valid(next).then_some(next)
///     }
/// }
///
/// let space = Airspace::new(1, 3).unwrap();
/// let mut drone = Drone::new(DroneId(0), Position::new(0, 1), 10);
/// let mut nav = DueEast;
/// assert_eq!(nav.next_position(&mut drone, &space), Some(Position::new(0, 2)));
/// ```
pub trait Navigator: Send + 'static {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Propose the drone's next cell, or `None` when it is done.
    fn next_position(&mut self, drone: &mut Drone, airspace: &Airspace) -> Option<Position>;
}
