//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a drone within a mission.
///
/// Ids come from the mission configuration and are only required to be
/// unique; they carry no ordering meaning for the scheduler, which
/// processes drones in construction order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DroneId(pub u32);

impl fmt::Display for DroneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DroneId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing tick counter.
///
/// Incremented each time the mission engine advances one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_id_advances_by_one() {
        assert_eq!(TickId(0).next(), TickId(1));
        assert_eq!(TickId::default().next().next(), TickId(2));
    }

    #[test]
    fn ids_display_as_bare_numbers() {
        assert_eq!(DroneId(7).to_string(), "7");
        assert_eq!(TickId::from(42).to_string(), "42");
    }
}
