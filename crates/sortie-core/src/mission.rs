//! Targets, waypoints and their priority labels.

use std::fmt;
use std::str::FromStr;

use crate::error::ParsePriorityError;
use crate::position::Position;

/// Rescue priority attached to targets and waypoints.
///
/// Carried through from configuration for reporting. Routing never
/// consults it: waypoints are visited strictly in list order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    /// Highest urgency.
    High,
    /// Default urgency.
    #[default]
    Medium,
    /// Lowest urgency.
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        })
    }
}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(ParsePriorityError {
                label: s.to_string(),
            }),
        }
    }
}

/// A point target to be located and collected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Target {
    /// Cell holding the target.
    pub position: Position,
    /// Informational priority.
    pub priority: Priority,
}

impl Target {
    /// A target at `position` with default priority.
    pub fn new(position: impl Into<Position>) -> Self {
        Self {
            position: position.into(),
            priority: Priority::default(),
        }
    }

    /// Replace the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// An ordered destination in a drone's route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Waypoint {
    /// Cell to reach.
    pub position: Position,
    /// Informational priority.
    pub priority: Priority,
}

impl Waypoint {
    /// A waypoint at `position` with default priority.
    pub fn new(position: impl Into<Position>) -> Self {
        Self {
            position: position.into(),
            priority: Priority::default(),
        }
    }

    /// Replace the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!(" low ".parse::<Priority>(), Ok(Priority::Low));
        assert_eq!("Medium".parse::<Priority>(), Ok(Priority::Medium));
        let err = "urgent".parse::<Priority>().unwrap_err();
        assert_eq!(err.label, "urgent");
    }

    #[test]
    fn priority_display_round_trips() {
        for p in [Priority::High, Priority::Medium, Priority::Low] {
            assert_eq!(p.to_string().parse::<Priority>(), Ok(p));
        }
    }

    #[test]
    fn constructors_default_to_medium() {
        let t = Target::new((1, 2));
        assert_eq!(t.position, Position::new(1, 2));
        assert_eq!(t.priority, Priority::Medium);
        let w = Waypoint::new((0, 4)).with_priority(Priority::High);
        assert_eq!(w.priority, Priority::High);
    }
}
