//! Error types for core value parsing.

use std::error::Error;
use std::fmt;

/// A priority label did not match any known [`Priority`](crate::Priority).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsePriorityError {
    /// The label that failed to parse.
    pub label: String,
}

impl fmt::Display for ParsePriorityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown priority '{}': expected high, medium or low",
            self.label
        )
    }
}

impl Error for ParsePriorityError {}
