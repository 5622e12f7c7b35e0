//! Priority domain type.
//!
//! # Responsibility
//! - Define the closed, totally ordered priority classification for memos.
//! - Own string parsing used by query filters and request payloads.
//!
//! # Invariants
//! - Ordering is by explicit rank: NONE(0) < LOW(1) < MEDIUM(2) < HIGH(3).
//! - Parsing is case-insensitive; an absent value maps to `Priority::None`.
//! - Unknown values are rejected, never coerced to a default.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Memo priority classification.
///
/// Declared in descending rank order to match the canonical enumeration
/// order used by the statistics scan (`Priority::ALL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    /// Highest urgency, rank 3.
    High,
    /// Rank 2.
    Medium,
    /// Rank 1.
    Low,
    /// Default for memos without an assigned priority, rank 0.
    None,
}

/// Parse error for unrecognized priority strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPriority(pub String);

impl Display for InvalidPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid priority value: `{}`", self.0)
    }
}

impl Error for InvalidPriority {}

impl Priority {
    /// All priority values in canonical enumeration order (highest first).
    pub const ALL: [Priority; 4] = [
        Priority::High,
        Priority::Medium,
        Priority::Low,
        Priority::None,
    ];

    /// Integer rank used for total ordering and SQL sort expressions.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
            Priority::None => 0,
        }
    }

    /// Canonical upper-case name, as persisted and as sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
            Priority::None => "NONE",
        }
    }

    /// Parses an optional priority string.
    ///
    /// # Contract
    /// - `None` or blank input maps to `Priority::None`.
    /// - Non-blank input follows `FromStr` (case-insensitive exact match).
    pub fn parse_opt(value: Option<&str>) -> Result<Priority, InvalidPriority> {
        match value {
            Some(text) if !text.trim().is_empty() => text.parse(),
            _ => Ok(Priority::None),
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::None
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = InvalidPriority;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        for priority in Priority::ALL {
            if trimmed.eq_ignore_ascii_case(priority.as_str()) {
                return Ok(priority);
            }
        }
        Err(InvalidPriority(value.to_string()))
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

#[cfg(test)]
mod tests {
    use super::{InvalidPriority, Priority};

    #[test]
    fn parse_is_case_insensitive() {
        for raw in ["high", "HIGH", "High", " hIgH "] {
            assert_eq!(raw.parse::<Priority>().unwrap(), Priority::High);
        }
    }

    #[test]
    fn parse_round_trips_canonical_names() {
        for priority in Priority::ALL {
            assert_eq!(priority.as_str().parse::<Priority>().unwrap(), priority);
        }
    }

    #[test]
    fn parse_rejects_unknown_value() {
        let err = "urgent".parse::<Priority>().unwrap_err();
        assert_eq!(err, InvalidPriority("urgent".to_string()));
    }

    #[test]
    fn parse_opt_maps_absent_and_blank_to_none() {
        assert_eq!(Priority::parse_opt(None).unwrap(), Priority::None);
        assert_eq!(Priority::parse_opt(Some("  ")).unwrap(), Priority::None);
        assert_eq!(Priority::parse_opt(Some("low")).unwrap(), Priority::Low);
    }

    #[test]
    fn ordering_follows_rank() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert!(Priority::Low > Priority::None);
    }
}
