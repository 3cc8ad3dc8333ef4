//! Urgency and importance levels.

use super::ParseLevelError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal rating applied independently to urgency and importance.
///
/// Levels are only ever compared against the Medium threshold; they carry no
/// arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Not pressing.
    Low,
    /// Counts as urgent or important.
    Medium,
    /// Counts as urgent or important.
    High,
}

impl Level {
    /// Every level, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Returns `true` when an urgency at this level makes a task urgent.
    #[must_use]
    pub const fn is_urgent(self) -> bool {
        self.meets_threshold()
    }

    /// Returns `true` when an importance at this level makes a task important.
    #[must_use]
    pub const fn is_important(self) -> bool {
        self.meets_threshold()
    }

    const fn meets_threshold(self) -> bool {
        matches!(self, Self::Medium | Self::High)
    }
}

impl TryFrom<&str> for Level {
    type Error = ParseLevelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseLevelError(value.to_owned())),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
