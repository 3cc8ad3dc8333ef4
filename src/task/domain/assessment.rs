//! Urgency/importance assessments attached to tasks.

use super::{Level, Quadrant};
use serde::{Deserialize, Serialize};

/// Authoritative urgency and importance that place a task on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assessment {
    /// Urgency level.
    pub urgency: Level,
    /// Importance level.
    pub importance: Level,
}

impl Assessment {
    /// Creates an assessment from both levels.
    #[must_use]
    pub const fn new(urgency: Level, importance: Level) -> Self {
        Self {
            urgency,
            importance,
        }
    }

    /// Returns the representative assessment for a quadrant.
    ///
    /// Any Medium nuance is lost; see [`Quadrant::representative_levels`].
    #[must_use]
    pub const fn representative_of(quadrant: Quadrant) -> Self {
        let (urgency, importance) = quadrant.representative_levels();
        Self::new(urgency, importance)
    }

    /// Returns the quadrant this assessment places a task in.
    #[must_use]
    pub const fn quadrant(self) -> Quadrant {
        Quadrant::classify(self.urgency, self.importance)
    }
}

/// The user's own, advisory view of a task.
///
/// Absent values mean "not assessed" and are never conflated with
/// [`Level::Low`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelfAssessment {
    /// Self-assessed urgency, if given.
    pub urgency: Option<Level>,
    /// Self-assessed importance, if given.
    pub importance: Option<Level>,
}

impl SelfAssessment {
    /// Creates a self-assessment from optional levels.
    #[must_use]
    pub const fn new(urgency: Option<Level>, importance: Option<Level>) -> Self {
        Self {
            urgency,
            importance,
        }
    }

    /// Returns an empty self-assessment.
    #[must_use]
    pub const fn unassessed() -> Self {
        Self::new(None, None)
    }

    /// Returns the assessment used when a task skips classification.
    ///
    /// Missing levels default to [`Level::Low`].
    #[must_use]
    pub fn or_low(self) -> Assessment {
        Assessment::new(
            self.urgency.unwrap_or(Level::Low),
            self.importance.unwrap_or(Level::Low),
        )
    }
}

/// Result of classifying a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Assessed urgency.
    pub urgency: Level,
    /// Assessed importance.
    pub importance: Level,
    /// Explanation of the assessment.
    pub justification: String,
}

impl Classification {
    /// Creates a classification.
    #[must_use]
    pub fn new(urgency: Level, importance: Level, justification: impl Into<String>) -> Self {
        Self {
            urgency,
            importance,
            justification: justification.into(),
        }
    }

    /// Returns the levels as an [`Assessment`].
    #[must_use]
    pub const fn assessment(&self) -> Assessment {
        Assessment::new(self.urgency, self.importance)
    }
}
