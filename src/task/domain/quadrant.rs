//! Eisenhower quadrants and the mapping between quadrants and levels.
//!
//! [`Quadrant::classify`] is total: every urgency/importance pair lands in
//! exactly one quadrant. [`Quadrant::representative_levels`] goes the other
//! way for manual placement, and is deliberately lossy: it collapses any
//! Medium rating into the High/Low extreme of the target quadrant. Only
//! `classify(representative_levels(q)) == q` holds; the reverse round trip
//! does not.

use super::{Level, ParseQuadrantError, Task};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four priority buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    /// Urgent and important.
    Do,
    /// Important but not urgent.
    Schedule,
    /// Urgent but not important.
    Delegate,
    /// Neither urgent nor important.
    Eliminate,
}

impl Quadrant {
    /// Every quadrant in board order.
    pub const ALL: [Self; 4] = [Self::Do, Self::Schedule, Self::Delegate, Self::Eliminate];

    /// Places an urgency/importance pair in its quadrant.
    #[must_use]
    pub const fn classify(urgency: Level, importance: Level) -> Self {
        match (urgency.is_urgent(), importance.is_important()) {
            (true, true) => Self::Do,
            (false, true) => Self::Schedule,
            (true, false) => Self::Delegate,
            (false, false) => Self::Eliminate,
        }
    }

    /// Returns the `(urgency, importance)` pair written when a task is
    /// dropped into this quadrant.
    #[must_use]
    pub const fn representative_levels(self) -> (Level, Level) {
        match self {
            Self::Do => (Level::High, Level::High),
            Self::Schedule => (Level::Low, Level::High),
            Self::Delegate => (Level::High, Level::Low),
            Self::Eliminate => (Level::Low, Level::Low),
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Do => "do",
            Self::Schedule => "schedule",
            Self::Delegate => "delegate",
            Self::Eliminate => "eliminate",
        }
    }

    /// Returns the board heading for this quadrant.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Do => "Do (Urgent & Important)",
            Self::Schedule => "Schedule (Important & Not Urgent)",
            Self::Delegate => "Delegate (Urgent & Not Important)",
            Self::Eliminate => "Eliminate (Not Urgent & Not Important)",
        }
    }

    /// Returns the short advice shown for this quadrant.
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::Do => "Do First",
            Self::Schedule => "Schedule",
            Self::Delegate => "Delegate",
            Self::Eliminate => "Eliminate",
        }
    }
}

impl TryFrom<&str> for Quadrant {
    type Error = ParseQuadrantError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "do" => Ok(Self::Do),
            "schedule" => Ok(Self::Schedule),
            "delegate" => Ok(Self::Delegate),
            "eliminate" => Ok(Self::Eliminate),
            _ => Err(ParseQuadrantError(value.to_owned())),
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Board tasks partitioned by quadrant, each list in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuadrantGroups {
    do_first: Vec<Task>,
    schedule: Vec<Task>,
    delegate: Vec<Task>,
    eliminate: Vec<Task>,
}

impl QuadrantGroups {
    /// Partitions board tasks; tasks not on the board are skipped.
    #[must_use]
    pub fn partition<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut groups = Self::default();
        for task in tasks {
            if !task.status().is_on_board() {
                continue;
            }
            groups.bucket_mut(task.quadrant()).push(task.clone());
        }
        groups
    }

    /// Returns the tasks placed in `quadrant`.
    #[must_use]
    pub fn get(&self, quadrant: Quadrant) -> &[Task] {
        match quadrant {
            Quadrant::Do => &self.do_first,
            Quadrant::Schedule => &self.schedule,
            Quadrant::Delegate => &self.delegate,
            Quadrant::Eliminate => &self.eliminate,
        }
    }

    /// Iterates quadrants in board order with their tasks.
    pub fn iter(&self) -> impl Iterator<Item = (Quadrant, &[Task])> {
        Quadrant::ALL
            .into_iter()
            .map(move |quadrant| (quadrant, self.get(quadrant)))
    }

    /// Returns the total number of grouped tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().map(|(_, tasks)| tasks.len()).sum()
    }

    /// Returns `true` when no quadrant holds a task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bucket_mut(&mut self, quadrant: Quadrant) -> &mut Vec<Task> {
        match quadrant {
            Quadrant::Do => &mut self.do_first,
            Quadrant::Schedule => &mut self.schedule,
            Quadrant::Delegate => &mut self.delegate,
            Quadrant::Eliminate => &mut self.eliminate,
        }
    }
}
