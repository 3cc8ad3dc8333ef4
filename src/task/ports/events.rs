//! Port for notifying the presentation layer.
//!
//! The core keeps no UI state. After every mutation it emits the full board
//! plus aggregate counts, and it emits transient events around classifier
//! calls and failed durable writes.

use crate::task::domain::{QuadrantGroups, Task, TaskStatus};
use serde::Serialize;

/// Full board state after a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    /// Every board task in insertion order.
    pub tasks: Vec<Task>,
    /// Number of accepted tasks.
    pub active_count: usize,
    /// Number of completed tasks.
    pub completed_count: usize,
}

impl BoardSnapshot {
    /// Computes a snapshot from the current task list.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            tasks: tasks.to_vec(),
            active_count: count_status(tasks, TaskStatus::Accepted),
            completed_count: count_status(tasks, TaskStatus::Completed),
        }
    }

    /// Groups the snapshot's tasks by quadrant.
    #[must_use]
    pub fn by_quadrant(&self) -> QuadrantGroups {
        QuadrantGroups::partition(&self.tasks)
    }
}

pub(crate) fn count_status(tasks: &[Task], status: TaskStatus) -> usize {
    tasks.iter().filter(|task| task.status() == status).count()
}

/// Notification delivered to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardEvent {
    /// The board changed.
    Changed(BoardSnapshot),
    /// A classifier call started.
    ClassificationStarted,
    /// A classifier call resolved without error, or its answer was dropped
    /// because the pending task had been discarded.
    ClassificationFinished,
    /// A classifier call failed; the user may retry.
    ClassificationFailed {
        /// User-facing failure text.
        message: String,
    },
    /// A durable write failed; the in-memory board still stands.
    PersistenceFailed {
        /// Failure description.
        message: String,
    },
}

/// Receiver of board events.
pub trait TaskEventSink: Send + Sync {
    /// Delivers an event. Delivery must not fail the operation that caused it.
    fn emit(&self, event: BoardEvent);
}
