//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The draft has no due date.
    #[error("task due date is required")]
    MissingDueDate,

    /// A relative due date lands beyond the supported calendar range.
    #[error("a due date {days} days from now is out of range")]
    DueDateOutOfRange {
        /// Requested offset in days.
        days: u32,
    },

    /// The requested status change is not permitted by the lifecycle.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidStateTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Status the task was in.
        from: TaskStatus,
        /// Status that was requested.
        to: TaskStatus,
    },

    /// A board task was found without the levels that place it.
    #[error("task {task_id} is {status} but has no urgency/importance assessment")]
    MissingAssessment {
        /// Offending task.
        task_id: TaskId,
        /// Status that requires an assessment.
        status: TaskStatus,
    },
}

/// Error returned while parsing a level from storage or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown level: {0}")]
pub struct ParseLevelError(pub String);

/// Error returned while parsing a task status from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a quadrant name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown quadrant: {0}")]
pub struct ParseQuadrantError(pub String);
