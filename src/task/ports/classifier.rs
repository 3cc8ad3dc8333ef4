//! Port for the external urgency/importance classifier.

use crate::task::domain::{Classification, DraftFields, DueDate, ReviewEdits, SelfAssessment, Task};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for classifier calls.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Task content sent for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    /// Task title.
    pub title: String,
    /// Task description; empty when none was given.
    pub description: String,
    /// Due date.
    pub complete_by: DueDate,
    /// The user's own assessment, if any.
    pub self_assessment: SelfAssessment,
}

impl ClassificationRequest {
    /// Builds a request from validated draft fields.
    #[must_use]
    pub fn from_draft(fields: &DraftFields) -> Self {
        Self {
            title: fields.title.as_str().to_owned(),
            description: fields.description.clone(),
            complete_by: fields.complete_by,
            self_assessment: fields.self_assessment,
        }
    }

    /// Builds a request for a pending task as edited during review.
    #[must_use]
    pub fn from_review(task: &Task, edits: &ReviewEdits) -> Self {
        Self {
            title: task.title().as_str().to_owned(),
            description: edits.description.clone(),
            complete_by: edits.complete_by,
            self_assessment: edits.self_assessment,
        }
    }
}

/// Classification service contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Assesses urgency and importance for a task.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError`] for any transport, parsing, or schema
    /// failure.
    async fn classify(&self, request: &ClassificationRequest)
    -> ClassifierResult<Classification>;
}

/// Single failure condition reported by classifiers.
///
/// Sub-causes are folded into the message; callers only learn that the call
/// failed and may be retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("classification failed: {message}")]
pub struct ClassifierError {
    message: String,
}

impl ClassifierError {
    /// Creates a classifier error with a description of the cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the cause description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
