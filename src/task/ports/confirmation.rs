//! Confirmation capability for destructive operations.
//!
//! Deleting a task and clearing completed tasks cannot be undone, so the
//! collection service asks a caller-supplied [`Confirmation`] before
//! mutating anything.

use crate::task::domain::{TaskId, TaskTitle};
use minijinja::{Environment, context};
use thiserror::Error;

const DELETE_TEMPLATE: &str = r#"Are you sure you want to delete the task "{{ title }}"?"#;
const CLEAR_TEMPLATE: &str = "Are you sure you want to clear all {{ count }} completed \
     task{% if count != 1 %}s{% endif %}?";

/// Description of the destructive action awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationRequest {
    /// Permanently delete a single task.
    DeleteTask {
        /// Task to delete.
        task_id: TaskId,
        /// Title shown to the user.
        title: TaskTitle,
    },
    /// Permanently delete every completed task.
    ClearCompleted {
        /// Number of completed tasks that would be removed.
        count: usize,
    },
}

impl ConfirmationRequest {
    /// Renders the question to show the user.
    ///
    /// # Errors
    ///
    /// Returns [`ConfirmationMessageError`] if template rendering fails.
    pub fn message(&self) -> Result<String, ConfirmationMessageError> {
        let environment = Environment::new();
        let rendered = match self {
            Self::DeleteTask { title, .. } => {
                environment.render_str(DELETE_TEMPLATE, context! { title => title.as_str() })
            }
            Self::ClearCompleted { count } => {
                environment.render_str(CLEAR_TEMPLATE, context! { count => count })
            }
        };
        rendered.map_err(|err| ConfirmationMessageError(err.to_string()))
    }
}

/// Error raised while rendering a confirmation question.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render confirmation message: {0}")]
pub struct ConfirmationMessageError(pub String);

/// Capability that approves or declines a destructive action.
pub trait Confirmation {
    /// Returns `true` when the action may proceed.
    fn confirm(&self, request: &ConfirmationRequest) -> bool;
}

impl<F> Confirmation for F
where
    F: Fn(&ConfirmationRequest) -> bool,
{
    fn confirm(&self, request: &ConfirmationRequest) -> bool {
        self(request)
    }
}

/// Approves every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirmation for AlwaysConfirm {
    fn confirm(&self, _request: &ConfirmationRequest) -> bool {
        true
    }
}

/// Declines every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl Confirmation for NeverConfirm {
    fn confirm(&self, _request: &ConfirmationRequest) -> bool {
        false
    }
}
