//! Input shapes for creating and editing tasks.

use super::{DueDate, Level, SelfAssessment, Task, TaskDomainError, TaskTitle};

/// A task being entered, not yet created.
///
/// Drafts correspond to the transient Draft status and are never persisted.
/// They are borrowed by the services so the caller keeps the input after a
/// failed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    self_assessment: SelfAssessment,
    complete_by: Option<DueDate>,
}

impl TaskDraft {
    /// Starts a draft with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            self_assessment: SelfAssessment::unassessed(),
            complete_by: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the self-assessed urgency.
    #[must_use]
    pub const fn with_urgency(mut self, urgency: Level) -> Self {
        self.self_assessment.urgency = Some(urgency);
        self
    }

    /// Sets the self-assessed importance.
    #[must_use]
    pub const fn with_importance(mut self, importance: Level) -> Self {
        self.self_assessment.importance = Some(importance);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn due(mut self, complete_by: DueDate) -> Self {
        self.complete_by = Some(complete_by);
        self
    }

    /// Returns the raw title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the self-assessment.
    #[must_use]
    pub const fn self_assessment(&self) -> SelfAssessment {
        self.self_assessment
    }

    /// Returns the due date, if set.
    #[must_use]
    pub const fn complete_by(&self) -> Option<DueDate> {
        self.complete_by
    }

    /// Checks required fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::MissingDueDate`].
    pub fn validate(&self) -> Result<DraftFields, TaskDomainError> {
        let title = TaskTitle::new(self.title.as_str())?;
        let complete_by = self.complete_by.ok_or(TaskDomainError::MissingDueDate)?;
        Ok(DraftFields {
            title,
            description: self.description.clone(),
            self_assessment: self.self_assessment,
            complete_by,
        })
    }
}

/// Validated draft content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftFields {
    /// Task title.
    pub title: TaskTitle,
    /// Free-text description.
    pub description: String,
    /// User's own assessment.
    pub self_assessment: SelfAssessment,
    /// Due date.
    pub complete_by: DueDate,
}

/// Partial update for a task already on the board.
///
/// Status, identifier, and creation time are never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) self_assessment: Option<SelfAssessment>,
    pub(crate) complete_by: Option<DueDate>,
    pub(crate) justification: Option<String>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the whole self-assessment; absent levels clear it.
    #[must_use]
    pub const fn with_self_assessment(mut self, self_assessment: SelfAssessment) -> Self {
        self.self_assessment = Some(self_assessment);
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_complete_by(mut self, complete_by: DueDate) -> Self {
        self.complete_by = Some(complete_by);
        self
    }

    /// Replaces the justification.
    #[must_use]
    pub fn with_justification(mut self, justification: impl Into<String>) -> Self {
        self.justification = Some(justification.into());
        self
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.self_assessment.is_none()
            && self.complete_by.is_none()
            && self.justification.is_none()
    }

    /// Validates the title replacement, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title.
    pub fn validated_title(&self) -> Result<Option<TaskTitle>, TaskDomainError> {
        self.title.as_deref().map(TaskTitle::new).transpose()
    }
}

/// Fields the user may change while a task awaits review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEdits {
    /// Edited description.
    pub description: String,
    /// Edited self-assessment.
    pub self_assessment: SelfAssessment,
    /// Edited due date.
    pub complete_by: DueDate,
}

impl ReviewEdits {
    /// Starts from the task's current values.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            description: task.description().to_owned(),
            self_assessment: task.self_assessment(),
            complete_by: task.complete_by(),
        }
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replaces the self-assessment.
    #[must_use]
    pub const fn with_self_assessment(mut self, self_assessment: SelfAssessment) -> Self {
        self.self_assessment = self_assessment;
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_complete_by(mut self, complete_by: DueDate) -> Self {
        self.complete_by = complete_by;
        self
    }
}
