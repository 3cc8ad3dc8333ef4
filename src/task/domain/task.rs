//! Task aggregate root and lifecycle status.

use super::{
    Assessment, Classification, DraftFields, DueDate, Level, ParseTaskStatusError, Quadrant,
    ReviewEdits, SelfAssessment, TaskDomainError, TaskId, TaskPatch, TaskTitle,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Justification recorded when a task is placed without classification.
pub const UNASSESSED_JUSTIFICATION: &str = "Directly added by user without AI assessment.";

/// Task lifecycle status.
///
/// ```text
/// Draft ──quick-create──────────────► Accepted ◄──toggle──► Completed
///   └──submit──► PendingReview ──accept──┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Form input in progress; never persisted.
    Draft,
    /// Classified and waiting for the user to accept or discard it.
    #[serde(rename = "Pending Review")]
    PendingReview,
    /// On the board.
    Accepted,
    /// On the board and done; reverts to Accepted on toggle.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::PendingReview => "Pending Review",
            Self::Accepted => "Accepted",
            Self::Completed => "Completed",
        }
    }

    /// Returns `true` when the lifecycle permits moving to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::PendingReview | Self::Accepted)
                | (Self::PendingReview | Self::Completed, Self::Accepted)
                | (Self::Accepted, Self::Completed)
        )
    }

    /// Returns `true` for statuses shown on the board.
    #[must_use]
    pub const fn is_on_board(self) -> bool {
        matches!(self, Self::Accepted | Self::Completed)
    }

    /// Returns the status a completion toggle leads to, if any.
    #[must_use]
    pub const fn toggled(self) -> Option<Self> {
        match self {
            Self::Accepted => Some(Self::Completed),
            Self::Completed => Some(Self::Accepted),
            Self::Draft | Self::PendingReview => None,
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', " ");
        match normalized.as_str() {
            "draft" => Ok(Self::Draft),
            "pending review" => Ok(Self::PendingReview),
            "accepted" => Ok(Self::Accepted),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task aggregate root.
///
/// The `assessment` levels drive quadrant placement; the self-assessment is
/// advisory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: String,
    self_assessment: SelfAssessment,
    assessment: Assessment,
    justification: String,
    complete_by: DueDate,
    status: TaskStatus,
    created_at: DateTime<Utc>,
}

/// Flat record of a task as written to durable storage.
///
/// Optional fields serialise as explicit `null`, never as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted self-assessed urgency.
    pub user_urgency: Option<Level>,
    /// Persisted self-assessed importance.
    pub user_importance: Option<Level>,
    /// Persisted placement urgency.
    pub ai_urgency: Option<Level>,
    /// Persisted placement importance.
    pub ai_importance: Option<Level>,
    /// Persisted justification.
    pub justification: Option<String>,
    /// Persisted due date.
    pub complete_by: DateTime<Utc>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates an accepted task directly from a draft, skipping review.
    ///
    /// Placement levels default to the self-assessment, or Low where the user
    /// gave none.
    #[must_use]
    pub fn quick_create(fields: DraftFields, clock: &impl Clock) -> Self {
        let assessment = fields.self_assessment.or_low();
        Self::from_draft(
            fields,
            assessment,
            UNASSESSED_JUSTIFICATION.to_owned(),
            TaskStatus::Accepted,
            clock,
        )
    }

    /// Creates a task held for review with the classifier's result.
    #[must_use]
    pub fn for_review(
        fields: DraftFields,
        classification: Classification,
        clock: &impl Clock,
    ) -> Self {
        let assessment = classification.assessment();
        Self::from_draft(
            fields,
            assessment,
            classification.justification,
            TaskStatus::PendingReview,
            clock,
        )
    }

    fn from_draft(
        fields: DraftFields,
        assessment: Assessment,
        justification: String,
        status: TaskStatus,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: TaskId::new(),
            title: fields.title,
            description: fields.description,
            self_assessment: fields.self_assessment,
            assessment,
            justification,
            complete_by: fields.complete_by,
            status,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank stored title and
    /// [`TaskDomainError::MissingAssessment`] when either placement level is
    /// absent.
    pub fn from_persisted(data: PersistedTaskData) -> Result<Self, TaskDomainError> {
        let title = TaskTitle::new(data.title)?;
        let (Some(urgency), Some(importance)) = (data.ai_urgency, data.ai_importance) else {
            return Err(TaskDomainError::MissingAssessment {
                task_id: data.id,
                status: data.status,
            });
        };

        Ok(Self {
            id: data.id,
            title,
            description: data.description,
            self_assessment: SelfAssessment::new(data.user_urgency, data.user_importance),
            assessment: Assessment::new(urgency, importance),
            justification: data
                .justification
                .unwrap_or_else(|| UNASSESSED_JUSTIFICATION.to_owned()),
            complete_by: DueDate::at(data.complete_by),
            status: data.status,
            created_at: data.created_at,
        })
    }

    /// Returns the storage record for this task.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedTaskData {
        PersistedTaskData {
            id: self.id,
            title: self.title.as_str().to_owned(),
            description: self.description.clone(),
            user_urgency: self.self_assessment.urgency,
            user_importance: self.self_assessment.importance,
            ai_urgency: Some(self.assessment.urgency),
            ai_importance: Some(self.assessment.importance),
            justification: Some(self.justification.clone()),
            complete_by: self.complete_by.timestamp(),
            status: self.status,
            created_at: self.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the user's self-assessment.
    #[must_use]
    pub const fn self_assessment(&self) -> SelfAssessment {
        self.self_assessment
    }

    /// Returns the placement assessment.
    #[must_use]
    pub const fn assessment(&self) -> Assessment {
        self.assessment
    }

    /// Returns the justification text.
    #[must_use]
    pub fn justification(&self) -> &str {
        &self.justification
    }

    /// Returns the due date.
    #[must_use]
    pub const fn complete_by(&self) -> DueDate {
        self.complete_by
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the quadrant the placement assessment puts this task in.
    #[must_use]
    pub const fn quadrant(&self) -> Quadrant {
        self.assessment.quadrant()
    }

    /// Moves a pending task onto the board.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] unless the task is
    /// pending review.
    pub fn accept(&mut self) -> Result<(), TaskDomainError> {
        if self.status != TaskStatus::PendingReview {
            return Err(self.invalid_transition(TaskStatus::Accepted));
        }
        self.transition_to(TaskStatus::Accepted)
    }

    /// Flips Accepted and Completed, returning the new status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] for tasks that are
    /// not on the board.
    pub fn toggle_completion(&mut self) -> Result<TaskStatus, TaskDomainError> {
        let next = self
            .status
            .toggled()
            .ok_or_else(|| self.invalid_transition(TaskStatus::Completed))?;
        self.transition_to(next)?;
        Ok(next)
    }

    /// Applies a status change permitted by the lifecycle.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the lifecycle
    /// forbids the move; the task is left unchanged.
    pub fn transition_to(&mut self, next: TaskStatus) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(next) {
            return Err(self.invalid_transition(next));
        }
        self.status = next;
        Ok(())
    }

    /// Overwrites the placement levels without touching status.
    pub fn reassign(&mut self, assessment: Assessment) {
        self.assessment = assessment;
    }

    /// Drops the task into a quadrant using its representative levels.
    pub fn move_to(&mut self, quadrant: Quadrant) {
        self.reassign(Assessment::representative_of(quadrant));
    }

    /// Replaces placement levels and justification with a classifier result.
    pub fn apply_classification(&mut self, classification: Classification) {
        self.assessment = classification.assessment();
        self.justification = classification.justification;
    }

    /// Commits the fields edited during review.
    pub fn apply_review_edits(&mut self, edits: ReviewEdits) {
        self.description = edits.description;
        self.self_assessment = edits.self_assessment;
        self.complete_by = edits.complete_by;
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the patch blanks the
    /// title; nothing is applied in that case.
    pub fn apply_patch(&mut self, patch: TaskPatch) -> Result<(), TaskDomainError> {
        let title = patch.validated_title()?;
        let TaskPatch {
            description,
            self_assessment,
            complete_by,
            justification,
            ..
        } = patch;

        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = self_assessment {
            self.self_assessment = value;
        }
        if let Some(value) = complete_by {
            self.complete_by = value;
        }
        if let Some(value) = justification {
            self.justification = value;
        }
        Ok(())
    }

    const fn invalid_transition(&self, to: TaskStatus) -> TaskDomainError {
        TaskDomainError::InvalidStateTransition {
            task_id: self.id,
            from: self.status,
            to,
        }
    }
}
