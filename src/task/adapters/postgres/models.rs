//! Diesel row models for board persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Self-assessed urgency.
    pub user_urgency: Option<String>,
    /// Self-assessed importance.
    pub user_importance: Option<String>,
    /// Placement urgency.
    pub ai_urgency: String,
    /// Placement importance.
    pub ai_importance: String,
    /// Classification rationale.
    pub justification: Option<String>,
    /// Due date.
    pub complete_by: DateTime<Utc>,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert and upsert model for task records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Self-assessed urgency.
    pub user_urgency: Option<String>,
    /// Self-assessed importance.
    pub user_importance: Option<String>,
    /// Placement urgency.
    pub ai_urgency: String,
    /// Placement importance.
    pub ai_importance: String,
    /// Classification rationale.
    pub justification: Option<String>,
    /// Due date.
    pub complete_by: DateTime<Utc>,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
