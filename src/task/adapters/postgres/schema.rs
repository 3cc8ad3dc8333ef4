//! Diesel schema for board persistence.

diesel::table! {
    /// Board tasks, one row per accepted or completed task.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title; unbounded, like the domain title.
        title -> Text,
        /// Free-form description.
        description -> Text,
        /// Self-assessed urgency, if given.
        #[max_length = 16]
        user_urgency -> Nullable<Varchar>,
        /// Self-assessed importance, if given.
        #[max_length = 16]
        user_importance -> Nullable<Varchar>,
        /// Placement urgency.
        #[max_length = 16]
        ai_urgency -> Varchar,
        /// Placement importance.
        #[max_length = 16]
        ai_importance -> Varchar,
        /// Classification rationale.
        justification -> Nullable<Text>,
        /// Due date.
        complete_by -> Timestamptz,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

/// DDL applied by [`super::ensure_schema`].
pub(crate) const CREATE_TASKS_TABLE: &str = concat!(
    "CREATE TABLE IF NOT EXISTS tasks (",
    "id UUID PRIMARY KEY, ",
    "title TEXT NOT NULL, ",
    "description TEXT NOT NULL DEFAULT '', ",
    "user_urgency VARCHAR(16), ",
    "user_importance VARCHAR(16), ",
    "ai_urgency VARCHAR(16) NOT NULL, ",
    "ai_importance VARCHAR(16) NOT NULL, ",
    "justification TEXT, ",
    "complete_by TIMESTAMPTZ NOT NULL, ",
    "status VARCHAR(50) NOT NULL, ",
    "created_at TIMESTAMPTZ NOT NULL DEFAULT now()",
    ")",
);

/// Widens `title` on tables created with a bounded column.
pub(crate) const WIDEN_TITLE_COLUMN: &str = "ALTER TABLE tasks ALTER COLUMN title TYPE TEXT";

/// Index backing the newest-first listing.
pub(crate) const CREATE_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks (created_at DESC)";
