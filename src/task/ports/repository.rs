//! Repository port for durable task records.

use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every write is idempotent: replaying an insert, replace, or remove that
/// already took effect succeeds without further change. Implementations must
/// apply each write atomically.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns every stored task, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Corrupt`] when stored data cannot be
    /// decoded, or [`TaskRepositoryError::Persistence`] on I/O failure.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Stores a new task, overwriting an identical replay.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the write fails.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Replaces the stored record with the same identifier.
    ///
    /// A missing record is written as new so a later replace can reconcile
    /// an insert that failed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the write fails.
    async fn replace(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task; removing an unknown identifier is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the write fails.
    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Makes the store hold exactly `tasks`.
    ///
    /// Used to reconcile after a failed write.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the write fails.
    async fn replace_all(&self, tasks: &[Task]) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Stored data could not be decoded into tasks.
    #[error("task store is corrupt: {0}")]
    Corrupt(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Reports undecodable stored data.
    pub fn corrupt(err: impl std::fmt::Display) -> Self {
        Self::Corrupt(err.to_string())
    }
}
