//! In-memory repository for tests and ephemeral sessions.

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Clones share the same underlying records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `tasks`, oldest first.
    #[must_use]
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            state: Arc::new(RwLock::new(tasks.into_iter().collect())),
        }
    }

    /// Returns the stored record for `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] if the lock is poisoned.
    pub fn find(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        Ok(self.read()?.iter().find(|task| task.id() == id).cloned())
    }

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] if the lock is poisoned.
    pub fn len(&self) -> TaskRepositoryResult<usize> {
        Ok(self.read()?.len())
    }

    /// Returns `true` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] if the lock is poisoned.
    pub fn is_empty(&self) -> TaskRepositoryResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, Vec<Task>>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, Vec<Task>>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Inserts or overwrites the record with the task's identifier.
fn upsert(records: &mut Vec<Task>, task: &Task) {
    match records.iter_mut().find(|existing| existing.id() == task.id()) {
        Some(existing) => *existing = task.clone(),
        None => records.push(task.clone()),
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        // Reverse first so equal timestamps still list the later insert first.
        let mut tasks: Vec<Task> = self.read()?.iter().rev().cloned().collect();
        tasks.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
        Ok(tasks)
    }

    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        upsert(&mut *self.write()?, task);
        Ok(())
    }

    async fn replace(&self, task: &Task) -> TaskRepositoryResult<()> {
        upsert(&mut *self.write()?, task);
        Ok(())
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.write()?.retain(|task| task.id() != id);
        Ok(())
    }

    async fn replace_all(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        *self.write()? = tasks.to_vec();
        Ok(())
    }
}
