//! Service owning the board's task collection and its derived views.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use mockable::Clock;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::task::{
    domain::{
        Assessment, Level, Quadrant, QuadrantGroups, Task, TaskDomainError, TaskDraft, TaskId,
        TaskPatch, TaskStatus,
    },
    ports::{
        BoardEvent, BoardSnapshot, Confirmation, ConfirmationRequest, TaskEventSink,
        TaskRepository, TaskRepositoryResult, events::count_status,
    },
};

/// Service-level errors for collection operations.
#[derive(Debug, Error)]
pub enum TaskCollectionError {
    /// Domain validation failed; nothing was changed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// No task with the identifier is on the board; nothing was changed.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A task with the identifier is already on the board.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// Only accepted or completed tasks may enter the board.
    #[error("task {task_id} is {status} and cannot be placed on the board")]
    NotOnBoard {
        /// Rejected task.
        task_id: TaskId,
        /// Its status.
        status: TaskStatus,
    },
}

/// Result type for collection operations.
pub type TaskCollectionResult<T> = Result<T, TaskCollectionError>;

/// Outcome of an operation guarded by a [`Confirmation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal<T> {
    /// The action ran and removed the contained tasks.
    Removed(T),
    /// The user declined; nothing changed.
    Declined,
}

impl<T> Removal<T> {
    /// Returns `true` when the user declined.
    #[must_use]
    pub const fn is_declined(&self) -> bool {
        matches!(self, Self::Declined)
    }
}

/// Durable write owed after an in-memory mutation.
#[derive(Debug)]
enum PendingWrite {
    Insert(Task),
    Replace(Task),
    Remove(Vec<TaskId>),
}

/// Authoritative set of board tasks.
///
/// The in-memory list is the source of truth for the running session. Each
/// mutation is applied to memory first, then written to the repository, then
/// announced through the event sink. A failed write is logged and flagged;
/// the next write replaces the whole store to reconcile it.
pub struct TaskCollectionService<R, S, C>
where
    R: TaskRepository,
    S: TaskEventSink,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    events: Arc<S>,
    clock: Arc<C>,
    tasks: RwLock<Vec<Task>>,
    needs_resync: AtomicBool,
}

impl<R, S, C> TaskCollectionService<R, S, C>
where
    R: TaskRepository,
    S: TaskEventSink,
    C: Clock + Send + Sync,
{
    /// Creates a service with an empty board.
    #[must_use]
    pub const fn new(repository: Arc<R>, events: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            repository,
            events,
            clock,
            tasks: RwLock::new(Vec::new()),
            needs_resync: AtomicBool::new(false),
        }
    }

    /// Creates a service populated from the repository.
    ///
    /// The store lists newest first; the board keeps insertion order, so the
    /// listing is reversed. Stored tasks that are not on the board are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the store cannot be read. Callers
    /// should treat this as fatal rather than start with an empty board.
    pub async fn load(
        repository: Arc<R>,
        events: Arc<S>,
        clock: Arc<C>,
    ) -> TaskRepositoryResult<Self> {
        let mut stored = repository.list_all().await.inspect_err(|err| {
            error!(error = %err, "task store could not be read");
        })?;
        stored.reverse();

        let (board, skipped): (Vec<Task>, Vec<Task>) = stored
            .into_iter()
            .partition(|task| task.status().is_on_board());
        for task in &skipped {
            warn!(task_id = %task.id(), status = %task.status(), "skipping stored task that is not on the board");
        }
        info!(count = board.len(), "loaded task board");

        let service = Self::new(repository, events, clock);
        *service.write_tasks() = board;
        Ok(service)
    }

    /// Adds an accepted or completed task to the board.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCollectionError::NotOnBoard`] for other statuses and
    /// [`TaskCollectionError::DuplicateTask`] when the identifier is taken.
    pub async fn create(&self, task: Task) -> TaskCollectionResult<Task> {
        if !task.status().is_on_board() {
            return Err(TaskCollectionError::NotOnBoard {
                task_id: task.id(),
                status: task.status(),
            });
        }

        let snapshot = {
            let mut tasks = self.write_tasks();
            if tasks.iter().any(|existing| existing.id() == task.id()) {
                return Err(TaskCollectionError::DuplicateTask(task.id()));
            }
            tasks.push(task.clone());
            BoardSnapshot::from_tasks(&tasks)
        };

        info!(task_id = %task.id(), quadrant = task.quadrant().as_str(), "task added to board");
        self.publish(PendingWrite::Insert(task.clone()), snapshot)
            .await;
        Ok(task)
    }

    /// Creates an accepted task straight from a draft, without review.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCollectionError::Domain`] when the title or due date is
    /// missing; the board is untouched.
    pub async fn quick_create(&self, draft: &TaskDraft) -> TaskCollectionResult<Task> {
        let fields = draft.validate()?;
        let task = Task::quick_create(fields, &*self.clock);
        self.create(task).await
    }

    /// Applies a partial update to a board task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCollectionError::NotFound`] for unknown identifiers and
    /// [`TaskCollectionError::Domain`] for a blank title.
    pub async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskCollectionResult<Task> {
        self.mutate(id, |task| task.apply_patch(patch)).await
    }

    /// Flips a task between Accepted and Completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCollectionError::NotFound`] for unknown identifiers.
    pub async fn toggle_complete(&self, id: TaskId) -> TaskCollectionResult<Task> {
        self.mutate(id, |task| task.toggle_completion().map(|_| ()))
            .await
    }

    /// Overwrites a task's placement levels; status is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCollectionError::NotFound`] for unknown identifiers.
    pub async fn reassign(
        &self,
        id: TaskId,
        urgency: Level,
        importance: Level,
    ) -> TaskCollectionResult<Task> {
        self.mutate(id, |task| {
            task.reassign(Assessment::new(urgency, importance));
            Ok(())
        })
        .await
    }

    /// Drops a task into a quadrant using the quadrant's representative
    /// levels.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCollectionError::NotFound`] for unknown identifiers.
    pub async fn move_to_quadrant(
        &self,
        id: TaskId,
        quadrant: Quadrant,
    ) -> TaskCollectionResult<Task> {
        let (urgency, importance) = quadrant.representative_levels();
        self.reassign(id, urgency, importance).await
    }

    /// Deletes a task once `confirmation` approves.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCollectionError::NotFound`] for unknown identifiers;
    /// the confirmation is not consulted in that case.
    pub async fn delete(
        &self,
        id: TaskId,
        confirmation: &impl Confirmation,
    ) -> TaskCollectionResult<Removal<Task>> {
        let title = self
            .get(id)
            .map(|task| task.title().clone())
            .ok_or_else(|| not_found(id))?;

        let request = ConfirmationRequest::DeleteTask { task_id: id, title };
        if !confirmation.confirm(&request) {
            debug!(task_id = %id, "task deletion declined");
            return Ok(Removal::Declined);
        }

        let (removed, snapshot) = {
            let mut tasks = self.write_tasks();
            let position = tasks
                .iter()
                .position(|task| task.id() == id)
                .ok_or_else(|| not_found(id))?;
            let removed = tasks.remove(position);
            (removed, BoardSnapshot::from_tasks(&tasks))
        };

        info!(task_id = %id, "task deleted");
        self.publish(PendingWrite::Remove(vec![id]), snapshot).await;
        Ok(Removal::Removed(removed))
    }

    /// Removes every completed task once `confirmation` approves.
    ///
    /// With no completed tasks this returns an empty removal without asking.
    ///
    /// # Errors
    ///
    /// This operation does not currently fail; the `Result` keeps it uniform
    /// with the other board commands.
    pub async fn clear_completed(
        &self,
        confirmation: &impl Confirmation,
    ) -> TaskCollectionResult<Removal<Vec<Task>>> {
        let count = self.completed_count();
        if count == 0 {
            return Ok(Removal::Removed(Vec::new()));
        }

        if !confirmation.confirm(&ConfirmationRequest::ClearCompleted { count }) {
            debug!(count, "clearing completed tasks declined");
            return Ok(Removal::Declined);
        }

        let (removed, snapshot) = {
            let mut tasks = self.write_tasks();
            let (removed, kept): (Vec<Task>, Vec<Task>) = tasks
                .drain(..)
                .partition(|task| task.status() == TaskStatus::Completed);
            *tasks = kept;
            (removed, BoardSnapshot::from_tasks(&tasks))
        };

        info!(count = removed.len(), "completed tasks cleared");
        let ids = removed.iter().map(Task::id).collect();
        self.publish(PendingWrite::Remove(ids), snapshot).await;
        Ok(Removal::Removed(removed))
    }

    /// Returns a board task by identifier.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<Task> {
        self.read_tasks().iter().find(|task| task.id() == id).cloned()
    }

    /// Returns every board task in insertion order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.read_tasks().clone()
    }

    /// Returns the number of board tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read_tasks().len()
    }

    /// Returns `true` when the board is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read_tasks().is_empty()
    }

    /// Returns the number of accepted tasks.
    #[must_use]
    pub fn active_count(&self) -> usize {
        count_status(&self.read_tasks(), TaskStatus::Accepted)
    }

    /// Returns the number of completed tasks.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        count_status(&self.read_tasks(), TaskStatus::Completed)
    }

    /// Groups board tasks by quadrant, preserving insertion order.
    #[must_use]
    pub fn by_quadrant(&self) -> QuadrantGroups {
        QuadrantGroups::partition(self.read_tasks().iter())
    }

    /// Returns the full board with aggregate counts.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_tasks(&self.read_tasks())
    }

    pub(crate) fn events(&self) -> &S {
        &self.events
    }

    pub(crate) fn clock(&self) -> &C {
        &self.clock
    }

    /// Applies `change` to a copy of the task and commits it on success.
    async fn mutate<F>(&self, id: TaskId, change: F) -> TaskCollectionResult<Task>
    where
        F: FnOnce(&mut Task) -> Result<(), TaskDomainError>,
    {
        let (updated, snapshot) = {
            let mut tasks = self.write_tasks();
            let slot = tasks
                .iter_mut()
                .find(|task| task.id() == id)
                .ok_or_else(|| not_found(id))?;
            let mut candidate = slot.clone();
            change(&mut candidate)?;
            *slot = candidate.clone();
            (candidate, BoardSnapshot::from_tasks(&tasks))
        };

        debug!(
            task_id = %id,
            status = %updated.status(),
            quadrant = updated.quadrant().as_str(),
            "task updated"
        );
        self.publish(PendingWrite::Replace(updated.clone()), snapshot)
            .await;
        Ok(updated)
    }

    async fn publish(&self, write: PendingWrite, snapshot: BoardSnapshot) {
        let result = if self.needs_resync.load(Ordering::Acquire) {
            debug!("reconciling task store after an earlier failed write");
            self.repository.replace_all(&snapshot.tasks).await
        } else {
            self.apply_write(write).await
        };
        self.events.emit(BoardEvent::Changed(snapshot));

        match result {
            Ok(()) => self.needs_resync.store(false, Ordering::Release),
            Err(err) => {
                warn!(error = %err, "durable write failed; keeping in-memory board");
                self.needs_resync.store(true, Ordering::Release);
                self.events.emit(BoardEvent::PersistenceFailed {
                    message: err.to_string(),
                });
            }
        }
    }

    async fn apply_write(&self, write: PendingWrite) -> TaskRepositoryResult<()> {
        match write {
            PendingWrite::Insert(task) => self.repository.insert(&task).await,
            PendingWrite::Replace(task) => self.repository.replace(&task).await,
            PendingWrite::Remove(ids) => {
                for id in ids {
                    self.repository.remove(id).await?;
                }
                Ok(())
            }
        }
    }

    fn read_tasks(&self) -> RwLockReadGuard<'_, Vec<Task>> {
        self.tasks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_tasks(&self) -> RwLockWriteGuard<'_, Vec<Task>> {
        self.tasks.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found(id: TaskId) -> TaskCollectionError {
    debug!(task_id = %id, "no board task with this identifier");
    TaskCollectionError::NotFound(id)
}
