//! Review workflow: the classifier round trip and the pending-review slot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mockable::Clock;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::collection::{TaskCollectionError, TaskCollectionService};
use crate::task::{
    domain::{ReviewEdits, Task, TaskDomainError, TaskDraft, TaskId},
    ports::{
        BoardEvent, ClassificationRequest, Classifier, ClassifierError, TaskEventSink,
        TaskRepository,
    },
};

const SUBMIT_FAILED_MESSAGE: &str = "AI analysis failed. Please try again or use Quick Create.";
const REANALYSIS_FAILED_MESSAGE: &str = "AI re-analysis failed. Check your connection and retry.";

/// Service-level errors for the review workflow.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Draft validation or a lifecycle rule failed; nothing changed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The classifier call failed; the held task, if any, is unchanged.
    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    /// Another task is already awaiting review.
    #[error("a task is already awaiting review")]
    SlotOccupied,

    /// A classification for the pending task has not resolved yet.
    #[error("a classification is already in progress")]
    ClassificationInFlight,

    /// No task is awaiting review.
    #[error("no task is awaiting review")]
    NoPendingTask,

    /// The pending task was rejected before its classification arrived; the
    /// late result was ignored.
    #[error("the pending task was discarded before classification finished")]
    Discarded,

    /// The board refused the accepted task; it stays pending.
    #[error(transparent)]
    Collection(#[from] TaskCollectionError),
}

/// Result type for review operations.
pub type ReviewResult<T> = Result<T, ReviewError>;

#[derive(Debug, Default)]
enum ReviewSlot {
    #[default]
    Empty,
    Submitting {
        ticket: u64,
    },
    Pending {
        task: Task,
        in_flight: Option<u64>,
    },
    Committing,
}

#[derive(Debug, Default)]
struct SlotState {
    slot: ReviewSlot,
    next_ticket: u64,
}

impl SlotState {
    fn issue_ticket(&mut self) -> u64 {
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.next_ticket
    }
}

/// Orchestrates AI-assisted task creation.
///
/// Holds at most one task in review. Each classifier call carries a ticket;
/// a response whose ticket no longer matches the slot (because the task was
/// rejected meanwhile) is dropped. A second submission while the slot is
/// busy, or a re-analysis while one is outstanding, is rejected rather than
/// queued.
pub struct ReviewService<R, S, C, K>
where
    R: TaskRepository,
    S: TaskEventSink,
    C: Clock + Send + Sync,
    K: Classifier,
{
    collection: Arc<TaskCollectionService<R, S, C>>,
    classifier: Arc<K>,
    state: Mutex<SlotState>,
}

impl<R, S, C, K> ReviewService<R, S, C, K>
where
    R: TaskRepository,
    S: TaskEventSink,
    C: Clock + Send + Sync,
    K: Classifier,
{
    /// Creates a review service that commits accepted tasks to `collection`.
    #[must_use]
    pub fn new(collection: Arc<TaskCollectionService<R, S, C>>, classifier: Arc<K>) -> Self {
        Self {
            collection,
            classifier,
            state: Mutex::new(SlotState::default()),
        }
    }

    /// Classifies a draft and holds the result for review.
    ///
    /// The draft is only borrowed, so after a failure the caller still has
    /// the input for a retry or a quick create.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Domain`] for an invalid draft,
    /// [`ReviewError::SlotOccupied`] when a task is already held or being
    /// submitted, [`ReviewError::Classifier`] when classification fails, and
    /// [`ReviewError::Discarded`] when the submission was rejected before the
    /// classifier answered.
    pub async fn submit_for_review(&self, draft: &TaskDraft) -> ReviewResult<Task> {
        let fields = draft.validate()?;
        let ticket = {
            let mut state = self.lock_state();
            if !matches!(state.slot, ReviewSlot::Empty) {
                return Err(ReviewError::SlotOccupied);
            }
            let ticket = state.issue_ticket();
            state.slot = ReviewSlot::Submitting { ticket };
            ticket
        };

        let request = ClassificationRequest::from_draft(&fields);
        self.emit(BoardEvent::ClassificationStarted);
        let outcome = self.classifier.classify(&request).await;

        let settled = {
            let mut state = self.lock_state();
            if matches!(state.slot, ReviewSlot::Submitting { ticket: current } if current == ticket)
            {
                Some(match outcome {
                    Ok(classification) => {
                        let task =
                            Task::for_review(fields, classification, self.collection.clock());
                        state.slot = ReviewSlot::Pending {
                            task: task.clone(),
                            in_flight: None,
                        };
                        Ok(task)
                    }
                    Err(err) => {
                        state.slot = ReviewSlot::Empty;
                        Err(err)
                    }
                })
            } else {
                None
            }
        };

        let Some(result) = settled else {
            debug!(ticket, "ignoring classification for a discarded submission");
            self.settle_discarded();
            return Err(ReviewError::Discarded);
        };

        match result {
            Ok(task) => {
                info!(
                    task_id = %task.id(),
                    quadrant = task.quadrant().as_str(),
                    "task classified and awaiting review"
                );
                self.emit(BoardEvent::ClassificationFinished);
                Ok(task)
            }
            Err(err) => Err(self.classification_failed(err, SUBMIT_FAILED_MESSAGE)),
        }
    }

    /// Re-classifies the pending task with edited fields.
    ///
    /// On success the edits and the new classification replace the held
    /// values; status stays pending.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::NoPendingTask`] when nothing is held,
    /// [`ReviewError::ClassificationInFlight`] while an earlier request is
    /// unresolved, [`ReviewError::Classifier`] on failure (the held task is
    /// unchanged), and [`ReviewError::Discarded`] when the task was rejected
    /// before the answer arrived.
    pub async fn reanalyze(&self, edits: ReviewEdits) -> ReviewResult<Task> {
        let (request, task_id, ticket) = {
            let mut state = self.lock_state();
            let ticket = state.issue_ticket();
            let ReviewSlot::Pending { task, in_flight } = &mut state.slot else {
                return Err(ReviewError::NoPendingTask);
            };
            if in_flight.is_some() {
                return Err(ReviewError::ClassificationInFlight);
            }
            *in_flight = Some(ticket);
            (
                ClassificationRequest::from_review(task, &edits),
                task.id(),
                ticket,
            )
        };

        self.emit(BoardEvent::ClassificationStarted);
        let outcome = self.classifier.classify(&request).await;

        let settled = {
            let mut state = self.lock_state();
            match &mut state.slot {
                ReviewSlot::Pending { task, in_flight }
                    if task.id() == task_id && *in_flight == Some(ticket) =>
                {
                    *in_flight = None;
                    Some(outcome.map(|classification| {
                        task.apply_review_edits(edits);
                        task.apply_classification(classification);
                        task.clone()
                    }))
                }
                _ => None,
            }
        };

        let Some(result) = settled else {
            debug!(task_id = %task_id, "ignoring re-analysis for a discarded task");
            self.settle_discarded();
            return Err(ReviewError::Discarded);
        };

        match result {
            Ok(task) => {
                info!(
                    task_id = %task.id(),
                    quadrant = task.quadrant().as_str(),
                    "pending task re-analysed"
                );
                self.emit(BoardEvent::ClassificationFinished);
                Ok(task)
            }
            Err(err) => Err(self.classification_failed(err, REANALYSIS_FAILED_MESSAGE)),
        }
    }

    /// Commits the pending task to the board with the final edits.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::NoPendingTask`] when nothing is held,
    /// [`ReviewError::ClassificationInFlight`] while a re-analysis is
    /// unresolved, and [`ReviewError::Collection`] when the board refuses the
    /// task, in which case it is held again unchanged.
    pub async fn accept_pending(&self, edits: ReviewEdits) -> ReviewResult<Task> {
        let held = {
            let mut state = self.lock_state();
            match std::mem::take(&mut state.slot) {
                ReviewSlot::Pending {
                    task,
                    in_flight: None,
                } => {
                    state.slot = ReviewSlot::Committing;
                    task
                }
                ReviewSlot::Pending {
                    task,
                    in_flight: Some(ticket),
                } => {
                    state.slot = ReviewSlot::Pending {
                        task,
                        in_flight: Some(ticket),
                    };
                    return Err(ReviewError::ClassificationInFlight);
                }
                other => {
                    state.slot = other;
                    return Err(ReviewError::NoPendingTask);
                }
            }
        };

        let mut accepted = held.clone();
        accepted.apply_review_edits(edits);
        let committed = match accepted.accept() {
            Ok(()) => self
                .collection
                .create(accepted)
                .await
                .map_err(ReviewError::from),
            Err(err) => Err(ReviewError::from(err)),
        };

        let mut state = self.lock_state();
        let still_committing = matches!(state.slot, ReviewSlot::Committing);
        match committed {
            Ok(task) => {
                if still_committing {
                    state.slot = ReviewSlot::Empty;
                }
                info!(task_id = %task.id(), "pending task accepted");
                Ok(task)
            }
            Err(err) => {
                if still_committing {
                    state.slot = ReviewSlot::Pending {
                        task: held,
                        in_flight: None,
                    };
                }
                warn!(error = %err, "pending task could not be committed");
                Err(err)
            }
        }
    }

    /// Discards whatever the slot holds.
    ///
    /// Returns the discarded task when one was pending. A submission still
    /// waiting on the classifier is abandoned; its answer will be ignored.
    pub fn reject_pending(&self) -> Option<Task> {
        let previous = std::mem::take(&mut self.lock_state().slot);
        match previous {
            ReviewSlot::Pending { task, .. } => {
                info!(task_id = %task.id(), "pending task discarded");
                Some(task)
            }
            ReviewSlot::Submitting { ticket } => {
                debug!(ticket, "in-flight submission abandoned");
                None
            }
            ReviewSlot::Empty | ReviewSlot::Committing => None,
        }
    }

    /// Returns the task awaiting review, if any.
    #[must_use]
    pub fn pending(&self) -> Option<Task> {
        match &self.lock_state().slot {
            ReviewSlot::Pending { task, .. } => Some(task.clone()),
            _ => None,
        }
    }

    /// Returns the identifier of the task awaiting review, if any.
    #[must_use]
    pub fn pending_id(&self) -> Option<TaskId> {
        self.pending().map(|task| task.id())
    }

    /// Returns `true` while a classifier call is outstanding.
    ///
    /// Callers disable the submit and re-analyse actions while this holds.
    #[must_use]
    pub fn is_classifying(&self) -> bool {
        matches!(
            self.lock_state().slot,
            ReviewSlot::Submitting { .. }
                | ReviewSlot::Pending {
                    in_flight: Some(_),
                    ..
                }
        )
    }

    fn settle_discarded(&self) {
        // A newer submission may still be classifying; its own outcome ends
        // the progress indication.
        if !self.is_classifying() {
            self.emit(BoardEvent::ClassificationFinished);
        }
    }

    fn classification_failed(&self, err: ClassifierError, message: &str) -> ReviewError {
        warn!(error = %err, "classification failed");
        self.emit(BoardEvent::ClassificationFailed {
            message: message.to_owned(),
        });
        ReviewError::Classifier(err)
    }

    fn emit(&self, event: BoardEvent) {
        self.collection.events().emit(event);
    }

    fn lock_state(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
