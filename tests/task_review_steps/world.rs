//! Shared world state for task review BDD scenarios.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::fixture;
use tasq::task::{
    adapters::memory::{InMemoryTaskRepository, RecordingEventSink, ScriptedClassifier},
    domain::{DueDate, Level, Quadrant, Task, TaskDraft},
    services::{ReviewResult, ReviewService, TaskCollectionService},
};

/// Collection service type used by the BDD world.
pub type TestCollection =
    TaskCollectionService<InMemoryTaskRepository, RecordingEventSink, DefaultClock>;

/// Review service type used by the BDD world.
pub type TestReview =
    ReviewService<InMemoryTaskRepository, RecordingEventSink, DefaultClock, ScriptedClassifier>;

/// Scenario world for task review behaviour tests.
pub struct ReviewWorld {
    pub classifier: ScriptedClassifier,
    pub collection: Arc<TestCollection>,
    pub review: TestReview,
    pub last_draft: Option<TaskDraft>,
    pub last_submission: Option<ReviewResult<Task>>,
}

impl ReviewWorld {
    /// Creates a world with an empty board and an empty classifier script.
    #[must_use]
    pub fn new() -> Self {
        let classifier = ScriptedClassifier::new();
        let collection = Arc::new(TaskCollectionService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(RecordingEventSink::new()),
            Arc::new(DefaultClock),
        ));
        let review = ReviewService::new(Arc::clone(&collection), Arc::new(classifier.clone()));
        Self {
            classifier,
            collection,
            review,
            last_draft: None,
            last_submission: None,
        }
    }

    /// Returns the board task with `title`.
    pub fn task_titled(&self, title: &str) -> Result<Task, eyre::Report> {
        self.collection
            .tasks()
            .into_iter()
            .find(|task| task.title().as_str() == title)
            .ok_or_else(|| eyre::eyre!("no board task titled {title:?}"))
    }
}

impl Default for ReviewWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReviewWorld {
    ReviewWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a level named in a step.
pub fn level(name: &str) -> Result<Level, eyre::Report> {
    Level::try_from(name).map_err(|err| eyre::eyre!(err))
}

/// Parses a quadrant named in a step.
pub fn quadrant(name: &str) -> Result<Quadrant, eyre::Report> {
    Quadrant::try_from(name).map_err(|err| eyre::eyre!(err))
}

/// Fixed due date for scenarios that do not name one.
pub fn default_due() -> DueDate {
    DueDate::on(NaiveDate::from_ymd_opt(2030, 1, 15).unwrap_or_default())
}
