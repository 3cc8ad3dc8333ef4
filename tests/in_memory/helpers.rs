//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::fixture;
use tasq::task::{
    adapters::memory::{InMemoryTaskRepository, RecordingEventSink, ScriptedClassifier},
    domain::{DueDate, TaskDraft},
    services::{ReviewService, TaskCollectionService},
};

/// Collection service wired to memory adapters.
pub type TestCollection =
    TaskCollectionService<InMemoryTaskRepository, RecordingEventSink, DefaultClock>;

/// Review service wired to memory adapters.
pub type TestReview =
    ReviewService<InMemoryTaskRepository, RecordingEventSink, DefaultClock, ScriptedClassifier>;

/// Board wired to memory adapters, with handles for inspection.
pub struct Board {
    pub repository: InMemoryTaskRepository,
    pub events: RecordingEventSink,
    pub classifier: ScriptedClassifier,
    pub collection: Arc<TestCollection>,
    pub review: TestReview,
}

/// Provides a fresh board for each test.
#[fixture]
pub fn board() -> Board {
    let repository = InMemoryTaskRepository::new();
    let events = RecordingEventSink::new();
    let classifier = ScriptedClassifier::new();
    let collection = Arc::new(TaskCollectionService::new(
        Arc::new(repository.clone()),
        Arc::new(events.clone()),
        Arc::new(DefaultClock),
    ));
    let review = ReviewService::new(Arc::clone(&collection), Arc::new(classifier.clone()));
    Board {
        repository,
        events,
        classifier,
        collection,
        review,
    }
}

/// Returns a fixed due date.
///
/// # Panics
///
/// Never; the calendar date is valid.
#[must_use]
pub fn due() -> DueDate {
    DueDate::on(NaiveDate::from_ymd_opt(2030, 1, 15).expect("valid calendar date"))
}

/// Returns a draft with a title and the fixed due date.
#[must_use]
pub fn draft(title: &str) -> TaskDraft {
    TaskDraft::new(title).due(due())
}
