//! In-memory integration tests for the classification review flow.

use rstest::rstest;
use tasq::task::{
    domain::{Classification, Level, Quadrant, ReviewEdits, SelfAssessment, TaskStatus},
    ports::BoardEvent,
    services::ReviewError,
};

use super::helpers::{Board, board, draft};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn classify_review_accept_and_drag(board: Board) -> eyre::Result<()> {
    board.classifier.push(Ok(Classification::new(
        Level::Low,
        Level::High,
        "Valuable, but the deadline is weeks away.",
    )));
    let input = draft("Plan offsite")
        .with_urgency(Level::High)
        .with_importance(Level::Medium);

    let pending = board.review.submit_for_review(&input).await?;
    eyre::ensure!(pending.quadrant() == Quadrant::Schedule, "classified as Schedule");
    eyre::ensure!(board.collection.is_empty(), "nothing on the board yet");

    let accepted = board
        .review
        .accept_pending(ReviewEdits::from_task(&pending))
        .await?;
    let moved = board
        .collection
        .move_to_quadrant(accepted.id(), Quadrant::Delegate)
        .await?;

    eyre::ensure!(moved.quadrant() == Quadrant::Delegate, "moved to Delegate");
    eyre::ensure!(
        moved.self_assessment() == SelfAssessment::new(Some(Level::High), Some(Level::Medium)),
        "self-assessment is untouched"
    );
    eyre::ensure!(
        board.repository.find(moved.id())? == Some(moved),
        "the move is persisted"
    );

    let requests = board.classifier.requests();
    eyre::ensure!(requests.len() == 1, "one classifier call");
    eyre::ensure!(
        requests.first().map(|request| request.title.as_str()) == Some("Plan offsite"),
        "the title was sent"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failure_then_retry_succeeds(board: Board) -> eyre::Result<()> {
    board.classifier.push(Err(tasq::task::ports::ClassifierError::new(
        "service unavailable",
    )));
    board.classifier.push(Ok(Classification::new(
        Level::High,
        Level::High,
        "Due this week and affects the whole team.",
    )));
    let input = draft("Ship release notes");

    let first = board.review.submit_for_review(&input).await;
    eyre::ensure!(
        matches!(first, Err(ReviewError::Classifier(_))),
        "first call fails"
    );
    eyre::ensure!(board.review.pending().is_none(), "nothing is pending");
    eyre::ensure!(
        board
            .events
            .events()
            .iter()
            .any(|event| matches!(event, BoardEvent::ClassificationFailed { .. })),
        "the failure is announced"
    );

    let retried = board.review.submit_for_review(&input).await?;
    eyre::ensure!(retried.status() == TaskStatus::PendingReview, "retry holds the task");
    eyre::ensure!(retried.quadrant() == Quadrant::Do, "retry classifies as Do");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reanalysis_with_edits_then_reject(board: Board) -> eyre::Result<()> {
    board.classifier.push(Ok(Classification::new(
        Level::Low,
        Level::Low,
        "Nice to have.",
    )));
    board.classifier.push(Ok(Classification::new(
        Level::High,
        Level::Low,
        "The shop closes tomorrow.",
    )));

    let pending = board
        .review
        .submit_for_review(&draft("Buy printer ink"))
        .await?;
    let revised = board
        .review
        .reanalyze(ReviewEdits::from_task(&pending).with_description("Shop closes tomorrow"))
        .await?;
    eyre::ensure!(revised.quadrant() == Quadrant::Delegate, "re-analysis moved it");

    let discarded = board.review.reject_pending();
    eyre::ensure!(
        discarded.map(|task| task.id()) == Some(pending.id()),
        "the pending task is discarded"
    );
    eyre::ensure!(board.collection.is_empty(), "rejecting never touches the board");
    eyre::ensure!(board.repository.is_empty()?, "rejecting never touches the store");
    Ok(())
}
