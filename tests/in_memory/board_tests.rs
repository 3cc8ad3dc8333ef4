//! In-memory integration tests for board operations.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::rstest;
use tasq::task::{
    adapters::memory::RecordingEventSink,
    domain::{Assessment, Level, Quadrant, TaskStatus},
    ports::{AlwaysConfirm, BoardEvent, TaskRepository},
    services::{Removal, TaskCollectionService},
};

use super::helpers::{Board, board, draft};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn quick_created_tasks_land_in_their_quadrants(board: Board) -> eyre::Result<()> {
    let rent = board
        .collection
        .quick_create(
            &draft("Pay rent")
                .with_urgency(Level::High)
                .with_importance(Level::Medium),
        )
        .await?;
    let novel = board
        .collection
        .quick_create(&draft("Read a novel"))
        .await?;

    let groups = board.collection.by_quadrant();
    eyre::ensure!(groups.get(Quadrant::Do) == [rent].as_slice(), "rent is Do");
    eyre::ensure!(
        groups.get(Quadrant::Eliminate) == [novel].as_slice(),
        "an unassessed task defaults to Eliminate"
    );
    eyre::ensure!(board.repository.len()? == 2, "both tasks are stored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn counts_follow_completion(board: Board) -> eyre::Result<()> {
    let first = board.collection.quick_create(&draft("File taxes")).await?;
    board.collection.quick_create(&draft("Pay rent")).await?;

    board.collection.toggle_complete(first.id()).await?;

    let snapshot = board
        .events
        .last_snapshot()
        .ok_or_else(|| eyre::eyre!("no snapshot emitted"))?;
    eyre::ensure!(snapshot.active_count == 1, "one active task");
    eyre::ensure!(snapshot.completed_count == 1, "one completed task");
    eyre::ensure!(
        board.repository.find(first.id())?.map(|task| task.status())
            == Some(TaskStatus::Completed),
        "completion is persisted"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drag_then_clear_completed(board: Board) -> eyre::Result<()> {
    let task = board
        .collection
        .quick_create(&draft("Renew passport").with_urgency(Level::Medium))
        .await?;
    let moved = board
        .collection
        .move_to_quadrant(task.id(), Quadrant::Do)
        .await?;
    eyre::ensure!(
        moved.assessment() == Assessment::new(Level::High, Level::High),
        "dropping into Do writes High/High"
    );

    board.collection.toggle_complete(task.id()).await?;
    let removal = board.collection.clear_completed(&AlwaysConfirm).await?;

    eyre::ensure!(
        matches!(removal, Removal::Removed(ref removed) if removed.len() == 1),
        "the completed task is removed"
    );
    eyre::ensure!(board.collection.is_empty(), "the board is empty");
    eyre::ensure!(board.repository.is_empty()?, "the store is empty");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reloaded_board_matches_previous_session(board: Board) -> eyre::Result<()> {
    let first = board.collection.quick_create(&draft("First")).await?;
    let second = board.collection.quick_create(&draft("Second")).await?;
    board.collection.toggle_complete(second.id()).await?;

    let events = RecordingEventSink::new();
    let reloaded = TaskCollectionService::load(
        Arc::new(board.repository.clone()),
        Arc::new(events.clone()),
        Arc::new(DefaultClock),
    )
    .await?;

    eyre::ensure!(
        reloaded.tasks() == board.collection.tasks(),
        "reload keeps insertion order and status"
    );
    eyre::ensure!(
        reloaded.tasks().first().map(|task| task.id()) == Some(first.id()),
        "oldest task comes first"
    );
    eyre::ensure!(
        board.repository.list_all().await?.first().map(|task| task.id()) == Some(second.id()),
        "the store lists newest first"
    );
    eyre::ensure!(events.events().is_empty(), "loading emits nothing");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn persistence_failure_event_is_not_emitted_on_success(board: Board) -> eyre::Result<()> {
    board.collection.quick_create(&draft("Pay rent")).await?;
    eyre::ensure!(
        !board
            .events
            .events()
            .iter()
            .any(|event| matches!(event, BoardEvent::PersistenceFailed { .. })),
        "healthy writes raise no failure"
    );
    Ok(())
}
