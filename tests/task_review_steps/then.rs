//! Then steps for task review BDD scenarios.

use super::world::{ReviewWorld, level, quadrant};
use rstest_bdd_macros::then;
use tasq::task::{domain::TaskStatus, services::ReviewError};

#[then(r#"the task "{title}" is accepted in the "{expected}" quadrant"#)]
fn task_accepted_in_quadrant(
    world: &ReviewWorld,
    title: String,
    expected: String,
) -> Result<(), eyre::Report> {
    let task = world.task_titled(&title)?;
    eyre::ensure!(
        task.status() == TaskStatus::Accepted,
        "expected Accepted, found {}",
        task.status()
    );
    eyre::ensure!(
        task.quadrant() == quadrant(&expected)?,
        "expected {expected}, found {}",
        task.quadrant()
    );
    Ok(())
}

#[then(r#"the task "{title}" has urgency "{urgency}" and importance "{importance}""#)]
fn task_has_levels(
    world: &ReviewWorld,
    title: String,
    urgency: String,
    importance: String,
) -> Result<(), eyre::Report> {
    let assessment = world.task_titled(&title)?.assessment();
    eyre::ensure!(
        assessment.urgency == level(&urgency)? && assessment.importance == level(&importance)?,
        "unexpected placement {assessment:?}"
    );
    Ok(())
}

#[then(r#"the task "{title}" keeps its self-assessment"#)]
fn task_keeps_self_assessment(world: &ReviewWorld, title: String) -> Result<(), eyre::Report> {
    let draft = world
        .last_draft
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no earlier input in scenario world"))?;
    let task = world.task_titled(&title)?;
    eyre::ensure!(
        task.self_assessment() == draft.self_assessment(),
        "self-assessment changed to {:?}",
        task.self_assessment()
    );
    Ok(())
}

#[then(r#"the pending task is in the "{expected}" quadrant"#)]
fn pending_in_quadrant(world: &ReviewWorld, expected: String) -> Result<(), eyre::Report> {
    let pending = world
        .review
        .pending()
        .ok_or_else(|| eyre::eyre!("no task is pending review"))?;
    eyre::ensure!(
        pending.status() == TaskStatus::PendingReview,
        "pending task has status {}",
        pending.status()
    );
    eyre::ensure!(
        pending.quadrant() == quadrant(&expected)?,
        "expected {expected}, found {}",
        pending.quadrant()
    );
    Ok(())
}

#[then("the board has {count:usize} tasks")]
fn board_has_tasks(world: &ReviewWorld, count: usize) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.collection.len() == count,
        "expected {count} board tasks, found {}",
        world.collection.len()
    );
    Ok(())
}

#[then("the submission fails with a classifier error")]
fn submission_failed(world: &ReviewWorld) -> Result<(), eyre::Report> {
    match world.last_submission.as_ref() {
        Some(Err(ReviewError::Classifier(_))) => Ok(()),
        other => Err(eyre::eyre!("expected a classifier error, found {other:?}")),
    }
}

#[then("no task is pending")]
fn nothing_pending(world: &ReviewWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.review.pending().is_none(), "a task is still pending");
    eyre::ensure!(!world.review.is_classifying(), "a classification is in flight");
    Ok(())
}
