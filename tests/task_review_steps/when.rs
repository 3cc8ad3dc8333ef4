//! When steps for task review BDD scenarios.

use super::world::{ReviewWorld, default_due, level, quadrant, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::when;
use tasq::task::domain::{DueDate, ReviewEdits, TaskDraft};

#[when(
    r#"the user quick-creates "{title}" due in {days:u32} days with urgency "{urgency}" and importance "{importance}""#
)]
fn quick_create_with_levels(
    world: &mut ReviewWorld,
    title: String,
    days: u32,
    urgency: String,
    importance: String,
) -> Result<(), eyre::Report> {
    let draft = TaskDraft::new(title)
        .due(DueDate::in_days(days, &DefaultClock)?)
        .with_urgency(level(&urgency)?)
        .with_importance(level(&importance)?);
    run_async(world.collection.quick_create(&draft)).wrap_err("quick create")?;
    world.last_draft = Some(draft);
    Ok(())
}

#[when(
    r#"the user submits "{title}" with urgency "{urgency}" and importance "{importance}" for review"#
)]
fn submit_for_review(
    world: &mut ReviewWorld,
    title: String,
    urgency: String,
    importance: String,
) -> Result<(), eyre::Report> {
    let draft = TaskDraft::new(title)
        .due(default_due())
        .with_urgency(level(&urgency)?)
        .with_importance(level(&importance)?);
    world.last_submission = Some(run_async(world.review.submit_for_review(&draft)));
    world.last_draft = Some(draft);
    Ok(())
}

#[when("the user accepts the pending task")]
fn accept_pending(world: &mut ReviewWorld) -> Result<(), eyre::Report> {
    let pending = world
        .review
        .pending()
        .ok_or_else(|| eyre::eyre!("no task is pending review"))?;
    run_async(world.review.accept_pending(ReviewEdits::from_task(&pending)))
        .wrap_err("accept pending task")?;
    Ok(())
}

#[when(r#"the user drags "{title}" to the "{target}" quadrant"#)]
fn drag_to_quadrant(
    world: &mut ReviewWorld,
    title: String,
    target: String,
) -> Result<(), eyre::Report> {
    let task = world.task_titled(&title)?;
    run_async(
        world
            .collection
            .move_to_quadrant(task.id(), quadrant(&target)?),
    )
    .wrap_err("move task")?;
    Ok(())
}

#[when("the user quick-creates the same input")]
fn quick_create_same_input(world: &mut ReviewWorld) -> Result<(), eyre::Report> {
    let draft = world
        .last_draft
        .clone()
        .ok_or_else(|| eyre::eyre!("no earlier input in scenario world"))?;
    run_async(world.collection.quick_create(&draft)).wrap_err("quick create")?;
    Ok(())
}
