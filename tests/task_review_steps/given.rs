//! Given steps for task review BDD scenarios.

use super::world::{ReviewWorld, level};
use tasq::task::domain::Classification;
use rstest_bdd_macros::given;

#[given("an empty board")]
fn empty_board(world: &mut ReviewWorld) {
    *world = ReviewWorld::new();
}

#[given(r#"the classifier will answer urgency "{urgency}" and importance "{importance}""#)]
fn classifier_answers(
    world: &mut ReviewWorld,
    urgency: String,
    importance: String,
) -> Result<(), eyre::Report> {
    world.classifier.push(Ok(Classification::new(
        level(&urgency)?,
        level(&importance)?,
        "Scripted classification for the scenario.",
    )));
    Ok(())
}

#[given("the classifier will fail")]
fn classifier_fails(world: &mut ReviewWorld) {
    world.classifier.push(Err(tasq::task::ports::ClassifierError::new(
        "classifier unavailable",
    )));
}
