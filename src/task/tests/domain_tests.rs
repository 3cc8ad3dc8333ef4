//! Unit tests for task value types, drafts, and persistence records.

use crate::task::domain::{
    DueDate, Level, ParseLevelError, PersistedTaskData, SelfAssessment, Task, TaskDomainError,
    TaskDraft, TaskPatch, TaskStatus, TaskTitle, UNASSESSED_JUSTIFICATION,
};
use chrono::{Duration, NaiveDate};
use eyre::ensure;
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};

use super::support::{accepted_task, draft, due};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[rstest]
#[case("Pay rent", "Pay rent")]
#[case("  Pay rent\t", "Pay rent")]
fn title_is_trimmed(#[case] raw: &str, #[case] expected: &str) {
    let title = TaskTitle::new(raw).expect("title should be valid");
    assert_eq!(title.as_str(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_title_is_rejected(#[case] raw: &str) {
    assert_eq!(TaskTitle::new(raw), Err(TaskDomainError::EmptyTitle));
}

#[rstest]
fn draft_without_title_fails_validation() {
    let result = TaskDraft::new(" ").due(due()).validate();
    assert_eq!(result, Err(TaskDomainError::EmptyTitle));
}

#[rstest]
fn draft_without_due_date_fails_validation() {
    let result = TaskDraft::new("Pay rent").validate();
    assert_eq!(result, Err(TaskDomainError::MissingDueDate));
}

#[rstest]
fn draft_keeps_optional_self_assessment_unset() {
    let fields = draft("Pay rent")
        .with_urgency(Level::High)
        .validate()
        .expect("draft should validate");
    assert_eq!(
        fields.self_assessment,
        SelfAssessment::new(Some(Level::High), None)
    );
}

#[rstest]
fn due_date_on_calendar_day_is_midnight_utc() {
    let day = NaiveDate::from_ymd_opt(2030, 1, 15).expect("valid calendar date");
    let due_date = DueDate::on(day);
    assert_eq!(due_date.date(), day);
    assert_eq!(due_date.to_string(), "2030-01-15T00:00:00+00:00");
}

#[rstest]
fn relative_due_date_counts_from_clock(clock: DefaultClock) {
    let before = clock.utc();
    let due_date = DueDate::in_days(3, &clock).expect("three days ahead is in range");
    let after = clock.utc();
    assert!(due_date.timestamp() >= before + Duration::days(3));
    assert!(due_date.timestamp() <= after + Duration::days(3));
}

#[rstest]
fn relative_due_date_beyond_calendar_is_rejected(clock: DefaultClock) {
    assert_eq!(
        DueDate::in_days(u32::MAX, &clock),
        Err(TaskDomainError::DueDateOutOfRange { days: u32::MAX })
    );
}

#[rstest]
#[case("low", Level::Low)]
#[case("Medium", Level::Medium)]
#[case(" HIGH ", Level::High)]
fn level_parses_case_insensitively(#[case] raw: &str, #[case] expected: Level) {
    assert_eq!(Level::try_from(raw), Ok(expected));
}

#[rstest]
fn unknown_level_is_rejected() {
    assert_eq!(
        Level::try_from("Critical"),
        Err(ParseLevelError("Critical".to_owned()))
    );
}

#[rstest]
fn quick_create_places_task_with_sentinel_justification(clock: DefaultClock) -> eyre::Result<()> {
    let fields = draft("Pay rent").validate()?;
    let task = Task::quick_create(fields, &clock);

    ensure!(task.status() == TaskStatus::Accepted, "quick create should accept");
    ensure!(!task.justification().is_empty(), "justification must be set");
    ensure!(
        task.justification() == UNASSESSED_JUSTIFICATION,
        "unexpected justification {}",
        task.justification()
    );
    ensure!(
        task.assessment().urgency == Level::Low && task.assessment().importance == Level::Low,
        "missing self-assessment should default to Low"
    );
    ensure!(
        task.self_assessment() == SelfAssessment::unassessed(),
        "self-assessment must stay unset"
    );
    Ok(())
}

#[rstest]
fn persisted_record_round_trips() {
    let task = accepted_task("Pay rent", Level::High, Level::Medium);
    let restored = Task::from_persisted(task.to_persisted()).expect("record should decode");
    assert_eq!(restored, task);
}

#[rstest]
fn persisted_record_uses_camel_case_and_explicit_nulls() {
    let task = Task::quick_create(
        draft("Pay rent").validate().expect("draft should validate"),
        &DefaultClock,
    );
    let json = serde_json::to_value(task.to_persisted()).expect("record should serialise");

    assert_eq!(json["userUrgency"], serde_json::Value::Null);
    assert_eq!(json["aiUrgency"], "Low");
    assert_eq!(json["status"], "Accepted");
    assert!(json.get("completeBy").is_some());
}

#[rstest]
fn board_record_without_placement_is_rejected() {
    let task = accepted_task("Pay rent", Level::High, Level::High);
    let record = PersistedTaskData {
        ai_importance: None,
        ..task.to_persisted()
    };
    assert_eq!(
        Task::from_persisted(record),
        Err(TaskDomainError::MissingAssessment {
            task_id: task.id(),
            status: TaskStatus::Accepted,
        })
    );
}

#[rstest]
fn record_without_justification_gets_sentinel() {
    let task = accepted_task("Pay rent", Level::Low, Level::High);
    let record = PersistedTaskData {
        justification: None,
        ..task.to_persisted()
    };
    let restored = Task::from_persisted(record).expect("record should decode");
    assert_eq!(restored.justification(), UNASSESSED_JUSTIFICATION);
}

#[rstest]
fn patch_updates_fields_but_not_status_or_placement() {
    let mut task = accepted_task("Pay rent", Level::High, Level::High);
    let original = task.clone();
    let patch = TaskPatch::new()
        .with_title("Pay March rent")
        .with_description("Transfer before the 1st")
        .with_self_assessment(SelfAssessment::unassessed());

    task.apply_patch(patch).expect("patch should apply");

    assert_eq!(task.title().as_str(), "Pay March rent");
    assert_eq!(task.description(), "Transfer before the 1st");
    assert_eq!(task.self_assessment(), SelfAssessment::unassessed());
    assert_eq!(task.status(), original.status());
    assert_eq!(task.assessment(), original.assessment());
    assert_eq!(task.created_at(), original.created_at());
}

#[rstest]
fn patch_with_blank_title_changes_nothing() {
    let mut task = accepted_task("Pay rent", Level::High, Level::High);
    let original = task.clone();
    let patch = TaskPatch::new()
        .with_title("  ")
        .with_description("should not land");

    assert_eq!(task.apply_patch(patch), Err(TaskDomainError::EmptyTitle));
    assert_eq!(task, original);
}

#[rstest]
fn empty_patch_is_detected() {
    assert!(TaskPatch::new().is_empty());
    assert!(!TaskPatch::new().with_complete_by(due()).is_empty());
}
