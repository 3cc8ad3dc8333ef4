//! Shared builders for task unit tests.

use chrono::NaiveDate;
use mockable::DefaultClock;

use crate::task::domain::{DueDate, Level, Task, TaskDraft};

pub(super) fn due() -> DueDate {
    DueDate::on(NaiveDate::from_ymd_opt(2030, 1, 15).expect("valid calendar date"))
}

pub(super) fn draft(title: &str) -> TaskDraft {
    TaskDraft::new(title).due(due())
}

pub(super) fn accepted_task(title: &str, urgency: Level, importance: Level) -> Task {
    let fields = draft(title)
        .with_urgency(urgency)
        .with_importance(importance)
        .validate()
        .expect("draft should validate");
    Task::quick_create(fields, &DefaultClock)
}
