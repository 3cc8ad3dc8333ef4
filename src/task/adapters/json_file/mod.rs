//! JSON file adapter for board persistence.
//!
//! The board is kept as a single JSON array of [`PersistedTaskData`] records
//! in insertion order. Every write replaces the file atomically: the new
//! contents go to a sibling temporary file which is synced and then renamed
//! over the original, so a crash leaves either the old or the new board.
//!
//! [`PersistedTaskData`]: crate::task::domain::PersistedTaskData

mod repository;

pub use repository::{JsonFileTaskRepository, TASKS_FILE};
