//! In-memory adapters for tests and ephemeral sessions.

mod classifier;
mod events;
mod task;

pub use classifier::{ScriptedClassifier, SelfAssessmentClassifier};
pub use events::RecordingEventSink;
pub use task::InMemoryTaskRepository;
