//! Adapter implementations for task ports.

pub mod configured;
pub mod events;
pub mod json_file;
pub mod memory;
pub mod postgres;
pub mod prompt;

pub use configured::{ConfiguredTaskRepository, StoreOpenError, open_repository};
pub use events::{BroadcastEventSink, NoopEventSink};
pub use json_file::JsonFileTaskRepository;
pub use prompt::{PromptClassifier, parse_answer};
