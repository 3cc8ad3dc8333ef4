//! Port contracts for task prioritization.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod classifier;
pub mod completion;
pub mod confirmation;
pub mod events;
pub mod repository;

pub use classifier::{ClassificationRequest, Classifier, ClassifierError, ClassifierResult};
pub use completion::{CompletionBackend, CompletionError};
pub use confirmation::{
    AlwaysConfirm, Confirmation, ConfirmationMessageError, ConfirmationRequest, NeverConfirm,
};
pub use events::{BoardEvent, BoardSnapshot, TaskEventSink};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
