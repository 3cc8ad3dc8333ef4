//! Port for a text-completion model used behind prompt-based classification.

use async_trait::async_trait;
use thiserror::Error;

/// Text completion contract: prompt in, raw model answer out.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Sends a prompt and returns the model's raw text answer.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] when the backend cannot be reached or
    /// refuses the request.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Transport-level completion failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("completion backend failed: {0}")]
pub struct CompletionError(pub String);
