//! Event sink that records everything it receives.

use std::sync::{Arc, Mutex, PoisonError};

use crate::task::ports::{BoardEvent, BoardSnapshot, TaskEventSink};

/// Recording event sink; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<BoardEvent>>>,
}

impl RecordingEventSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every event received so far.
    #[must_use]
    pub fn events(&self) -> Vec<BoardEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the most recent board snapshot, if any.
    #[must_use]
    pub fn last_snapshot(&self) -> Option<BoardSnapshot> {
        self.events().into_iter().rev().find_map(|event| match event {
            BoardEvent::Changed(snapshot) => Some(snapshot),
            _ => None,
        })
    }

    /// Forgets everything received so far.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl TaskEventSink for RecordingEventSink {
    fn emit(&self, event: BoardEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
