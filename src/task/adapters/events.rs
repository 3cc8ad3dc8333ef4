//! Event sinks for wiring the board to a presentation layer.

use tokio::sync::broadcast;
use tracing::trace;

use crate::task::ports::{BoardEvent, TaskEventSink};

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl TaskEventSink for NoopEventSink {
    fn emit(&self, _event: BoardEvent) {}
}

/// Sink that fans events out over a Tokio broadcast channel.
///
/// Subscribers that fall behind lose the oldest events; each
/// [`BoardEvent::Changed`] carries the whole board, so a lagging subscriber
/// recovers on the next one.
#[derive(Debug, Clone)]
pub struct BroadcastEventSink {
    sender: broadcast::Sender<BoardEvent>,
}

impl BroadcastEventSink {
    /// Creates a sink buffering up to `capacity` events per subscriber.
    ///
    /// A zero capacity is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Returns a new receiver for subsequent events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.sender.subscribe()
    }
}

impl TaskEventSink for BroadcastEventSink {
    fn emit(&self, event: BoardEvent) {
        if self.sender.send(event).is_err() {
            trace!("board event dropped; no subscribers");
        }
    }
}
