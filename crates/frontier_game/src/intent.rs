//! Inbound intent buffering.
//!
//! Observer intents arrive asynchronously but apply synchronously: the queue
//! collects them between ticks and the tick loop drains it before running
//! the schedule, so intents never interleave with system execution.

use std::collections::VecDeque;

use frontier_net::Intent;

/// FIFO buffer of observer intents.
#[derive(Debug, Default)]
pub struct IntentQueue {
    queue: VecDeque<Intent>,
}

impl IntentQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues an intent.
    pub fn push(&mut self, intent: Intent) {
        self.queue.push_back(intent);
    }

    /// Drains all queued intents in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = Intent> + '_ {
        self.queue.drain(..)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
