//! Dirty checks postponed past the current event.

use noty_core::identity::TabId;
use std::collections::VecDeque;

/// Queue of tabs whose changed status must be recomputed.
///
/// Entries carry no content. The check reads the buffer when it runs, so a
/// tab queued several times is checked once against its latest content.
#[derive(Debug, Clone, Default)]
pub struct DeferredChecks {
    queue: VecDeque<TabId>,
}

impl DeferredChecks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: TabId) {
        if !self.queue.contains(&id) {
            self.queue.push_back(id);
        }
    }

    pub fn remove(&mut self, id: TabId) {
        self.queue.retain(|queued| *queued != id);
    }

    pub fn drain(&mut self) -> Vec<TabId> {
        self.queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}
