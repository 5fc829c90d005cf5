//! Debounced autosave handle.
//!
//! One timer for the whole workspace: every content update pushes the
//! deadline back by the configured delay. Tabs updated within the window are
//! remembered so that a single expiry saves all of them.

use noty_core::identity::TabId;
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct AutosaveTimer {
    delay: Duration,
    deadline: Option<Instant>,
    pending: BTreeSet<TabId>,
}

impl AutosaveTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            pending: BTreeSet::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Changes the debounce window. A pending deadline is left as scheduled.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Cancels the pending deadline and reschedules it `delay` after `now`.
    pub fn schedule(&mut self, id: TabId, now: Instant) {
        self.pending.insert(id);
        self.deadline = Some(now + self.delay);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self, id: TabId) -> bool {
        self.pending.contains(&id)
    }

    pub fn is_idle(&self) -> bool {
        self.deadline.is_none()
    }

    /// Drops `id` from the pending set, disarming the timer if nothing is left.
    pub fn forget(&mut self, id: TabId) {
        self.pending.remove(&id);
        if self.pending.is_empty() {
            self.deadline = None;
        }
    }

    /// Tabs to save if the deadline has passed at `now`; disarms the timer.
    pub fn take_due(&mut self, now: Instant) -> Vec<TabId> {
        match self.deadline {
            Some(deadline) if deadline <= now => self.take_all(),
            _ => Vec::new(),
        }
    }

    /// Tabs to save right away, regardless of the deadline; disarms the timer.
    pub fn take_all(&mut self) -> Vec<TabId> {
        self.deadline = None;
        std::mem::take(&mut self.pending).into_iter().collect()
    }
}
