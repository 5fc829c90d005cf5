//! Tab identity allocation.

use crate::error::{NotyError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Process-unique identifier of a tab.
///
/// Also names the tab's saved-content side file, so it is persisted as a bare
/// integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(u64);

impl TabId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues tab identifiers and tracks which ones are taken.
///
/// Identifiers are never handed out twice within a process: the counter only
/// moves forward, including past identifiers restored from a session.
#[derive(Debug, Default)]
pub struct IdRegistry {
    next: u64,
    taken: BTreeSet<TabId>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh identifier, greater than any allocated or registered so far.
    ///
    /// # Errors
    ///
    /// Returns `NotyError::Validation` once the identifier space is used up.
    pub fn allocate(&mut self) -> Result<TabId> {
        let next = successor(self.next)?;
        let id = TabId(self.next);
        self.next = next;
        self.taken.insert(id);
        Ok(id)
    }

    /// Records an externally supplied identifier (e.g. from a restored session).
    ///
    /// # Errors
    ///
    /// - `NotyError::DuplicateTabId` if the identifier is held by a live tab
    /// - `NotyError::Validation` if the identifier leaves no room for new ones
    pub fn register(&mut self, id: TabId) -> Result<()> {
        if self.taken.contains(&id) {
            return Err(NotyError::DuplicateTabId(id.get()));
        }

        if id.get() >= self.next {
            self.next = successor(id.get())?;
        }

        self.taken.insert(id);
        Ok(())
    }

    /// Frees `id` for uniqueness checks. The counter is not rewound.
    pub fn release(&mut self, id: TabId) {
        self.taken.remove(&id);
    }

    pub fn is_taken(&self, id: TabId) -> bool {
        self.taken.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}

fn successor(value: u64) -> Result<u64> {
    value
        .checked_add(1)
        .ok_or_else(|| NotyError::validation(format!("tab id {} is out of range", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_is_unique_and_ascending() {
        let mut registry = IdRegistry::new();
        let ids: Vec<TabId> = (0..50).map(|_| registry.allocate().unwrap()).collect();

        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(registry.len(), 50);
    }

    #[test]
    fn test_register_advances_counter() {
        let mut registry = IdRegistry::new();
        registry.register(TabId::new(41)).unwrap();

        let next = registry.allocate().unwrap();
        assert_eq!(next, TabId::new(42));
        assert!(registry.is_taken(TabId::new(41)));
    }

    #[test]
    fn test_register_below_counter_keeps_counter() {
        let mut registry = IdRegistry::new();
        for _ in 0..5 {
            registry.allocate().unwrap();
        }
        registry.release(TabId::new(2));
        registry.register(TabId::new(2)).unwrap();

        assert_eq!(registry.allocate().unwrap(), TabId::new(5));
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut registry = IdRegistry::new();
        let id = registry.allocate().unwrap();

        let err = registry.register(id).unwrap_err();
        assert_eq!(err, NotyError::DuplicateTabId(id.get()));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_release_does_not_recycle() {
        let mut registry = IdRegistry::new();
        let first = registry.allocate().unwrap();
        registry.release(first);

        assert_ne!(registry.allocate().unwrap(), first);
        assert!(!registry.is_taken(first));
    }

    #[test]
    fn test_registered_id_never_allocated() {
        let mut registry = IdRegistry::new();
        let external = TabId::new(7);
        registry.register(external).unwrap();

        for _ in 0..20 {
            assert_ne!(registry.allocate().unwrap(), external);
        }
    }

    #[test]
    fn test_register_max_id_is_rejected() {
        let mut registry = IdRegistry::new();

        let err = registry.register(TabId::new(u64::MAX)).unwrap_err();
        assert!(err.is_validation());
        assert!(!err.is_fatal());
        assert!(!registry.is_taken(TabId::new(u64::MAX)));
        assert_eq!(registry.allocate().unwrap(), TabId::new(0));
    }

    #[test]
    fn test_allocate_stops_at_end_of_id_space() {
        let mut registry = IdRegistry::new();
        registry.register(TabId::new(u64::MAX - 1)).unwrap();

        let err = registry.allocate().unwrap_err();
        assert!(err.is_validation());
        assert!(!registry.is_taken(TabId::new(u64::MAX)));
    }
}
