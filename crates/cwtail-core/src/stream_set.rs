//! Shared set of stream names currently believed to match a target's
//! prefix.
//!
//! The set is replaced wholesale on every refresh, never edited in
//! place: readers always observe either the pre- or post-refresh
//! generation in full. Length is bounded by the directory's 100-stream
//! cap before it ever reaches this type.

use std::sync::Mutex;

/// Stream names shared between one refresher task and one poll loop.
#[derive(Debug, Default)]
pub struct StreamSet {
    names: Mutex<Vec<String>>,
}

impl StreamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole set with a fresh generation.
    pub fn replace(&self, names: Vec<String>) {
        let mut guard = self.names.lock().expect("stream set lock poisoned");
        *guard = names;
    }

    /// Snapshot of the current generation.
    pub fn get(&self) -> Vec<String> {
        let guard = self.names.lock().expect("stream set lock poisoned");
        guard.clone()
    }

    pub fn len(&self) -> usize {
        let guard = self.names.lock().expect("stream set lock poisoned");
        guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
