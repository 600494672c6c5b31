//! Cyclic collection of per-target scheduling handles.
//!
//! Implemented as a dense array of live entries plus a cursor index
//! rather than a linked circular structure, so that removal under a
//! running scheduler cannot skip or repeat a neighboring entry: removing
//! an entry before the cursor shifts the cursor down with the elements,
//! removing the entry at the cursor leaves the cursor pointing at its
//! successor.

/// Ordered cyclic ring of scheduling handles, keyed by caller-assigned
/// ids. Entries are only ever removed after construction, never added.
#[derive(Debug)]
pub struct Ring<T> {
    entries: Vec<(u64, T)>,
    cursor: usize,
}

impl<T> Ring<T> {
    pub fn new(entries: Vec<(u64, T)>) -> Self {
        Self { entries, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current entry and its id, advancing the cursor to the next live
    /// entry. Returns `None` once the ring is empty.
    pub fn advance(&mut self) -> Option<(u64, &T)> {
        if self.entries.is_empty() {
            return None;
        }
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.entries.len();
        let (id, value) = &self.entries[index];
        Some((*id, value))
    }

    /// Unlink the entry with the given id, preserving the relative
    /// cyclic order of all remaining entries. Returns the removed value
    /// so the caller can close it.
    pub fn remove(&mut self, id: u64) -> Option<T> {
        let index = self.entries.iter().position(|(entry_id, _)| *entry_id == id)?;
        let (_, value) = self.entries.remove(index);
        if index < self.cursor {
            self.cursor -= 1;
        }
        if self.cursor >= self.entries.len() {
            self.cursor = 0;
        }
        Some(value)
    }
}
