//! Transient ordered list for records that are never persisted.

use crate::store::medicine_store::{StoreError, StoreResult};

/// In-memory ordered collection with index-checked removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordList<T> {
    items: Vec<T>,
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> RecordList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `item` and returns its index.
    pub fn push(&mut self, item: T) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    pub fn remove_at(&mut self, index: usize) -> StoreResult<T> {
        let len = self.items.len();
        if index >= len {
            return Err(StoreError::OutOfRange { index, len });
        }
        Ok(self.items.remove(index))
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
