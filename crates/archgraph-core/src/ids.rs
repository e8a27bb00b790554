//! # Identifier Allocator
//!
//! One index of every id held by any component, group or edge.
//!
//! The store consults this index for both allocation and duplicate checks,
//! so the three collections can never disagree about which ids are taken.

use crate::StoreError;
use crate::primitives::{ID_ALPHABET, ID_LENGTH, MAX_ID_ATTEMPTS};
use std::collections::BTreeMap;

/// Shared identifier namespace.
///
/// Holds a reference count per id: a document loaded from disk may contain
/// duplicates, and deleting one holder must not free the id for the other.
#[derive(Debug, Clone, Default)]
pub struct IdIndex {
    holders: BTreeMap<String, usize>,
}

impl IdIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any entity holds `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.holders.contains_key(id)
    }

    /// Number of distinct ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holders.len()
    }

    /// True when no id is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }

    /// Record `id` unconditionally. Used when loading a document as-is.
    pub fn track(&mut self, id: &str) {
        let count = self.holders.entry(id.to_string()).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Take `id` for a new entity. Fails if it is already held.
    pub fn claim(&mut self, id: &str) -> Result<(), StoreError> {
        if self.contains(id) {
            return Err(StoreError::DuplicateId(id.to_string()));
        }
        self.holders.insert(id.to_string(), 1);
        Ok(())
    }

    /// Drop one holder of `id`.
    pub fn release(&mut self, id: &str) {
        if let Some(count) = self.holders.get_mut(id) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.holders.remove(id);
            }
        }
    }

    /// Forget every id.
    pub fn clear(&mut self) {
        self.holders.clear();
    }

    /// Generate an id that no entity currently holds.
    ///
    /// The id is not claimed; the caller claims it once the entity is stored.
    pub fn allocate(&self) -> Result<String, StoreError> {
        self.allocate_with(|| nanoid::nanoid!(ID_LENGTH, &ID_ALPHABET))
    }

    /// Same as [`allocate`](Self::allocate) with a caller-supplied candidate source.
    pub fn allocate_with(
        &self,
        mut generate: impl FnMut() -> String,
    ) -> Result<String, StoreError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = generate();
            if !self.contains(&candidate) {
                return Ok(candidate);
            }
        }
        Err(StoreError::IdSpaceExhausted(MAX_ID_ATTEMPTS))
    }
}

// =============================================================================
// TESTS
// =============================================================================
