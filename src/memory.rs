//! In-memory store for tests and non-browser builds.
//!
//! DESIGN
//! ======
//! Keys live in a `BTreeMap` behind a `RefCell`, matching the host's
//! shared-handle semantics. Usage is tracked the way browsers account it:
//! UTF-16 bytes of every key plus its value.
//!
//! FAULT INJECTION
//! ===============
//! `set_available(false)` makes every call fail with `Unavailable`, and a byte
//! quota makes oversized writes fail with `QuotaExceeded`. A failed write
//! leaves the store untouched.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::error::StorageError;
use crate::scope::StorageScope;
use crate::store::KeyValueStore;

/// A [`KeyValueStore`] held entirely in memory.
#[derive(Debug)]
pub struct MemoryStore {
    scope: StorageScope,
    entries: RefCell<BTreeMap<String, String>>,
    used_bytes: Cell<usize>,
    quota_bytes: Option<usize>,
    available: Cell<bool>,
}

impl MemoryStore {
    /// An empty, always-available store without a quota.
    #[must_use]
    pub fn new(scope: StorageScope) -> Self {
        Self {
            scope,
            entries: RefCell::new(BTreeMap::new()),
            used_bytes: Cell::new(0),
            quota_bytes: None,
            available: Cell::new(true),
        }
    }

    /// An empty store that rejects writes past `quota_bytes`.
    #[must_use]
    pub fn with_quota(scope: StorageScope, quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::new(scope)
        }
    }

    /// Toggle availability. An unavailable store faults on every call.
    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    /// Bytes currently accounted against the quota.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.used_bytes.get()
    }

    fn ensure_available(&self) -> Result<(), StorageError> {
        if self.available.get() {
            Ok(())
        } else {
            Err(StorageError::Unavailable { scope: self.scope })
        }
    }
}

/// Bytes a key/value pair occupies, counted in UTF-16 code units.
fn entry_bytes(key: &str, value: &str) -> usize {
    (key.encode_utf16().count() + value.encode_utf16().count()) * 2
}

impl KeyValueStore for MemoryStore {
    fn scope(&self) -> StorageScope {
        self.scope
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.ensure_available()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_available()?;
        let mut entries = self.entries.borrow_mut();
        let freed = entries.get(key).map_or(0, |old| entry_bytes(key, old));
        let next = self.used_bytes.get() - freed + entry_bytes(key, value);
        if let Some(quota) = self.quota_bytes {
            if next > quota {
                return Err(StorageError::QuotaExceeded {
                    scope: self.scope,
                    key: key.to_owned(),
                });
            }
        }
        entries.insert(key.to_owned(), value.to_owned());
        self.used_bytes.set(next);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.ensure_available()?;
        if let Some(old) = self.entries.borrow_mut().remove(key) {
            self.used_bytes.set(self.used_bytes.get() - entry_bytes(key, &old));
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.ensure_available()?;
        self.entries.borrow_mut().clear();
        self.used_bytes.set(0);
        Ok(())
    }

    fn length(&self) -> Result<usize, StorageError> {
        self.ensure_available()?;
        Ok(self.entries.borrow().len())
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
