//! A facade view pinned to one scope.
//!
//! Callers that only ever touch one store hold a `ScopedStorage` instead of
//! passing a [`StorageScope`] on every call.

use std::rc::Rc;

use crate::error::StorageError;
use crate::facade::BrowserStorage;
use crate::scope::StorageScope;

/// The five facade operations bound to a single [`StorageScope`].
#[derive(Clone)]
pub struct ScopedStorage {
    storage: Rc<BrowserStorage>,
    scope: StorageScope,
}

impl ScopedStorage {
    pub(crate) fn new(storage: Rc<BrowserStorage>, scope: StorageScope) -> Self {
        Self { storage, scope }
    }

    /// Scope this view targets.
    #[must_use]
    pub fn location(&self) -> StorageScope {
        self.scope
    }

    /// See [`BrowserStorage::set_item`].
    pub fn set_item(&self, key: &str, value: Option<&str>) -> bool {
        self.storage.set_item(self.scope, key, value)
    }

    /// See [`BrowserStorage::get_item`].
    #[must_use]
    pub fn get_item(&self, key: &str) -> Option<String> {
        self.storage.get_item(self.scope, key)
    }

    /// See [`BrowserStorage::contains_key`].
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.storage.contains_key(self.scope, key)
    }

    /// See [`BrowserStorage::remove_item`].
    pub fn remove_item(&self, key: &str) -> bool {
        self.storage.remove_item(self.scope, key)
    }

    /// See [`BrowserStorage::clear`].
    pub fn clear(&self) -> bool {
        self.storage.clear(self.scope)
    }

    /// See [`BrowserStorage::try_len`].
    ///
    /// # Errors
    ///
    /// Propagates the store's [`StorageError`].
    pub fn try_len(&self) -> Result<usize, StorageError> {
        self.storage.try_len(self.scope)
    }
}

#[cfg(test)]
#[path = "scoped_test.rs"]
mod tests;
