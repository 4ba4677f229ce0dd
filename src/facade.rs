//! The storage facade.
//!
//! DESIGN
//! ======
//! `BrowserStorage` holds one injected handle per scope and forwards each
//! call to the handle selected by [`StorageScope`]. Handles are checked
//! against their slot on construction. Window-backed handles resolve lazily,
//! so building the facade itself never fails. Every operation comes in
//! two flavours: `try_*` returns the raw [`StorageError`], and the plain name
//! is total, logging the fault and returning `false` / `None`.
//!
//! ERROR HANDLING
//! ==============
//! Callers are remote, server-driven UI code with no local recovery path, so
//! the total operations degrade silently. The `tracing` event carries the
//! operation, scope and key (and value for writes) for diagnosis.

use std::rc::Rc;

use tracing::error;

use crate::config::StorageConfig;
use crate::error::StorageError;
use crate::lazy::LazyStore;
use crate::memory::MemoryStore;
use crate::scope::StorageScope;
use crate::scoped::ScopedStorage;
use crate::store::KeyValueStore;

/// Non-failing facade over the local and session stores.
pub struct BrowserStorage {
    local: Box<dyn KeyValueStore>,
    session: Box<dyn KeyValueStore>,
    log_values: bool,
}

impl BrowserStorage {
    /// Build a facade over injected store handles.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ScopeMismatch`] when a handle's own scope does
    /// not match the slot it is passed in.
    pub fn new(
        local: Box<dyn KeyValueStore>,
        session: Box<dyn KeyValueStore>,
        config: &StorageConfig,
    ) -> Result<Self, StorageError> {
        for (expected, store) in [(StorageScope::Local, &local), (StorageScope::Session, &session)] {
            if store.scope() != expected {
                return Err(StorageError::ScopeMismatch {
                    expected,
                    found: store.scope(),
                });
            }
        }
        Ok(Self {
            local,
            session,
            log_values: config.log_values,
        })
    }

    /// Build a facade over two fresh [`MemoryStore`]s sized by `config`.
    #[must_use]
    pub fn in_memory(config: &StorageConfig) -> Self {
        let store = |scope| match config.memory_quota_bytes {
            Some(quota) => MemoryStore::with_quota(scope, quota),
            None => MemoryStore::new(scope),
        };
        Self {
            local: Box::new(store(StorageScope::Local)),
            session: Box::new(store(StorageScope::Session)),
            log_values: config.log_values,
        }
    }

    /// Build a facade whose stores are resolved through `resolve` on first use.
    ///
    /// Never fails: a scope the resolver refuses faults on its own calls and
    /// leaves the other scope usable.
    #[must_use]
    pub fn lazy<S, F>(config: &StorageConfig, resolve: F) -> Self
    where
        S: KeyValueStore + 'static,
        F: Fn(StorageScope) -> Result<S, StorageError> + Clone + 'static,
    {
        Self {
            local: Box::new(LazyStore::new(StorageScope::Local, resolve.clone())),
            session: Box::new(LazyStore::new(StorageScope::Session, resolve)),
            log_values: config.log_values,
        }
    }

    /// Build a facade over the current window's two stores.
    #[cfg(feature = "hydrate")]
    #[must_use]
    pub fn from_window(config: &StorageConfig) -> Self {
        Self::lazy(config, crate::web::WebStore::open)
    }

    fn store(&self, scope: StorageScope) -> &dyn KeyValueStore {
        match scope {
            StorageScope::Local => self.local.as_ref(),
            StorageScope::Session => self.session.as_ref(),
        }
    }

    // =========================================================================
    // SCOPED VIEWS
    // =========================================================================

    /// View bound to `scope`.
    #[must_use]
    pub fn scope(self: &Rc<Self>, scope: StorageScope) -> ScopedStorage {
        ScopedStorage::new(Rc::clone(self), scope)
    }

    /// View bound to local storage.
    #[must_use]
    pub fn local(self: &Rc<Self>) -> ScopedStorage {
        self.scope(StorageScope::Local)
    }

    /// View bound to session storage.
    #[must_use]
    pub fn session(self: &Rc<Self>) -> ScopedStorage {
        self.scope(StorageScope::Session)
    }

    /// View for a host location name such as `"localStorage"`.
    ///
    /// Unknown names are logged and yield `None`; they never reach a store.
    #[must_use]
    pub fn named(self: &Rc<Self>, location: &str) -> Option<ScopedStorage> {
        match location.parse::<StorageScope>() {
            Ok(scope) => Some(self.scope(scope)),
            Err(e) => {
                error!(location, error = %e, "failed to resolve storage location");
                None
            }
        }
    }

    // =========================================================================
    // FALLIBLE OPERATIONS
    // =========================================================================

    /// Write `value` under `key`, or remove `key` when `value` is `None`.
    ///
    /// # Errors
    ///
    /// Propagates the store's [`StorageError`].
    pub fn try_set_item(
        &self,
        scope: StorageScope,
        key: &str,
        value: Option<&str>,
    ) -> Result<(), StorageError> {
        let store = self.store(scope);
        match value {
            Some(value) => store.set_item(key, value),
            None => store.remove_item(key),
        }
    }

    /// Read `key`.
    ///
    /// # Errors
    ///
    /// Propagates the store's [`StorageError`].
    pub fn try_get_item(&self, scope: StorageScope, key: &str) -> Result<Option<String>, StorageError> {
        self.store(scope).get_item(key)
    }

    /// Whether `key` holds a value.
    ///
    /// # Errors
    ///
    /// Propagates the store's [`StorageError`].
    pub fn try_contains_key(&self, scope: StorageScope, key: &str) -> Result<bool, StorageError> {
        Ok(self.store(scope).get_item(key)?.is_some())
    }

    /// Delete `key` if present.
    ///
    /// # Errors
    ///
    /// Propagates the store's [`StorageError`].
    pub fn try_remove_item(&self, scope: StorageScope, key: &str) -> Result<(), StorageError> {
        self.store(scope).remove_item(key)
    }

    /// Delete every key in `scope`.
    ///
    /// # Errors
    ///
    /// Propagates the store's [`StorageError`].
    pub fn try_clear(&self, scope: StorageScope) -> Result<(), StorageError> {
        self.store(scope).clear()
    }

    /// Number of keys in `scope`.
    ///
    /// # Errors
    ///
    /// Propagates the store's [`StorageError`].
    pub fn try_len(&self, scope: StorageScope) -> Result<usize, StorageError> {
        self.store(scope).length()
    }

    // =========================================================================
    // TOTAL OPERATIONS
    // =========================================================================

    /// Write `value` under `key`; `None` removes the key. Returns `false` on fault.
    pub fn set_item(&self, scope: StorageScope, key: &str, value: Option<&str>) -> bool {
        match self.try_set_item(scope, key, value) {
            Ok(()) => true,
            Err(e) => {
                if self.log_values {
                    error!(op = "set_item", %scope, key, value, error = %e, "failed to set storage value");
                } else {
                    let value_len = value.map(str::len);
                    error!(op = "set_item", %scope, key, value_len, error = %e, "failed to set storage value");
                }
                false
            }
        }
    }

    /// Value for `key`, or `None` when absent or on fault.
    pub fn get_item(&self, scope: StorageScope, key: &str) -> Option<String> {
        match self.try_get_item(scope, key) {
            Ok(value) => value,
            Err(e) => {
                error!(op = "get_item", %scope, key, error = %e, "failed to get storage value");
                None
            }
        }
    }

    /// Whether `key` holds a value. Returns `false` on fault.
    pub fn contains_key(&self, scope: StorageScope, key: &str) -> bool {
        match self.try_contains_key(scope, key) {
            Ok(found) => found,
            Err(e) => {
                error!(op = "contains_key", %scope, key, error = %e, "failed to check storage key");
                false
            }
        }
    }

    /// Delete `key`. Absent keys succeed. Returns `false` on fault.
    pub fn remove_item(&self, scope: StorageScope, key: &str) -> bool {
        match self.try_remove_item(scope, key) {
            Ok(()) => true,
            Err(e) => {
                error!(op = "remove_item", %scope, key, error = %e, "failed to remove storage value");
                false
            }
        }
    }

    /// Delete every key in `scope`. Returns `false` on fault.
    pub fn clear(&self, scope: StorageScope) -> bool {
        match self.try_clear(scope) {
            Ok(()) => true,
            Err(e) => {
                error!(op = "clear", %scope, error = %e, "failed to clear storage");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "facade_test.rs"]
mod tests;
