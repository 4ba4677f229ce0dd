//! `web_sys::Storage` backed stores.
//!
//! SYSTEM CONTEXT
//! ==============
//! Handles come from `window.localStorage` / `window.sessionStorage`. The
//! facade wraps [`WebStore::open`] in a [`crate::LazyStore`], so a refused
//! store faults per call instead of blocking installation. Host exceptions
//! are converted into [`StorageError`] here so nothing JS-shaped leaks upward.

use wasm_bindgen::{JsCast, JsValue};

use crate::error::StorageError;
use crate::scope::StorageScope;
use crate::store::KeyValueStore;

const QUOTA_EXCEEDED: &str = "QuotaExceededError";

/// A [`KeyValueStore`] over one of the window's storage objects.
pub struct WebStore {
    scope: StorageScope,
    storage: web_sys::Storage,
}

impl WebStore {
    /// Resolve the store for `scope` from the current window.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when there is no window or the
    /// host refuses or lacks the store.
    pub fn open(scope: StorageScope) -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable { scope })?;
        let storage = match scope {
            StorageScope::Local => window.local_storage(),
            StorageScope::Session => window.session_storage(),
        };
        match storage {
            Ok(Some(storage)) => Ok(Self { scope, storage }),
            Ok(None) | Err(_) => Err(StorageError::Unavailable { scope }),
        }
    }

    fn fault(&self, key: Option<&str>, err: JsValue) -> StorageError {
        if let Some(dom) = err.dyn_ref::<web_sys::DomException>() {
            if dom.name() == QUOTA_EXCEEDED {
                return StorageError::QuotaExceeded {
                    scope: self.scope,
                    key: key.unwrap_or_default().to_owned(),
                };
            }
            return StorageError::Host {
                scope: self.scope,
                message: format!("{}: {}", dom.name(), dom.message()),
            };
        }
        let message = match err.dyn_ref::<js_sys::Error>() {
            Some(js_err) => String::from(js_err.message()),
            None => err.as_string().unwrap_or_else(|| format!("{err:?}")),
        };
        StorageError::Host {
            scope: self.scope,
            message,
        }
    }
}

impl KeyValueStore for WebStore {
    fn scope(&self) -> StorageScope {
        self.scope
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(|e| self.fault(Some(key), e))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| self.fault(Some(key), e))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| self.fault(Some(key), e))
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.storage.clear().map_err(|e| self.fault(None, e))
    }

    fn length(&self) -> Result<usize, StorageError> {
        let length = self.storage.length().map_err(|e| self.fault(None, e))?;
        Ok(length as usize)
    }
}
