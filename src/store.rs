//! Store handle abstraction.
//!
//! Host storage objects are shared handles mutated through `&self`, so the
//! trait mirrors that shape. The facade never owns the data; it only forwards.

use std::rc::Rc;

use crate::error::StorageError;
use crate::scope::StorageScope;

/// A host-provided key-value store for one [`StorageScope`].
pub trait KeyValueStore {
    /// Scope this handle serves. The facade refuses handles wired to the wrong slot.
    fn scope(&self) -> StorageScope;

    /// Value for `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write or overwrite `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::QuotaExceeded`] when the write does not fit,
    /// or another [`StorageError`] when the store cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Absent keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the store cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Delete every key.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the store cannot be written.
    fn clear(&self) -> Result<(), StorageError>;

    /// Number of stored keys, as the host's `Storage.length`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the store cannot be read.
    fn length(&self) -> Result<usize, StorageError>;
}

/// Shared handles forward to the inner store, so a caller can keep a handle
/// to a store it has injected.
impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn scope(&self) -> StorageScope {
        (**self).scope()
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }

    fn length(&self) -> Result<usize, StorageError> {
        (**self).length()
    }
}
