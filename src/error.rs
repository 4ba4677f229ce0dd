//! Storage fault taxonomy.
//!
//! Every fault a store can raise lands in [`StorageError`]. The facade never
//! hands these to its total operations' callers; they are logged and mapped
//! to `false` / `None`. The `try_*` operations expose them unchanged.

use crate::scope::StorageScope;

/// Error returned by [`crate::KeyValueStore`] methods and the facade's `try_*` operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// A location name that does not match either host store.
    #[error("unknown storage location '{0}'")]
    UnknownScope(String),
    /// The host store is disabled or missing (restricted browsing context, no window).
    #[error("storage '{scope}' is unavailable")]
    Unavailable { scope: StorageScope },
    /// Writing `key` would exceed the store's quota.
    #[error("quota exceeded writing key '{key}' to storage '{scope}'")]
    QuotaExceeded { scope: StorageScope, key: String },
    /// Any other host-level access fault.
    #[error("storage '{scope}' fault: {message}")]
    Host { scope: StorageScope, message: String },
    /// A store handle was wired to a slot for a different scope.
    #[error("store for '{found}' supplied where '{expected}' was expected")]
    ScopeMismatch {
        expected: StorageScope,
        found: StorageScope,
    },
}
