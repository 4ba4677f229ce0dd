//! Store handles resolved on first use.
//!
//! The host may refuse one store (sandboxed iframe, storage disabled) while
//! the other works. Resolving at call time keeps that refusal inside the
//! calls that touch the refused store. A successful resolution is cached;
//! a failed one is retried on the next call.

use std::cell::OnceCell;

use crate::error::StorageError;
use crate::scope::StorageScope;
use crate::store::KeyValueStore;

type Resolver<S> = Box<dyn Fn(StorageScope) -> Result<S, StorageError>>;

/// A [`KeyValueStore`] that resolves its inner handle on demand.
pub struct LazyStore<S> {
    scope: StorageScope,
    resolve: Resolver<S>,
    handle: OnceCell<S>,
}

impl<S: KeyValueStore> LazyStore<S> {
    /// Wrap `resolve`, which produces the handle for `scope` when first needed.
    pub fn new<F>(scope: StorageScope, resolve: F) -> Self
    where
        F: Fn(StorageScope) -> Result<S, StorageError> + 'static,
    {
        Self {
            scope,
            resolve: Box::new(resolve),
            handle: OnceCell::new(),
        }
    }

    fn handle(&self) -> Result<&S, StorageError> {
        if let Some(handle) = self.handle.get() {
            return Ok(handle);
        }
        let handle = (self.resolve)(self.scope)?;
        if handle.scope() != self.scope {
            return Err(StorageError::ScopeMismatch {
                expected: self.scope,
                found: handle.scope(),
            });
        }
        Ok(self.handle.get_or_init(|| handle))
    }
}

impl<S: KeyValueStore> KeyValueStore for LazyStore<S> {
    fn scope(&self) -> StorageScope {
        self.scope
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.handle()?.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.handle()?.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.handle()?.remove_item(key)
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.handle()?.clear()
    }

    fn length(&self) -> Result<usize, StorageError> {
        self.handle()?.length()
    }
}

#[cfg(test)]
#[path = "lazy_test.rs"]
mod tests;
