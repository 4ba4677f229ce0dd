//! Once-per-thread installation of the facade.
//!
//! The browser runs this code on a single thread and the store handles are
//! `!Send`, so "process-wide" means thread-local here. The first `install`
//! wins; later calls hand back the same instance without touching it.

use std::cell::OnceCell;
use std::rc::Rc;

use tracing::debug;

use crate::facade::BrowserStorage;

thread_local! {
    static INSTALLED: OnceCell<Rc<BrowserStorage>> = const { OnceCell::new() };
}

/// Install the facade built by `factory`, unless one is already installed.
///
/// `factory` runs only on the first call. Every call returns the installed
/// instance. `factory` must not call `install` itself.
pub fn install<F>(factory: F) -> Rc<BrowserStorage>
where
    F: FnOnce() -> BrowserStorage,
{
    INSTALLED.with(|cell| {
        let mut built = false;
        let storage = cell.get_or_init(|| {
            built = true;
            Rc::new(factory())
        });
        if built {
            debug!("installed browser storage");
        } else {
            debug!("browser storage already installed");
        }
        Rc::clone(storage)
    })
}

/// The installed facade, if any.
#[must_use]
pub fn installed() -> Option<Rc<BrowserStorage>> {
    INSTALLED.with(|cell| cell.get().cloned())
}

/// Install a facade over the window's stores, configured from the environment.
///
/// Always succeeds. A store the host refuses faults on its own calls.
#[cfg(feature = "hydrate")]
pub fn install_from_window() -> Rc<BrowserStorage> {
    install(|| BrowserStorage::from_window(&crate::StorageConfig::from_env()))
}

#[cfg(test)]
#[path = "install_test.rs"]
mod tests;
