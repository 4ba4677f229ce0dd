//! Defensive facade over the browser's local and session key-value stores.
//!
//! SYSTEM CONTEXT
//! ==============
//! Server-driven UI code persists small bits of client state across page
//! loads through [`BrowserStorage`]. Every operation is total: store faults
//! are logged through `tracing` and surface as `false` / `None`.
//!
//! Stores are injected behind [`KeyValueStore`]. [`MemoryStore`] serves tests
//! and native builds; with the `hydrate` feature, `WebStore` wraps the
//! window's `web_sys::Storage` objects, resolved per scope by [`LazyStore`].

pub mod config;
pub mod error;
pub mod facade;
pub mod install;
pub mod lazy;
pub mod memory;
pub mod scope;
pub mod scoped;
pub mod store;
#[cfg(feature = "hydrate")]
pub mod web;

pub use config::StorageConfig;
pub use error::StorageError;
pub use facade::BrowserStorage;
#[cfg(feature = "hydrate")]
pub use install::install_from_window;
pub use install::{install, installed};
pub use lazy::LazyStore;
pub use memory::MemoryStore;
pub use scope::StorageScope;
pub use scoped::ScopedStorage;
pub use store::KeyValueStore;
#[cfg(feature = "hydrate")]
pub use web::WebStore;
