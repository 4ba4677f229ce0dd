//! Environment-driven tuning.
//!
//! Browsers have no process environment, so under wasm every lookup misses
//! and the defaults apply. Native builds and tests can override them.

/// Roughly what browsers grant each origin per store.
const DEFAULT_MEMORY_QUOTA_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_LOG_VALUES: bool = true;

/// Facade configuration, loaded from environment variables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    /// Byte quota for in-memory stores. `None` disables quota checks.
    pub memory_quota_bytes: Option<usize>,
    /// Include written values in `set_item` fault logs. When off, only the length is logged.
    pub log_values: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            memory_quota_bytes: Some(DEFAULT_MEMORY_QUOTA_BYTES),
            log_values: DEFAULT_LOG_VALUES,
        }
    }
}

impl StorageConfig {
    /// Read `BROWSER_STORAGE_MEMORY_QUOTA_BYTES` (0 = unlimited) and
    /// `BROWSER_STORAGE_LOG_VALUES`.
    #[must_use]
    pub fn from_env() -> Self {
        let quota = env_parse("BROWSER_STORAGE_MEMORY_QUOTA_BYTES", DEFAULT_MEMORY_QUOTA_BYTES);
        Self {
            memory_quota_bytes: (quota > 0).then_some(quota),
            log_values: env_parse("BROWSER_STORAGE_LOG_VALUES", DEFAULT_LOG_VALUES),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
