//! The two host persistence scopes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Which host key-value store an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageScope {
    /// Survives across browsing sessions and restarts.
    #[serde(rename = "localStorage")]
    Local,
    /// Lives for the current browsing session / tab.
    #[serde(rename = "sessionStorage")]
    Session,
}

impl StorageScope {
    /// Both scopes, local first.
    pub const ALL: [Self; 2] = [Self::Local, Self::Session];

    /// Name of the store on the host `window` object.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "localStorage",
            Self::Session => "sessionStorage",
        }
    }
}

impl fmt::Display for StorageScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageScope {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "localStorage" | "local" => Ok(Self::Local),
            "sessionStorage" | "session" => Ok(Self::Session),
            other => Err(StorageError::UnknownScope(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[path = "scope_test.rs"]
mod tests;
