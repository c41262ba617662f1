//! Store location configuration.
//!
//! # Responsibility
//! - Resolve where the records store file lives.
//! - Keep environment lookup at the edge; the store itself only sees a value.
//!
//! # Invariants
//! - A resolved config always carries a non-empty path.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable consulted by `StoreConfig::from_env`.
pub const DATABASE_PATH_ENV: &str = "DATABASE_PATH";
/// Location used when `DATABASE_PATH` is unset or blank.
pub const DEFAULT_DB_PATH: &str = "/data/test_users.db";

/// Explicit location of one records store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads `DATABASE_PATH` from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var_os(DATABASE_PATH_ENV))
    }

    /// Builds a config from a raw environment value.
    ///
    /// Unset, empty and whitespace-only values fall back to `DEFAULT_DB_PATH`.
    pub fn from_env_value(value: Option<OsString>) -> Self {
        match value {
            Some(raw) if !raw.to_string_lossy().trim().is_empty() => Self::new(raw),
            _ => Self::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreConfig, DEFAULT_DB_PATH};
    use std::ffi::OsString;
    use std::path::Path;

    #[test]
    fn unset_or_blank_env_value_uses_default() {
        assert_eq!(StoreConfig::from_env_value(None).path(), Path::new(DEFAULT_DB_PATH));
        assert_eq!(
            StoreConfig::from_env_value(Some(OsString::from("   "))).path(),
            Path::new(DEFAULT_DB_PATH)
        );
    }

    #[test]
    fn env_value_overrides_default() {
        let config = StoreConfig::from_env_value(Some(OsString::from("/tmp/records.db")));
        assert_eq!(config.path(), Path::new("/tmp/records.db"));
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = StoreConfig::new("/srv/users.db");
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"path":"/srv/users.db"}"#);
        let parsed: StoreConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
