//! `keystore.properties` parsing
//!
//! Android projects conventionally keep release signing passwords out of the
//! build scripts in a Java properties file:
//!
//! ```text
//! storeFile=app/release.keystore
//! storePassword=...
//! keyAlias=upload
//! keyPassword=...
//! ```

use crate::error::{ConfigError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Parsed signing properties
#[derive(Clone, Default, PartialEq, Eq)]
pub struct KeystoreProperties {
    entries: BTreeMap<String, String>,
}

impl KeystoreProperties {
    /// Parse the subset of the Java properties format used by keystore files
    ///
    /// Supports `key=value` and `key: value`, `#` and `!` comment lines, and
    /// trims whitespace around keys and values. Later keys override earlier ones.
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
            .filter_map(|line| {
                let split = line.find(['=', ':'])?;
                let (key, value) = line.split_at(split);
                Some((key.trim().to_string(), value[1..].trim().to_string()))
            })
            .collect();

        Self { entries }
    }

    /// Read and parse a properties file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::parse(&text))
    }

    /// Raw property lookup
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn store_file(&self) -> Option<PathBuf> {
        self.get("storeFile").map(PathBuf::from)
    }

    pub fn store_password(&self) -> Option<&str> {
        self.get("storePassword")
    }

    pub fn key_alias(&self) -> Option<&str> {
        self.get("keyAlias")
    }

    pub fn key_password(&self) -> Option<&str> {
        self.get("keyPassword")
    }
}

impl fmt::Debug for KeystoreProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeystoreProperties")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
