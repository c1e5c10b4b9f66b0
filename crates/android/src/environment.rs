//! Read-only view of the machine a build is resolved on
//!
//! The resolver asks about files and about the signing material registered
//! for a key alias. [`FsEnvironment`] answers from the project directory, an
//! optional `keystore.properties` file and environment variables;
//! [`StaticEnvironment`] answers from memory.

use crate::keystore::KeystoreProperties;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default prefix of credential environment variables
pub const DEFAULT_ENV_PREFIX: &str = "DROIDPLAN";

/// A value that must never show up in logs or output
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The actual value, for handing to the build toolchain
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("***")
    }
}

/// Passwords protecting a keystore and one of its keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub store_password: Secret,
    pub key_password: Secret,
}

impl Credentials {
    pub fn new(store_password: impl Into<String>, key_password: impl Into<String>) -> Self {
        Self {
            store_password: Secret::new(store_password),
            key_password: Secret::new(key_password),
        }
    }
}

/// Queries the resolver is allowed to make
pub trait Environment {
    /// Whether a regular file exists at `path`
    fn file_exists(&self, path: &Path) -> bool;

    /// Credentials registered for a key alias
    fn credentials(&self, alias: &str) -> Option<Credentials>;

    /// Keystore registered for a key alias, overriding the descriptor's path
    fn store_file(&self, _alias: &str) -> Option<PathBuf> {
        None
    }

    /// Concrete location of a path named in a descriptor
    fn locate(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn file_exists(&self, path: &Path) -> bool {
        (**self).file_exists(path)
    }

    fn credentials(&self, alias: &str) -> Option<Credentials> {
        (**self).credentials(alias)
    }

    fn store_file(&self, alias: &str) -> Option<PathBuf> {
        (**self).store_file(alias)
    }

    fn locate(&self, path: &Path) -> PathBuf {
        (**self).locate(path)
    }
}

/// In-memory environment
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    files: BTreeSet<PathBuf>,
    credentials: BTreeMap<String, Credentials>,
}

impl StaticEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file as existing
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into());
        self
    }

    /// Register credentials for an alias
    #[must_use]
    pub fn with_credentials(mut self, alias: impl Into<String>, credentials: Credentials) -> Self {
        self.credentials.insert(alias.into(), credentials);
        self
    }
}

impl Environment for StaticEnvironment {
    fn file_exists(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    fn credentials(&self, alias: &str) -> Option<Credentials> {
        self.credentials.get(alias).cloned()
    }
}

/// Environment backed by the filesystem and process environment
///
/// Relative paths are resolved against `root`. Credentials are taken from
/// the keystore properties when their `keyAlias` matches, otherwise from
/// `<PREFIX>_<ALIAS>_STORE_PASSWORD` and `<PREFIX>_<ALIAS>_KEY_PASSWORD`.
/// A missing key password falls back to the store password. A `storeFile`
/// in matching properties replaces the descriptor's keystore path.
#[derive(Clone)]
pub struct FsEnvironment {
    root: PathBuf,
    properties: Option<KeystoreProperties>,
    env_prefix: String,
    vars: BTreeMap<String, String>,
}

impl FsEnvironment {
    /// Snapshot the process environment for a project rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_vars(root, std::env::vars())
    }

    /// Use the given variables instead of the process environment
    pub fn with_vars(
        root: impl Into<PathBuf>,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            root: root.into(),
            properties: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            vars: vars.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn with_keystore_properties(mut self, properties: KeystoreProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn var_name(&self, alias: &str, suffix: &str) -> String {
        let alias: String = alias
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}_{}_{}", self.env_prefix, alias, suffix)
    }

    /// Keystore properties whose `keyAlias` is `alias`
    fn properties_for(&self, alias: &str) -> Option<&KeystoreProperties> {
        self.properties
            .as_ref()
            .filter(|props| props.key_alias() == Some(alias))
    }

    fn from_properties(&self, alias: &str) -> Option<Credentials> {
        let props = self.properties_for(alias)?;
        let store_password = props.store_password()?;
        let key_password = props.key_password().unwrap_or(store_password);
        Some(Credentials::new(store_password, key_password))
    }

    fn from_vars(&self, alias: &str) -> Option<Credentials> {
        let store_password = self.vars.get(&self.var_name(alias, "STORE_PASSWORD"))?;
        let key_password = self
            .vars
            .get(&self.var_name(alias, "KEY_PASSWORD"))
            .unwrap_or(store_password);
        Some(Credentials::new(store_password.as_str(), key_password.as_str()))
    }
}

impl fmt::Debug for FsEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsEnvironment")
            .field("root", &self.root)
            .field("properties", &self.properties)
            .field("env_prefix", &self.env_prefix)
            .field("vars", &self.vars.len())
            .finish()
    }
}

impl Environment for FsEnvironment {
    fn file_exists(&self, path: &Path) -> bool {
        self.locate(path).is_file()
    }

    fn credentials(&self, alias: &str) -> Option<Credentials> {
        let found = self.from_properties(alias).or_else(|| self.from_vars(alias));
        tracing::debug!(alias, found = found.is_some(), "Credential lookup");
        found
    }

    fn store_file(&self, alias: &str) -> Option<PathBuf> {
        self.properties_for(alias)?.store_file()
    }

    fn locate(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
