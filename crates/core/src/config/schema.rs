//! Configuration schema definitions
//!
//! Tool settings read from `.droidplan.toml`. The Android project itself is
//! described by a separate project file, see `droidplan-android`.

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigSchema {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub signing: SigningConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// General project configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// Path of the project file describing the Android app
    #[serde(default = "default_project_file")]
    pub project_file: String,

    /// Build type used when none is given on the command line
    #[serde(default = "default_build_type")]
    pub default_build_type: String,

    /// Directory containing the Gradle wrapper
    #[serde(default = "default_gradle_dir")]
    pub gradle_dir: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            project_file: default_project_file(),
            default_build_type: default_build_type(),
            gradle_dir: default_gradle_dir(),
        }
    }
}

fn default_project_file() -> String {
    "droidplan.toml".to_string()
}

fn default_build_type() -> String {
    "debug".to_string()
}

fn default_gradle_dir() -> String {
    "android".to_string()
}

/// Where signing credentials come from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SigningConfig {
    /// Optional `keystore.properties` file holding passwords by alias
    #[serde(default)]
    pub keystore_properties: Option<String>,

    /// Prefix of credential environment variables
    /// (`<PREFIX>_<ALIAS>_STORE_PASSWORD`, `<PREFIX>_<ALIAS>_KEY_PASSWORD`)
    #[serde(default = "default_credential_env_prefix")]
    pub credential_env_prefix: String,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            keystore_properties: None,
            credential_env_prefix: default_credential_env_prefix(),
        }
    }
}

fn default_credential_env_prefix() -> String {
    "DROIDPLAN".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
