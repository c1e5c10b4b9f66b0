//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path, or from a standard location, or use defaults
    ///
    /// An explicitly given path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Directory that relative paths in the configuration are resolved against
    pub fn base_dir(&self) -> PathBuf {
        self.path
            .as_ref()
            .and_then(|p| p.parent())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [
        ".droidplan.toml",
        ".config/droidplan.toml",
        "android/.droidplan.toml",
    ];

    candidates
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {}", path.display()))?;

    toml::from_str(&content).map_err(|e| {
        Error::new(
            ErrorCode::ConfigParseError,
            format!("Failed to parse config file {}: {}", path.display(), e),
        )
        .with_source(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.general.project_file, "droidplan.toml");
        assert_eq!(config.schema.general.default_build_type, "debug");
        assert_eq!(config.schema.signing.credential_env_prefix, "DROIDPLAN");
        assert_eq!(config.base_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_config_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".droidplan.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[general]\nproject_file = \"app.toml\"\n\n[signing]\nkeystore_properties = \"keystore.properties\"\n\n[logging]\nlevel = \"debug\"\njson = true"
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.schema.general.project_file, "app.toml");
        assert_eq!(config.schema.general.default_build_type, "debug");
        assert_eq!(
            config.schema.signing.keystore_properties.as_deref(),
            Some("keystore.properties")
        );
        assert!(config.schema.logging.json);
        assert_eq!(config.base_dir(), dir.path());
    }

    #[test]
    fn test_config_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/.droidplan.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_config_rejects_unknown_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".droidplan.toml");
        std::fs::write(&path, "[hooks]\nenabled = true\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }
}
