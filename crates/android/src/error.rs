use droidplan_core::error::{Error as CoreError, ErrorCode};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Why a descriptor could not be turned into a build plan
///
/// Every variant names the offending field. None of them is transient.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "Invalid SDK range at {field}: requires 1 <= min_sdk ({min_sdk}) <= target_sdk ({target_sdk}) <= compile_sdk ({compile_sdk})"
    )]
    InvalidSdkRange {
        field: String,
        min_sdk: u32,
        target_sdk: u32,
        compile_sdk: u32,
    },

    #[error("Invalid identifier at {field}: {value:?}")]
    InvalidIdentifier { field: String, value: String },

    #[error("Missing signing material at {field}: {reason}")]
    MissingSigningMaterial { field: String, reason: String },

    #[error("Dependency conflict on {name}: {first} vs {second}")]
    DependencyConflict {
        name: String,
        first: String,
        second: String,
    },

    #[error("Invalid version at {field}: {reason}")]
    InvalidVersion { field: String, reason: String },

    #[error("Invalid build type {build_type} at {field}: {reason}")]
    InvalidBuildType {
        build_type: String,
        field: String,
        reason: String,
    },

    #[error("Dependency {name} has no version and no platform manages it")]
    UnpinnedDependency { name: String },

    #[error("Unknown build type {build_type} (available: {})", .available.join(", "))]
    UnknownBuildType {
        build_type: String,
        available: Vec<String>,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },
}

impl ConfigError {
    /// The descriptor field the error is about
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidSdkRange { field, .. }
            | Self::InvalidIdentifier { field, .. }
            | Self::MissingSigningMaterial { field, .. }
            | Self::InvalidVersion { field, .. }
            | Self::InvalidBuildType { field, .. } => field.as_str(),
            Self::DependencyConflict { name, .. } | Self::UnpinnedDependency { name } => name.as_str(),
            Self::UnknownBuildType { .. } => "build_type",
            Self::Parse { path, .. } | Self::Io { path, .. } => path.as_str(),
        }
    }

    /// Matching code in the shared error table
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidSdkRange { .. } => ErrorCode::InvalidSdkRange,
            Self::InvalidIdentifier { .. } => ErrorCode::InvalidIdentifier,
            Self::MissingSigningMaterial { .. } => ErrorCode::MissingSigningMaterial,
            Self::DependencyConflict { .. } => ErrorCode::DependencyConflict,
            Self::InvalidVersion { .. } => ErrorCode::InvalidVersion,
            Self::InvalidBuildType { .. } => ErrorCode::InvalidBuildType,
            Self::UnpinnedDependency { .. } => ErrorCode::UnpinnedDependency,
            Self::UnknownBuildType { .. } => ErrorCode::UnknownBuildType,
            Self::Parse { .. } => ErrorCode::ConfigParseError,
            Self::Io { .. } => ErrorCode::IoError,
        }
    }

    fn suggestion(&self) -> Option<&'static str> {
        let hint = match self {
            Self::InvalidSdkRange { .. } => "Keep min_sdk <= target_sdk <= compile_sdk in [sdk]",
            Self::InvalidIdentifier { .. } => {
                "Use a reverse-DNS identifier such as com.example.app"
            }
            Self::MissingSigningMaterial { .. } => {
                "Check the keystore path and provide passwords via keystore.properties or DROIDPLAN_<ALIAS>_STORE_PASSWORD"
            }
            Self::DependencyConflict { .. } => "Declare each dependency once with a single version",
            Self::UnpinnedDependency { .. } => {
                "Add a version or a platform (BoM) dependency of the same group"
            }
            Self::InvalidBuildType { field, .. } if field == "build_type" => {
                "Rename the build type in lowerCamelCase, e.g. stagingQa"
            }
            Self::InvalidBuildType { .. } => "Enable minify when shrink_resources is on",
            Self::UnknownBuildType { .. } => "Run `droidplan variants` to list build types",
            Self::InvalidVersion { .. } | Self::Parse { .. } | Self::Io { .. } => return None,
        };
        Some(hint)
    }
}

impl From<ConfigError> for CoreError {
    fn from(err: ConfigError) -> Self {
        let mut error = CoreError::new(err.code(), err.to_string())
            .with_context(format!("field: {}", err.field()));
        if let Some(hint) = err.suggestion() {
            error = error.with_suggestion(hint);
        }
        error.with_source(err)
    }
}
