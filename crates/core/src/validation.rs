//! Configuration and input validation
//!
//! Identifier rules shared by every Android descriptor, plus a fluent
//! validator that collects non-blocking warnings.
//!
//! # Example
//!
//! ```rust
//! use droidplan_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .warn_if("target_sdk", "TARGET_BELOW_COMPILE", 34 < 36, "target_sdk is below compile_sdk")
//!     .validate();
//!
//! assert!(!result.is_clean());
//! assert!(result.to_result(false).is_ok());
//! ```

use crate::error::{Error, ErrorCode, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Java package segments: letter first, then letters, digits or underscores
static REVERSE_DNS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$")
        .expect("reverse-DNS pattern is valid")
});

/// lowerCamelCase, the shape Gradle task names are built from
static BUILD_TYPE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][A-Za-z0-9]*$").expect("build type pattern is valid"));

/// Check that `value` is a dot-separated reverse-DNS identifier with at least two segments
pub fn is_reverse_dns(value: &str) -> bool {
    REVERSE_DNS.is_match(value)
}

/// Check that `value` is a lowerCamelCase build type name such as `release` or `stagingQa`
pub fn is_build_type_name(value: &str) -> bool {
    BUILD_TYPE_NAME.is_match(value)
}

/// A non-blocking finding about one field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Field the warning is about
    pub field: String,
    /// Stable machine-readable code, e.g. `DEBUG_SIGNED_RELEASE`
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed without any warning
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Get all warnings
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert to Result type
    ///
    /// Warnings only fail with `strict`.
    pub fn to_result(self, strict: bool) -> Result<()> {
        if !strict || self.warnings.is_empty() {
            return Ok(());
        }

        let failing: Vec<String> = self.warnings.iter().map(ToString::to_string).collect();
        Err(Error::new(
            ErrorCode::ValidationError,
            format!("Validation failed: {}", failing.join("; ")),
        ))
    }
}

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    /// Add a warning when `condition` holds
    #[must_use]
    pub fn warn_if(mut self, field: &str, code: &str, condition: bool, message: &str) -> Self {
        if condition {
            self.result.add_warning(ValidationWarning {
                field: field.to_string(),
                code: code.to_string(),
                message: message.to_string(),
            });
        }
        self
    }

    /// Complete validation and return result
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}
