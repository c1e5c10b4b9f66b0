//! Project file loading
//!
//! One TOML file describes an app: shared defaults, named signing configs and
//! per-build-type overrides. [`ProjectFile::descriptor`] deterministically
//! turns it into the [`BuildDescriptor`] of one build type.
//!
//! ```toml
//! [app]
//! application_id = "com.rwa.pros"
//! version_code = 1
//! version_name = "1.0.0"
//!
//! [sdk]
//! min = 24
//! target = 36
//! compile = 36
//!
//! [signing.release]
//! store_file = "app/release.keystore"
//! key_alias = "upload"
//!
//! [build_types.release]
//! signing = "release"
//! minify = true
//! shrink_resources = true
//! ```

use crate::descriptor::{BuildDescriptor, DEFAULT_JAVA_VERSION, Dependency, Signing};
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name that always refers to the SDK debug keystore
pub const DEBUG_SIGNING: &str = "debug";

/// Parsed project file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectFile {
    pub app: AppSection,
    pub sdk: SdkSection,
    #[serde(default)]
    pub compile: CompileSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub signing: BTreeMap<String, SigningSection>,
    #[serde(default)]
    pub build_types: BTreeMap<String, BuildTypeSection>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    pub application_id: String,
    #[serde(default)]
    pub namespace: Option<String>,
    pub version_code: u32,
    pub version_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SdkSection {
    pub min: u32,
    pub target: u32,
    pub compile: u32,
    #[serde(default)]
    pub ndk: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompileSection {
    #[serde(default = "default_java_version")]
    pub java: u32,
    #[serde(default)]
    pub core_library_desugaring: bool,
    #[serde(default)]
    pub multidex: bool,
}

impl Default for CompileSection {
    fn default() -> Self {
        Self {
            java: default_java_version(),
            core_library_desugaring: false,
            multidex: false,
        }
    }
}

fn default_java_version() -> u32 {
    DEFAULT_JAVA_VERSION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,
    #[serde(default = "default_module")]
    pub module: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            build_dir: default_build_dir(),
            module: default_module(),
        }
    }
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_module() -> String {
    "app".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SigningSection {
    pub store_file: PathBuf,
    pub key_alias: String,
}

/// Overrides for one build type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildTypeSection {
    /// `debug` or the name of a `[signing.<name>]` table
    #[serde(default)]
    pub signing: Option<String>,
    #[serde(default)]
    pub minify: bool,
    #[serde(default)]
    pub shrink_resources: bool,
    #[serde(default)]
    pub proguard_files: Vec<String>,
    /// Appended to the application id, e.g. `.debug`
    #[serde(default)]
    pub application_id_suffix: Option<String>,
    /// Appended to the version name, e.g. `-beta`
    #[serde(default)]
    pub version_name_suffix: Option<String>,
}

impl FromStr for ProjectFile {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse(text, "<inline>")
    }
}

impl ProjectFile {
    /// Parse project TOML, `origin` names the source in errors
    pub fn parse(text: &str, origin: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Read and parse a project file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let project = Self::parse(&text, &path.display().to_string())?;
        tracing::debug!(
            path = %path.display(),
            build_types = project.build_types().len(),
            "Loaded project file"
        );
        Ok(project)
    }

    /// All build types in name order; `debug` and `release` always exist
    pub fn build_types(&self) -> Vec<String> {
        let mut names: Vec<String> = self.build_types.keys().cloned().collect();
        for implicit in ["debug", "release"] {
            if !self.build_types.contains_key(implicit) {
                names.push(implicit.to_string());
            }
        }
        names.sort();
        names
    }

    /// Settings of a build type, with implicit defaults for `debug` and `release`
    ///
    /// An undeclared `release` signs with `[signing.release]` when present and
    /// falls back to the debug key otherwise.
    fn build_type_section(&self, build_type: &str) -> Option<BuildTypeSection> {
        if let Some(section) = self.build_types.get(build_type) {
            return Some(section.clone());
        }
        match build_type {
            "debug" => Some(BuildTypeSection::default()),
            "release" => Some(BuildTypeSection {
                signing: self
                    .signing
                    .contains_key("release")
                    .then(|| "release".to_string()),
                ..BuildTypeSection::default()
            }),
            _ => None,
        }
    }

    fn signing_for(&self, build_type: &str, name: Option<&str>) -> Result<Signing> {
        let name = match name {
            None | Some(DEBUG_SIGNING) => return Ok(Signing::Debug),
            Some(name) => name,
        };

        let section = self
            .signing
            .get(name)
            .ok_or_else(|| ConfigError::MissingSigningMaterial {
                field: format!("build_types.{build_type}.signing"),
                reason: format!("signing config {name:?} is not declared"),
            })?;

        Ok(Signing::ReleaseKeystore {
            store_file: section.store_file.clone(),
            key_alias: section.key_alias.clone(),
        })
    }

    /// Build the descriptor of one build type
    pub fn descriptor(&self, build_type: &str) -> Result<BuildDescriptor> {
        let section =
            self.build_type_section(build_type)
                .ok_or_else(|| ConfigError::UnknownBuildType {
                    build_type: build_type.to_string(),
                    available: self.build_types(),
                })?;

        let signing = self.signing_for(build_type, section.signing.as_deref())?;

        let application_id = match &section.application_id_suffix {
            Some(suffix) => format!("{}{}", self.app.application_id, suffix),
            None => self.app.application_id.clone(),
        };
        let version_name = match &section.version_name_suffix {
            Some(suffix) => format!("{}{}", self.app.version_name, suffix),
            None => self.app.version_name.clone(),
        };

        Ok(BuildDescriptor {
            build_type: build_type.to_string(),
            application_id,
            // the namespace keeps the unsuffixed id so R classes do not move
            namespace: Some(
                self.app
                    .namespace
                    .clone()
                    .unwrap_or_else(|| self.app.application_id.clone()),
            ),
            min_sdk: self.sdk.min,
            target_sdk: self.sdk.target,
            compile_sdk: self.sdk.compile,
            ndk_version: self.sdk.ndk.clone(),
            version_code: self.app.version_code,
            version_name,
            signing,
            minify: section.minify,
            shrink_resources: section.shrink_resources,
            proguard_files: section.proguard_files,
            java_version: self.compile.java,
            multidex: self.compile.multidex,
            core_library_desugaring: self.compile.core_library_desugaring,
            build_dir: self.output.build_dir.clone(),
            module: self.output.module.clone(),
            dependencies: self.dependencies.clone(),
        })
    }
}
