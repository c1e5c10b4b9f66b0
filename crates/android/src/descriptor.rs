//! Declarative build descriptor
//!
//! A [`BuildDescriptor`] describes one build type of an Android application:
//! identity, SDK levels, version, signing source, shrinking flags and the
//! dependency set. It is built once per invocation, usually by
//! [`ProjectFile::descriptor`](crate::project::ProjectFile::descriptor), and
//! turned into a [`BuildPlan`](crate::plan::BuildPlan) by the resolver.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// JVM target of freshly generated app modules
pub const DEFAULT_JAVA_VERSION: u32 = 17;

/// Where the signing key of a build type comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Signing {
    /// The Android SDK debug keystore
    Debug,
    /// A release keystore on disk, credentials looked up by key alias
    ReleaseKeystore {
        store_file: PathBuf,
        key_alias: String,
    },
}

impl Signing {
    /// Release keystore signing
    pub fn release(store_file: impl Into<PathBuf>, key_alias: impl Into<String>) -> Self {
        Self::ReleaseKeystore {
            store_file: store_file.into(),
            key_alias: key_alias.into(),
        }
    }
}

/// Gradle configuration a dependency is declared in
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// `implementation("group:artifact:version")`
    #[default]
    Implementation,
    /// `implementation(platform("group:bom:version"))`, pins versions of its group
    Platform,
    /// `coreLibraryDesugaring("group:artifact:version")`
    CoreLibraryDesugaring,
}

impl DependencyKind {
    /// Gradle configuration name
    pub fn configuration(self) -> &'static str {
        match self {
            Self::Implementation | Self::Platform => "implementation",
            Self::CoreLibraryDesugaring => "coreLibraryDesugaring",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Implementation => "implementation",
            Self::Platform => "platform",
            Self::CoreLibraryDesugaring => "core_library_desugaring",
        };
        f.write_str(name)
    }
}

/// A Maven dependency, `name` is `group:artifact`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    /// `None` means the version is managed by a platform dependency
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub kind: DependencyKind,
}

impl Dependency {
    /// Pinned implementation dependency
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
            kind: DependencyKind::Implementation,
        }
    }

    /// Implementation dependency whose version comes from a platform
    pub fn managed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            kind: DependencyKind::Implementation,
        }
    }

    /// Platform (BoM) dependency
    pub fn platform(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
            kind: DependencyKind::Platform,
        }
    }

    /// Core library desugaring dependency
    pub fn desugaring(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
            kind: DependencyKind::CoreLibraryDesugaring,
        }
    }

    /// Maven group, the part of the name before `:`
    pub fn group(&self) -> &str {
        self.name.split(':').next().unwrap_or_default()
    }

    /// Whether `name` has the `group:artifact` shape
    pub fn has_valid_coordinates(&self) -> bool {
        let mut parts = self.name.split(':');
        matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(group), Some(artifact), None)
                if !group.trim().is_empty() && !artifact.trim().is_empty()
        )
    }

    pub(crate) fn describe(&self) -> String {
        let version = self.version.as_deref().unwrap_or("<managed>");
        if self.kind == DependencyKind::Implementation {
            version.to_string()
        } else {
            format!("{} {}", self.kind, version)
        }
    }
}

/// Declarative input of one build type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDescriptor {
    /// Build type name (`debug`, `release`, ...)
    pub build_type: String,
    pub application_id: String,
    /// Kotlin/R class namespace, defaults to the application id
    pub namespace: Option<String>,
    pub min_sdk: u32,
    pub target_sdk: u32,
    pub compile_sdk: u32,
    pub ndk_version: Option<String>,
    pub version_code: u32,
    pub version_name: String,
    pub signing: Signing,
    pub minify: bool,
    pub shrink_resources: bool,
    pub proguard_files: Vec<String>,
    pub java_version: u32,
    pub multidex: bool,
    pub core_library_desugaring: bool,
    /// Root of the redirected build output, relative to the project
    pub build_dir: PathBuf,
    /// Gradle module whose output lands in `build_dir/<module>`
    pub module: String,
    pub dependencies: Vec<Dependency>,
}

impl BuildDescriptor {
    /// A debug-signed descriptor with the given identity and SDK levels
    ///
    /// Every other field takes the defaults of a freshly generated app module.
    pub fn new(application_id: impl Into<String>, min_sdk: u32, target_sdk: u32, compile_sdk: u32) -> Self {
        Self {
            build_type: "debug".to_string(),
            application_id: application_id.into(),
            namespace: None,
            min_sdk,
            target_sdk,
            compile_sdk,
            ndk_version: None,
            version_code: 1,
            version_name: "1.0".to_string(),
            signing: Signing::Debug,
            minify: false,
            shrink_resources: false,
            proguard_files: Vec::new(),
            java_version: DEFAULT_JAVA_VERSION,
            multidex: false,
            core_library_desugaring: false,
            build_dir: PathBuf::from("build"),
            module: "app".to_string(),
            dependencies: Vec::new(),
        }
    }
}
