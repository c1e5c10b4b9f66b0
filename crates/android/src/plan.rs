//! Resolved build plan
//!
//! A [`BuildPlan`] mirrors a [`BuildDescriptor`](crate::descriptor::BuildDescriptor)
//! with every reference resolved: the namespace is concrete, signing carries
//! verified credentials, dependency versions are pinned or tied to a named
//! platform, and the output directory is an actual path. Plans are immutable
//! once produced.

use crate::descriptor::DependencyKind;
use crate::environment::Secret;
use serde::Serialize;
use std::path::PathBuf;

/// Kind of artifact a Gradle task produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Installable APK (`assemble<BuildType>`)
    Apk,
    /// Play Store bundle (`bundle<BuildType>`)
    Bundle,
}

impl ArtifactKind {
    fn task_verb(self) -> &'static str {
        match self {
            Self::Apk => "assemble",
            Self::Bundle => "bundle",
        }
    }
}

/// Signing with every credential resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ResolvedSigning {
    Debug,
    Release {
        store_file: PathBuf,
        key_alias: String,
        store_password: Secret,
        key_password: Secret,
    },
}

/// Where a dependency's version comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "source")]
pub enum ResolvedVersion {
    Pinned { version: String },
    Managed { platform: String, version: String },
}

impl ResolvedVersion {
    /// Version string in effect
    pub fn version(&self) -> &str {
        match self {
            Self::Pinned { version } | Self::Managed { version, .. } => version.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDependency {
    pub name: String,
    pub kind: DependencyKind,
    pub version: ResolvedVersion,
}

impl ResolvedDependency {
    /// Gradle Kotlin DSL declaration of this dependency
    ///
    /// Managed dependencies omit the version, the platform supplies it.
    pub fn gradle_notation(&self) -> String {
        let coordinates = match &self.version {
            ResolvedVersion::Pinned { version } => format!("{}:{}", self.name, version),
            ResolvedVersion::Managed { .. } => self.name.clone(),
        };
        match self.kind {
            DependencyKind::Platform => {
                format!("{}(platform(\"{}\"))", self.kind.configuration(), coordinates)
            }
            _ => format!("{}(\"{}\")", self.kind.configuration(), coordinates),
        }
    }
}

/// Validated, concrete build plan for one build type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    pub build_type: String,
    pub application_id: String,
    pub namespace: String,
    pub min_sdk: u32,
    pub target_sdk: u32,
    pub compile_sdk: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ndk_version: Option<String>,
    pub version_code: u32,
    pub version_name: String,
    pub signing: ResolvedSigning,
    pub minify: bool,
    pub shrink_resources: bool,
    pub proguard_files: Vec<String>,
    pub java_version: u32,
    pub multidex: bool,
    pub core_library_desugaring: bool,
    /// Output directory of the module, `<build_dir>/<module>`
    pub build_dir: PathBuf,
    /// Sorted by name, unique by name
    pub dependencies: Vec<ResolvedDependency>,
}

impl BuildPlan {
    /// Gradle task producing the artifact for this build type
    pub fn gradle_task(&self, kind: ArtifactKind) -> String {
        let mut chars = self.build_type.chars();
        let capitalized: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        format!("{}{}", kind.task_verb(), capitalized)
    }

    /// Whether the artifact is signed with a release keystore
    pub fn is_release_signed(&self) -> bool {
        matches!(self.signing, ResolvedSigning::Release { .. })
    }

    /// Plan values as Gradle project properties
    ///
    /// Returned as `ORG_GRADLE_PROJECT_*` environment variables so passwords
    /// never appear on a command line. Build scripts read them with
    /// `providers.gradleProperty("droidplanVersionCode")` and friends.
    pub fn gradle_properties(&self) -> Vec<(String, String)> {
        let mut props = vec![
            ("ApplicationId", self.application_id.clone()),
            ("Namespace", self.namespace.clone()),
            ("MinSdk", self.min_sdk.to_string()),
            ("TargetSdk", self.target_sdk.to_string()),
            ("CompileSdk", self.compile_sdk.to_string()),
            ("VersionCode", self.version_code.to_string()),
            ("VersionName", self.version_name.clone()),
            ("Minify", self.minify.to_string()),
            ("ShrinkResources", self.shrink_resources.to_string()),
            ("JavaVersion", self.java_version.to_string()),
            ("Multidex", self.multidex.to_string()),
            ("BuildDir", self.build_dir.display().to_string()),
        ];
        if let Some(ndk) = &self.ndk_version {
            props.push(("NdkVersion", ndk.clone()));
        }
        if let ResolvedSigning::Release {
            store_file,
            key_alias,
            store_password,
            key_password,
        } = &self.signing
        {
            props.push(("StoreFile", store_file.display().to_string()));
            props.push(("KeyAlias", key_alias.clone()));
            props.push(("StorePassword", store_password.expose().to_string()));
            props.push(("KeyPassword", key_password.expose().to_string()));
        }

        props
            .into_iter()
            .map(|(name, value)| (format!("ORG_GRADLE_PROJECT_droidplan{name}"), value))
            .collect()
    }
}
