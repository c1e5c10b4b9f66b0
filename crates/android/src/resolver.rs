//! Build descriptor resolution
//!
//! [`resolve`] validates a [`BuildDescriptor`] against an [`Environment`] and
//! produces a [`BuildPlan`]. Checks run in a fixed order and stop at the
//! first violation:
//!
//! 1. SDK ordering `1 <= min_sdk <= target_sdk <= compile_sdk`
//! 2. application id and namespace are reverse-DNS identifiers
//! 3. release keystore exists and has credentials for its alias; the
//!    environment may register a different keystore path for the alias
//! 4. dependencies are unique by name
//! 5. version code and name
//! 6. build type name is lowerCamelCase and resource shrinking only comes
//!    together with minification
//! 7. every versionless dependency is managed by a platform
//!
//! The only side effects are the environment queries in step 3.

use crate::descriptor::{BuildDescriptor, Dependency, DependencyKind, Signing};
use crate::environment::Environment;
use crate::error::{ConfigError, Result};
use crate::plan::{BuildPlan, ResolvedDependency, ResolvedSigning, ResolvedVersion};
use crate::project::ProjectFile;
use droidplan_core::validation::{is_build_type_name, is_reverse_dns};
use std::collections::BTreeMap;

/// Resolve a descriptor into a build plan
///
/// Resolution is all-or-nothing and deterministic: the same descriptor and
/// environment always yield equal plans.
pub fn resolve<E: Environment + ?Sized>(descriptor: &BuildDescriptor, env: &E) -> Result<BuildPlan> {
    tracing::debug!(build_type = %descriptor.build_type, "Resolving build descriptor");

    check_sdk_range(descriptor)?;
    let namespace = check_identifiers(descriptor)?;
    let signing = resolve_signing(&descriptor.signing, env)?;
    let unique = dedupe_dependencies(&descriptor.dependencies)?;
    check_version(descriptor)?;
    check_build_type(descriptor)?;
    let dependencies = resolve_versions(&unique)?;

    let plan = BuildPlan {
        build_type: descriptor.build_type.clone(),
        application_id: descriptor.application_id.clone(),
        namespace,
        min_sdk: descriptor.min_sdk,
        target_sdk: descriptor.target_sdk,
        compile_sdk: descriptor.compile_sdk,
        ndk_version: descriptor.ndk_version.clone(),
        version_code: descriptor.version_code,
        version_name: descriptor.version_name.clone(),
        signing,
        minify: descriptor.minify,
        shrink_resources: descriptor.shrink_resources,
        proguard_files: descriptor.proguard_files.clone(),
        java_version: descriptor.java_version,
        multidex: descriptor.multidex,
        core_library_desugaring: descriptor.core_library_desugaring,
        build_dir: env.locate(&descriptor.build_dir.join(&descriptor.module)),
        dependencies,
    };

    tracing::info!(
        build_type = %plan.build_type,
        application_id = %plan.application_id,
        release_signed = plan.is_release_signed(),
        dependencies = plan.dependencies.len(),
        "Build plan resolved"
    );

    Ok(plan)
}

/// Resolver bound to one environment
///
/// Holds no mutable state, so one resolver can serve any number of
/// descriptors, from any number of threads when `E` allows it.
#[derive(Debug, Clone)]
pub struct ConfigResolver<E> {
    env: E,
}

impl<E: Environment> ConfigResolver<E> {
    pub fn new(env: E) -> Self {
        Self { env }
    }

    /// Resolve a single descriptor
    pub fn resolve(&self, descriptor: &BuildDescriptor) -> Result<BuildPlan> {
        resolve(descriptor, &self.env)
    }

    /// Resolve one build type of a project file
    pub fn resolve_build_type(&self, project: &ProjectFile, build_type: &str) -> Result<BuildPlan> {
        let descriptor = project.descriptor(build_type)?;
        self.resolve(&descriptor)
    }

    /// Resolve every build type of a project file, in name order
    pub fn resolve_all(&self, project: &ProjectFile) -> Vec<(String, Result<BuildPlan>)> {
        project
            .build_types()
            .into_iter()
            .map(|build_type| {
                let result = self.resolve_build_type(project, &build_type);
                (build_type, result)
            })
            .collect()
    }
}

fn check_sdk_range(descriptor: &BuildDescriptor) -> Result<()> {
    let BuildDescriptor {
        min_sdk,
        target_sdk,
        compile_sdk,
        ..
    } = *descriptor;

    let offending = if min_sdk < 1 || min_sdk > target_sdk {
        Some("min_sdk")
    } else if target_sdk > compile_sdk {
        Some("target_sdk")
    } else {
        None
    };

    match offending {
        Some(field) => Err(ConfigError::InvalidSdkRange {
            field: field.to_string(),
            min_sdk,
            target_sdk,
            compile_sdk,
        }),
        None => Ok(()),
    }
}

fn check_identifiers(descriptor: &BuildDescriptor) -> Result<String> {
    if !is_reverse_dns(&descriptor.application_id) {
        return Err(ConfigError::InvalidIdentifier {
            field: "application_id".to_string(),
            value: descriptor.application_id.clone(),
        });
    }

    let namespace = descriptor
        .namespace
        .clone()
        .unwrap_or_else(|| descriptor.application_id.clone());
    if !is_reverse_dns(&namespace) {
        return Err(ConfigError::InvalidIdentifier {
            field: "namespace".to_string(),
            value: namespace,
        });
    }

    Ok(namespace)
}

fn resolve_signing<E: Environment + ?Sized>(signing: &Signing, env: &E) -> Result<ResolvedSigning> {
    let (store_file, key_alias) = match signing {
        Signing::Debug => return Ok(ResolvedSigning::Debug),
        Signing::ReleaseKeystore {
            store_file,
            key_alias,
        } => (store_file, key_alias),
    };

    let store_file = match env.store_file(key_alias) {
        Some(registered) => {
            tracing::debug!(
                alias = %key_alias,
                declared = %store_file.display(),
                registered = %registered.display(),
                "Keystore path taken from environment"
            );
            registered
        }
        None => store_file.clone(),
    };

    if !env.file_exists(&store_file) {
        return Err(ConfigError::MissingSigningMaterial {
            field: "signing.store_file".to_string(),
            reason: format!("keystore {} does not exist", store_file.display()),
        });
    }

    let credentials = env
        .credentials(key_alias)
        .ok_or_else(|| ConfigError::MissingSigningMaterial {
            field: "signing.key_alias".to_string(),
            reason: format!("no credentials found for key alias {key_alias:?}"),
        })?;

    Ok(ResolvedSigning::Release {
        store_file: env.locate(&store_file),
        key_alias: key_alias.clone(),
        store_password: credentials.store_password,
        key_password: credentials.key_password,
    })
}

/// Collapse identical duplicates, reject entries that disagree
fn dedupe_dependencies(dependencies: &[Dependency]) -> Result<BTreeMap<&str, &Dependency>> {
    let mut unique: BTreeMap<&str, &Dependency> = BTreeMap::new();

    for dep in dependencies {
        if !dep.has_valid_coordinates() {
            return Err(ConfigError::InvalidIdentifier {
                field: "dependencies".to_string(),
                value: dep.name.clone(),
            });
        }

        match unique.get(dep.name.as_str()) {
            Some(existing) if *existing != dep => {
                return Err(ConfigError::DependencyConflict {
                    name: dep.name.clone(),
                    first: existing.describe(),
                    second: dep.describe(),
                });
            }
            Some(_) => tracing::debug!(name = %dep.name, "Collapsed duplicate dependency"),
            None => {
                unique.insert(dep.name.as_str(), dep);
            }
        }
    }

    Ok(unique)
}

fn check_version(descriptor: &BuildDescriptor) -> Result<()> {
    if descriptor.version_code < 1 {
        return Err(ConfigError::InvalidVersion {
            field: "version_code".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if descriptor.version_name.trim().is_empty() {
        return Err(ConfigError::InvalidVersion {
            field: "version_name".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

fn check_build_type(descriptor: &BuildDescriptor) -> Result<()> {
    if !is_build_type_name(&descriptor.build_type) {
        return Err(ConfigError::InvalidBuildType {
            build_type: descriptor.build_type.clone(),
            field: "build_type".to_string(),
            reason: "name must be lowerCamelCase, e.g. stagingQa".to_string(),
        });
    }
    if descriptor.shrink_resources && !descriptor.minify {
        return Err(ConfigError::InvalidBuildType {
            build_type: descriptor.build_type.clone(),
            field: "shrink_resources".to_string(),
            reason: "resource shrinking requires minify".to_string(),
        });
    }
    Ok(())
}

fn resolve_versions(unique: &BTreeMap<&str, &Dependency>) -> Result<Vec<ResolvedDependency>> {
    let platforms: Vec<&Dependency> = unique
        .values()
        .copied()
        .filter(|dep| dep.kind == DependencyKind::Platform)
        .collect();

    unique
        .values()
        .map(|dep| -> Result<ResolvedDependency> {
            let version = match &dep.version {
                Some(version) => ResolvedVersion::Pinned {
                    version: version.clone(),
                },
                None => managed_version(dep, &platforms)?,
            };
            Ok(ResolvedDependency {
                name: dep.name.clone(),
                kind: dep.kind,
                version,
            })
        })
        .collect()
}

/// Pick the platform managing `dep`: same Maven group first, else the only platform
fn managed_version(dep: &Dependency, platforms: &[&Dependency]) -> Result<ResolvedVersion> {
    let unpinned = || ConfigError::UnpinnedDependency {
        name: dep.name.clone(),
    };

    if dep.kind == DependencyKind::Platform {
        return Err(unpinned());
    }

    let platform = platforms
        .iter()
        .find(|platform| platform.group() == dep.group())
        .or(match platforms {
            [only] => Some(only),
            _ => None,
        })
        .ok_or_else(unpinned)?;

    let version = platform.version.clone().ok_or_else(unpinned)?;
    Ok(ResolvedVersion::Managed {
        platform: platform.name.clone(),
        version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{Credentials, FsEnvironment, StaticEnvironment};
    use crate::keystore::KeystoreProperties;
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn rwa() -> BuildDescriptor {
        BuildDescriptor::new("com.rwa.pros", 24, 36, 36)
    }

    fn release_env() -> StaticEnvironment {
        StaticEnvironment::new()
            .with_file("app/release.keystore")
            .with_credentials("upload", Credentials::new("store", "key"))
    }

    #[test]
    fn test_debug_scenario_resolves() {
        let plan = resolve(&rwa(), &StaticEnvironment::new()).unwrap();

        assert_eq!(plan.application_id, "com.rwa.pros");
        assert_eq!(plan.namespace, "com.rwa.pros");
        assert_eq!((plan.min_sdk, plan.target_sdk, plan.compile_sdk), (24, 36, 36));
        assert_eq!(plan.signing, ResolvedSigning::Debug);
        assert!(plan.dependencies.is_empty());
        assert_eq!(plan.build_dir, PathBuf::from("build/app"));
    }

    #[test]
    fn test_missing_keystore_scenario() {
        let descriptor = BuildDescriptor {
            signing: Signing::release("missing.keystore", "upload"),
            ..rwa()
        };
        let env = StaticEnvironment::new().with_credentials("upload", Credentials::new("s", "k"));

        let err = resolve(&descriptor, &env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSigningMaterial { .. }));
        assert_eq!(err.field(), "signing.store_file");
    }

    #[test]
    fn test_keystore_properties_store_file_overrides_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("upload.jks"), b"jks").unwrap();
        let props =
            KeystoreProperties::parse("storeFile=upload.jks\nstorePassword=s\nkeyAlias=upload\n");
        let env = FsEnvironment::with_vars(dir.path(), Vec::new()).with_keystore_properties(props);

        let descriptor = BuildDescriptor {
            signing: Signing::release("app/release.keystore", "upload"),
            ..rwa()
        };
        let plan = resolve(&descriptor, &env).unwrap();
        match plan.signing {
            ResolvedSigning::Release { store_file, .. } => {
                assert_eq!(store_file, dir.path().join("upload.jks"));
            }
            ResolvedSigning::Debug => panic!("expected release signing"),
        }

        // the override still has to exist
        std::fs::remove_file(dir.path().join("upload.jks")).unwrap();
        let err = resolve(&descriptor, &env).unwrap_err();
        assert_eq!(err.field(), "signing.store_file");
        assert!(err.to_string().contains("upload.jks"));
    }

    #[test]
    fn test_missing_credentials_is_missing_signing_material() {
        let descriptor = BuildDescriptor {
            signing: Signing::release("app/release.keystore", "other"),
            ..rwa()
        };

        let err = resolve(&descriptor, &release_env()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSigningMaterial { .. }));
        assert_eq!(err.field(), "signing.key_alias");
    }

    #[test]
    fn test_release_signing_resolved() {
        let descriptor = BuildDescriptor {
            build_type: "release".to_string(),
            signing: Signing::release("app/release.keystore", "upload"),
            minify: true,
            shrink_resources: true,
            ..rwa()
        };

        let plan = resolve(&descriptor, &release_env()).unwrap();
        match plan.signing {
            ResolvedSigning::Release {
                store_file,
                key_alias,
                store_password,
                key_password,
            } => {
                assert_eq!(store_file, PathBuf::from("app/release.keystore"));
                assert_eq!(key_alias, "upload");
                assert_eq!(store_password.expose(), "store");
                assert_eq!(key_password.expose(), "key");
            }
            ResolvedSigning::Debug => panic!("expected release signing"),
        }
    }

    #[test]
    fn test_sdk_range_names_offending_field() {
        let err = resolve(&BuildDescriptor::new("com.rwa.pros", 30, 29, 36), &StaticEnvironment::new())
            .unwrap_err();
        assert_eq!(err.field(), "min_sdk");

        let err = resolve(&BuildDescriptor::new("com.rwa.pros", 24, 36, 35), &StaticEnvironment::new())
            .unwrap_err();
        assert_eq!(err.field(), "target_sdk");

        // API levels start at 1
        let err = resolve(&BuildDescriptor::new("com.rwa.pros", 0, 36, 36), &StaticEnvironment::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSdkRange { .. }));
        assert_eq!(err.field(), "min_sdk");
    }

    #[test]
    fn test_equal_sdk_levels_allowed() {
        assert!(resolve(&BuildDescriptor::new("com.rwa.pros", 36, 36, 36), &StaticEnvironment::new()).is_ok());
    }

    #[test]
    fn test_invalid_identifiers() {
        for bad in ["", "pros", "com..rwa", "com.rwa-pros.app", "1com.rwa"] {
            let err = resolve(&BuildDescriptor::new(bad, 24, 36, 36), &StaticEnvironment::new())
                .unwrap_err();
            assert_eq!(
                err,
                ConfigError::InvalidIdentifier {
                    field: "application_id".to_string(),
                    value: bad.to_string()
                }
            );
        }

        let descriptor = BuildDescriptor {
            namespace: Some("rwa".to_string()),
            ..rwa()
        };
        let err = resolve(&descriptor, &StaticEnvironment::new()).unwrap_err();
        assert_eq!(err.field(), "namespace");
    }

    #[test]
    fn test_sdk_checked_before_identifier() {
        let descriptor = BuildDescriptor::new("bad", 30, 24, 36);
        let err = resolve(&descriptor, &StaticEnvironment::new()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSdkRange { .. }));
    }

    #[test]
    fn test_identifier_checked_before_signing() {
        let descriptor = BuildDescriptor {
            signing: Signing::release("missing.keystore", "upload"),
            ..BuildDescriptor::new("bad", 24, 36, 36)
        };
        let err = resolve(&descriptor, &StaticEnvironment::new()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_dependency_conflict() {
        let descriptor = BuildDescriptor {
            dependencies: vec![
                Dependency::new("androidx.multidex:multidex", "2.0.1"),
                Dependency::new("androidx.multidex:multidex", "2.0.0"),
            ],
            ..rwa()
        };

        let err = resolve(&descriptor, &StaticEnvironment::new()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::DependencyConflict {
                name: "androidx.multidex:multidex".to_string(),
                first: "2.0.1".to_string(),
                second: "2.0.0".to_string(),
            }
        );
    }

    #[test]
    fn test_dependency_kind_conflict() {
        let descriptor = BuildDescriptor {
            dependencies: vec![
                Dependency::platform("com.google.firebase:firebase-bom", "33.16.0"),
                Dependency::new("com.google.firebase:firebase-bom", "33.16.0"),
            ],
            ..rwa()
        };

        let err = resolve(&descriptor, &StaticEnvironment::new()).unwrap_err();
        assert!(matches!(err, ConfigError::DependencyConflict { .. }));
    }

    #[test]
    fn test_identical_duplicates_collapse_and_sort() {
        let descriptor = BuildDescriptor {
            dependencies: vec![
                Dependency::new("androidx.multidex:multidex", "2.0.1"),
                Dependency::desugaring("com.android.tools:desugar_jdk_libs", "2.1.5"),
                Dependency::new("androidx.multidex:multidex", "2.0.1"),
            ],
            ..rwa()
        };

        let plan = resolve(&descriptor, &StaticEnvironment::new()).unwrap();
        let names: Vec<&str> = plan.dependencies.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["androidx.multidex:multidex", "com.android.tools:desugar_jdk_libs"]);
    }

    #[test]
    fn test_malformed_dependency_name() {
        let descriptor = BuildDescriptor {
            dependencies: vec![Dependency::new("multidex", "2.0.1")],
            ..rwa()
        };
        let err = resolve(&descriptor, &StaticEnvironment::new()).unwrap_err();
        assert_eq!(err.field(), "dependencies");
    }

    #[test]
    fn test_platform_manages_same_group() {
        let descriptor = BuildDescriptor {
            dependencies: vec![
                Dependency::platform("com.google.firebase:firebase-bom", "33.16.0"),
                Dependency::platform("androidx.compose:compose-bom", "2024.09.00"),
                Dependency::managed("com.google.firebase:firebase-messaging"),
                Dependency::managed("androidx.compose:ui"),
            ],
            ..rwa()
        };

        let plan = resolve(&descriptor, &StaticEnvironment::new()).unwrap();
        let messaging = plan
            .dependencies
            .iter()
            .find(|d| d.name == "com.google.firebase:firebase-messaging")
            .unwrap();
        assert_eq!(
            messaging.version,
            ResolvedVersion::Managed {
                platform: "com.google.firebase:firebase-bom".to_string(),
                version: "33.16.0".to_string(),
            }
        );
        let ui = plan.dependencies.iter().find(|d| d.name == "androidx.compose:ui").unwrap();
        assert_eq!(ui.version.version(), "2024.09.00");
    }

    #[test]
    fn test_single_platform_manages_other_groups() {
        let descriptor = BuildDescriptor {
            dependencies: vec![
                Dependency::platform("com.google.firebase:firebase-bom", "33.16.0"),
                Dependency::managed("com.google.android.gms:play-services-ads"),
            ],
            ..rwa()
        };
        assert!(resolve(&descriptor, &StaticEnvironment::new()).is_ok());
    }

    #[test]
    fn test_unpinned_dependency() {
        let descriptor = BuildDescriptor {
            dependencies: vec![Dependency::managed("com.google.firebase:firebase-analytics")],
            ..rwa()
        };
        let err = resolve(&descriptor, &StaticEnvironment::new()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnpinnedDependency {
                name: "com.google.firebase:firebase-analytics".to_string()
            }
        );

        let descriptor = BuildDescriptor {
            dependencies: vec![Dependency {
                version: None,
                ..Dependency::platform("com.google.firebase:firebase-bom", "1")
            }],
            ..rwa()
        };
        assert!(matches!(
            resolve(&descriptor, &StaticEnvironment::new()),
            Err(ConfigError::UnpinnedDependency { .. })
        ));
    }

    #[test]
    fn test_version_checks() {
        let descriptor = BuildDescriptor {
            version_code: 0,
            ..rwa()
        };
        let err = resolve(&descriptor, &StaticEnvironment::new()).unwrap_err();
        assert_eq!(err.field(), "version_code");

        let descriptor = BuildDescriptor {
            version_name: " ".to_string(),
            ..rwa()
        };
        let err = resolve(&descriptor, &StaticEnvironment::new()).unwrap_err();
        assert_eq!(err.field(), "version_name");
    }

    #[test]
    fn test_shrink_requires_minify() {
        let descriptor = BuildDescriptor {
            shrink_resources: true,
            ..rwa()
        };
        let err = resolve(&descriptor, &StaticEnvironment::new()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBuildType { .. }));
        assert_eq!(err.field(), "shrink_resources");
    }

    #[test]
    fn test_build_type_name_must_be_lower_camel_case() {
        for bad in ["staging_qa", "Staging", "qa-build", ""] {
            let descriptor = BuildDescriptor {
                build_type: bad.to_string(),
                ..rwa()
            };
            let err = resolve(&descriptor, &StaticEnvironment::new()).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidBuildType { .. }), "{bad:?}: {err:?}");
            assert_eq!(err.field(), "build_type");
        }

        let descriptor = BuildDescriptor {
            build_type: "stagingQa".to_string(),
            ..rwa()
        };
        let plan = resolve(&descriptor, &StaticEnvironment::new()).unwrap();
        assert_eq!(plan.gradle_task(crate::plan::ArtifactKind::Apk), "assembleStagingQa");
    }

    #[test]
    fn test_build_type_name_checked_after_sdk_range() {
        let descriptor = BuildDescriptor {
            build_type: "staging_qa".to_string(),
            ..BuildDescriptor::new("com.rwa.pros", 30, 24, 36)
        };
        let err = resolve(&descriptor, &StaticEnvironment::new()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSdkRange { .. }));
    }

    #[test]
    fn test_resolver_struct_delegates() {
        let resolver = ConfigResolver::new(release_env());
        let descriptor = BuildDescriptor {
            signing: Signing::release("app/release.keystore", "upload"),
            ..rwa()
        };
        assert!(resolver.resolve(&descriptor).unwrap().is_release_signed());
    }

    fn arb_dependencies() -> impl Strategy<Value = Vec<Dependency>> {
        proptest::collection::vec(
            ("[a-c]", "[0-3]").prop_map(|(artifact, version)| {
                Dependency::new(format!("org.example:{artifact}"), version)
            }),
            0..6,
        )
    }

    proptest! {
        #[test]
        fn prop_min_above_target_fails(min in 2u32..40, gap in 1u32..10) {
            let target = min.saturating_sub(gap).max(1);
            prop_assume!(min > target);
            let err = resolve(&BuildDescriptor::new("com.rwa.pros", min, target, 40), &StaticEnvironment::new()).unwrap_err();
            prop_assert!(
                matches!(err, ConfigError::InvalidSdkRange { .. }),
                "unexpected error: {:?}",
                err
            );
        }

        #[test]
        fn prop_target_above_compile_fails(target in 2u32..40, gap in 1u32..10) {
            let compile = target.saturating_sub(gap).max(1);
            prop_assume!(target > compile);
            let err = resolve(&BuildDescriptor::new("com.rwa.pros", 1, target, compile), &StaticEnvironment::new()).unwrap_err();
            prop_assert!(
                matches!(err, ConfigError::InvalidSdkRange { .. }),
                "unexpected error: {:?}",
                err
            );
        }

        #[test]
        fn prop_ordered_sdks_resolve(min in 1u32..40, a in 0u32..10, b in 0u32..10) {
            let descriptor = BuildDescriptor::new("com.rwa.pros", min, min + a, min + a + b);
            prop_assert!(resolve(&descriptor, &StaticEnvironment::new()).is_ok());
        }

        #[test]
        fn prop_missing_keystore_fails(name in "[a-z]{1,10}\\.keystore") {
            let descriptor = BuildDescriptor {
                signing: Signing::release(name, "upload"),
                ..rwa()
            };
            let env = StaticEnvironment::new().with_credentials("upload", Credentials::new("s", "k"));
            let err = resolve(&descriptor, &env).unwrap_err();
            prop_assert!(
                matches!(err, ConfigError::MissingSigningMaterial { .. }),
                "unexpected error: {:?}",
                err
            );
        }

        #[test]
        fn prop_dependency_outcome(dependencies in arb_dependencies()) {
            let mut versions: BTreeMap<&str, &str> = BTreeMap::new();
            let mut conflicting = false;
            for dep in &dependencies {
                let version = dep.version.as_deref().unwrap_or_default();
                if let Some(existing) = versions.insert(dep.name.as_str(), version) {
                    conflicting |= existing != version;
                }
            }

            let descriptor = BuildDescriptor { dependencies: dependencies.clone(), ..rwa() };
            match resolve(&descriptor, &StaticEnvironment::new()) {
                Ok(plan) => {
                    prop_assert!(!conflicting);
                    prop_assert_eq!(plan.dependencies.len(), versions.len());
                    prop_assert!(plan.dependencies.windows(2).all(|w| w[0].name < w[1].name));
                }
                Err(err) => {
                    prop_assert!(conflicting);
                    prop_assert!(
                        matches!(err, ConfigError::DependencyConflict { .. }),
                        "unexpected error: {:?}",
                        err
                    );
                }
            }
        }

        #[test]
        fn prop_resolution_is_idempotent(dependencies in arb_dependencies(), release in any::<bool>()) {
            let signing = if release {
                Signing::release("app/release.keystore", "upload")
            } else {
                Signing::Debug
            };
            let descriptor = BuildDescriptor { dependencies, signing, ..rwa() };
            let env = release_env();

            let first = resolve(&descriptor, &env);
            let second = resolve(&descriptor, &env);
            prop_assert_eq!(first, second);
        }
    }
}
