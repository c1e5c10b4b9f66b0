//! Advisory checks on a resolved plan
//!
//! A resolved plan is always buildable; these checks flag combinations that
//! build fine but are rarely intended. `droidplan check --strict` fails on them.

use crate::descriptor::DependencyKind;
use crate::plan::BuildPlan;
use droidplan_core::validation::{ValidationResult, Validator};

/// Lowest JVM target the Android Gradle plugin accepts for `compileSdk` 34+
const MIN_JAVA_FOR_SDK_34: u32 = 17;

/// Collect warnings about a resolved plan
pub fn check_plan(plan: &BuildPlan) -> ValidationResult {
    let has_desugaring_dependency = plan
        .dependencies
        .iter()
        .any(|dep| dep.kind == DependencyKind::CoreLibraryDesugaring);

    let result = Validator::new()
        .warn_if(
            "signing",
            "DEBUG_SIGNED_RELEASE",
            plan.build_type == "release" && !plan.is_release_signed(),
            "release build is signed with the debug keystore and cannot be published",
        )
        .warn_if(
            "proguard_files",
            "MINIFY_WITHOUT_RULES",
            plan.minify && plan.proguard_files.is_empty(),
            "minify is enabled without any ProGuard rules file",
        )
        .warn_if(
            "target_sdk",
            "TARGET_BELOW_COMPILE",
            plan.target_sdk < plan.compile_sdk,
            &format!(
                "target_sdk {} is below compile_sdk {}",
                plan.target_sdk, plan.compile_sdk
            ),
        )
        .warn_if(
            "java_version",
            "JAVA_TOO_OLD",
            plan.compile_sdk >= 34 && plan.java_version < MIN_JAVA_FOR_SDK_34,
            &format!(
                "Java {} is too old for compile_sdk {}, use {MIN_JAVA_FOR_SDK_34}",
                plan.java_version, plan.compile_sdk
            ),
        )
        .warn_if(
            "dependencies",
            "DESUGARING_DEPENDENCY_MISSING",
            plan.core_library_desugaring && !has_desugaring_dependency,
            "core library desugaring is enabled without a core_library_desugaring dependency",
        )
        .warn_if(
            "compile.core_library_desugaring",
            "DESUGARING_DISABLED",
            !plan.core_library_desugaring && has_desugaring_dependency,
            "a desugaring dependency is declared but core library desugaring is disabled",
        )
        .validate();

    for warning in result.warnings() {
        tracing::debug!(
            field = %warning.field,
            code = %warning.code,
            message = %warning.message,
            "Plan warning"
        );
    }

    result
}
