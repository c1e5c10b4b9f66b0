//! Human-readable rendering of build plans

use droidplan_android::plan::{BuildPlan, ResolvedSigning, ResolvedVersion};
use droidplan_core::validation::ValidationWarning;
use std::fmt::Write;

/// Render a plan as aligned `key: value` lines
pub fn plan_summary(plan: &BuildPlan) -> String {
    let signing = match &plan.signing {
        ResolvedSigning::Debug => "debug keystore".to_string(),
        ResolvedSigning::Release {
            store_file,
            key_alias,
            ..
        } => format!("{} ({key_alias})", store_file.display()),
    };

    let mut rows = vec![
        ("build type", plan.build_type.clone()),
        ("application id", plan.application_id.clone()),
        ("namespace", plan.namespace.clone()),
        (
            "sdk",
            format!(
                "min {} / target {} / compile {}",
                plan.min_sdk, plan.target_sdk, plan.compile_sdk
            ),
        ),
        (
            "version",
            format!("{} ({})", plan.version_name, plan.version_code),
        ),
        ("signing", signing),
        (
            "shrinking",
            match (plan.minify, plan.shrink_resources) {
                (false, _) => "off".to_string(),
                (true, false) => "code".to_string(),
                (true, true) => "code + resources".to_string(),
            },
        ),
        ("java", plan.java_version.to_string()),
        ("output", plan.build_dir.display().to_string()),
    ];
    if let Some(ndk) = &plan.ndk_version {
        rows.insert(4, ("ndk", ndk.clone()));
    }
    if !plan.proguard_files.is_empty() {
        rows.push(("proguard", plan.proguard_files.join(", ")));
    }

    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (key, value) in rows {
        let _ = writeln!(out, "{key:>width$}: {value}");
    }

    if !plan.dependencies.is_empty() {
        let _ = writeln!(out, "{:>width$}:", "dependencies");
        for dep in &plan.dependencies {
            let source = match &dep.version {
                ResolvedVersion::Pinned { version } => version.clone(),
                ResolvedVersion::Managed { platform, version } => {
                    format!("{version} via {platform}")
                }
            };
            let _ = writeln!(out, "{:>width$}  {} {source} [{}]", "", dep.name, dep.kind);
        }
    }
    out
}

/// Gradle Kotlin DSL `dependencies { }` block of a plan
pub fn dependency_block(plan: &BuildPlan) -> String {
    let mut out = String::from("dependencies {\n");
    for dep in &plan.dependencies {
        let _ = writeln!(out, "    {}", dep.gradle_notation());
    }
    out.push('}');
    out
}

/// One line per warning, `field: message`
pub fn warning_lines(warnings: &[ValidationWarning]) -> Vec<String> {
    warnings.iter().map(ToString::to_string).collect()
}
