//! Gradle build system integration
//!
//! Runs tasks through the project's Gradle wrapper. Plan values reach the
//! build scripts as `ORG_GRADLE_PROJECT_droidplan*` environment variables.

use crate::plan::{ArtifactKind, BuildPlan};
use droidplan_core::error::{Error, ErrorCode, Result};
use droidplan_core::process::{run_command_in_dir, run_command_streaming_in_dir, CommandResult};
use std::path::Path;

/// Wrapper script, relative to the Gradle project directory
pub fn wrapper() -> &'static str {
    if cfg!(windows) {
        "gradlew.bat"
    } else {
        "./gradlew"
    }
}

fn ensure_wrapper(project_dir: &Path) -> Result<()> {
    let script = project_dir.join(wrapper().trim_start_matches("./"));
    if script.is_file() {
        Ok(())
    } else {
        Err(Error::new(
            ErrorCode::GradleError,
            format!("No Gradle wrapper in {}", project_dir.display()),
        )
        .with_suggestion("Run `gradle wrapper` in the Android project or set general.gradle_dir"))
    }
}

/// Run a Gradle task and capture its output
pub fn run_task(project_dir: &Path, task: &str, env: &[(String, String)]) -> Result<CommandResult> {
    ensure_wrapper(project_dir)?;
    run_command_in_dir(wrapper(), &[task], project_dir, env)
}

/// Build the artifact of a resolved plan, streaming Gradle output
///
/// Returns the Gradle exit code.
pub fn build(project_dir: &Path, plan: &BuildPlan, kind: ArtifactKind) -> Result<i32> {
    ensure_wrapper(project_dir)?;

    let task = plan.gradle_task(kind);
    tracing::info!(
        task = %task,
        dir = %project_dir.display(),
        output = %plan.build_dir.display(),
        "Starting Gradle build"
    );

    let code = run_command_streaming_in_dir(
        wrapper(),
        &[task.as_str()],
        project_dir,
        &plan.gradle_properties(),
    )?;

    if code != 0 {
        tracing::warn!(task = %task, code, "Gradle build failed");
    }
    Ok(code)
}

/// Clean build artifacts
pub fn clean(project_dir: &Path) -> Result<CommandResult> {
    run_task(project_dir, "clean", &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::BuildDescriptor;
    use crate::environment::StaticEnvironment;
    use crate::resolver::resolve;

    #[cfg(unix)]
    fn fake_wrapper(dir: &Path, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("gradlew");
        std::fs::write(&path, script).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
    }

    #[test]
    fn test_missing_wrapper_is_gradle_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_task(dir.path(), "tasks", &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::GradleError);
        assert!(err.suggestion.is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_task_passes_task_and_env() {
        let dir = tempfile::tempdir().unwrap();
        fake_wrapper(dir.path(), "#!/bin/sh\necho \"$1 $ORG_GRADLE_PROJECT_droidplanVersionCode\"\n");

        let env = vec![(
            "ORG_GRADLE_PROJECT_droidplanVersionCode".to_string(),
            "12".to_string(),
        )];
        let result = run_task(dir.path(), "assembleDebug", &env).unwrap();
        assert!(result.success);
        assert_eq!(result.stdout.trim(), "assembleDebug 12");
    }

    #[cfg(unix)]
    #[test]
    fn test_build_returns_gradle_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        fake_wrapper(dir.path(), "#!/bin/sh\n[ \"$1\" = bundleDebug ] || exit 9\nexit 3\n");

        let plan = resolve(
            &BuildDescriptor::new("com.rwa.pros", 24, 36, 36),
            &StaticEnvironment::new(),
        )
        .unwrap();
        assert_eq!(build(dir.path(), &plan, ArtifactKind::Bundle).unwrap(), 3);
    }
}
