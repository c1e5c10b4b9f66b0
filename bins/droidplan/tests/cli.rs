use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const PROJECT: &str = r#"
[app]
application_id = "com.rwa.pros"
version_code = 4
version_name = "1.4.0"

[sdk]
min = 24
target = 36
compile = 36

[signing.release]
store_file = "app/release.keystore"
key_alias = "upload"

[build_types.release]
signing = "release"
minify = true
shrink_resources = true
proguard_files = ["proguard-rules.pro"]

[build_types.staging]
application_id_suffix = ".staging"

[[dependencies]]
name = "com.google.firebase:firebase-bom"
version = "33.16.0"
kind = "platform"

[[dependencies]]
name = "com.google.firebase:firebase-analytics"
"#;

fn project_dir(project: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("droidplan.toml"), project).unwrap();
    dir
}

fn with_keystore(dir: &Path) {
    std::fs::create_dir_all(dir.join("app")).unwrap();
    std::fs::write(dir.join("app/release.keystore"), b"jks").unwrap();
}

fn droidplan(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("droidplan").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("DROIDPLAN_UPLOAD_STORE_PASSWORD")
        .env_remove("DROIDPLAN_UPLOAD_KEY_PASSWORD")
        .arg("--no-color");
    cmd
}

#[test]
fn variants_lists_declared_and_implicit_build_types() {
    let dir = project_dir(PROJECT);
    droidplan(dir.path())
        .arg("variants")
        .assert()
        .success()
        .stdout(predicate::str::contains("debug"))
        .stdout(predicate::str::contains("release (upload)"))
        .stdout(predicate::str::contains("com.rwa.pros.staging"));
}

#[test]
fn resolve_debug_as_json() {
    let dir = project_dir(PROJECT);
    let output = droidplan(dir.path())
        .args(["resolve", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["application_id"], "com.rwa.pros");
    assert_eq!(plan["min_sdk"], 24);
    assert_eq!(plan["signing"]["kind"], "debug");
    assert_eq!(plan["dependencies"][0]["version"]["source"], "managed");
}

#[test]
fn resolve_release_without_keystore_is_signing_error() {
    let dir = project_dir(PROJECT);
    droidplan(dir.path())
        .args(["resolve", "--build-type", "release"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Missing signing material"))
        .stderr(predicate::str::contains("signing.store_file"));
}

#[test]
fn resolve_release_with_env_credentials_hides_passwords() {
    let dir = project_dir(PROJECT);
    with_keystore(dir.path());

    droidplan(dir.path())
        .env("DROIDPLAN_UPLOAD_STORE_PASSWORD", "hunter2")
        .args(["resolve", "-b", "release", "--dependencies"])
        .assert()
        .success()
        .stdout(predicate::str::contains("code + resources"))
        .stdout(predicate::str::contains(
            "implementation(platform(\"com.google.firebase:firebase-bom:33.16.0\"))",
        ))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn resolve_error_as_json_report() {
    let dir = project_dir(&PROJECT.replace("min = 24", "min = 40"));
    droidplan(dir.path())
        .args(["resolve", "--json"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"code_str\": \"E6004\""))
        .stdout(predicate::str::contains("field: min_sdk"));
}

#[test]
fn unknown_build_type_is_config_error() {
    let dir = project_dir(PROJECT);
    droidplan(dir.path())
        .args(["task", "--build-type", "benchmark"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("available: debug, release, staging"));
}

#[test]
fn task_prints_gradle_task() {
    let dir = project_dir(PROJECT);
    droidplan(dir.path())
        .args(["task", "--build-type", "staging"])
        .assert()
        .success()
        .stdout("assembleStaging\n");

    droidplan(dir.path())
        .args(["task", "--bundle"])
        .assert()
        .success()
        .stdout("bundleDebug\n");
}

#[test]
fn check_reports_every_build_type() {
    let dir = project_dir(PROJECT);
    droidplan(dir.path())
        .arg("check")
        .assert()
        .code(5)
        .stdout(predicate::str::contains("debug: ok"))
        .stdout(predicate::str::contains("staging: ok"))
        .stderr(predicate::str::contains("release: Missing signing material"));
}

#[test]
fn check_strict_fails_on_warnings() {
    let dir = project_dir(&PROJECT.replace("target = 36", "target = 35"));
    with_keystore(dir.path());

    droidplan(dir.path())
        .env("DROIDPLAN_UPLOAD_STORE_PASSWORD", "s")
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("target_sdk 35 is below compile_sdk 36"));

    droidplan(dir.path())
        .env("DROIDPLAN_UPLOAD_STORE_PASSWORD", "s")
        .args(["check", "--strict"])
        .assert()
        .code(2);
}

#[test]
fn check_strict_reports_signing_error_over_earlier_warnings() {
    // debug sorts before release and only warns; release fails to resolve
    let dir = project_dir(&PROJECT.replace("target = 36", "target = 35"));

    droidplan(dir.path())
        .args(["check", "--strict"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("target_sdk 35 is below compile_sdk 36"))
        .stderr(predicate::str::contains("release: Missing signing material"));
}

#[test]
fn snake_case_build_type_is_rejected() {
    let dir = project_dir(&PROJECT.replace("[build_types.staging]", "[build_types.staging_qa]"));

    droidplan(dir.path())
        .args(["task", "--build-type", "staging_qa"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid build type staging_qa"))
        .stderr(predicate::str::contains("lowerCamelCase"));

    let dir = project_dir(&PROJECT.replace("[build_types.staging]", "[build_types.stagingQa]"));
    droidplan(dir.path())
        .args(["task", "--build-type", "stagingQa"])
        .assert()
        .success()
        .stdout("assembleStagingQa\n");
}

#[test]
fn keystore_properties_store_file_is_used() {
    let dir = project_dir(PROJECT);
    std::fs::write(dir.path().join("upload.jks"), b"jks").unwrap();
    std::fs::write(
        dir.path().join("keystore.properties"),
        "storeFile=upload.jks\nstorePassword=s\nkeyAlias=upload\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join(".droidplan.toml"),
        "[signing]\nkeystore_properties = \"keystore.properties\"\n",
    )
    .unwrap();

    droidplan(dir.path())
        .args(["resolve", "-b", "release"])
        .assert()
        .success()
        .stdout(predicate::str::contains("upload.jks (upload)"));
}

#[test]
fn keystore_properties_from_config() {
    let dir = project_dir(PROJECT);
    with_keystore(dir.path());
    std::fs::write(
        dir.path().join("keystore.properties"),
        "storePassword=s\nkeyAlias=upload\nkeyPassword=k\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join(".droidplan.toml"),
        "[signing]\nkeystore_properties = \"keystore.properties\"\n",
    )
    .unwrap();

    droidplan(dir.path())
        .args(["task", "-b", "release"])
        .assert()
        .success()
        .stdout("assembleRelease\n");
}

#[test]
fn missing_config_file_is_config_error() {
    let dir = project_dir(PROJECT);
    droidplan(dir.path())
        .args(["--config", "absent.toml", "variants"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn invalid_project_file_fails() {
    let dir = project_dir("[app]\napplication_id = 1\n");
    droidplan(dir.path())
        .arg("variants")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to parse"));
}

#[cfg(unix)]
#[test]
fn build_runs_gradle_wrapper_with_plan_properties() {
    use std::os::unix::fs::PermissionsExt;

    let dir = project_dir(PROJECT);
    let android = dir.path().join("android");
    std::fs::create_dir_all(&android).unwrap();
    let wrapper = android.join("gradlew");
    std::fs::write(
        &wrapper,
        "#!/bin/sh\necho \"gradle $1 $ORG_GRADLE_PROJECT_droidplanVersionCode\"\n",
    )
    .unwrap();
    std::fs::set_permissions(&wrapper, std::fs::Permissions::from_mode(0o755)).unwrap();

    droidplan(dir.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("gradle assembleDebug 4"))
        .stdout(predicate::str::contains("assembleDebug succeeded"));
}

#[test]
fn build_without_wrapper_fails() {
    let dir = project_dir(PROJECT);
    droidplan(dir.path())
        .arg("build")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No Gradle wrapper"));
}
