//! Integration tests for the CLI surface.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const GRADLE: &str =
    "android {\n  defaultConfig {\n    applicationId = 'org.example.app'\n  }\n}\n";

const RULES: &str = r#"{
  "environments": [
    {
      "name": "staging",
      "appBundleId": "org.example.app.staging",
      "matchPattern": ".*\\.staging\\..*"
    }
  ],
  "directCopyRules": {},
  "extraPaths": [],
  "version": "1.2.1",
  "buildNumber": "4",
  "versionCode": "1020104",
  "autoVersionCode": true
}
"#;

fn setup_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let resources = temp.path().join("App_Resources/Android");
    fs::create_dir_all(&resources).unwrap();
    fs::write(resources.join("app.gradle"), GRADLE).unwrap();
    fs::write(resources.join("config.staging.json"), "{\"api\": \"stg\"}").unwrap();
    fs::write(
        temp.path().join("package.json"),
        r#"{"name": "app", "version": "1.2.1"}"#,
    )
    .unwrap();
    fs::write(temp.path().join("environment-rules.android.json"), RULES).unwrap();
    temp
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("envswitch"));
    cmd.arg("--help");
    cmd.assert().success().stdout(predicate::str::contains(
        "Environment switching and versioning",
    ));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("envswitch"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn switch_materializes_variant_files() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();

    let mut cmd = Command::new(cargo_bin("envswitch"));
    cmd.args(["switch", "--platform", "android", "--env", "staging"])
        .arg("--project")
        .arg(temp.path());
    cmd.assert().success();

    let canonical = temp.path().join("App_Resources/Android/config.json");
    assert_eq!(fs::read_to_string(canonical)?, "{\"api\": \"stg\"}");
    Ok(())
}

#[test]
fn release_switch_advances_build_number_and_version_code(
) -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();

    let mut cmd = Command::new(cargo_bin("envswitch"));
    cmd.args([
        "switch",
        "--platform",
        "android",
        "--env",
        "staging",
        "--release",
    ])
    .arg("--project")
    .arg(temp.path());
    cmd.assert().success();

    let rules = fs::read_to_string(temp.path().join("environment-rules.android.json"))?;
    assert!(rules.contains("\"buildNumber\": \"5\""));
    assert!(rules.contains("\"versionCode\": \"1020105\""));
    Ok(())
}

#[test]
fn switch_rejects_unknown_environment() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();

    let mut cmd = Command::new(cargo_bin("envswitch"));
    cmd.args(["switch", "--platform", "android", "--env", "qa"])
        .arg("--project")
        .arg(temp.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No rules found for environment"));
    Ok(())
}

#[test]
fn switch_rejects_unknown_platform() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();

    let mut cmd = Command::new(cargo_bin("envswitch"));
    cmd.args(["switch", "--platform", "windows"])
        .arg("--project")
        .arg(temp.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unsupported platform"));
    Ok(())
}

#[test]
fn finalize_cleans_android_output_tree() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    let app_dir = temp.path().join("platforms/android/app");
    fs::create_dir_all(&app_dir)?;
    fs::write(app_dir.join("config.staging.json"), "x")?;
    fs::write(app_dir.join("config.json"), "x")?;

    let mut cmd = Command::new(cargo_bin("envswitch"));
    cmd.args(["finalize", "--platform", "android"])
        .arg("--project")
        .arg(temp.path());
    cmd.assert().success();

    assert!(!app_dir.join("config.staging.json").exists());
    assert!(app_dir.join("config.json").exists());
    Ok(())
}
