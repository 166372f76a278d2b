//! End-to-end tests for the create-lcs binary
//!
//! Only paths that need neither network access nor a terminal are covered:
//! `--dry-run --yes`, clones that fail against a closed local port, and the
//! `schema` subcommand.

use std::process::{Command, Output};
use tempfile::TempDir;

const SCHEMA: &str = r#"{
  "title": "Service configuration",
  "description": "Settings for the deployed service",
  "type": "object",
  "properties": {
    "serviceName": { "type": "string", "default": "demo" },
    "aws": {
      "type": "object",
      "properties": {
        "accountId": { "type": "string", "pattern": "^[0-9]{12}$" },
        "memory": { "type": "integer", "default": 512 }
      }
    }
  }
}"#;

fn create_lcs(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_create-lcs"))
        .args(args)
        .current_dir(dir.path())
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run create-lcs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_dry_run_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let work_dir = dir.path().join("work");
    let output = create_lcs(
        &dir,
        &[
            "--dry-run",
            "--yes",
            "--work-dir",
            work_dir.to_str().unwrap(),
        ],
    );

    assert!(output.status.success(), "{:?}", output);
    let out = stdout(&output);
    assert!(out.contains("Project Directory: my-lcs-service"));
    assert!(out.contains("Dry run: Would clone template repository from https://github.com/phenixcoder/lambda-container-service.git"));
    assert!(out.contains("Dry run: Would generate README.md"));
    assert!(out.contains("Project setup complete!"));

    assert!(!dir.path().join("my-lcs-service").exists());
    assert!(!work_dir.exists());
}

#[test]
fn test_existing_work_dir_survives_failed_clone() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("templates.yaml");
    std::fs::write(
        &catalog,
        "version: \"1.0\"\ntemplates:\n  - name: local/unreachable\n    url: https://127.0.0.1:9/missing.git\n",
    )
    .unwrap();

    let work_dir = dir.path().join("work");
    std::fs::create_dir(&work_dir).unwrap();
    std::fs::write(work_dir.join("notes.txt"), "keep me").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_create-lcs"))
        .args([
            "--yes",
            "--templates",
            catalog.to_str().unwrap(),
            "--work-dir",
            work_dir.to_str().unwrap(),
        ])
        .current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .expect("failed to run create-lcs");

    assert!(!output.status.success(), "{:?}", output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Error during project creation").count(), 1, "{}", stderr);

    assert_eq!(
        std::fs::read_to_string(work_dir.join("notes.txt")).unwrap(),
        "keep me"
    );
    let entries: Vec<_> = std::fs::read_dir(&work_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("notes.txt")]);
}

#[test]
fn test_custom_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("templates.yaml");
    std::fs::write(
        &catalog,
        "version: \"1.0\"\ntemplates:\n  - name: acme/lcs\n    url: https://example.com/acme/lcs.git\n",
    )
    .unwrap();

    let output = create_lcs(
        &dir,
        &["--dry-run", "--yes", "--templates", catalog.to_str().unwrap()],
    );

    assert!(output.status.success(), "{:?}", output);
    let out = stdout(&output);
    assert!(out.contains("Template: acme/lcs"));
    assert!(out.contains("https://example.com/acme/lcs.git"));
}

#[test]
fn test_invalid_catalog_fails() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("templates.yaml");
    std::fs::write(&catalog, "version: \"1.0\"\ntemplates: []\n").unwrap();

    let output = create_lcs(
        &dir,
        &["--dry-run", "--yes", "--templates", catalog.to_str().unwrap()],
    );
    assert!(!output.status.success());
}

#[test]
fn test_schema_lists_prompts() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join(".lcsconf.schema.json");
    std::fs::write(&schema, SCHEMA).unwrap();

    let output = create_lcs(&dir, &["schema", schema.to_str().unwrap()]);

    assert!(output.status.success(), "{:?}", output);
    let out = stdout(&output);
    assert!(out.contains("Service configuration"));
    assert!(out.contains("Settings for the deployed service"));
    assert!(out.contains("1. serviceName"));
    assert!(out.contains("2. aws.accountId"));
    assert!(out.contains("3. aws.memory"));
    assert!(out.contains("Validator: pattern ^[0-9]{12}$"));
}

#[test]
fn test_schema_materializes_answers() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join(".lcsconf.schema.json");
    let answers = dir.path().join("answers.json");
    std::fs::write(&schema, SCHEMA).unwrap();
    std::fs::write(
        &answers,
        r#"{"aws.accountId": "123456789012", "aws.memory": "1024"}"#,
    )
    .unwrap();

    let output = create_lcs(
        &dir,
        &[
            "schema",
            schema.to_str().unwrap(),
            "--answers",
            answers.to_str().unwrap(),
        ],
    );

    assert!(output.status.success(), "{:?}", output);
    let out = stdout(&output);
    assert!(out.contains(
        "{\n  \"serviceName\": \"demo\",\n  \"aws\": {\n    \"accountId\": \"123456789012\",\n    \"memory\": 1024\n  }\n}"
    ));
}

#[test]
fn test_schema_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = create_lcs(&dir, &["schema", "missing.json"]);
    assert!(!output.status.success());
}
