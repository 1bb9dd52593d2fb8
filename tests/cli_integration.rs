//! CLI integration tests
//!
//! Run the built binary and check stdout, stderr and exit codes.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn varextract_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_varextract"))
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn run(args: &[&str]) -> Output {
    Command::new(varextract_bin())
        .args(args)
        .env_remove("VAREXTRACT_FORMAT")
        .env_remove("VAREXTRACT_ROOT")
        .env_remove("VAREXTRACT_LOG_LEVEL")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute varextract")
}

fn maven_args<'a>(root: &'a str, spec: &'a str, extra: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec![
        "extract",
        "--config",
        spec,
        "--root",
        root,
        "--env",
        "ARTIFACT_PREFIX=demo",
    ];
    args.extend_from_slice(extra);
    args
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("varextract"));
    assert!(stdout.contains("extract"));
    assert!(stdout.contains("validate"));
}

#[test]
fn test_cli_version() {
    let output = run(&["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_extract_properties_to_stdout() {
    let root = fixture("maven-project");
    let spec = root.join("varextract.yaml");
    let (root, spec) = (root.to_string_lossy(), spec.to_string_lossy());

    let output = run(&maven_args(&root, &spec, &[]));

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "ARTIFACT=demo\nVERSION=1.4.2\nNAME=demo\nJARVERSION=1.4.2\nBUILDDATE=20240315\n\
         release.channel=beta\nrelease.notes=First line, second line\n"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[variables-extractor] Extracted variables:"));
    assert!(stderr.contains("[variables-extractor] VERSION = 1.4.2"));
}

#[test]
fn test_extract_json_format() {
    let root = fixture("maven-project");
    let spec = root.join("varextract.yaml");
    let (root, spec) = (root.to_string_lossy(), spec.to_string_lossy());

    let output = run(&maven_args(&root, &spec, &["--format", "json", "-q"]));

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["VERSION"], "1.4.2");
    assert_eq!(value["release.channel"], "beta");
    assert!(!String::from_utf8_lossy(&output.stderr).contains("[variables-extractor]"));
}

#[test]
fn test_extract_shell_format_to_file() {
    let dir = TempDir::new().unwrap();
    let out_path = dir.path().join("vars.sh");
    let root = fixture("maven-project");
    let spec = root.join("varextract.yaml");
    let (root, spec) = (root.to_string_lossy(), spec.to_string_lossy());
    let out = out_path.to_string_lossy();

    let output = run(&maven_args(
        &root,
        &spec,
        &["--format", "shell", "--output", &*out, "--quiet"],
    ));

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let written = fs::read_to_string(&out_path).unwrap();
    assert!(written.contains("export VERSION='1.4.2'\n"));
    assert!(written.contains("export release_channel='beta'\n"));
}

#[test]
fn test_extract_failure_exit_code() {
    let root = fixture("maven-project");
    let spec = root.join("varextract.yaml");
    let (root, spec) = (root.to_string_lossy(), spec.to_string_lossy());

    // Without ARTIFACT_PREFIX the file-name specifier stays unexpanded.
    let output = run(&["extract", "--config", &*spec, "--root", &*root, "--clean-env"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("File not found"));
}

#[test]
fn test_extract_missing_spec_file() {
    let output = run(&["extract", "--config", "/nonexistent/spec.yaml"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read spec file"));
}

#[test]
fn test_validate_command() {
    let spec = fixture("maven-project").join("varextract.yaml");
    let spec = spec.to_string_lossy();

    let output = run(&["validate", "-c", &*spec]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("3 extractor(s) OK"));
}

#[test]
fn test_invalid_format_rejected() {
    let output = run(&["extract", "-c", "spec.yaml", "--format", "xml"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid value"));
}
