//! End-to-end runs of the `cqrs-docs` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

use super::fixtures_dir;

/// Runs the binary with an empty config file so user settings never leak in.
fn cqrs_docs(config_dir: &Path, args: &[&str]) -> Output {
    let config = config_dir.join("config.toml");
    fs::write(&config, "").unwrap();

    Command::new(env!("CARGO_BIN_EXE_cqrs-docs"))
        .arg("--config")
        .arg(&config)
        .arg("--source")
        .arg(fixtures_dir())
        .args(["--domain-pattern", "test"])
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_list() {
    let dir = TempDir::new().unwrap();
    let output = cqrs_docs(dir.path(), &["list"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with(
        "1.\nQuery: Tests\\Resources\\Domain\\Manufacturer\\Query\\GetManufacturerForEditing\n"
    ));
    assert!(stdout.contains(
        "Handler: Tests\\Resources\\Domain\\Tax\\CommandHandler\\EditTaxHandler. \
         (Implements: Tests\\Resources\\Domain\\Tax\\CommandHandler\\EditTaxHandlerInterface)\n"
    ));
    assert!(stdout.contains("Return type: EditableManufacturer\n"));
    assert!(stdout.contains("6.\n"));
    assert!(!stdout.contains("7.\n"));
}

#[test]
fn test_print_flat() {
    let dir = TempDir::new().unwrap();
    let destination = dir.path().join("docs");
    let output = cqrs_docs(
        dir.path(),
        &["print", "--dir", destination.to_str().unwrap(), "--layout", "flat"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        format!("dumped commands & queries to {}\n", destination.display())
    );
    assert!(destination.join("tax.md").exists());
    assert!(destination.join("manufacturer.md").exists());
}

#[test]
fn test_print_force_with_yes_skips_prompt() {
    let dir = TempDir::new().unwrap();
    let destination = dir.path().join("docs");
    fs::create_dir(&destination).unwrap();
    fs::write(destination.join("stale.md"), "old").unwrap();

    let output = cqrs_docs(
        dir.path(),
        &[
            "print",
            "--dir",
            destination.to_str().unwrap(),
            "--docs-version",
            "9.0",
            "--force",
            "--yes",
        ],
    );

    assert!(output.status.success());
    assert!(!destination.join("stale.md").exists());
    assert!(destination.join("tax/index.md").exists());
}

#[test]
fn test_print_rejects_relative_dir() {
    let dir = TempDir::new().unwrap();
    let output = cqrs_docs(dir.path(), &["print", "--dir", "relative/docs"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("is not an absolute path"));
}

#[test]
fn test_print_nested_without_version_fails() {
    let dir = TempDir::new().unwrap();
    let destination = dir.path().join("docs");
    let output = cqrs_docs(
        dir.path(),
        &["print", "--dir", destination.to_str().unwrap()],
    );

    assert!(!output.status.success());
    assert!(!destination.exists());
}
