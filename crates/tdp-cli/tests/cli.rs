//! Binary-level tests for the `tdp` CLI
//!
//! All scenarios run offline: the full-pipeline test pre-places the
//! archive so ingestion takes its skip path.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

const DATASET_CSV: &str = "\
alcohol,quality
9.4,5
10.0,6
11.2,6
9.5,5
10.5,7
";

const SCHEMA_YAML: &str = "\
COLUMNS:
  alcohol: float64
  quality: int64
TARGET_COLUMN:
  name: quality
";

fn write_zip(path: &Path, name: &str, contents: &str) {
    let file = fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    writer
        .start_file(name, zip::write::FileOptions::default())
        .unwrap();
    writer.write_all(contents.as_bytes()).unwrap();
    writer.finish().unwrap();
}

/// Lay out configuration documents under `dir` with artifact paths inside
/// it. Returns (config, params, schema) paths.
fn scaffold(dir: &TempDir) -> (String, String, String) {
    let root = dir.path().display().to_string();

    let config_yaml = format!(
        "\
artifacts_root: {root}/artifacts
data_ingestion:
  root_dir: {root}/artifacts/data_ingestion
  source_url: http://127.0.0.1:1/data.zip
  local_data_file: {root}/artifacts/data_ingestion/data.zip
  unzip_dir: {root}/artifacts/data_ingestion
data_validation:
  root_dir: {root}/artifacts/data_validation
  unzip_data_dir: {root}/artifacts/data_ingestion/winequality.csv
  status_file: {root}/artifacts/data_validation/status.txt
data_transformation:
  root_dir: {root}/artifacts/data_transformation
  data_path: {root}/artifacts/data_ingestion/winequality.csv
"
    );

    let config = dir.path().join("config.yaml");
    let params = dir.path().join("params.yaml");
    let schema = dir.path().join("schema.yaml");
    fs::write(&config, config_yaml).unwrap();
    fs::write(&params, "elastic_net:\n  alpha: 0.2\n  l1_ratio: 0.1\n").unwrap();
    fs::write(&schema, SCHEMA_YAML).unwrap();

    (
        config.display().to_string(),
        params.display().to_string(),
        schema.display().to_string(),
    )
}

fn tdp(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tdp").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    tdp(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tabular Data Pipeline"));
}

#[test]
fn test_no_subcommand_shows_help() {
    let dir = TempDir::new().unwrap();
    tdp(&dir).assert().failure();
}

#[test]
fn test_missing_configuration_fails_with_config_error() {
    let dir = TempDir::new().unwrap();
    tdp(&dir)
        .args(["run", "--config", "nonexistent.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_validate_records_status() {
    let dir = TempDir::new().unwrap();
    let (config, params, schema) = scaffold(&dir);

    // Dataset already extracted; validate needs no prior ingestion.
    let ingestion_dir = dir.path().join("artifacts/data_ingestion");
    fs::create_dir_all(&ingestion_dir).unwrap();
    fs::write(ingestion_dir.join("winequality.csv"), DATASET_CSV).unwrap();

    tdp(&dir)
        .args(["validate", "--config", &config, "--params", &params, "--schema", &schema])
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation passed"));

    let status =
        fs::read_to_string(dir.path().join("artifacts/data_validation/status.txt")).unwrap();
    assert_eq!(status, "Validation status: True");
}

#[test]
fn test_full_run_offline() {
    let dir = TempDir::new().unwrap();
    let (config, params, schema) = scaffold(&dir);

    // Pre-place the archive so fetch skips the dead URL entirely.
    let ingestion_dir = dir.path().join("artifacts/data_ingestion");
    fs::create_dir_all(&ingestion_dir).unwrap();
    write_zip(
        &ingestion_dir.join("data.zip"),
        "winequality.csv",
        DATASET_CSV,
    );

    tdp(&dir)
        .args(["run", "--config", &config, "--params", &params, "--schema", &schema])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pipeline completed"));

    assert!(dir.path().join("artifacts/data_transformation/train.csv").exists());
    assert!(dir.path().join("artifacts/data_transformation/test.csv").exists());

    // The run also produced a persistent log file.
    let log_entries: Vec<_> = fs::read_dir(dir.path().join("logs")).unwrap().collect();
    assert!(!log_entries.is_empty());
}

#[test]
fn test_status_before_and_after_validation() {
    let dir = TempDir::new().unwrap();
    let (config, params, schema) = scaffold(&dir);

    tdp(&dir)
        .args(["status", "--config", &config, "--params", &params, "--schema", &schema])
        .assert()
        .success()
        .stdout(predicate::str::contains("No validation status recorded"));

    let ingestion_dir = dir.path().join("artifacts/data_ingestion");
    fs::create_dir_all(&ingestion_dir).unwrap();
    fs::write(ingestion_dir.join("winequality.csv"), DATASET_CSV).unwrap();

    tdp(&dir)
        .args(["validate", "--config", &config, "--params", &params, "--schema", &schema])
        .assert()
        .success();

    tdp(&dir)
        .args(["status", "--config", &config, "--params", &params, "--schema", &schema])
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation status: True"));
}
