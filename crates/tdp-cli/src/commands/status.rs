//! `tdp status` command implementation
//!
//! Shows the recorded validation status and which pipeline artifacts
//! exist on disk.

use anyhow::Result;
use colored::Colorize;
use std::fs;
use std::path::Path;
use tdp_pipeline::config::{ConfigManager, ConfigPaths};

/// Show the recorded validation status and artifact state
pub fn run(paths: &ConfigPaths) -> Result<()> {
    let manager = ConfigManager::load(paths)?;
    let config = manager.config();

    println!("{}", "Validation:".cyan().bold());
    let status_file = &config.data_validation.status_file;
    match fs::read_to_string(status_file) {
        Ok(status) => {
            let passed = status.trim().ends_with("True");
            let marker = if passed { "✓".green() } else { "✗".red() };
            println!("  {} {}", marker, status.trim());
        }
        Err(_) => {
            println!("  No validation status recorded.");
            println!("  Run 'tdp validate' first.");
        }
    }

    println!();
    println!("{}", "Artifacts:".cyan().bold());
    print_artifact("archive", &config.data_ingestion.local_data_file);
    print_artifact("dataset", &config.data_validation.unzip_data_dir);
    print_artifact("train set", &config.data_transformation.root_dir.join("train.csv"));
    print_artifact("test set", &config.data_transformation.root_dir.join("test.csv"));

    Ok(())
}

fn print_artifact(label: &str, path: &Path) {
    let marker = if path.exists() {
        "✓".green()
    } else {
        "—".normal()
    };
    println!("  {} {:<10} {}", marker, label, path.display());
}
