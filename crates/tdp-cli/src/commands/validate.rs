//! `tdp validate` command implementation
//!
//! Checks dataset columns against the declared schema and records the
//! status file.

use anyhow::Result;
use colored::Colorize;
use tdp_pipeline::config::{ConfigManager, ConfigPaths};
use tdp_pipeline::stages::DataValidation;

/// Validate dataset columns against the declared schema
pub fn run(paths: &ConfigPaths) -> Result<()> {
    let manager = ConfigManager::load(paths)?;
    let config = manager.validation_config()?;
    let status_file = config.status_file.clone();

    let stage = DataValidation::new(config);
    let valid = stage.validate_columns()?;

    if valid {
        println!("{} Validation passed", "✓".green());
    } else {
        println!("{} Validation failed: undeclared columns", "✗".red());
    }
    println!("  Status written to {}", status_file.display());

    Ok(())
}
