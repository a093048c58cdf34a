//! `tdp transform` command implementation
//!
//! Splits the validated dataset into train and test sets.

use anyhow::Result;
use colored::Colorize;
use tdp_pipeline::config::{ConfigManager, ConfigPaths};
use tdp_pipeline::stages::{DataTransformation, Stage};

/// Split the validated dataset into train and test sets
pub fn run(paths: &ConfigPaths) -> Result<()> {
    let manager = ConfigManager::load(paths)?;
    let config = manager.transformation_config()?;
    let root_dir = config.root_dir.clone();

    let stage = DataTransformation::new(config);
    stage.execute()?;

    println!(
        "{} Train and test sets written to {}",
        "✓".green(),
        root_dir.display()
    );
    Ok(())
}
