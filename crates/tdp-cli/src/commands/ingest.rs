//! `tdp ingest` command implementation
//!
//! Downloads and extracts the source archive.

use anyhow::Result;
use colored::Colorize;
use tdp_pipeline::config::{ConfigManager, ConfigPaths};
use tdp_pipeline::stages::{DataIngestion, Stage};

/// Download and extract the source archive
pub fn run(paths: &ConfigPaths) -> Result<()> {
    let manager = ConfigManager::load(paths)?;
    let config = manager.ingestion_config()?;
    let unzip_dir = config.unzip_dir.clone();

    let stage = DataIngestion::new(config);
    stage.execute()?;

    println!(
        "{} Archive downloaded and extracted to {}",
        "✓".green(),
        unzip_dir.display()
    );
    Ok(())
}
