//! `tdp run` command implementation
//!
//! Runs the full pipeline in fixed stage order.

use anyhow::Result;
use colored::Colorize;
use tdp_pipeline::config::{ConfigManager, ConfigPaths};
use tdp_pipeline::pipeline::Pipeline;

/// Run the full pipeline
pub fn run(paths: &ConfigPaths) -> Result<()> {
    let manager = ConfigManager::load(paths)?;
    let mut pipeline = Pipeline::new(manager);
    pipeline.run()?;

    println!("{} Pipeline completed", "✓".green());
    Ok(())
}
