//! TDP CLI Library
//!
//! Command-line interface for the tabular data pipeline:
//!
//! - **Full run**: download, validate, and split in one invocation
//!   (`tdp run`)
//! - **Individual stages**: `tdp ingest`, `tdp validate`, `tdp transform`
//! - **Status**: show the last recorded validation status and which
//!   artifacts exist (`tdp status`)

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tdp_pipeline::config::ConfigPaths;

/// TDP - Tabular Data Pipeline
#[derive(Parser, Debug)]
#[command(name = "tdp")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Pipeline configuration file
    #[arg(
        short,
        long,
        env = "TDP_CONFIG",
        default_value = "config/config.yaml",
        global = true
    )]
    pub config: PathBuf,

    /// Model parameters file
    #[arg(
        long,
        env = "TDP_PARAMS",
        default_value = "config/params.yaml",
        global = true
    )]
    pub params: PathBuf,

    /// Dataset schema file
    #[arg(
        long,
        env = "TDP_SCHEMA",
        default_value = "config/schema.yaml",
        global = true
    )]
    pub schema: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Locations of the three configuration documents
    pub fn config_paths(&self) -> ConfigPaths {
        ConfigPaths {
            config: self.config.clone(),
            params: self.params.clone(),
            schema: self.schema.clone(),
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline: ingestion, validation, transformation
    Run,

    /// Download and extract the source archive
    Ingest,

    /// Validate dataset columns against the declared schema
    Validate,

    /// Split the validated dataset into train and test sets
    Transform,

    /// Show the recorded validation status and artifact state
    Status,
}
