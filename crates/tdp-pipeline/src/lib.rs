//! TDP Pipeline Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Configuration-driven data pipeline: download an archive, extract it,
//! validate the dataset's columns against a declared schema, and split the
//! validated dataset into train and test sets.
//!
//! # Overview
//!
//! - **Configuration**: typed YAML documents loaded once per invocation
//!   ([`config::ConfigManager`])
//! - **Stages**: ingestion, validation, transformation — each built from a
//!   flat configuration record and executed through the [`stages::Stage`]
//!   lifecycle
//! - **Driver**: [`pipeline::Pipeline`] sequences the stages in fixed
//!   order and propagates the first failure
//!
//! # Example
//!
//! ```no_run
//! use tdp_pipeline::config::{ConfigManager, ConfigPaths};
//! use tdp_pipeline::pipeline::Pipeline;
//!
//! fn main() -> tdp_pipeline::Result<()> {
//!     let manager = ConfigManager::load(&ConfigPaths::default())?;
//!     let mut pipeline = Pipeline::new(manager);
//!     pipeline.run()
//! }
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod stages;

// Re-export commonly used types
pub use config::{ConfigManager, ConfigPaths};
pub use error::{PipelineError, Result};
pub use pipeline::{Pipeline, PipelineState};
