//! Pipeline driver
//!
//! Sequences the stages in fixed order — ingestion, validation,
//! transformation — emitting stage-boundary events and propagating the
//! first failure unchanged. Nothing is retried and no partial state is
//! rolled back; the caller decides the process outcome.

use crate::config::ConfigManager;
use crate::error::Result;
use crate::stages::{DataIngestion, DataTransformation, DataValidation, Stage};
use tracing::{error, info};

/// Per-run pipeline state
///
/// `Done` and `Failed` are terminal. The state is not persisted across
/// process invocations; every run starts at `NotStarted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    NotStarted,
    Ingesting,
    Validating,
    Transforming,
    Done,
    Failed,
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineState::NotStarted => write!(f, "not_started"),
            PipelineState::Ingesting => write!(f, "ingesting"),
            PipelineState::Validating => write!(f, "validating"),
            PipelineState::Transforming => write!(f, "transforming"),
            PipelineState::Done => write!(f, "done"),
            PipelineState::Failed => write!(f, "failed"),
        }
    }
}

/// Fixed-order pipeline over the configured stages
pub struct Pipeline {
    manager: ConfigManager,
    state: PipelineState,
}

impl Pipeline {
    /// Create a pipeline over loaded configuration
    pub fn new(manager: ConfigManager) -> Self {
        Self {
            manager,
            state: PipelineState::NotStarted,
        }
    }

    /// Current pipeline state
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run all stages to completion
    ///
    /// On the first failure the pipeline transitions to `Failed`, logs
    /// the error with its stage context, and propagates it unchanged.
    pub fn run(&mut self) -> Result<()> {
        let result = self.run_stages();

        if let Err(ref e) = result {
            self.state = PipelineState::Failed;
            error!(state = %self.state, error = %e, "Pipeline failed");
        }

        result
    }

    fn run_stages(&mut self) -> Result<()> {
        self.state = PipelineState::Ingesting;
        info!(stage = DataIngestion::NAME, "Stage started");
        let ingestion = DataIngestion::new(self.manager.ingestion_config()?);
        ingestion.execute()?;
        info!(stage = DataIngestion::NAME, "Stage completed");

        self.state = PipelineState::Validating;
        info!(stage = DataValidation::NAME, "Stage started");
        let validation = DataValidation::new(self.manager.validation_config()?);
        validation.execute()?;
        info!(stage = DataValidation::NAME, "Stage completed");

        self.state = PipelineState::Transforming;
        info!(stage = DataTransformation::NAME, "Stage started");
        let transformation = DataTransformation::new(self.manager.transformation_config()?);
        transformation.execute()?;
        info!(stage = DataTransformation::NAME, "Stage completed");

        self.state = PipelineState::Done;
        info!(state = %self.state, "Pipeline finished");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(PipelineState::NotStarted.to_string(), "not_started");
        assert_eq!(PipelineState::Done.to_string(), "done");
        assert_eq!(PipelineState::Failed.to_string(), "failed");
    }
}
