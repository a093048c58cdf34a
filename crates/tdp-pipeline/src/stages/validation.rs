//! Data validation stage
//!
//! Reads the dataset's header row and checks that every column name is
//! declared in the schema. The result is recorded as a single line in the
//! status file — the machine-readable contract downstream consumers read.

use crate::config::ValidationConfig;
use crate::error::{PipelineError, Result};
use crate::stages::Stage;
use std::fs;
use tracing::{info, warn};

/// Validation stage: column-name membership check
pub struct DataValidation {
    config: ValidationConfig,
}

impl DataValidation {
    /// Stable stage name
    pub const NAME: &'static str = "data_validation";

    /// Create the stage from its configuration record
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate the dataset's columns against the declared schema
    ///
    /// Passes iff every header column is declared in the schema. Any
    /// stale status file is removed before the dataset is read, so a
    /// failed run cannot leave an earlier run's status readable as
    /// current. The status line is written exactly once, after all
    /// columns have been checked.
    pub fn validate_columns(&self) -> Result<bool> {
        if self.config.status_file.exists() {
            fs::remove_file(&self.config.status_file).map_err(|e| {
                PipelineError::validation(format!(
                    "failed to remove stale status file '{}': {}",
                    self.config.status_file.display(),
                    e
                ))
            })?;
        }

        let data_path = &self.config.unzip_data_dir;
        let mut reader = csv::Reader::from_path(data_path).map_err(|e| {
            PipelineError::validation(format!(
                "cannot read dataset '{}': {}",
                data_path.display(),
                e
            ))
        })?;

        let headers = reader
            .headers()
            .map_err(|e| {
                PipelineError::validation(format!(
                    "cannot read header row of '{}': {}",
                    data_path.display(),
                    e
                ))
            })?
            .clone();

        let mut unknown = Vec::new();
        for column in headers.iter() {
            if !self.config.schema.has_column(column) {
                warn!(column, "Column not declared in schema");
                unknown.push(column.to_string());
            }
        }

        let valid = unknown.is_empty();
        self.write_status(valid)?;

        if valid {
            info!(columns = headers.len(), "All dataset columns recognized");
        } else {
            warn!(unknown = ?unknown, "Dataset contains undeclared columns");
        }

        Ok(valid)
    }

    /// Write the single-line status record, truncating any previous
    /// content. Format is fixed: `Validation status: True|False`.
    fn write_status(&self, valid: bool) -> Result<()> {
        let line = format!(
            "Validation status: {}",
            if valid { "True" } else { "False" }
        );
        fs::write(&self.config.status_file, &line).map_err(|e| {
            PipelineError::validation(format!(
                "failed to write status file '{}': {}",
                self.config.status_file.display(),
                e
            ))
        })?;

        info!(
            status_file = %self.config.status_file.display(),
            valid,
            "Validation status recorded"
        );
        Ok(())
    }
}

impl Stage for DataValidation {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    // A failed check is a recorded outcome, not a stage error; downstream
    // stages gate on the status file.
    fn execute(&self) -> Result<()> {
        self.validate_columns().map(|_| ())
    }
}
