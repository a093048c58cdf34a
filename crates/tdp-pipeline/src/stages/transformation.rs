//! Data transformation stage
//!
//! Gated on a passing validation status, splits the validated dataset
//! into train and test CSVs under the stage root. The shuffle is seeded,
//! so the split is deterministic across runs.

use crate::config::TransformationConfig;
use crate::error::{PipelineError, Result};
use crate::stages::Stage;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fs;
use std::path::Path;
use tracing::info;

/// Fraction of rows held out as the test set
const TEST_FRACTION: f64 = 0.2;

/// Seed for the split shuffle
const SPLIT_SEED: u64 = 42;

/// Transformation stage: train/test split
pub struct DataTransformation {
    config: TransformationConfig,
}

impl DataTransformation {
    /// Stable stage name
    pub const NAME: &'static str = "data_transformation";

    /// Create the stage from its configuration record
    pub fn new(config: TransformationConfig) -> Self {
        Self { config }
    }

    /// Split the validated dataset into train.csv and test.csv
    ///
    /// Refuses to run unless the status file records a passing
    /// validation. Row order within each output follows the seeded
    /// shuffle; the test set holds ceil(rows * 0.2) rows.
    pub fn split(&self) -> Result<()> {
        self.check_validation_gate()?;

        let data_path = &self.config.data_path;
        let mut reader = csv::Reader::from_path(data_path).map_err(|e| {
            PipelineError::transformation(format!(
                "cannot read dataset '{}': {}",
                data_path.display(),
                e
            ))
        })?;

        let headers = reader
            .headers()
            .map_err(|e| {
                PipelineError::transformation(format!(
                    "cannot read header row of '{}': {}",
                    data_path.display(),
                    e
                ))
            })?
            .clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record.map_err(|e| {
                PipelineError::transformation(format!(
                    "malformed record in '{}': {}",
                    data_path.display(),
                    e
                ))
            })?);
        }

        let mut indices: Vec<usize> = (0..rows.len()).collect();
        let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
        indices.shuffle(&mut rng);

        let test_len = ((rows.len() as f64) * TEST_FRACTION).ceil() as usize;
        let (test_indices, train_indices) = indices.split_at(test_len);

        let train_path = self.config.root_dir.join("train.csv");
        let test_path = self.config.root_dir.join("test.csv");
        self.write_subset(&train_path, &headers, &rows, train_indices)?;
        self.write_subset(&test_path, &headers, &rows, test_indices)?;

        info!(
            train_rows = train_indices.len(),
            test_rows = test_indices.len(),
            columns = headers.len(),
            dir = %self.config.root_dir.display(),
            "Train and test data written"
        );

        Ok(())
    }

    /// Require a recorded passing validation before touching the dataset
    fn check_validation_gate(&self) -> Result<()> {
        let status_file = &self.config.status_file;
        let status = fs::read_to_string(status_file).map_err(|e| {
            PipelineError::validation(format!(
                "cannot read status file '{}': {} (run validation first)",
                status_file.display(),
                e
            ))
        })?;

        let passed = status.split_whitespace().next_back() == Some("True");
        if !passed {
            return Err(PipelineError::validation(
                "data validation failed; check the logs and the status file",
            ));
        }

        Ok(())
    }

    fn write_subset(
        &self,
        path: &Path,
        headers: &csv::StringRecord,
        rows: &[csv::StringRecord],
        indices: &[usize],
    ) -> Result<()> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| {
            PipelineError::transformation(format!("cannot create '{}': {}", path.display(), e))
        })?;

        writer.write_record(headers).map_err(|e| {
            PipelineError::transformation(format!("cannot write '{}': {}", path.display(), e))
        })?;
        for &index in indices {
            writer.write_record(&rows[index]).map_err(|e| {
                PipelineError::transformation(format!("cannot write '{}': {}", path.display(), e))
            })?;
        }

        writer.flush().map_err(|e| {
            PipelineError::transformation(format!("cannot flush '{}': {}", path.display(), e))
        })?;

        Ok(())
    }
}

impl Stage for DataTransformation {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn execute(&self) -> Result<()> {
        self.split()
    }
}
