//! Configuration loading for the pipeline
//!
//! Three YAML documents are loaded once per invocation: the pipeline
//! configuration (artifact paths per stage), the model parameters (opaque,
//! consumed by no stage), and the dataset schema. All documents are typed
//! with `deny_unknown_fields`, so unknown or missing keys fail at load
//! time rather than at first access.

use crate::error::{PipelineError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Locations of the three configuration documents
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigPaths {
    /// Pipeline configuration (artifact paths per stage)
    pub config: PathBuf,

    /// Model parameters
    pub params: PathBuf,

    /// Dataset schema
    pub schema: PathBuf,
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self {
            config: PathBuf::from("config/config.yaml"),
            params: PathBuf::from("config/params.yaml"),
            schema: PathBuf::from("config/schema.yaml"),
        }
    }
}

/// Root pipeline configuration (config.yaml)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Base directory under which all stage output directories are created
    pub artifacts_root: PathBuf,

    /// Ingestion stage settings
    pub data_ingestion: IngestionSection,

    /// Validation stage settings
    pub data_validation: ValidationSection,

    /// Transformation stage settings
    pub data_transformation: TransformationSection,
}

/// `data_ingestion` section of config.yaml
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestionSection {
    /// Stage output directory
    pub root_dir: PathBuf,

    /// URL of the source archive
    pub source_url: String,

    /// Where the downloaded archive is stored
    pub local_data_file: PathBuf,

    /// Where the archive is extracted
    pub unzip_dir: PathBuf,
}

/// `data_validation` section of config.yaml
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationSection {
    /// Stage output directory
    pub root_dir: PathBuf,

    /// Path of the extracted CSV to validate
    pub unzip_data_dir: PathBuf,

    /// Where the validation status line is written
    pub status_file: PathBuf,
}

/// `data_transformation` section of config.yaml
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformationSection {
    /// Stage output directory; receives train.csv and test.csv
    pub root_dir: PathBuf,

    /// Path of the validated CSV to split
    pub data_path: PathBuf,
}

/// Declared dataset schema (schema.yaml)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaSpec {
    /// Expected column name -> type tag. Only the names are checked by
    /// validation; the type tags are declarative.
    #[serde(rename = "COLUMNS")]
    pub columns: BTreeMap<String, ColumnType>,

    /// Designated prediction target
    #[serde(rename = "TARGET_COLUMN")]
    pub target_column: TargetColumn,
}

impl SchemaSpec {
    /// Whether a column name is declared in the schema
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }
}

/// Nominal column type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Float64,
    Int64,
    Object,
}

/// `TARGET_COLUMN` section of schema.yaml
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetColumn {
    /// Name of the target column
    pub name: String,
}

/// Opaque model parameters (params.yaml)
///
/// Loaded and empty-checked like the other documents, but consumed by no
/// stage.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Params(pub serde_yaml::Mapping);

/// Flat configuration record for the ingestion stage
#[derive(Debug, Clone, PartialEq)]
pub struct IngestionConfig {
    pub root_dir: PathBuf,
    pub source_url: String,
    pub local_data_file: PathBuf,
    pub unzip_dir: PathBuf,
}

/// Flat configuration record for the validation stage
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationConfig {
    pub root_dir: PathBuf,
    pub unzip_data_dir: PathBuf,
    pub status_file: PathBuf,
    pub schema: SchemaSpec,
}

/// Flat configuration record for the transformation stage
#[derive(Debug, Clone, PartialEq)]
pub struct TransformationConfig {
    pub root_dir: PathBuf,
    pub data_path: PathBuf,
    /// Validation status file gating this stage
    pub status_file: PathBuf,
}

/// Loads the configuration documents and derives per-stage records
///
/// Loading creates the artifacts root; each stage accessor creates that
/// stage's root directory on demand. Both steps are idempotent.
#[derive(Debug)]
pub struct ConfigManager {
    config: PipelineConfig,
    params: Params,
    schema: SchemaSpec,
}

impl ConfigManager {
    /// Load all three documents and ensure the artifacts root exists
    pub fn load(paths: &ConfigPaths) -> Result<Self> {
        let config: PipelineConfig = read_yaml(&paths.config)?;
        let params: Params = read_yaml(&paths.params)?;
        let schema: SchemaSpec = read_yaml(&paths.schema)?;

        create_directory(&config.artifacts_root)?;

        info!(
            config = %paths.config.display(),
            params = %paths.params.display(),
            schema = %paths.schema.display(),
            "Configuration loaded"
        );

        Ok(Self {
            config,
            params,
            schema,
        })
    }

    /// The loaded pipeline configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The loaded model parameters
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The loaded dataset schema
    pub fn schema(&self) -> &SchemaSpec {
        &self.schema
    }

    /// Configuration record for the ingestion stage
    pub fn ingestion_config(&self) -> Result<IngestionConfig> {
        let section = &self.config.data_ingestion;
        create_directory(&section.root_dir)?;

        Ok(IngestionConfig {
            root_dir: section.root_dir.clone(),
            source_url: section.source_url.clone(),
            local_data_file: section.local_data_file.clone(),
            unzip_dir: section.unzip_dir.clone(),
        })
    }

    /// Configuration record for the validation stage
    pub fn validation_config(&self) -> Result<ValidationConfig> {
        let section = &self.config.data_validation;
        create_directory(&section.root_dir)?;

        Ok(ValidationConfig {
            root_dir: section.root_dir.clone(),
            unzip_data_dir: section.unzip_data_dir.clone(),
            status_file: section.status_file.clone(),
            schema: self.schema.clone(),
        })
    }

    /// Configuration record for the transformation stage
    pub fn transformation_config(&self) -> Result<TransformationConfig> {
        let section = &self.config.data_transformation;
        create_directory(&section.root_dir)?;

        Ok(TransformationConfig {
            root_dir: section.root_dir.clone(),
            data_path: section.data_path.clone(),
            status_file: self.config.data_validation.status_file.clone(),
        })
    }
}

/// Read a YAML document into a typed value
///
/// Rejects missing files, invalid YAML, and empty documents (YAML null).
fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(PipelineError::config(format!(
            "file not found: '{}'",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        PipelineError::config(format!("failed to read '{}': {}", path.display(), e))
    })?;

    let value: serde_yaml::Value = serde_yaml::from_str(&content).map_err(|e| {
        PipelineError::config(format!("failed to parse '{}': {}", path.display(), e))
    })?;

    if value.is_null() {
        return Err(PipelineError::config(format!(
            "file is empty: '{}'",
            path.display()
        )));
    }

    serde_yaml::from_value(value).map_err(|e| {
        PipelineError::config(format!("invalid structure in '{}': {}", path.display(), e))
    })
}

/// Idempotently create a directory
fn create_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| {
        PipelineError::config(format!(
            "failed to create directory '{}': {}",
            path.display(),
            e
        ))
    })?;
    debug!(dir = %path.display(), "Directory ensured");
    Ok(())
}
