//! Error types for the TDP pipeline
//!
//! One variant per pipeline concern. Every error is fatal: stages log
//! where the failure arises and propagate unchanged to the driver, which
//! logs again and lets the process exit non-zero.

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Error taxonomy for the pipeline
///
/// I/O failures are mapped into the variant of the stage that owns them,
/// so a filesystem error during fetch surfaces as `Download`, not as a
/// bare I/O error.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Configuration file is missing, empty, or malformed
    #[error("Configuration error: {0}. Check the file path and YAML syntax.")]
    Config(String),

    /// Network or filesystem failure while fetching the archive
    #[error("Download failed for '{url}': {reason}. Check your network connection and the configured source_url.")]
    Download { url: String, reason: String },

    /// Archive is missing or corrupt
    #[error("Extraction failed for archive '{archive}': {reason}")]
    Extraction { archive: String, reason: String },

    /// Dataset cannot be read, the status file cannot be written, or a
    /// downstream stage is gated on a failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Train/test split failed
    #[error("Transformation error: {0}")]
    Transformation(String),
}

impl PipelineError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a download error
    pub fn download(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Download {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an extraction error
    pub fn extraction(archive: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Extraction {
            archive: archive.into(),
            reason: reason.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a transformation error
    pub fn transformation(msg: impl Into<String>) -> Self {
        Self::Transformation(msg.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_their_concern() {
        let err = PipelineError::config("file not found: 'config.yaml'");
        assert!(err.to_string().starts_with("Configuration error"));

        let err = PipelineError::download("http://example.com/data.zip", "connection refused");
        assert!(err.to_string().contains("http://example.com/data.zip"));
        assert!(err.to_string().contains("connection refused"));

        let err = PipelineError::extraction("data.zip", "invalid zip header");
        assert!(err.to_string().contains("data.zip"));

        let err = PipelineError::validation("cannot read dataset");
        assert!(err.to_string().starts_with("Validation error"));

        let err = PipelineError::transformation("cannot write train.csv");
        assert!(err.to_string().starts_with("Transformation error"));
    }
}
