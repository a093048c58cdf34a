//! Data ingestion stage
//!
//! Downloads the source archive (skipping the fetch when the file is
//! already present) and extracts every entry into the configured
//! directory. Extraction always runs and overwrites previously extracted
//! contents.

use crate::config::IngestionConfig;
use crate::error::{PipelineError, Result};
use crate::stages::Stage;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Ingestion stage: fetch then extract
pub struct DataIngestion {
    config: IngestionConfig,
}

impl DataIngestion {
    /// Stable stage name
    pub const NAME: &'static str = "data_ingestion";

    /// Create the stage from its configuration record
    pub fn new(config: IngestionConfig) -> Self {
        Self { config }
    }

    /// Download the archive from `source_url` into `local_data_file`
    ///
    /// If the target file already exists the fetch is skipped entirely:
    /// no network call is made and the file's bytes are left unchanged.
    /// There is no retry and no cleanup of a partially written file on
    /// failure.
    pub fn fetch(&self) -> Result<()> {
        if self.config.local_data_file.exists() {
            info!(
                file = %self.config.local_data_file.display(),
                "Archive already present, skipping download"
            );
            return Ok(());
        }

        let url = self.config.source_url.as_str();
        info!(url, "Downloading archive");

        let client = reqwest::blocking::Client::new();
        let mut response = client
            .get(url)
            .send()
            .map_err(|e| PipelineError::download(url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(PipelineError::download(
                url,
                format!("server returned {}", response.status()),
            ));
        }

        let total_size = response.content_length().unwrap_or(0);
        let pb = ProgressBar::new(total_size);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message(format!("Downloading {}", url));

        let file = fs::File::create(&self.config.local_data_file)
            .map_err(|e| PipelineError::download(url, e.to_string()))?;
        let mut writer = pb.wrap_write(file);

        let bytes = std::io::copy(&mut response, &mut writer)
            .map_err(|e| PipelineError::download(url, e.to_string()))?;
        pb.finish_and_clear();

        let digest = tdp_common::checksum::compute_file_checksum(&self.config.local_data_file)
            .map_err(|e| PipelineError::download(url, e.to_string()))?;

        info!(
            file = %self.config.local_data_file.display(),
            bytes,
            sha256 = %digest,
            "Download complete"
        );

        Ok(())
    }

    /// Extract every entry of the archive into `unzip_dir`
    ///
    /// Re-extraction over existing contents succeeds and overwrites them.
    pub fn extract(&self) -> Result<()> {
        let archive_path = &self.config.local_data_file;

        fs::create_dir_all(&self.config.unzip_dir)
            .map_err(|e| self.extraction_error(format!("failed to create unzip dir: {e}")))?;

        let file = fs::File::open(archive_path)
            .map_err(|e| self.extraction_error(format!("cannot open archive: {e}")))?;
        let mut archive = zip::ZipArchive::new(file)
            .map_err(|e| self.extraction_error(e.to_string()))?;

        info!(
            archive = %archive_path.display(),
            entries = archive.len(),
            "Extracting archive"
        );

        for index in 0..archive.len() {
            let mut entry = archive
                .by_index(index)
                .map_err(|e| self.extraction_error(e.to_string()))?;

            let Some(relative) = entry.enclosed_name().map(Path::to_path_buf) else {
                warn!(name = entry.name(), "Skipping entry with unsafe path");
                continue;
            };
            let outpath = self.config.unzip_dir.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&outpath)
                    .map_err(|e| self.extraction_error(e.to_string()))?;
            } else {
                if let Some(parent) = outpath.parent() {
                    fs::create_dir_all(parent)
                        .map_err(|e| self.extraction_error(e.to_string()))?;
                }
                let mut outfile = fs::File::create(&outpath)
                    .map_err(|e| self.extraction_error(e.to_string()))?;
                std::io::copy(&mut entry, &mut outfile)
                    .map_err(|e| self.extraction_error(e.to_string()))?;
                debug!(file = %outpath.display(), "Extracted");
            }
        }

        info!(dir = %self.config.unzip_dir.display(), "Extraction complete");
        Ok(())
    }

    fn extraction_error(&self, reason: String) -> PipelineError {
        PipelineError::extraction(self.config.local_data_file.display().to_string(), reason)
    }
}

impl Stage for DataIngestion {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn execute(&self) -> Result<()> {
        self.fetch()?;
        self.extract()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    // Unroutable without DNS; fetch must never get as far as resolving it
    // when the local file already exists.
    const DEAD_URL: &str = "http://127.0.0.1:1/data.zip";

    fn config_in(dir: &TempDir) -> IngestionConfig {
        IngestionConfig {
            root_dir: dir.path().to_path_buf(),
            source_url: DEAD_URL.to_string(),
            local_data_file: dir.path().join("data.zip"),
            unzip_dir: dir.path().join("unzipped"),
        }
    }

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, contents) in entries {
            writer
                .start_file(*name, zip::write::FileOptions::default())
                .unwrap();
            writer.write_all(contents).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_fetch_skips_when_file_exists() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        fs::write(&config.local_data_file, b"cached archive bytes").unwrap();

        let stage = DataIngestion::new(config.clone());
        stage.fetch().unwrap();

        // The dead URL proves no request was attempted, and the bytes are
        // untouched.
        let bytes = fs::read(&config.local_data_file).unwrap();
        assert_eq!(bytes, b"cached archive bytes");

        // A second call is equally a no-op.
        stage.fetch().unwrap();
        assert_eq!(fs::read(&config.local_data_file).unwrap(), b"cached archive bytes");
    }

    #[test]
    fn test_fetch_failure_is_download_error() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let stage = DataIngestion::new(config);
        let err = stage.fetch().unwrap_err();
        assert!(matches!(err, PipelineError::Download { .. }));
    }

    #[test]
    fn test_extract_unpacks_all_entries() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        write_zip(
            &config.local_data_file,
            &[
                ("data.csv", b"a,b\n1,2\n".as_slice()),
                ("nested/readme.txt", b"hello".as_slice()),
            ],
        );

        let stage = DataIngestion::new(config.clone());
        stage.extract().unwrap();

        assert_eq!(
            fs::read_to_string(config.unzip_dir.join("data.csv")).unwrap(),
            "a,b\n1,2\n"
        );
        assert_eq!(
            fs::read_to_string(config.unzip_dir.join("nested/readme.txt")).unwrap(),
            "hello"
        );
    }

    #[test]
    fn test_reextract_overwrites_existing_contents() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        write_zip(&config.local_data_file, &[("data.csv", b"a,b\n1,2\n".as_slice())]);

        let stage = DataIngestion::new(config.clone());
        stage.extract().unwrap();

        // Tamper with the extracted file; a second extract restores it.
        fs::write(config.unzip_dir.join("data.csv"), "tampered").unwrap();
        stage.extract().unwrap();
        assert_eq!(
            fs::read_to_string(config.unzip_dir.join("data.csv")).unwrap(),
            "a,b\n1,2\n"
        );
    }

    #[test]
    fn test_extract_missing_archive_is_extraction_error() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let stage = DataIngestion::new(config);
        let err = stage.extract().unwrap_err();
        assert!(matches!(err, PipelineError::Extraction { .. }));
    }

    #[test]
    fn test_extract_corrupt_archive_is_extraction_error() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        fs::write(&config.local_data_file, b"this is not a zip file").unwrap();

        let stage = DataIngestion::new(config);
        let err = stage.extract().unwrap_err();
        assert!(matches!(err, PipelineError::Extraction { .. }));
    }
}
