//! TDP Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared utilities for the TDP workspace members:
//!
//! - **Logging**: tracing subscriber setup with console and/or rolling
//!   file output
//! - **Checksums**: SHA-256 digests for downloaded artifacts

pub mod checksum;
pub mod logging;
