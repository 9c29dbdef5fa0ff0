//! dataprep-core - Record-to-tensor conversion stage
//!
//! This crate converts raw dataset records into fixed-shape
//! feature/label arrays for model training:
//! - Job descriptor loading and dataset statistics
//! - Per-field conversion chains resolved from a remote catalog
//! - Record conversion and tensor shape inference
//! - Artifact persistence through a storage channel

pub mod config;
pub mod convert;
pub mod data;
pub mod error;
pub mod storage;

pub use error::{DataPrepError, Result};

/// Job descriptor file suffix
pub const JOB_FILE_SUFFIX: &str = ".job";

/// Converted artifact file suffix
pub const ARTIFACT_FILE_SUFFIX: &str = ".dp";

/// Reserved field name whose value is the sole feature source for a record
pub const IMAGE_FIELD_NAME: &str = "image";

/// Default worker count when the descriptor does not declare one
pub const DEFAULT_NUM_WORKER: u32 = 1;
