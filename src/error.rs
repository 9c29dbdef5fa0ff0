//! Error types for dataprep-core
//!
//! Taxonomy covering configuration load, chain construction,
//! per-record conversion, and storage-channel errors.

use thiserror::Error;

/// Primary error type for all conversion-stage operations
#[derive(Debug, Error)]
pub enum DataPrepError {
    // ========== Configuration Errors ==========

    /// Job descriptor file missing, unreadable, or not valid JSON
    #[error("job descriptor load failed: {filename}")]
    JobFileLoad { filename: String },

    // ========== Chain Construction Errors ==========

    /// Converter catalog fetch or decode failed
    #[error("catalog fetch failed from {url}: {reason}")]
    CatalogFetch { url: String, reason: String },

    /// Function spec does not resolve against the catalog
    #[error("unknown conversion function '{function}' for field '{field}'")]
    UnknownConverter { function: String, field: String },

    /// Catalog entry names an implementation this build does not provide
    #[error("unsupported converter unit '{unit}' (function '{function}')")]
    UnsupportedUnit { unit: String, function: String },

    // ========== Conversion Errors ==========

    /// A conversion unit rejected its input value
    #[error("conversion failed in '{unit}': {reason}")]
    ConvertFailed { unit: String, reason: String },

    // ========== Storage Errors ==========

    /// Storage channel operation failed
    #[error("storage operation failed: {message}")]
    Storage { message: String },

    /// Remote path not found
    #[error("path not found: {path}")]
    PathNotFound { path: String },
}

impl DataPrepError {
    /// Returns true if this error is a fatal configuration problem
    /// (retrying the same job will not help)
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DataPrepError::JobFileLoad { .. }
                | DataPrepError::UnknownConverter { .. }
                | DataPrepError::UnsupportedUnit { .. }
        )
    }
}

/// Result type alias for conversion-stage operations
pub type Result<T> = std::result::Result<T, DataPrepError>;
