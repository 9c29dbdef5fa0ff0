//! Storage channel contract
//!
//! All remote file access goes through this trait; calls are synchronous
//! and may block for the duration of a remote round trip. Each pipeline
//! worker owns its channel handle exclusively.

use std::io::{BufRead, Read};

use serde_json::Value;
use tracing::error;

use crate::error::{DataPrepError, Result};

use super::stream::JsonLineStream;

/// Synchronous file access to durable storage.
///
/// Each pipeline worker owns its channel handle exclusively, so
/// implementations are not required to be shareable across threads.
pub trait StorageChannel: Send {
    /// Open a remote file for buffered reading
    fn open_read(&self, path: &str) -> Result<Box<dyn BufRead + Send>>;

    /// Create or truncate a remote file and write `data` to it
    fn write_all(&self, path: &str, data: &[u8]) -> Result<()>;

    /// Rename a remote file
    fn rename(&self, src: &str, dst: &str) -> Result<()>;

    /// Read and parse one JSON file.
    ///
    /// Failures are logged with the path before propagating.
    fn load_json(&self, path: &str) -> Result<Value> {
        let mut reader = self.open_read(path)?;
        let mut contents = String::new();
        reader
            .read_to_string(&mut contents)
            .map_err(|e| storage_error(path, &e))?;
        serde_json::from_str(&contents).map_err(|e| {
            error!("malformed JSON in {}: {}", path, e);
            DataPrepError::Storage {
                message: format!("malformed JSON in {}: {}", path, e),
            }
        })
    }

    /// Stream successive JSON records from a line-oriented file.
    ///
    /// The returned iterator ends with `None`; malformed lines are
    /// logged and skipped, never terminating the stream.
    fn json_lines(&self, path: &str) -> Result<JsonLineStream> {
        Ok(JsonLineStream::new(self.open_read(path)?, path))
    }
}

pub(crate) fn storage_error(path: &str, e: &dyn std::fmt::Display) -> DataPrepError {
    error!("storage error at {}: {}", path, e);
    DataPrepError::Storage {
        message: format!("{}: {}", path, e),
    }
}
