//! In-process storage channel
//!
//! Backs the storage contract with a map of path to contents. Used by
//! tests and local dry runs where no SFTP endpoint exists.

use std::collections::HashMap;
use std::io::{BufRead, Cursor};
use std::sync::{Arc, Mutex};

use crate::error::{DataPrepError, Result};

use super::channel::StorageChannel;

/// Map-backed storage channel
#[derive(Default, Clone)]
pub struct MemoryChannel {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file before a run
    pub fn put(&self, path: &str, contents: impl Into<Vec<u8>>) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), contents.into());
    }

    /// Snapshot a file's contents, if present
    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }
}

impl StorageChannel for MemoryChannel {
    fn open_read(&self, path: &str) -> Result<Box<dyn BufRead + Send>> {
        let contents = self
            .get(path)
            .ok_or_else(|| DataPrepError::PathNotFound {
                path: path.to_string(),
            })?;
        Ok(Box::new(Cursor::new(contents)))
    }

    fn write_all(&self, path: &str, data: &[u8]) -> Result<()> {
        self.put(path, data.to_vec());
        Ok(())
    }

    fn rename(&self, src: &str, dst: &str) -> Result<()> {
        let mut files = self.files.lock().unwrap();
        match files.remove(src) {
            Some(contents) => {
                files.insert(dst.to_string(), contents);
                Ok(())
            }
            None => Err(DataPrepError::PathNotFound {
                path: src.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_moves_contents() {
        let channel = MemoryChannel::new();
        channel.put("/a.tmp", "x");
        channel.rename("/a.tmp", "/a").unwrap();
        assert_eq!(channel.get("/a"), Some(b"x".to_vec()));
        assert!(channel.get("/a.tmp").is_none());
    }

    #[test]
    fn test_open_read_missing_path() {
        let channel = MemoryChannel::new();
        assert!(matches!(
            channel.open_read("/missing"),
            Err(DataPrepError::PathNotFound { .. })
        ));
    }
}
