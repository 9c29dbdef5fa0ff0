//! Line-oriented JSON record streaming
//!
//! Yields successive parsed records from a remote file. Exhaustion is
//! the iterator's own `None` — there is no in-band sentinel value that
//! could collide with legitimate payload data. A single malformed line
//! is logged and skipped; the stream continues.

use std::io::BufRead;

use serde_json::Value;
use tracing::error;

/// Iterator over JSON records in a line-oriented remote file
pub struct JsonLineStream {
    reader: Box<dyn BufRead + Send>,
    path: String,
}

impl JsonLineStream {
    pub fn new(reader: Box<dyn BufRead + Send>, path: &str) -> Self {
        Self {
            reader,
            path: path.to_string(),
        }
    }
}

impl Iterator for JsonLineStream {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        loop {
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    match serde_json::from_str(trimmed) {
                        Ok(value) => return Some(value),
                        Err(e) => {
                            error!("skipping malformed line in {}: {} ({})", self.path, trimmed, e);
                        }
                    }
                }
                Err(e) => {
                    error!("read failed in {}: {}", self.path, e);
                    return None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    fn stream(contents: &str) -> JsonLineStream {
        JsonLineStream::new(Box::new(Cursor::new(contents.to_string())), "test.done")
    }

    #[test]
    fn test_yields_records_then_none() {
        let mut s = stream("{\"a\": 1}\n{\"a\": 2}\n");
        assert_eq!(s.next(), Some(json!({"a": 1})));
        assert_eq!(s.next(), Some(json!({"a": 2})));
        assert_eq!(s.next(), None);
    }

    #[test]
    fn test_malformed_line_is_skipped_not_fatal() {
        let mut s = stream("{\"a\": 1}\nnot json at all\n{\"a\": 3}\n");
        assert_eq!(s.next(), Some(json!({"a": 1})));
        assert_eq!(s.next(), Some(json!({"a": 3})));
        assert_eq!(s.next(), None);
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let mut s = stream("\n\n{\"a\": 1}\n\n");
        assert_eq!(s.next(), Some(json!({"a": 1})));
        assert_eq!(s.next(), None);
    }
}
