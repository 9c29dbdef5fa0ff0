//! Pipeline orchestration
//!
//! Drives one worker's conversion run: read and convert all records,
//! infer the model's input/output tensor shapes, write the artifact.

use serde_json::{json, Value};
use tracing::{error, info};

use crate::config::field::FieldSpec;
use crate::config::job::JobConfig;
use crate::error::Result;
use crate::storage::StorageChannel;
use crate::ARTIFACT_FILE_SUFFIX;

use super::reader::RecordReader;

/// Inferred tensor shapes for one job.
///
/// Returned by the pipeline instead of being written back into the job
/// configuration, which stays immutable after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorShapes {
    /// Input tensor shape, batch dimension dropped
    pub input_units: Vec<usize>,
    /// Output cardinality, from the label field's statistics
    pub output_units: usize,
}

/// One worker's conversion pipeline
pub struct ConversionPipeline<'a> {
    job: &'a JobConfig,
    channel: &'a dyn StorageChannel,
}

impl<'a> ConversionPipeline<'a> {
    pub fn new(job: &'a JobConfig, channel: &'a dyn StorageChannel) -> Self {
        Self { job, channel }
    }

    /// Convert every record in `file_list`, infer shapes, and persist
    /// the artifact next to `source_path`.
    pub fn run(
        &self,
        reader: &mut dyn RecordReader,
        file_list: &[String],
        source_path: &str,
    ) -> Result<TensorShapes> {
        let fields = self.job.fields();
        let records = reader.read(file_list, fields)?;
        info!("converted {} records", records.len());

        let features: Vec<Vec<Value>> = records.iter().map(|r| r.features.clone()).collect();
        let targets: Vec<Vec<Value>> = records.iter().map(|r| r.labels.clone()).collect();

        let shapes = self.infer_shapes(&features, fields);
        self.write_artifact(&features, &targets, source_path);
        Ok(shapes)
    }

    /// Infer tensor shapes from the converted feature matrix and the
    /// label field's statistics.
    pub fn infer_shapes(&self, features: &[Vec<Value>], fields: &[FieldSpec]) -> TensorShapes {
        let input_units = input_units(features);
        let output_units = output_units(fields);
        info!("input_units : {:?}", input_units);
        info!("output_units : {}", output_units);
        TensorShapes {
            input_units,
            output_units,
        }
    }

    /// Write `{"features": ..., "targets": ...}` as indented JSON to
    /// `{dir(source_path, -2)}/{hist_no}_{task_idx}.dp`.
    ///
    /// Best-effort: failures are logged and swallowed, so callers must
    /// not assume the artifact exists afterwards.
    pub fn write_artifact<F, T>(&self, features: &F, targets: &T, source_path: &str)
    where
        F: serde::Serialize,
        T: serde::Serialize,
    {
        let save_dir = strip_segments(source_path, 2);
        let dest = format!(
            "{}/{}_{}{}",
            save_dir,
            self.job.hist_no(),
            self.job.task_idx(),
            ARTIFACT_FILE_SUFFIX
        );

        let artifact = json!({
            "features": features,
            "targets": targets,
        });

        let body = match serde_json::to_string_pretty(&artifact) {
            Ok(body) => body,
            Err(e) => {
                error!("artifact serialization failed for {}: {}", dest, e);
                return;
            }
        };

        match self.channel.write_all(&dest, body.as_bytes()) {
            Ok(()) => info!("artifact written to {}", dest),
            Err(e) => error!("artifact write failed for {}: {}", dest, e),
        }
    }
}

/// Shape of the feature matrix with the leading batch dimension dropped.
///
/// Descends uniform dimensions only, so a first feature vector of
/// length N yields `[N]`, nested one level deeper `[N, M]`, and so on.
fn input_units(features: &[Vec<Value>]) -> Vec<usize> {
    let mut units = Vec::new();
    let Some(first) = features.first() else {
        return units;
    };
    units.push(first.len());

    let mut cursor = first.first();
    while let Some(Value::Array(inner)) = cursor {
        units.push(inner.len());
        cursor = inner.first();
    }
    units
}

/// Cardinality of the label field's `unique` statistics map.
///
/// Falls back to 1 (logged) when the block is malformed or absent.
fn output_units(fields: &[FieldSpec]) -> usize {
    for field in fields {
        if !field.is_label() {
            continue;
        }
        match field
            .statistic
            .as_ref()
            .and_then(|stat| stat.get("unique"))
            .and_then(Value::as_object)
        {
            Some(unique) => return unique.len(),
            None => {
                error!(
                    "label field '{}' has no usable unique statistics, defaulting output to 1",
                    field.field_name
                );
                return 1;
            }
        }
    }
    error!("no label field declared, defaulting output to 1");
    1
}

/// Remove the last `n` path segments
fn strip_segments(path: &str, n: usize) -> String {
    let mut end = path.len();
    let mut remaining = n;
    while remaining > 0 {
        match path[..end].rfind('/') {
            Some(pos) => end = pos,
            None => return String::new(),
        }
        remaining -= 1;
    }
    path[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_segments() {
        assert_eq!(strip_segments("/data/div/part/file.done", 2), "/data/div");
        assert_eq!(strip_segments("a/b", 2), "");
    }

    #[test]
    fn test_input_units_drops_batch_dimension() {
        let features = vec![vec![json!(1), json!(2), json!(3)]];
        assert_eq!(input_units(&features), vec![3]);
        assert!(input_units(&[]).is_empty());
    }

    #[test]
    fn test_input_units_descends_nested_rows() {
        let features = vec![vec![json!([1, 2]), json!([3, 4])]];
        assert_eq!(input_units(&features), vec![2, 2]);
    }
}
