//! Job configuration
//!
//! Loads one job descriptor file into an immutable configuration and
//! exposes typed accessors over it. Every accessor has a documented
//! default and cannot fail once the load has succeeded.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::error::{DataPrepError, Result};
use crate::JOB_FILE_SUFFIX;

use super::dataset::DatasetInfo;
use super::field::FieldSpec;

/// Kind of job this configuration drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    /// Standard model training
    Training,
    /// Real-time detection
    Detection,
}

/// Immutable configuration for one conversion job
#[derive(Debug, Clone)]
pub struct JobConfig {
    kind: JobKind,
    hist_no: String,
    task_idx: String,
    descriptor: Map<String, Value>,
    dataset_info: DatasetInfo,
}

impl JobConfig {
    /// Load `{job_dir}/{hist_no}_{task_idx}.job` and freeze it.
    ///
    /// Any I/O or parse failure is logged and surfaced as
    /// [`DataPrepError::JobFileLoad`] carrying the descriptor filename.
    pub fn load(hist_no: &str, task_idx: &str, kind: JobKind, job_dir: &str) -> Result<Self> {
        let filename = job_filename(hist_no, task_idx);
        let path = Path::new(job_dir).join(&filename);

        let descriptor = read_descriptor(&path).map_err(|e| {
            error!("failed to load job descriptor {}: {}", path.display(), e);
            DataPrepError::JobFileLoad {
                filename: filename.clone(),
            }
        })?;

        info!("job descriptor {}: {:?}", filename, descriptor);

        let dataset_info = DatasetInfo::from_descriptor(descriptor.get("datasets"));
        debug!("{}", dataset_info.summary());

        Ok(Self {
            kind,
            hist_no: hist_no.to_string(),
            task_idx: task_idx.to_string(),
            descriptor,
            dataset_info,
        })
    }

    // ---- identity

    pub fn kind(&self) -> JobKind {
        self.kind
    }

    pub fn hist_no(&self) -> &str {
        &self.hist_no
    }

    pub fn task_idx(&self) -> &str {
        &self.task_idx
    }

    /// Descriptor filename this configuration was loaded from
    pub fn job_filename(&self) -> String {
        job_filename(&self.hist_no, &self.task_idx)
    }

    // ---- dataset

    pub fn dataset_info(&self) -> &DatasetInfo {
        &self.dataset_info
    }

    pub fn fields(&self) -> &[FieldSpec] {
        self.dataset_info.fields()
    }

    pub fn dataset_lines(&self) -> &[u64] {
        self.dataset_info.dist_lines()
    }

    /// Distinct label values recorded by the profiling pass
    pub fn label_cardinality(&self) -> usize {
        self.dataset_info.label_cardinality()
    }

    // ---- sampling

    /// Sampling type code; "4" means no sampling
    pub fn sampling_type(&self) -> String {
        self.str_or("sample_type_cd", "4")
    }

    /// Fraction of the data designated for training (edu_per / 100)
    pub fn sampling_ratio(&self) -> f64 {
        self.int_or("edu_per", 70) as f64 / 100.0
    }

    pub fn key(&self) -> String {
        self.str_or("key", "")
    }

    // ---- algorithms

    /// Per-algorithm parameter objects, in declaration order
    pub fn algorithms(&self) -> Vec<Value> {
        self.descriptor
            .get("algorithms")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    /// `data_type` of the algorithm at `idx`, default "Single"
    pub fn data_type(&self, idx: usize) -> String {
        self.algorithm_str(idx, "data_type", "Single")
    }

    /// `algorithm_type` of the algorithm at `idx`, default "Classifier"
    pub fn alg_type(&self, idx: usize) -> String {
        self.algorithm_str(idx, "algorithm_type", "Classifier")
    }

    pub fn model_type_cd(&self) -> String {
        self.str_or("model_type_cd", "")
    }

    /// Advisory count of pipeline instances the orchestrator should run
    pub fn num_worker(&self) -> u32 {
        self.int_or("num_worker", crate::DEFAULT_NUM_WORKER as i64) as u32
    }

    pub fn learn_id(&self) -> String {
        self.str_or("learn_id", "")
    }

    pub fn model_id(&self) -> String {
        self.str_or("model_id", "")
    }

    pub fn statistic_yn(&self) -> String {
        self.str_or("statistic_yn", "N")
    }

    // ---- detection jobs

    pub fn detect_type_cd(&self) -> String {
        self.str_or("detect_type_cd", "1")
    }

    pub fn models(&self) -> Vec<Value> {
        self.list_or("models")
    }

    pub fn detect_id(&self) -> String {
        self.str_or("detect_id", "")
    }

    pub fn model_id_list(&self) -> Vec<Value> {
        self.list_or("model_id_list")
    }

    // ---- descriptor access helpers

    fn str_or(&self, key: &str, default: &str) -> String {
        self.descriptor
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    /// Integer descriptor values arrive as JSON numbers or digit strings
    fn int_or(&self, key: &str, default: i64) -> i64 {
        match self.descriptor.get(key) {
            Some(Value::Number(n)) => n.as_i64().unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    fn list_or(&self, key: &str) -> Vec<Value> {
        self.descriptor
            .get(key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    fn algorithm_str(&self, idx: usize, key: &str, default: &str) -> String {
        self.descriptor
            .get("algorithms")
            .and_then(Value::as_array)
            .and_then(|algs| algs.get(idx))
            .and_then(|alg| alg.get(key))
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }
}

/// `{hist_no}_{task_idx}.job`
fn job_filename(hist_no: &str, task_idx: &str) -> String {
    format!("{}_{}{}", hist_no, task_idx, JOB_FILE_SUFFIX)
}

fn read_descriptor(path: &Path) -> std::io::Result<Map<String, Value>> {
    let file = File::open(path)?;
    let value: Value = serde_json::from_reader(BufReader::new(file))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("descriptor is not a JSON object: {}", other),
        )),
    }
}
