//! Unit tests for job descriptor loading
//!
//! Covers accessor defaults, value coercion, and the load error path.

use serde_json::json;
use tempfile::TempDir;

use dataprep_core::config::{JobConfig, JobKind};
use dataprep_core::DataPrepError;

fn write_job(dir: &TempDir, hist_no: &str, task_idx: &str, body: &str) {
    let path = dir.path().join(format!("{}_{}.job", hist_no, task_idx));
    std::fs::write(path, body).unwrap();
}

fn load(dir: &TempDir, hist_no: &str, task_idx: &str) -> JobConfig {
    JobConfig::load(hist_no, task_idx, JobKind::Training, dir.path().to_str().unwrap()).unwrap()
}

#[test]
fn test_defaults_for_minimal_descriptor() {
    let dir = TempDir::new().unwrap();
    write_job(&dir, "9001", "0", &json!({"datasets": {}, "algorithms": []}).to_string());

    let job = load(&dir, "9001", "0");
    assert_eq!(job.sampling_type(), "4");
    assert_eq!(job.sampling_ratio(), 0.70);
    assert!(job.algorithms().is_empty());
    assert_eq!(job.num_worker(), 1);
    assert_eq!(job.model_type_cd(), "");
    assert_eq!(job.learn_id(), "");
    assert_eq!(job.statistic_yn(), "N");
    assert_eq!(job.detect_type_cd(), "1");
    assert!(job.models().is_empty());
    assert!(job.model_id_list().is_empty());
    assert!(job.fields().is_empty());
}

#[test]
fn test_sampling_ratio_from_edu_per() {
    let dir = TempDir::new().unwrap();
    write_job(&dir, "9002", "0", &json!({"edu_per": 50}).to_string());
    assert_eq!(load(&dir, "9002", "0").sampling_ratio(), 0.50);

    // descriptor values also arrive as digit strings
    write_job(&dir, "9002", "1", &json!({"edu_per": "30"}).to_string());
    assert_eq!(load(&dir, "9002", "1").sampling_ratio(), 0.30);
}

#[test]
fn test_worker_count_coercion() {
    let dir = TempDir::new().unwrap();
    write_job(&dir, "9003", "0", &json!({"num_worker": "3"}).to_string());
    assert_eq!(load(&dir, "9003", "0").num_worker(), 3);

    write_job(&dir, "9003", "1", &json!({"num_worker": 2}).to_string());
    assert_eq!(load(&dir, "9003", "1").num_worker(), 2);
}

#[test]
fn test_algorithm_accessors() {
    let dir = TempDir::new().unwrap();
    let descriptor = json!({
        "algorithms": [
            {"data_type": "Sequence", "algorithm_type": "Regressor"},
            {}
        ],
        "model_type_cd": "2",
        "learn_id": "L-7",
        "model_id": "M-7"
    });
    write_job(&dir, "9004", "0", &descriptor.to_string());

    let job = load(&dir, "9004", "0");
    assert_eq!(job.algorithms().len(), 2);
    assert_eq!(job.data_type(0), "Sequence");
    assert_eq!(job.alg_type(0), "Regressor");
    assert_eq!(job.data_type(1), "Single");
    assert_eq!(job.alg_type(1), "Classifier");
    assert_eq!(job.model_type_cd(), "2");
    assert_eq!(job.learn_id(), "L-7");
    assert_eq!(job.model_id(), "M-7");
}

#[test]
fn test_dataset_statistics_are_owned() {
    let dir = TempDir::new().unwrap();
    let descriptor = json!({
        "datasets": {
            "dist_lines": [120, 80],
            "statistic": {"label": {"unique": {"0": 60, "1": 80, "2": 60}}},
            "fields": [
                {"field_name": "f1", "is_label": "N"},
                {"field_name": "lbl", "is_label": "Y"}
            ]
        }
    });
    write_job(&dir, "9005", "0", &descriptor.to_string());

    let job = load(&dir, "9005", "0");
    assert_eq!(job.dataset_lines(), &[120, 80]);
    assert_eq!(job.label_cardinality(), 3);
    assert_eq!(job.fields().len(), 2);
    assert!(job.fields()[1].is_label());
}

#[test]
fn test_truncated_descriptor_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    write_job(&dir, "9006", "0", "{\"datasets\": {\"dist_li");

    let err = JobConfig::load("9006", "0", JobKind::Training, dir.path().to_str().unwrap())
        .unwrap_err();
    match err {
        DataPrepError::JobFileLoad { filename } => assert_eq!(filename, "9006_0.job"),
        other => panic!("expected JobFileLoad, got {:?}", other),
    }
}

#[test]
fn test_missing_descriptor_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let err = JobConfig::load("404", "9", JobKind::Detection, dir.path().to_str().unwrap())
        .unwrap_err();
    assert!(err.is_config_error());
    match err {
        DataPrepError::JobFileLoad { filename } => assert_eq!(filename, "404_9.job"),
        other => panic!("expected JobFileLoad, got {:?}", other),
    }
}

#[test]
fn test_non_object_descriptor_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    write_job(&dir, "9007", "0", "[1, 2, 3]");
    assert!(JobConfig::load("9007", "0", JobKind::Training, dir.path().to_str().unwrap()).is_err());
}
