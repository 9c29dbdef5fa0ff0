//! Dataset statistics
//!
//! Per-field distribution line counts and the statistics block produced
//! by the profiling pass that ran before this conversion stage.

use serde_json::Value;

use super::field::FieldSpec;

/// Statistics for one job's dataset, owned by the job configuration
#[derive(Debug, Clone, Default)]
pub struct DatasetInfo {
    /// Line counts per distribution file
    dist_lines: Vec<u64>,
    /// Raw statistics block (`label.unique` is consumed for cardinality)
    statistic: Value,
    /// Declared fields, in declaration order
    fields: Vec<FieldSpec>,
}

impl DatasetInfo {
    /// Build from the descriptor's `datasets` object.
    ///
    /// A missing or non-object value yields an empty dataset info.
    pub fn from_descriptor(datasets: Option<&Value>) -> Self {
        let Some(Value::Object(map)) = datasets else {
            return Self::default();
        };

        let dist_lines = map
            .get("dist_lines")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_u64).collect())
            .unwrap_or_default();

        let statistic = map.get("statistic").cloned().unwrap_or(Value::Null);

        let fields = match map.get("fields") {
            Some(v) => match serde_json::from_value(v.clone()) {
                Ok(fields) => fields,
                Err(e) => {
                    tracing::warn!("malformed fields block in datasets: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Self {
            dist_lines,
            statistic,
            fields,
        }
    }

    pub fn dist_lines(&self) -> &[u64] {
        &self.dist_lines
    }

    pub fn statistic(&self) -> &Value {
        &self.statistic
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Number of distinct label values recorded by the profiling pass
    /// (`statistic.label.unique` map size; 0 when absent)
    pub fn label_cardinality(&self) -> usize {
        self.statistic
            .get("label")
            .and_then(|label| label.get("unique"))
            .and_then(Value::as_object)
            .map(|unique| unique.len())
            .unwrap_or(0)
    }

    /// One-line summary for debug logging
    pub fn summary(&self) -> String {
        format!(
            "dataset: {} fields, {} dist files, {} label values",
            self.fields.len(),
            self.dist_lines.len(),
            self.label_cardinality()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_when_datasets_absent() {
        let info = DatasetInfo::from_descriptor(None);
        assert!(info.fields().is_empty());
        assert!(info.dist_lines().is_empty());
        assert_eq!(info.label_cardinality(), 0);
    }

    #[test]
    fn test_label_cardinality_from_statistic() {
        let datasets = json!({
            "dist_lines": [100, 50],
            "statistic": {"label": {"unique": {"0": 60, "1": 50, "2": 40}}},
            "fields": [{"field_name": "f1", "is_label": "N"}]
        });
        let info = DatasetInfo::from_descriptor(Some(&datasets));
        assert_eq!(info.dist_lines(), &[100, 50]);
        assert_eq!(info.fields().len(), 1);
        assert_eq!(info.label_cardinality(), 3);
    }
}
