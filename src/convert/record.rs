//! Record conversion
//!
//! Applies the per-field chains to one raw record and partitions the
//! results into feature and label contributions.

use serde_json::{Map, Value};

use crate::config::field::FieldSpec;
use crate::error::Result;

use super::chain::{apply_chain, ConversionChain};

/// One converted record: feature and label sequences plus the raw origin
#[derive(Debug, Clone)]
pub struct ConvertedRecord {
    pub features: Vec<Value>,
    pub labels: Vec<Value>,
    pub origin: Map<String, Value>,
}

/// Pure per-record converter.
///
/// For a fixed field-list/chain pair, `convert` is a deterministic
/// function of one record and performs no I/O. Unit failures propagate
/// unchanged; nothing is raised here.
pub struct RecordConverter;

impl RecordConverter {
    /// Convert one raw record in field declaration order.
    ///
    /// A field absent from the record runs its chain against an
    /// empty-string placeholder. Composite multi-name extraction is a
    /// known extension point and stays disabled.
    pub fn convert(
        record: Map<String, Value>,
        fields: &[FieldSpec],
        chains: &[ConversionChain],
    ) -> Result<ConvertedRecord> {
        let mut features = Vec::new();
        let mut labels = Vec::new();

        for (field, chain) in fields.iter().zip(chains) {
            let raw = record
                .get(&field.field_name)
                .cloned()
                .unwrap_or_else(|| Value::String(String::new()));

            let value = apply_chain(chain, raw)?;
            field.kind.contribute(value, &mut features, &mut labels);
        }

        Ok(ConvertedRecord {
            features,
            labels,
            origin: record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(json: Value) -> FieldSpec {
        serde_json::from_value(json).unwrap()
    }

    fn record(json: Value) -> Map<String, Value> {
        match json {
            Value::Object(map) => map,
            _ => panic!("record must be an object"),
        }
    }

    #[test]
    fn test_zero_unit_chains_pass_raw_values_through() {
        let fields = vec![
            field(json!({"field_name": "a", "is_label": "N"})),
            field(json!({"field_name": "b", "is_label": "Y"})),
        ];
        let chains = vec![Vec::new(), Vec::new()];

        let out = RecordConverter::convert(
            record(json!({"a": [1, 2], "b": [0]})),
            &fields,
            &chains,
        )
        .unwrap();

        assert_eq!(out.features, vec![json!(1), json!(2)]);
        assert_eq!(out.labels, vec![json!(0)]);
        assert_eq!(out.origin.get("a"), Some(&json!([1, 2])));
    }

    #[test]
    fn test_missing_field_runs_against_placeholder() {
        let fields = vec![field(json!({"field_name": "gone", "is_label": "N"}))];
        let chains = vec![Vec::new()];

        let out = RecordConverter::convert(record(json!({})), &fields, &chains).unwrap();
        assert!(out.features.is_empty());
        assert!(out.labels.is_empty());
    }

    #[test]
    fn test_image_field_replaces_accumulated_features() {
        let fields = vec![
            field(json!({"field_name": "other", "is_label": "N"})),
            field(json!({"field_name": "image", "is_label": "N"})),
        ];
        let chains = vec![Vec::new(), Vec::new()];

        let out = RecordConverter::convert(
            record(json!({"other": [9, 9], "image": [[1, 2], [3, 4]]})),
            &fields,
            &chains,
        )
        .unwrap();

        // image wins: earlier feature contributions are dropped
        assert_eq!(out.features, vec![json!(1), json!(2)]);
    }
}
