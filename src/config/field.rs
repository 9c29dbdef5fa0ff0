//! Field declarations
//!
//! A field is one named slot in a raw record, tagged as feature or label,
//! with an ordered list of conversion-function specs. The role is resolved
//! once at construction into a closed set of kinds; record conversion
//! dispatches on the kind, never on the name string.

use serde::Deserialize;
use serde_json::Value;

use crate::IMAGE_FIELD_NAME;

/// One conversion-function spec declared on a field
#[derive(Debug, Clone, Deserialize)]
pub struct ConverterSpec {
    /// Function name, resolved against the converter catalog
    pub function: String,
    /// Function arguments, interpreted by the instantiated unit
    #[serde(default)]
    pub args: Value,
}

/// How a field contributes to the converted record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Appends its elements to the feature sequence
    Feature,
    /// Appends its elements to the label sequence
    Label,
    /// Replaces the feature sequence with its value's first element.
    /// Sharp edge: when mixed with other feature fields this drops
    /// whatever they accumulated before it. Kept bit-for-bit compatible
    /// with the existing artifact contents.
    ImageFeature,
}

impl FieldKind {
    /// Contribute a transformed value to the accumulating sequences
    pub fn contribute(self, value: Value, features: &mut Vec<Value>, labels: &mut Vec<Value>) {
        match self {
            FieldKind::Label => labels.extend(elements(value)),
            FieldKind::Feature => features.extend(elements(value)),
            FieldKind::ImageFeature => {
                let first = match value {
                    Value::Array(items) => items.into_iter().next(),
                    other => Some(other),
                };
                if let Some(first) = first {
                    *features = elements(first);
                }
            }
        }
    }
}

/// Elements a transformed value contributes to a sequence.
///
/// Arrays contribute their items; null and the empty-string placeholder
/// contribute nothing; any other value contributes itself.
fn elements(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        Value::String(s) if s.is_empty() => Vec::new(),
        other => vec![other],
    }
}

/// One declared field of the dataset
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawFieldSpec")]
pub struct FieldSpec {
    /// Field name, the lookup key into each raw record
    pub field_name: String,
    /// Resolved contribution kind
    pub kind: FieldKind,
    /// Composite-field flag (multi-name extraction, currently unused)
    pub is_multiple: bool,
    /// Ordered conversion-function specs
    pub functions: Vec<ConverterSpec>,
    /// Per-field statistics block (labels carry `unique` counts here)
    pub statistic: Option<Value>,
}

impl FieldSpec {
    pub fn is_label(&self) -> bool {
        self.kind == FieldKind::Label
    }
}

/// Wire form of a field declaration as it appears in the `datasets` block
#[derive(Debug, Deserialize)]
struct RawFieldSpec {
    field_name: String,
    #[serde(default)]
    is_label: Value,
    #[serde(default)]
    is_multiple: Value,
    #[serde(default)]
    functions: Vec<ConverterSpec>,
    #[serde(default)]
    statistic: Option<Value>,
}

impl From<RawFieldSpec> for FieldSpec {
    fn from(raw: RawFieldSpec) -> Self {
        let kind = if flag(&raw.is_label) {
            FieldKind::Label
        } else if raw.field_name == IMAGE_FIELD_NAME {
            FieldKind::ImageFeature
        } else {
            FieldKind::Feature
        };
        FieldSpec {
            field_name: raw.field_name,
            kind,
            is_multiple: flag(&raw.is_multiple),
            functions: raw.functions,
            statistic: raw.statistic,
        }
    }
}

/// Descriptor flags arrive as JSON booleans or as "Y"/"N" strings
fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.as_str(), "Y" | "y" | "true"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label_role_from_yn_flag() {
        let spec: FieldSpec =
            serde_json::from_value(json!({"field_name": "lbl", "is_label": "Y"})).unwrap();
        assert_eq!(spec.kind, FieldKind::Label);
        assert!(spec.functions.is_empty());
    }

    #[test]
    fn test_image_name_resolves_to_image_kind() {
        let spec: FieldSpec =
            serde_json::from_value(json!({"field_name": "image", "is_label": false})).unwrap();
        assert_eq!(spec.kind, FieldKind::ImageFeature);
    }

    #[test]
    fn test_feature_contribute_appends_elements() {
        let mut features = vec![json!(9)];
        let mut labels = Vec::new();
        FieldKind::Feature.contribute(json!([1, 2]), &mut features, &mut labels);
        assert_eq!(features, vec![json!(9), json!(1), json!(2)]);
        assert!(labels.is_empty());
    }

    #[test]
    fn test_image_contribute_replaces_features() {
        let mut features = vec![json!(9)];
        let mut labels = Vec::new();
        FieldKind::ImageFeature.contribute(json!([[1, 2], [3, 4]]), &mut features, &mut labels);
        assert_eq!(features, vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_empty_string_contributes_nothing() {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        FieldKind::Feature.contribute(json!(""), &mut features, &mut labels);
        assert!(features.is_empty());
    }
}
