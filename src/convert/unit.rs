//! Conversion units
//!
//! Each unit is an opaque transformation invoked through the uniform
//! `apply(value) -> value` contract. Chains fold a field's raw value
//! through its units in declaration order.
//!
//! The units here are the builtin implementations the catalog can name;
//! their internals are deliberately small — the pipeline only cares about
//! the contract.

use serde_json::{json, Value};

use crate::error::{DataPrepError, Result};

/// Uniform contract for one conversion unit
pub trait Converter: Send + Sync + std::fmt::Debug {
    /// Transform the running value, consuming the previous unit's output
    fn apply(&self, value: Value) -> Result<Value>;
}

/// Parses string input into a flat numeric vector.
///
/// Non-numeric tokens become 0.0, matching the profiling pass's
/// treatment of unparsable values.
#[derive(Debug)]
pub struct NumericCast;

impl Converter for NumericCast {
    fn apply(&self, value: Value) -> Result<Value> {
        let nums: Vec<Value> = match value {
            Value::Array(items) => items.into_iter().map(to_number).collect(),
            other => vec![to_number(other)],
        };
        Ok(Value::Array(nums))
    }
}

fn to_number(value: Value) -> Value {
    match value {
        Value::Number(n) => Value::Number(n),
        Value::String(s) => json!(s.trim().parse::<f64>().unwrap_or(0.0)),
        Value::Bool(b) => json!(if b { 1.0 } else { 0.0 }),
        _ => json!(0.0),
    }
}

/// Scales numeric elements into [0, 1] given the profiled min/max
#[derive(Debug)]
pub struct MinMaxScale {
    min: f64,
    max: f64,
}

impl MinMaxScale {
    pub fn from_args(args: &Value) -> Result<Self> {
        let min = arg_f64(args, "min")?;
        let max = arg_f64(args, "max")?;
        Ok(Self { min, max })
    }
}

impl Converter for MinMaxScale {
    fn apply(&self, value: Value) -> Result<Value> {
        let span = self.max - self.min;
        let scale = |v: Value| -> Result<Value> {
            let x = v.as_f64().ok_or_else(|| DataPrepError::ConvertFailed {
                unit: "min_max".into(),
                reason: format!("non-numeric input: {}", v),
            })?;
            if span == 0.0 {
                Ok(json!(0.0))
            } else {
                Ok(json!((x - self.min) / span))
            }
        };
        match value {
            Value::Array(items) => Ok(Value::Array(
                items.into_iter().map(scale).collect::<Result<_>>()?,
            )),
            other => Ok(Value::Array(vec![scale(other)?])),
        }
    }
}

/// Expands a label index into a one-hot vector of `size`
#[derive(Debug)]
pub struct OneHot {
    size: usize,
}

impl OneHot {
    pub fn from_args(args: &Value) -> Result<Self> {
        let size = arg_f64(args, "size")? as usize;
        Ok(Self { size })
    }
}

impl Converter for OneHot {
    fn apply(&self, value: Value) -> Result<Value> {
        let idx = match &value {
            Value::Number(n) => n.as_f64().map(|f| f as usize),
            Value::String(s) => s.trim().parse::<usize>().ok(),
            Value::Array(items) if items.len() == 1 => items[0].as_f64().map(|f| f as usize),
            _ => None,
        };
        let idx = idx.ok_or_else(|| DataPrepError::ConvertFailed {
            unit: "one_hot".into(),
            reason: format!("label index expected, got: {}", value),
        })?;
        if idx >= self.size {
            return Err(DataPrepError::ConvertFailed {
                unit: "one_hot".into(),
                reason: format!("index {} out of range for size {}", idx, self.size),
            });
        }
        let mut hot = vec![json!(0.0); self.size];
        hot[idx] = json!(1.0);
        Ok(Value::Array(hot))
    }
}

fn arg_f64(args: &Value, key: &str) -> Result<f64> {
    match args.get(key) {
        Some(Value::Number(n)) => Ok(n.as_f64().unwrap_or(0.0)),
        Some(Value::String(s)) => {
            s.trim()
                .parse()
                .map_err(|_| DataPrepError::ConvertFailed {
                    unit: key.into(),
                    reason: format!("malformed argument '{}': {}", key, s),
                })
        }
        _ => Err(DataPrepError::ConvertFailed {
            unit: key.into(),
            reason: format!("missing argument '{}'", key),
        }),
    }
}
