//! Chain construction
//!
//! Resolves each field's declared function specs against the converter
//! catalog and instantiates the per-field conversion chains.

use serde_json::Value;
use tracing::debug;

use crate::config::field::{ConverterSpec, FieldSpec};
use crate::error::{DataPrepError, Result};

use super::catalog::{CatalogEntry, CatalogSource};
use super::unit::{Converter, MinMaxScale, NumericCast, OneHot};

/// Ordered conversion units for one field
pub type ConversionChain = Vec<Box<dyn Converter>>;

/// Builds per-field conversion chains from catalog metadata.
///
/// The catalog is fetched once per [`build`](ChainBuilder::build) call
/// and never cached across calls; catalog contents may change between
/// job runs, so callers wanting reuse keep the returned chains instead.
pub struct ChainBuilder<'a> {
    catalog: &'a dyn CatalogSource,
}

impl<'a> ChainBuilder<'a> {
    pub fn new(catalog: &'a dyn CatalogSource) -> Self {
        Self { catalog }
    }

    /// Build one chain per field, parallel-indexed to `fields`.
    ///
    /// An unknown or malformed function spec is fatal — silently
    /// skipping a unit would corrupt every subsequent feature vector's
    /// shape.
    pub fn build(&self, fields: &[FieldSpec]) -> Result<Vec<ConversionChain>> {
        let catalog = self.catalog.fetch()?;

        let mut chains = Vec::with_capacity(fields.len());
        for field in fields {
            let mut chain: ConversionChain = Vec::with_capacity(field.functions.len());
            for spec in &field.functions {
                let entry = catalog.get(&spec.function).ok_or_else(|| {
                    DataPrepError::UnknownConverter {
                        function: spec.function.clone(),
                        field: field.field_name.clone(),
                    }
                })?;
                chain.push(instantiate(entry, spec)?);
            }
            debug!(
                "field '{}': chain of {} units",
                field.field_name,
                chain.len()
            );
            chains.push(chain);
        }
        Ok(chains)
    }
}

/// Instantiate one unit from its catalog entry and declared spec.
///
/// The field's declared args take precedence over the catalog defaults.
fn instantiate(entry: &CatalogEntry, spec: &ConverterSpec) -> Result<Box<dyn Converter>> {
    let args = if spec.args.is_null() {
        &entry.args
    } else {
        &spec.args
    };

    let unit: Box<dyn Converter> = match entry.unit.as_str() {
        "numeric_cast" => Box::new(NumericCast),
        "min_max" => Box::new(MinMaxScale::from_args(args)?),
        "one_hot" => Box::new(OneHot::from_args(args)?),
        other => {
            return Err(DataPrepError::UnsupportedUnit {
                unit: other.to_string(),
                function: spec.function.clone(),
            })
        }
    };
    Ok(unit)
}

/// Fold a field's raw value through its chain in declaration order.
///
/// A chain with zero units passes the raw value through unchanged.
pub fn apply_chain(chain: &ConversionChain, mut value: Value) -> Result<Value> {
    for unit in chain {
        value = unit.apply(value)?;
    }
    Ok(value)
}
