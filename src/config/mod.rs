//! Job configuration
//!
//! Descriptor loading, dataset statistics, and field declarations.

pub mod dataset;
pub mod field;
pub mod job;

pub use dataset::DatasetInfo;
pub use field::{ConverterSpec, FieldKind, FieldSpec};
pub use job::{JobConfig, JobKind};
