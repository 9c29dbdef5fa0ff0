//! Conversion pipeline
//!
//! Reads raw records through the storage channel, converts them, infers
//! tensor shapes, and persists the artifact.

pub mod pipeline;
pub mod reader;

pub use pipeline::{ConversionPipeline, TensorShapes};
pub use reader::{JsonLineReader, RecordReader};
