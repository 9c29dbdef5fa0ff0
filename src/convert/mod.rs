//! Field conversion
//!
//! Conversion units, the remote converter catalog, per-field chain
//! construction, and per-record conversion.

pub mod catalog;
pub mod chain;
pub mod record;
pub mod unit;

pub use catalog::{CatalogEntry, CatalogSource, ConverterCatalog, RestCatalog};
pub use chain::{apply_chain, ChainBuilder, ConversionChain};
pub use record::{ConvertedRecord, RecordConverter};
pub use unit::Converter;
