//! Raw record readers
//!
//! One reader per raw-record format implements the abstract read
//! contract; the pipeline only sees converted records.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::field::FieldSpec;
use crate::convert::chain::ConversionChain;
use crate::convert::record::{ConvertedRecord, RecordConverter};
use crate::error::Result;
use crate::storage::StorageChannel;

/// Abstract read contract: open each file in `file_list` through the
/// storage channel, decode records, convert each one.
pub trait RecordReader {
    fn read(&mut self, file_list: &[String], fields: &[FieldSpec]) -> Result<Vec<ConvertedRecord>>;
}

/// Reader for line-oriented JSON record files
pub struct JsonLineReader<'a> {
    channel: &'a dyn StorageChannel,
    chains: Vec<ConversionChain>,
}

impl<'a> JsonLineReader<'a> {
    pub fn new(channel: &'a dyn StorageChannel, chains: Vec<ConversionChain>) -> Self {
        Self { channel, chains }
    }
}

impl RecordReader for JsonLineReader<'_> {
    fn read(&mut self, file_list: &[String], fields: &[FieldSpec]) -> Result<Vec<ConvertedRecord>> {
        let mut converted = Vec::new();

        for path in file_list {
            let mut count = 0usize;
            for value in self.channel.json_lines(path)? {
                let Value::Object(record) = value else {
                    warn!("non-object record in {}: {}", path, value);
                    continue;
                };
                converted.push(RecordConverter::convert(record, fields, &self.chains)?);
                count += 1;
            }
            debug!("{}: {} records converted", path, count);
        }

        Ok(converted)
    }
}
