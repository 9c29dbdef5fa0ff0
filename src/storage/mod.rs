//! Storage channel
//!
//! Remote file access for raw record files and converted artifacts.

pub mod channel;
pub mod memory;
pub mod sftp;
pub mod stream;

pub use channel::StorageChannel;
pub use memory::MemoryChannel;
pub use sftp::SftpChannel;
pub use stream::JsonLineStream;
