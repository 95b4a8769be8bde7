//! Parsing for PCAP Files based on the libpcap format
//!
//! Sources
//! - [Wireshark Wiki - File Format](https://wiki.wireshark.org/Development/LibpcapFileFormat)
pub mod file_header;
pub mod record_header;
mod reader;
pub use reader::SyncPcapReader;
use thiserror::Error;

/// Largest captured length accepted for a single record.
///
/// Matches the maximum snapshot length of libpcap so a corrupt record header
/// cannot trigger an arbitrarily large allocation.
pub const MAXIMUM_CAPTURED_LENGTH: u32 = 262_144;

/// Errors that can occur when parsing pcap files
#[derive(Debug, Error)]
pub enum PcapParseError {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error("Invalid magic number got {0:02x?}")]
    InvalidMagicNumber([u8; 4]),
    #[error("Truncated file header: expected 24 bytes, got {got}")]
    TruncatedFileHeader { got: usize },
    #[error("Truncated header for record {index}: expected 16 bytes, got {got}")]
    TruncatedRecordHeader { index: u64, got: usize },
    #[error("Truncated payload for record {index}: expected {expected} bytes, got {got}")]
    TruncatedPayload {
        index: u64,
        expected: u32,
        got: usize,
    },
    #[error(
        "Invalid captured length for record {index}: {captured_length} exceeds the maximum of {max}",
        max = MAXIMUM_CAPTURED_LENGTH
    )]
    CapturedLengthTooLarge { index: u64, captured_length: u32 },
}
