//! This module provides pcap-ng parsing functionality
//!
//! [Source](https://www.ietf.org/archive/id/draft-tuexen-opsawg-pcapng-03.html)
//!
//! Only reads files from beginning to end. Blocks other than section headers,
//! interface descriptions and packets are skipped.
use thiserror::Error;

use crate::{byte_order::Endianness, pcap::file_header::Version};
pub mod blocks;
pub mod options;
mod reader;
pub use reader::SyncPcapNgReader;
/// Magic number for pcap-ng files
///
/// All pcap-ng files should start with this magic number
pub const PCAP_NG_MAGIC: [u8; 4] = [0x0A, 0x0D, 0x0D, 0x0A];
/// Upper bound for blocks that are buffered in memory before parsing
pub const MAXIMUM_BLOCK_LENGTH: u32 = 16 * 1024 * 1024;
#[derive(Debug, Error)]
pub enum PcapNgParseError {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error("Invalid endianness: got {got:02x?}")]
    InvalidEndianness { got: [u8; 4] },
    #[error("The first block is not a section header block, got block type {got:02x?}")]
    MissingSectionHeader { got: [u8; 4] },
    #[error("Unsupported pcap-ng version {}.{}", .0.major, .0.minor)]
    UnsupportedVersion(Version),
    #[error("Truncated block: expected {expected} bytes, got {got}")]
    TruncatedBlock { expected: usize, got: usize },
    #[error("Invalid block length {0}: must be at least 12 and a multiple of 4")]
    InvalidBlockLength(u32),
    #[error("Block length {0} exceeds the maximum of {max}", max = MAXIMUM_BLOCK_LENGTH)]
    BlockTooLarge(u32),
    #[error("Block length mismatch: header says {header}, trailer says {trailer}")]
    BlockLengthMismatch { header: u32, trailer: u32 },
    #[error("Minimum size for this block is {0} bytes, but got {1} bytes")]
    MinimumSizeNotMet(usize, usize),
    #[error("Packet references interface {0} which was not described in this section")]
    UnknownInterface(u32),
    #[error("Captured length {captured_length} does not fit in the {available} bytes of the block")]
    CapturedLengthExceedsBlock {
        captured_length: u32,
        available: usize,
    },
    #[error("Captured length {0} exceeds the maximum of {max}", max = crate::pcap::MAXIMUM_CAPTURED_LENGTH)]
    CapturedLengthTooLarge(u32),
    #[error("Invalid interface timestamp resolution {0:#04x}")]
    InvalidTimestampResolution(u8),
    #[error("Error parsing options: {0}")]
    OptionParseError(#[from] options::OptionParseError),
}

impl Endianness {
    pub fn from_pcap_ng_bytes(bytes: &[u8; 4]) -> Result<Self, PcapNgParseError> {
        match bytes {
            [0x1A, 0x2B, 0x3C, 0x4D] => Ok(Self::BigEndian),
            [0x4D, 0x3C, 0x2B, 0x1A] => Ok(Self::LittleEndian),
            _ => Err(PcapNgParseError::InvalidEndianness { got: *bytes }),
        }
    }
}

/// Pads the length to the next multiple of 4 bytes (32 bits)
pub(crate) fn pad_length_to_32_bits(length: usize) -> usize {
    if length.is_multiple_of(4) {
        length
    } else {
        length + (4 - (length % 4))
    }
}
