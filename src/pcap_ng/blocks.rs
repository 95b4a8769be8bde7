//! Block Types for pcap-ng files
use std::io::Read;

use crate::{
    byte_order::{ByteOrder, Endianness, ReadExt},
    pcap_ng::{MAXIMUM_BLOCK_LENGTH, PCAP_NG_MAGIC, PcapNgParseError},
};

mod enhanced_packet;
mod header;
mod interface;
mod simple_packet;
pub use enhanced_packet::EnhancedPacket;
pub use header::{SHBOptionCodes, SectionHeaderBlock};
pub use interface::{InterfaceDescriptionBlock, InterfaceOptionCodes};
pub use simple_packet::SimplePacket;

/// Block type and total length, the first 8 bytes of every block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub block_type: [u8; 4],
    pub block_length: [u8; 4],
}
impl BlockHeader {
    pub const SIZE: usize = 8;
    /// Block header plus the trailing length copy
    pub const OVERHEAD: usize = 12;

    pub fn parse_from_bytes(bytes: &[u8; Self::SIZE]) -> Self {
        Self {
            block_type: [bytes[0], bytes[1], bytes[2], bytes[3]],
            block_length: [bytes[4], bytes[5], bytes[6], bytes[7]],
        }
    }
    /// The section header type reads the same in both byte orders
    pub fn is_section_header(&self) -> bool {
        self.block_type == PCAP_NG_MAGIC
    }
    pub fn block_type_as_u32(&self, endianness: impl ByteOrder) -> u32 {
        endianness.u32_from_bytes(self.block_type)
    }
    pub fn block_length_as_u32(&self, endianness: impl ByteOrder) -> u32 {
        endianness.u32_from_bytes(self.block_length)
    }
    /// Validates the total length and returns the body size, excluding the
    /// header and the trailing length.
    pub fn body_length(&self, endianness: impl ByteOrder) -> Result<usize, PcapNgParseError> {
        let block_length = self.block_length_as_u32(endianness);
        if (block_length as usize) < Self::OVERHEAD || !block_length.is_multiple_of(4) {
            return Err(PcapNgParseError::InvalidBlockLength(block_length));
        }
        Ok(block_length as usize - Self::OVERHEAD)
    }
}

/// Reads `body_length` bytes of block body followed by the trailing length
///
/// The trailing length must repeat the length from the block header.
pub(crate) fn read_block_body<R: Read>(
    reader: &mut R,
    body_length: usize,
    block_length: u32,
    endianness: Endianness,
) -> Result<Vec<u8>, PcapNgParseError> {
    if block_length > MAXIMUM_BLOCK_LENGTH {
        return Err(PcapNgParseError::BlockTooLarge(block_length));
    }
    let mut body = vec![0u8; body_length + 4];
    let got = reader.read_available(&mut body)?;
    if got < body.len() {
        return Err(PcapNgParseError::TruncatedBlock {
            expected: body.len(),
            got,
        });
    }
    let trailer = endianness.u32_at(&body, body_length);
    if trailer != block_length {
        return Err(PcapNgParseError::BlockLengthMismatch {
            header: block_length,
            trailer,
        });
    }
    body.truncate(body_length);
    Ok(body)
}

/// Skips over a block body and its trailing length without buffering it
pub(crate) fn skip_block_body<R: Read>(
    reader: &mut R,
    body_length: usize,
) -> Result<(), PcapNgParseError> {
    let expected = body_length as u64 + 4;
    let skipped = reader.skip_bytes(expected)?;
    if skipped < expected {
        return Err(PcapNgParseError::TruncatedBlock {
            expected: expected as usize,
            got: skipped as usize,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PcapNgBlock {
    SectionHeader(SectionHeaderBlock),
    InterfaceDescription(InterfaceDescriptionBlock),
    SimplePacket(SimplePacket),
    EnhancedPacket(EnhancedPacket),
    /// Any block type this reader does not interpret, its body was skipped
    Skipped { block_type: u32, block_length: u32 },
}
