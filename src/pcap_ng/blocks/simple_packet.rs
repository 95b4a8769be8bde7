use crate::{byte_order::Endianness, pcap_ng::PcapNgParseError};

/// A packet without interface id or timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplePacket {
    pub block_length: u32,
    pub original_length: u32,
    pub content: Vec<u8>,
}
impl SimplePacket {
    pub const BLOCK_TYPE: u32 = 3;

    /// Parses the block body, without the block header and trailing length
    ///
    /// The block carries no captured length, it is the smaller of the original
    /// length and the data present in the block.
    pub fn parse(
        body: &[u8],
        block_length: u32,
        byte_order: Endianness,
    ) -> Result<Self, PcapNgParseError> {
        if body.len() < 4 {
            return Err(PcapNgParseError::MinimumSizeNotMet(16, block_length as usize));
        }
        let original_length = byte_order.u32_at(body, 0);
        let data = &body[4..];
        let captured_length = (original_length as usize).min(data.len());
        Ok(Self {
            block_length,
            original_length,
            content: data[..captured_length].to_vec(),
        })
    }
    /// Cuts the content down to the interface snap length, 0 means unlimited
    pub fn apply_snap_length(&mut self, snap_length: u32) {
        if snap_length > 0 {
            self.content.truncate(snap_length as usize);
        }
    }
}
