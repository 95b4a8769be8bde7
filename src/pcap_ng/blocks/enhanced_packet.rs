use crate::{
    byte_order::Endianness,
    pcap::MAXIMUM_CAPTURED_LENGTH,
    pcap_ng::{PcapNgParseError, options::BlockOptions, pad_length_to_32_bits},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancedPacket {
    pub block_length: u32,
    // 8..12
    pub interface_id: u32,
    // 12..16
    pub timestamp_high: u32,
    // 16..20
    pub timestamp_low: u32,
    // 20..24
    pub captured_length: u32,
    // 24..28
    pub original_length: u32,

    pub content: Vec<u8>,

    pub options: BlockOptions,
}
impl EnhancedPacket {
    pub const BLOCK_TYPE: u32 = 6;
    const FIXED_BODY: usize = 20;

    /// Parses the block body, without the block header and trailing length
    pub fn parse(
        body: &[u8],
        block_length: u32,
        byte_order: Endianness,
    ) -> Result<Self, PcapNgParseError> {
        if body.len() < Self::FIXED_BODY {
            return Err(PcapNgParseError::MinimumSizeNotMet(
                Self::FIXED_BODY + 12,
                block_length as usize,
            ));
        }
        let interface_id = byte_order.u32_at(body, 0);
        let timestamp_high = byte_order.u32_at(body, 4);
        let timestamp_low = byte_order.u32_at(body, 8);
        let captured_length = byte_order.u32_at(body, 12);
        let original_length = byte_order.u32_at(body, 16);
        if captured_length > MAXIMUM_CAPTURED_LENGTH {
            return Err(PcapNgParseError::CapturedLengthTooLarge(captured_length));
        }

        let data = &body[Self::FIXED_BODY..];
        if captured_length as usize > data.len() {
            return Err(PcapNgParseError::CapturedLengthExceedsBlock {
                captured_length,
                available: data.len(),
            });
        }
        let content = data[..captured_length as usize].to_vec();
        let padded_length = pad_length_to_32_bits(captured_length as usize).min(data.len());
        let options = BlockOptions::parse(&data[padded_length..], byte_order)?;
        Ok(Self {
            block_length,
            interface_id,
            timestamp_high,
            timestamp_low,
            captured_length,
            original_length,
            content,
            options,
        })
    }
    /// The raw 64 bit timestamp, in units of the interface's resolution
    pub fn timestamp(&self) -> u64 {
        (u64::from(self.timestamp_high) << 32) | u64::from(self.timestamp_low)
    }
}
