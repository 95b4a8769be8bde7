use crate::{
    byte_order::Endianness,
    link_type::LinkType,
    pcap_ng::{
        PcapNgParseError,
        options::{BlockOptions, define_options_enum},
    },
};
define_options_enum! {
    /// Options for the Interface Description Block
    enum InterfaceOptionCodes {
        /// The if_name option is a UTF-8 string containing the name of the device used to capture data. The string is not zero-terminated.
        IfName = 2,
        /// Resolution of the packet timestamps, defaults to microseconds
        IfTimestampResolution = 9,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDescriptionBlock {
    pub block_length: u32,
    pub link_type: LinkType,
    pub snap_length: u32,
    pub options: BlockOptions,
}
impl InterfaceDescriptionBlock {
    pub const BLOCK_TYPE: u32 = 1;
    /// 2 for link_type + 2 reserved + 4 for snap_length
    const FIXED_BODY: usize = 8;

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
        let link_type = LinkType::from(byte_order.u16_at(body, 0));
        let snap_length = byte_order.u32_at(body, 4);
        let options = BlockOptions::parse(&body[Self::FIXED_BODY..], byte_order)?;
        Ok(Self {
            block_length,
            link_type,
            snap_length,
            options,
        })
    }
    /// Number of timestamp units per second for packets of this interface
    ///
    /// Taken from `if_tsresol`: with the high bit clear the resolution is
    /// 10^-n seconds, with it set 2^-n seconds. Without the option the
    /// resolution is microseconds.
    pub fn units_per_second(&self) -> Result<u64, PcapNgParseError> {
        let Some(value) = self
            .options
            .find(InterfaceOptionCodes::IfTimestampResolution as u16)
        else {
            return Ok(1_000_000);
        };
        let Some(&resolution) = value.first() else {
            return Ok(1_000_000);
        };
        let exponent = u32::from(resolution & 0x7f);
        let units = if resolution & 0x80 == 0 {
            10u64.checked_pow(exponent)
        } else {
            2u64.checked_pow(exponent)
        };
        units.ok_or(PcapNgParseError::InvalidTimestampResolution(resolution))
    }
    pub fn name(&self) -> Option<String> {
        self.options
            .find(InterfaceOptionCodes::IfName as u16)
            .map(|value| String::from_utf8_lossy(value).into_owned())
    }
}
