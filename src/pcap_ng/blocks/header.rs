use std::io::Read;

use crate::{
    byte_order::{ByteOrder, Endianness, ReadExt},
    pcap::file_header::Version,
    pcap_ng::{
        PcapNgParseError,
        blocks::{BlockHeader, read_block_body},
        options::{BlockOptions, define_options_enum},
    },
};
define_options_enum! {
    enum SHBOptionCodes {
        Hardware = 2,
        OS = 3,
        UserApplication = 4,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeaderBlock {
    pub block_length: u32,
    pub byte_order: Endianness,
    pub version: Version,
    /// `None` when the section length is not specified (-1)
    pub section_length: Option<u64>,
    pub options: BlockOptions,
}
impl SectionHeaderBlock {
    /// Block header, byte order magic, version and section length plus the trailer
    pub const MINIMUM_SIZE: usize = 28;

    /// Reads the entire block from the reader
    pub fn read_from_reader<R: Read>(reader: &mut R) -> Result<Self, PcapNgParseError> {
        let mut header_bytes = [0u8; BlockHeader::SIZE];
        let got = reader.read_available(&mut header_bytes)?;
        if got < BlockHeader::SIZE {
            return Err(PcapNgParseError::TruncatedBlock {
                expected: BlockHeader::SIZE,
                got,
            });
        }
        let header = BlockHeader::parse_from_bytes(&header_bytes);
        if !header.is_section_header() {
            return Err(PcapNgParseError::MissingSectionHeader {
                got: header.block_type,
            });
        }
        Self::read_with_header(reader, &header)
    }
    /// Reads the rest of the block after its 8 byte header
    ///
    /// The byte order is taken from the byte order magic that follows the header.
    pub fn read_with_header<R: Read>(
        reader: &mut R,
        header: &BlockHeader,
    ) -> Result<Self, PcapNgParseError> {
        let mut magic = [0u8; 4];
        let got = reader.read_available(&mut magic)?;
        if got < magic.len() {
            return Err(PcapNgParseError::TruncatedBlock { expected: 4, got });
        }
        let byte_order = Endianness::from_pcap_ng_bytes(&magic)?;
        let block_length = header.block_length_as_u32(byte_order);
        let body_length = header.body_length(byte_order)?;
        if (block_length as usize) < Self::MINIMUM_SIZE {
            return Err(PcapNgParseError::MinimumSizeNotMet(
                Self::MINIMUM_SIZE,
                block_length as usize,
            ));
        }
        // The byte order magic is part of the body and has already been consumed
        let body = read_block_body(reader, body_length - 4, block_length, byte_order)?;

        let version = Version {
            major: byte_order.u16_at(&body, 0),
            minor: byte_order.u16_at(&body, 2),
        };
        if version.major != 1 {
            return Err(PcapNgParseError::UnsupportedVersion(version));
        }
        let section_length: [u8; 8] = [
            body[4], body[5], body[6], body[7], body[8], body[9], body[10], body[11],
        ];
        let section_length = if section_length == [0xFF; 8] {
            None
        } else {
            Some(byte_order.u64_from_bytes(section_length))
        };
        let options = BlockOptions::parse(&body[12..], byte_order)?;
        Ok(Self {
            block_length,
            byte_order,
            version,
            section_length,
            options,
        })
    }
    fn string_option(&self, code: SHBOptionCodes) -> Option<String> {
        self.options
            .find(code as u16)
            .map(|value| String::from_utf8_lossy(value).into_owned())
    }
    pub fn hardware(&self) -> Option<String> {
        self.string_option(SHBOptionCodes::Hardware)
    }
    pub fn os(&self) -> Option<String> {
        self.string_option(SHBOptionCodes::OS)
    }
    /// The application that wrote the section, if recorded
    pub fn user_application(&self) -> Option<String> {
        self.string_option(SHBOptionCodes::UserApplication)
    }
}
