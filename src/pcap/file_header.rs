use std::io::Read;

use crate::{
    byte_order::{Endianness, ReadExt},
    link_type::LinkType,
    pcap::PcapParseError,
};

/// Resolution of the fractional part of record timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagicNumber {
    Microsecond,
    Nanosecond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicNumberAndEndianness {
    pub magic_number: MagicNumber,
    pub endianness: Endianness,
}

impl TryFrom<[u8; 4]> for MagicNumberAndEndianness {
    type Error = PcapParseError;

    fn try_from(value: [u8; 4]) -> Result<Self, Self::Error> {
        let (magic_number, endianness) = match value {
            [0xa1, 0xb2, 0xc3, 0xd4] => (MagicNumber::Microsecond, Endianness::BigEndian),
            [0xd4, 0xc3, 0xb2, 0xa1] => (MagicNumber::Microsecond, Endianness::LittleEndian),
            [0xa1, 0xb2, 0x3c, 0x4d] => (MagicNumber::Nanosecond, Endianness::BigEndian),
            [0x4d, 0x3c, 0xb2, 0xa1] => (MagicNumber::Nanosecond, Endianness::LittleEndian),
            _ => return Err(PcapParseError::InvalidMagicNumber(value)),
        };
        Ok(Self {
            magic_number,
            endianness,
        })
    }
}
impl MagicNumberAndEndianness {
    /// Whether the four bytes are any of the classic pcap magic numbers
    pub fn is_pcap_magic(value: [u8; 4]) -> bool {
        Self::try_from(value).is_ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
}

/// The 24 byte global header at the start of every pcap file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcapFileHeader {
    /// First 4 bytes are the magic number and endianness
    pub magic_number_and_endianness: MagicNumberAndEndianness,
    /// 4..8
    pub version: Version,
    /// 8..12
    pub timezone: u32,
    /// 12..16
    pub sig_figs: u32,
    /// 16..20
    pub snap_length: u32,
    /// 20..24
    pub link_type: LinkType,
}

impl PcapFileHeader {
    pub const SIZE: usize = 24;

    /// Reads the file header from the reader
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, PcapParseError> {
        let mut header = [0u8; Self::SIZE];
        let got = reader.read_available(&mut header)?;
        if got < 4 {
            return Err(PcapParseError::TruncatedFileHeader { got });
        }
        // An unknown magic number is reported before a short header
        MagicNumberAndEndianness::try_from([header[0], header[1], header[2], header[3]])?;
        if got < Self::SIZE {
            return Err(PcapParseError::TruncatedFileHeader { got });
        }
        Self::try_from(&header)
    }
    /// Reads the rest of the header when the magic number was already consumed
    pub fn read_after_magic<R: Read>(
        reader: &mut R,
        magic: [u8; 4],
    ) -> Result<Self, PcapParseError> {
        MagicNumberAndEndianness::try_from(magic)?;
        let mut header = [0u8; Self::SIZE];
        header[..4].copy_from_slice(&magic);
        let got = reader.read_available(&mut header[4..])?;
        if got < Self::SIZE - 4 {
            return Err(PcapParseError::TruncatedFileHeader { got: got + 4 });
        }
        Self::try_from(&header)
    }
    pub fn endianness(&self) -> Endianness {
        self.magic_number_and_endianness.endianness
    }
}
impl TryFrom<&[u8; 24]> for PcapFileHeader {
    type Error = PcapParseError;

    fn try_from(bytes: &[u8; 24]) -> Result<Self, Self::Error> {
        let magic_number_and_endianness =
            MagicNumberAndEndianness::try_from([bytes[0], bytes[1], bytes[2], bytes[3]])?;
        let endianness = magic_number_and_endianness.endianness;

        Ok(Self {
            magic_number_and_endianness,
            version: Version {
                major: endianness.u16_at(bytes, 4),
                minor: endianness.u16_at(bytes, 6),
            },
            timezone: endianness.u32_at(bytes, 8),
            sig_figs: endianness.u32_at(bytes, 12),
            snap_length: endianness.u32_at(bytes, 16),
            link_type: LinkType::from(endianness.u32_at(bytes, 20)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_number_and_endianness() {
        let magic_bytes = [0xa1, 0xb2, 0xc3, 0xd4];
        let magic = MagicNumberAndEndianness::try_from(magic_bytes).unwrap();
        assert_eq!(magic.magic_number, MagicNumber::Microsecond);
        assert_eq!(magic.endianness, Endianness::BigEndian);

        let magic = MagicNumberAndEndianness::try_from([0x4d, 0x3c, 0xb2, 0xa1]).unwrap();
        assert_eq!(magic.magic_number, MagicNumber::Nanosecond);
        assert_eq!(magic.endianness, Endianness::LittleEndian);

        assert!(!MagicNumberAndEndianness::is_pcap_magic([0x0a, 0x0d, 0x0d, 0x0a]));
    }

    #[test]
    fn test_pcap_file_header_read() -> anyhow::Result<()> {
        let bytes = [
            0xd4, 0xc3, 0xb2, 0xa1, 2, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, 0, 0, 1, 0, 0,
            0,
        ];
        let header = PcapFileHeader::read(&mut &bytes[..])?;
        assert_eq!(
            header.magic_number_and_endianness.magic_number,
            MagicNumber::Microsecond
        );
        assert_eq!(header.endianness(), Endianness::LittleEndian);
        assert_eq!(header.version, Version { major: 2, minor: 4 });
        assert_eq!(header.snap_length, 65535);
        assert_eq!(header.link_type, LinkType::Ethernet);
        Ok(())
    }

    #[test]
    fn big_endian_header() -> anyhow::Result<()> {
        let bytes = [
            0xa1, 0xb2, 0x3c, 0x4d, 0, 2, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x10, 0, 0, 0, 0,
            113,
        ];
        let header = PcapFileHeader::read(&mut &bytes[..])?;
        assert_eq!(
            header.magic_number_and_endianness.magic_number,
            MagicNumber::Nanosecond
        );
        assert_eq!(header.endianness(), Endianness::BigEndian);
        assert_eq!(header.snap_length, 4096);
        assert_eq!(header.link_type, LinkType::LinuxSll);
        Ok(())
    }

    #[test]
    fn invalid_magic() {
        let bytes = [0xde, 0xad, 0xbe, 0xef, 0, 0];
        let err = PcapFileHeader::read(&mut &bytes[..]).unwrap_err();
        assert!(matches!(
            err,
            PcapParseError::InvalidMagicNumber([0xde, 0xad, 0xbe, 0xef])
        ));
    }

    #[test]
    fn truncated_header() {
        let bytes = [0xd4, 0xc3, 0xb2, 0xa1, 2, 0, 4, 0];
        let err = PcapFileHeader::read(&mut &bytes[..]).unwrap_err();
        assert!(matches!(err, PcapParseError::TruncatedFileHeader { got: 8 }));

        let err = PcapFileHeader::read_after_magic(&mut &bytes[4..], [0xd4, 0xc3, 0xb2, 0xa1])
            .unwrap_err();
        assert!(matches!(err, PcapParseError::TruncatedFileHeader { got: 8 }));
    }
}
