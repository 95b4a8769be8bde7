//! Reading of pcap and pcap-ng capture files and a per-packet text decode of
//! the Ethernet frames they contain.
use std::fmt;

pub mod byte_order;
pub mod decode;
pub mod dump;
pub mod link_type;
pub mod output;
pub mod pcap;
pub mod pcap_ng;
pub mod range;
pub mod reader;
pub mod record;
#[cfg(test)]
pub(crate) mod test_helpers;

pub use dump::{DumpOptions, DumpSummary, dump};
pub use reader::{CaptureError, CaptureReader};
pub use record::{CaptureRecord, Timestamp};

/// The container format of a capture file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PcapFileType {
    Pcap,
    PcapNg,
}
impl PcapFileType {
    /// Determines the file type from the first four bytes of the file
    pub fn from_magic(magic: [u8; 4]) -> Option<Self> {
        if magic == pcap_ng::PCAP_NG_MAGIC {
            Some(PcapFileType::PcapNg)
        } else if pcap::file_header::MagicNumberAndEndianness::is_pcap_magic(magic) {
            Some(PcapFileType::Pcap)
        } else {
            None
        }
    }
}
impl fmt::Display for PcapFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PcapFileType::Pcap => f.write_str("pcap"),
            PcapFileType::PcapNg => f.write_str("pcap-ng"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_type_from_magic() {
        assert_eq!(
            PcapFileType::from_magic([0xd4, 0xc3, 0xb2, 0xa1]),
            Some(PcapFileType::Pcap)
        );
        assert_eq!(
            PcapFileType::from_magic([0xa1, 0xb2, 0x3c, 0x4d]),
            Some(PcapFileType::Pcap)
        );
        assert_eq!(
            PcapFileType::from_magic([0x0a, 0x0d, 0x0d, 0x0a]),
            Some(PcapFileType::PcapNg)
        );
        assert_eq!(PcapFileType::from_magic(*b"GIF8"), None);
        assert_eq!(PcapFileType::PcapNg.to_string(), "pcap-ng");
    }
}
