use crate::{
    byte_order::Endianness,
    pcap::file_header::MagicNumber,
    record::Timestamp,
};
/// The 16 byte header in front of every record of a pcap file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub ts_sec: u32,
    /// Microseconds or nanoseconds depending on the file's magic number
    pub ts_frac: u32,
    /// The length of the packet data included in the file
    pub include_len: u32,
    /// The original length of the packet data
    pub orig_len: u32,
}

impl RecordHeader {
    pub const SIZE: usize = 16;

    #[inline(always)]
    pub fn parse_bytes(bytes: &[u8; Self::SIZE], endianness: Endianness) -> Self {
        Self {
            ts_sec: endianness.u32_at(bytes, 0),
            ts_frac: endianness.u32_at(bytes, 4),
            include_len: endianness.u32_at(bytes, 8),
            orig_len: endianness.u32_at(bytes, 12),
        }
    }
    /// The record timestamp, nanosecond files are reduced to microseconds
    pub fn timestamp(&self, magic_number: MagicNumber) -> Timestamp {
        let micros = match magic_number {
            MagicNumber::Microsecond => self.ts_frac,
            MagicNumber::Nanosecond => self.ts_frac / 1_000,
        };
        Timestamp::new(i64::from(self.ts_sec), micros)
    }
}
