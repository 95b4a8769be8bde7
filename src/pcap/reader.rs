//! Synchronous PCAP record reader
use std::io::Read;

use tracing::{debug, warn};

use crate::{
    byte_order::ReadExt,
    pcap::{
        MAXIMUM_CAPTURED_LENGTH, PcapParseError, file_header::PcapFileHeader,
        record_header::RecordHeader,
    },
    record::CaptureRecord,
};
/// A synchronous reader for PCAP files
#[derive(Debug)]
pub struct SyncPcapReader<R: Read> {
    reader: R,
    header_buffer: [u8; RecordHeader::SIZE],
    file_header: PcapFileHeader,
    /// Number of records read so far
    records_read: u64,
}
impl<R: Read> SyncPcapReader<R> {
    /// Creates a new `SyncPcapReader` from a reader
    /// Returns `Ok(Self)` on success, or `Err` if the file header could not be read
    pub fn new(mut reader: R) -> Result<Self, PcapParseError> {
        let file_header = PcapFileHeader::read(&mut reader)?;
        Ok(Self::new_with_header(reader, file_header))
    }
    pub(crate) fn new_with_header(reader: R, file_header: PcapFileHeader) -> Self {
        debug!(
            version = ?file_header.version,
            snap_length = file_header.snap_length,
            link_type = %file_header.link_type,
            "Read pcap file header"
        );
        Self {
            reader,
            file_header,
            header_buffer: [0; RecordHeader::SIZE],
            records_read: 0,
        }
    }
    /// Returns the file header of the pcap file
    pub fn file_header(&self) -> &PcapFileHeader {
        &self.file_header
    }
    /// Reads the next record
    ///
    /// `Ok(None)` is only returned when the input ends exactly on a record boundary.
    pub fn next_record(&mut self) -> Result<Option<CaptureRecord>, PcapParseError> {
        let index = self.records_read;
        let got = self.reader.read_available(&mut self.header_buffer)?;
        if got == 0 {
            return Ok(None);
        }
        if got < RecordHeader::SIZE {
            return Err(PcapParseError::TruncatedRecordHeader { index, got });
        }
        let header = RecordHeader::parse_bytes(&self.header_buffer, self.file_header.endianness());
        if header.include_len > MAXIMUM_CAPTURED_LENGTH {
            return Err(PcapParseError::CapturedLengthTooLarge {
                index,
                captured_length: header.include_len,
            });
        }
        if header.include_len > header.orig_len {
            warn!(
                index,
                captured = header.include_len,
                original = header.orig_len,
                "Record captured length exceeds its original length"
            );
        }
        let mut payload = vec![0u8; header.include_len as usize];
        let got = self.reader.read_available(&mut payload)?;
        if got < payload.len() {
            return Err(PcapParseError::TruncatedPayload {
                index,
                expected: header.include_len,
                got,
            });
        }
        self.records_read += 1;
        let timestamp = header.timestamp(self.file_header.magic_number_and_endianness.magic_number);
        Ok(Some(CaptureRecord::new(timestamp, header.orig_len, payload)))
    }
}
