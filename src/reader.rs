use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    PcapFileType,
    byte_order::ReadExt,
    pcap::{PcapParseError, SyncPcapReader, file_header::PcapFileHeader},
    pcap_ng::{PcapNgParseError, SyncPcapNgReader, blocks::{BlockHeader, SectionHeaderBlock}},
    record::CaptureRecord,
};

#[derive(Debug, Error)]
pub enum CaptureError {
    /// The capture file could not be opened at all
    #[error("Failed to open capture file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Not a pcap or pcap-ng file: magic number {0:02x?}")]
    UnknownFormat([u8; 4]),
    #[error("File too short to contain a magic number: got {0} bytes")]
    MissingMagicNumber(usize),
    #[error(transparent)]
    Pcap(#[from] PcapParseError),
    #[error(transparent)]
    PcapNg(#[from] PcapNgParseError),
    #[error(transparent)]
    IO(#[from] std::io::Error),
}
impl CaptureError {
    /// Whether the error describes malformed capture data rather than an
    /// unreadable or unwritable stream
    pub fn is_format_error(&self) -> bool {
        match self {
            CaptureError::Open { .. } | CaptureError::IO(_) => false,
            CaptureError::Pcap(PcapParseError::IO(_)) => false,
            CaptureError::PcapNg(PcapNgParseError::IO(_)) => false,
            _ => true,
        }
    }
}

#[derive(Debug)]
enum CaptureReaderInner<R: Read> {
    Pcap(SyncPcapReader<R>),
    PcapNg(SyncPcapNgReader<R>),
}

/// A lazy, finite sequence of records read from a pcap or pcap-ng stream
///
/// The container format is determined by the first four bytes of the stream,
/// see [PcapFileType::from_magic]. Records are produced one at a time as the
/// iterator is pulled. After the first error the iterator is exhausted.
#[derive(Debug)]
pub struct CaptureReader<R: Read> {
    inner: CaptureReaderInner<R>,
    failed: bool,
}
impl CaptureReader<BufReader<File>> {
    /// Opens a capture file from disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CaptureError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Opened capture file");
        Self::new(BufReader::new(file))
    }
}
impl<R: Read> CaptureReader<R> {
    /// Reads the file header (or leading section header) from the reader
    pub fn new(mut reader: R) -> Result<Self, CaptureError> {
        let mut magic = [0u8; 4];
        let got = reader.read_available(&mut magic)?;
        if got < magic.len() {
            return Err(CaptureError::MissingMagicNumber(got));
        }
        let Some(file_type) = PcapFileType::from_magic(magic) else {
            return Err(CaptureError::UnknownFormat(magic));
        };
        let inner = match file_type {
            PcapFileType::Pcap => {
                let header = PcapFileHeader::read_after_magic(&mut reader, magic)?;
                if !header.link_type.is_ethernet() {
                    warn!(
                        link_type = %header.link_type,
                        "Capture is not Ethernet, frames will still be decoded as Ethernet II"
                    );
                }
                CaptureReaderInner::Pcap(SyncPcapReader::new_with_header(reader, header))
            }
            PcapFileType::PcapNg => {
                let mut length = [0u8; 4];
                let got = reader.read_available(&mut length)?;
                if got < length.len() {
                    return Err(PcapNgParseError::TruncatedBlock {
                        expected: BlockHeader::SIZE,
                        got: got + magic.len(),
                    }
                    .into());
                }
                let header = BlockHeader {
                    block_type: magic,
                    block_length: length,
                };
                let section = SectionHeaderBlock::read_with_header(&mut reader, &header)?;
                CaptureReaderInner::PcapNg(SyncPcapNgReader::new_with_section(reader, section))
            }
        };
        Ok(Self {
            inner,
            failed: false,
        })
    }
    /// Returns the type of the capture file
    pub fn file_type(&self) -> PcapFileType {
        match &self.inner {
            CaptureReaderInner::Pcap(_) => PcapFileType::Pcap,
            CaptureReaderInner::PcapNg(_) => PcapFileType::PcapNg,
        }
    }
    /// Reads the next record from the pcap or pcapng file
    pub fn next_record(&mut self) -> Result<Option<CaptureRecord>, CaptureError> {
        let record = match &mut self.inner {
            CaptureReaderInner::Pcap(reader) => reader.next_record()?,
            CaptureReaderInner::PcapNg(reader) => reader.next_record()?,
        };
        Ok(record)
    }
}
impl<R: Read> Iterator for CaptureReader<R> {
    type Item = Result<CaptureRecord, CaptureError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_record() {
            Ok(record) => record.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
impl<R: Read> std::iter::FusedIterator for CaptureReader<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        byte_order::Endianness,
        test_helpers::{PcapFileBuilder, PcapNgFileBuilder, ethernet_ipv4_udp},
    };

    #[test]
    fn detects_pcap() -> anyhow::Result<()> {
        let frame = ethernet_ipv4_udp([10, 0, 0, 1], [10, 0, 0, 2]);
        let file = PcapFileBuilder::new(Endianness::BigEndian)
            .record(1, 0, &frame)
            .record(2, 0, &frame)
            .build();
        let reader = CaptureReader::new(&file[..])?;
        assert_eq!(reader.file_type(), PcapFileType::Pcap);
        let records = reader.collect::<Result<Vec<_>, _>>()?;
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|record| record.payload == frame));
        Ok(())
    }

    #[test]
    fn detects_pcapng() -> anyhow::Result<()> {
        let frame = ethernet_ipv4_udp([10, 0, 0, 1], [10, 0, 0, 2]);
        let file = PcapNgFileBuilder::new(Endianness::LittleEndian)
            .interface(1, 0, None)
            .enhanced_packet(0, 0, &frame, frame.len() as u32)
            .build();
        let mut reader = CaptureReader::new(&file[..])?;
        assert_eq!(reader.file_type(), PcapFileType::PcapNg);
        let record = reader.next().transpose()?.expect("one record");
        assert_eq!(record.payload, frame);
        assert!(reader.next().is_none());
        Ok(())
    }

    #[test]
    fn unknown_magic_is_a_format_error() {
        let bytes = [0xde, 0xad, 0xbe, 0xef, 0, 0, 0, 0];
        let err = CaptureReader::new(&bytes[..]).unwrap_err();
        assert!(matches!(err, CaptureError::UnknownFormat([0xde, 0xad, 0xbe, 0xef])));
        assert!(err.is_format_error());

        let err = CaptureReader::new(&bytes[..2]).unwrap_err();
        assert!(matches!(err, CaptureError::MissingMagicNumber(2)));
    }

    #[test]
    fn iterator_stops_after_error() -> anyhow::Result<()> {
        let mut file = PcapFileBuilder::new(Endianness::LittleEndian)
            .record(1, 0, &[0; 20])
            .record(2, 0, &[0; 20])
            .build();
        file.truncate(file.len() - 5);
        let mut reader = CaptureReader::new(&file[..])?;
        assert!(matches!(reader.next(), Some(Ok(_))));
        let err = reader.next().and_then(Result::err).expect("truncation error");
        assert!(err.is_format_error());
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
        Ok(())
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = CaptureReader::open("/definitely/not/here.pcap").unwrap_err();
        assert!(matches!(err, CaptureError::Open { .. }));
        assert!(!err.is_format_error());
    }
}
