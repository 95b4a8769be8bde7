use std::io::Read;

use tracing::{debug, warn};

use crate::{
    byte_order::ReadExt,
    pcap_ng::{
        PcapNgParseError,
        blocks::{
            BlockHeader, EnhancedPacket, InterfaceDescriptionBlock, PcapNgBlock,
            SectionHeaderBlock, SimplePacket, read_block_body, skip_block_body,
        },
    },
    record::{CaptureRecord, Timestamp},
};

/// An interface of the current section with its resolved timestamp resolution
#[derive(Debug, Clone)]
struct Interface {
    description: InterfaceDescriptionBlock,
    units_per_second: u64,
}

/// A synchronous reader for PCAP-NG files
#[derive(Debug)]
pub struct SyncPcapNgReader<R: Read> {
    reader: R,
    /// The current section header block
    current_section: SectionHeaderBlock,
    /// The interfaces described in the current section
    ///
    /// Will reset each time a new section header block is read
    interfaces: Vec<Interface>,
}
impl<R: Read> SyncPcapNgReader<R> {
    /// Creates a new `SyncPcapNgReader` from a reader
    /// Returns `Ok(Self)` on success, or `Err` if the leading section header
    /// block could not be read
    pub fn new(mut reader: R) -> Result<Self, PcapNgParseError> {
        let current_section = SectionHeaderBlock::read_from_reader(&mut reader)?;
        Ok(Self::new_with_section(reader, current_section))
    }
    pub(crate) fn new_with_section(reader: R, current_section: SectionHeaderBlock) -> Self {
        debug!(
            byte_order = ?current_section.byte_order,
            version = ?current_section.version,
            hardware = ?current_section.hardware(),
            os = ?current_section.os(),
            application = ?current_section.user_application(),
            "Read pcap-ng section header"
        );
        Self {
            reader,
            current_section,
            interfaces: Vec::with_capacity(1),
        }
    }
    /// Returns the section header of the current section
    pub fn current_section(&self) -> &SectionHeaderBlock {
        &self.current_section
    }
    /// Returns the interfaces described in the current section
    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceDescriptionBlock> {
        self.interfaces.iter().map(|interface| &interface.description)
    }
    pub fn next_block(&mut self) -> Result<Option<PcapNgBlock>, PcapNgParseError> {
        let mut header_bytes = [0u8; BlockHeader::SIZE];
        let got = self.reader.read_available(&mut header_bytes)?;
        if got == 0 {
            return Ok(None);
        }
        if got < BlockHeader::SIZE {
            return Err(PcapNgParseError::TruncatedBlock {
                expected: BlockHeader::SIZE,
                got,
            });
        }
        let header = BlockHeader::parse_from_bytes(&header_bytes);
        if header.is_section_header() {
            let section = SectionHeaderBlock::read_with_header(&mut self.reader, &header)?;
            debug!(byte_order = ?section.byte_order, "New pcap-ng section");
            self.interfaces.clear();
            self.current_section = section.clone();
            return Ok(Some(PcapNgBlock::SectionHeader(section)));
        }

        let byte_order = self.current_section.byte_order;
        let block_type = header.block_type_as_u32(byte_order);
        let block_length = header.block_length_as_u32(byte_order);
        let body_length = header.body_length(byte_order)?;
        let block = match block_type {
            InterfaceDescriptionBlock::BLOCK_TYPE => {
                let body = read_block_body(&mut self.reader, body_length, block_length, byte_order)?;
                let description = InterfaceDescriptionBlock::parse(&body, block_length, byte_order)?;
                let units_per_second = description.units_per_second()?;
                if !description.link_type.is_ethernet() {
                    warn!(
                        interface = self.interfaces.len(),
                        name = ?description.name(),
                        link_type = %description.link_type,
                        "Interface is not Ethernet, frames will still be decoded as Ethernet II"
                    );
                }
                self.interfaces.push(Interface {
                    description: description.clone(),
                    units_per_second,
                });
                PcapNgBlock::InterfaceDescription(description)
            }
            EnhancedPacket::BLOCK_TYPE => {
                let body = read_block_body(&mut self.reader, body_length, block_length, byte_order)?;
                PcapNgBlock::EnhancedPacket(EnhancedPacket::parse(&body, block_length, byte_order)?)
            }
            SimplePacket::BLOCK_TYPE => {
                let body = read_block_body(&mut self.reader, body_length, block_length, byte_order)?;
                PcapNgBlock::SimplePacket(SimplePacket::parse(&body, block_length, byte_order)?)
            }
            _ => {
                skip_block_body(&mut self.reader, body_length)?;
                debug!(block_type, block_length, "Skipped pcap-ng block");
                PcapNgBlock::Skipped {
                    block_type,
                    block_length,
                }
            }
        };
        Ok(Some(block))
    }
    /// Reads the next packet from the pcapng file
    ///
    /// Blocks that are not packets are consumed until a packet block is found.
    /// When Ok(None) is returned, the end of the file has been reached.
    pub fn next_record(&mut self) -> Result<Option<CaptureRecord>, PcapNgParseError> {
        while let Some(block) = self.next_block()? {
            match block {
                PcapNgBlock::EnhancedPacket(packet) => {
                    let interface = self
                        .interfaces
                        .get(packet.interface_id as usize)
                        .ok_or(PcapNgParseError::UnknownInterface(packet.interface_id))?;
                    let timestamp =
                        Timestamp::from_units(packet.timestamp(), interface.units_per_second);
                    return Ok(Some(CaptureRecord::new(
                        timestamp,
                        packet.original_length,
                        packet.content,
                    )));
                }
                PcapNgBlock::SimplePacket(mut packet) => {
                    let interface = self
                        .interfaces
                        .first()
                        .ok_or(PcapNgParseError::UnknownInterface(0))?;
                    packet.apply_snap_length(interface.description.snap_length);
                    return Ok(Some(CaptureRecord::new(
                        Timestamp::default(),
                        packet.original_length,
                        packet.content,
                    )));
                }
                _ => continue,
            }
        }
        Ok(None)
    }
}
