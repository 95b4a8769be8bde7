//! In-memory capture files and frames for tests
use etherparse::PacketBuilder;

use crate::{
    byte_order::Endianness, decode::ETHER_TYPE_ARP, link_type::LinkType,
    pcap_ng::PCAP_NG_MAGIC,
};

const SOURCE_MAC: [u8; 6] = [1, 2, 3, 4, 5, 6];
const DESTINATION_MAC: [u8; 6] = [7, 8, 9, 10, 11, 12];
const PAYLOAD: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

fn put_u16(buffer: &mut Vec<u8>, endianness: Endianness, value: u16) {
    match endianness {
        Endianness::BigEndian => buffer.extend_from_slice(&value.to_be_bytes()),
        Endianness::LittleEndian => buffer.extend_from_slice(&value.to_le_bytes()),
    }
}
fn put_u32(buffer: &mut Vec<u8>, endianness: Endianness, value: u32) {
    match endianness {
        Endianness::BigEndian => buffer.extend_from_slice(&value.to_be_bytes()),
        Endianness::LittleEndian => buffer.extend_from_slice(&value.to_le_bytes()),
    }
}
fn pad_to_32_bits(buffer: &mut Vec<u8>) {
    while buffer.len() % 4 != 0 {
        buffer.push(0);
    }
}

/// Writes a classic pcap file record by record
pub struct PcapFileBuilder {
    endianness: Endianness,
    nanosecond: bool,
    link_type: LinkType,
    records: Vec<u8>,
}
impl PcapFileBuilder {
    pub fn new(endianness: Endianness) -> Self {
        Self {
            endianness,
            nanosecond: false,
            link_type: LinkType::Ethernet,
            records: Vec::new(),
        }
    }
    pub fn nanosecond(mut self) -> Self {
        self.nanosecond = true;
        self
    }
    pub fn link_type(mut self, link_type: LinkType) -> Self {
        self.link_type = link_type;
        self
    }
    pub fn record(self, seconds: u32, fraction: u32, payload: &[u8]) -> Self {
        let length = payload.len() as u32;
        self.record_with_original(seconds, fraction, payload, length)
    }
    pub fn record_with_original(
        mut self,
        seconds: u32,
        fraction: u32,
        payload: &[u8],
        original_length: u32,
    ) -> Self {
        self = self.raw_record_header(seconds, fraction, payload.len() as u32, original_length);
        self.records.extend_from_slice(payload);
        self
    }
    /// A record header without the payload it announces
    pub fn raw_record_header(
        mut self,
        seconds: u32,
        fraction: u32,
        captured_length: u32,
        original_length: u32,
    ) -> Self {
        for value in [seconds, fraction, captured_length, original_length] {
            put_u32(&mut self.records, self.endianness, value);
        }
        self
    }
    pub fn build(self) -> Vec<u8> {
        let magic = if self.nanosecond {
            0xa1b2_3c4d
        } else {
            0xa1b2_c3d4
        };
        let mut file = Vec::with_capacity(24 + self.records.len());
        put_u32(&mut file, self.endianness, magic);
        put_u16(&mut file, self.endianness, 2);
        put_u16(&mut file, self.endianness, 4);
        // thiszone and sigfigs
        put_u32(&mut file, self.endianness, 0);
        put_u32(&mut file, self.endianness, 0);
        put_u32(&mut file, self.endianness, 65535);
        put_u32(&mut file, self.endianness, u32::from(self.link_type));
        file.extend_from_slice(&self.records);
        file
    }
}

/// Writes a pcap-ng file block by block, starting with a section header
pub struct PcapNgFileBuilder {
    endianness: Endianness,
    file: Vec<u8>,
}
impl PcapNgFileBuilder {
    pub fn new(endianness: Endianness) -> Self {
        let builder = Self {
            endianness,
            file: Vec::new(),
        };
        builder.section(endianness)
    }
    fn block(mut self, block_type: u32, body: &[u8]) -> Self {
        let mut body = body.to_vec();
        pad_to_32_bits(&mut body);
        let block_length = (body.len() + 12) as u32;
        put_u32(&mut self.file, self.endianness, block_type);
        put_u32(&mut self.file, self.endianness, block_length);
        self.file.extend_from_slice(&body);
        put_u32(&mut self.file, self.endianness, block_length);
        self
    }
    /// Starts a new section; blocks after it are written in `endianness`
    pub fn section(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        let mut body = Vec::new();
        put_u32(&mut body, endianness, 0x1A2B_3C4D);
        put_u16(&mut body, endianness, 1);
        put_u16(&mut body, endianness, 0);
        body.extend_from_slice(&[0xFF; 8]);
        self.block(u32::from_be_bytes(PCAP_NG_MAGIC), &body)
    }
    pub fn interface(self, link_type: u16, snap_length: u32, tsresol: Option<u8>) -> Self {
        let endianness = self.endianness;
        let mut body = Vec::new();
        put_u16(&mut body, endianness, link_type);
        put_u16(&mut body, endianness, 0);
        put_u32(&mut body, endianness, snap_length);
        if let Some(resolution) = tsresol {
            put_u16(&mut body, endianness, 9);
            put_u16(&mut body, endianness, 1);
            body.push(resolution);
            pad_to_32_bits(&mut body);
            // opt_endofopt
            put_u32(&mut body, endianness, 0);
        }
        self.block(1, &body)
    }
    pub fn enhanced_packet(
        self,
        interface_id: u32,
        timestamp: u64,
        data: &[u8],
        original_length: u32,
    ) -> Self {
        let endianness = self.endianness;
        let mut body = Vec::new();
        put_u32(&mut body, endianness, interface_id);
        put_u32(&mut body, endianness, (timestamp >> 32) as u32);
        put_u32(&mut body, endianness, timestamp as u32);
        put_u32(&mut body, endianness, data.len() as u32);
        put_u32(&mut body, endianness, original_length);
        body.extend_from_slice(data);
        self.block(6, &body)
    }
    pub fn simple_packet(self, data: &[u8], original_length: u32) -> Self {
        let mut body = Vec::new();
        put_u32(&mut body, self.endianness, original_length);
        body.extend_from_slice(data);
        self.block(3, &body)
    }
    /// A block of a type the reader does not interpret
    pub fn custom_block(self, block_type: u32, body: &[u8]) -> Self {
        self.block(block_type, body)
    }
    pub fn build(self) -> Vec<u8> {
        self.file
    }
}

/// Ethernet II header with zeroed MAC addresses
pub fn ethernet_header(ether_type: u16) -> Vec<u8> {
    let mut frame = vec![0; 12];
    frame.extend_from_slice(&ether_type.to_be_bytes());
    frame
}

pub fn ethernet_ipv4_udp(source: [u8; 4], destination: [u8; 4]) -> Vec<u8> {
    let builder = PacketBuilder::ethernet2(SOURCE_MAC, DESTINATION_MAC)
        .ipv4(source, destination, 20)
        .udp(21, 1234);
    let mut frame = Vec::<u8>::with_capacity(builder.size(PAYLOAD.len()));
    builder
        .write(&mut frame, &PAYLOAD)
        .expect("write to a Vec");
    frame
}

pub fn ethernet_ipv4_tcp(source: [u8; 4], destination: [u8; 4]) -> Vec<u8> {
    let builder = PacketBuilder::ethernet2(SOURCE_MAC, DESTINATION_MAC)
        .ipv4(source, destination, 64)
        .tcp(49152, 80, 1, 4096);
    let mut frame = Vec::<u8>::with_capacity(builder.size(PAYLOAD.len()));
    builder
        .write(&mut frame, &PAYLOAD)
        .expect("write to a Vec");
    frame
}

pub fn ethernet_ipv6_tcp(source: [u8; 16], destination: [u8; 16]) -> Vec<u8> {
    let builder = PacketBuilder::ethernet2(SOURCE_MAC, DESTINATION_MAC)
        .ipv6(source, destination, 64)
        .tcp(49152, 443, 1, 4096);
    let mut frame = Vec::<u8>::with_capacity(builder.size(PAYLOAD.len()));
    builder
        .write(&mut frame, &PAYLOAD)
        .expect("write to a Vec");
    frame
}

/// A broadcast ARP request for 192.168.0.2
pub fn arp_frame() -> Vec<u8> {
    let mut frame = vec![0xff; 6];
    frame.extend_from_slice(&SOURCE_MAC);
    frame.extend_from_slice(&ETHER_TYPE_ARP.to_be_bytes());
    // Ethernet / IPv4, request
    frame.extend_from_slice(&[0, 1, 0x08, 0, 6, 4, 0, 1]);
    frame.extend_from_slice(&SOURCE_MAC);
    frame.extend_from_slice(&[192, 168, 0, 1]);
    frame.extend_from_slice(&[0; 6]);
    frame.extend_from_slice(&[192, 168, 0, 2]);
    frame
}
