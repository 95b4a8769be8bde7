//! Best-effort classification of Ethernet II frames
//!
//! Only fixed offsets of an untagged Ethernet II frame are inspected. Every
//! read is preceded by a length check; a frame too short for a layer is
//! downgraded instead of rejected.
use std::{
    fmt,
    net::{Ipv4Addr, Ipv6Addr},
};

pub mod address;
pub mod protocol;

use address::{format_ipv4, format_ipv6};
use protocol::IpProtocol;

/// Length of the Ethernet II header
pub const ETHERNET_HEADER_LENGTH: usize = 14;
const ETHER_TYPE_OFFSET: usize = 12;

pub const ETHER_TYPE_IPV4: u16 = 0x0800;
pub const ETHER_TYPE_ARP: u16 = 0x0806;
pub const ETHER_TYPE_IPV6: u16 = 0x86DD;

/// IPv4 protocol byte, 9 bytes into the IP header
const IPV4_PROTOCOL_OFFSET: usize = ETHERNET_HEADER_LENGTH + 9;
const IPV4_SOURCE_OFFSET: usize = ETHERNET_HEADER_LENGTH + 12;
const IPV4_DESTINATION_OFFSET: usize = ETHERNET_HEADER_LENGTH + 16;
/// IPv6 next header byte, 6 bytes into the IP header
const IPV6_NEXT_HEADER_OFFSET: usize = ETHERNET_HEADER_LENGTH + 6;
const IPV6_SOURCE_OFFSET: usize = ETHERNET_HEADER_LENGTH + 8;
const IPV6_DESTINATION_OFFSET: usize = ETHERNET_HEADER_LENGTH + 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Detail {
    pub protocol: IpProtocol,
    /// Only present when the frame reaches past the destination address
    pub addresses: Option<(Ipv4Addr, Ipv4Addr)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv6Detail {
    pub next_header: IpProtocol,
    pub source: Ipv6Addr,
    pub destination: Ipv6Addr,
}

/// What a frame was recognised as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    /// `None` when the frame ends before the protocol byte
    Ipv4(Option<Ipv4Detail>),
    /// `None` when the frame ends before the end of the destination address
    Ipv6(Option<Ipv6Detail>),
    Arp,
    Unknown(u16),
    /// Shorter than an Ethernet header
    TooShort,
}
impl AddressFamily {
    /// Source and destination in their textual form, when known
    pub fn addresses(&self) -> Option<(String, String)> {
        match self {
            AddressFamily::Ipv4(Some(Ipv4Detail {
                addresses: Some((source, destination)),
                ..
            })) => Some((format_ipv4(*source), format_ipv4(*destination))),
            AddressFamily::Ipv6(Some(detail)) => Some((
                format_ipv6(detail.source),
                format_ipv6(detail.destination),
            )),
            _ => None,
        }
    }
}
/// The protocol line of the text output
impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::Ipv4(Some(detail)) => write!(f, "IPv4/{}", detail.protocol),
            AddressFamily::Ipv4(None) => f.write_str("IPv4"),
            AddressFamily::Ipv6(Some(detail)) => write!(f, "IPv6/{}", detail.next_header),
            AddressFamily::Ipv6(None) => f.write_str("IPv6"),
            AddressFamily::Arp => f.write_str("ARP"),
            AddressFamily::Unknown(ether_type) => {
                write!(f, "Unknown EtherType (0x{ether_type:04x})")
            }
            AddressFamily::TooShort => f.write_str("Unknown (frame too short)"),
        }
    }
}

/// Classifies a frame by the EtherType of its Ethernet II header
pub fn decode_frame(frame: &[u8]) -> AddressFamily {
    if frame.len() < ETHERNET_HEADER_LENGTH {
        return AddressFamily::TooShort;
    }
    let ether_type = u16::from_be_bytes([frame[ETHER_TYPE_OFFSET], frame[ETHER_TYPE_OFFSET + 1]]);
    match ether_type {
        ETHER_TYPE_IPV4 => AddressFamily::Ipv4(decode_ipv4(frame)),
        ETHER_TYPE_ARP => AddressFamily::Arp,
        ETHER_TYPE_IPV6 => AddressFamily::Ipv6(decode_ipv6(frame)),
        other => AddressFamily::Unknown(other),
    }
}

fn decode_ipv4(frame: &[u8]) -> Option<Ipv4Detail> {
    let protocol = IpProtocol::from(*frame.get(IPV4_PROTOCOL_OFFSET)?);
    let addresses = ipv4_at(frame, IPV4_SOURCE_OFFSET).zip(ipv4_at(frame, IPV4_DESTINATION_OFFSET));
    Some(Ipv4Detail {
        protocol,
        addresses,
    })
}

fn decode_ipv6(frame: &[u8]) -> Option<Ipv6Detail> {
    let destination = ipv6_at(frame, IPV6_DESTINATION_OFFSET)?;
    Some(Ipv6Detail {
        next_header: IpProtocol::from(*frame.get(IPV6_NEXT_HEADER_OFFSET)?),
        source: ipv6_at(frame, IPV6_SOURCE_OFFSET)?,
        destination,
    })
}

fn ipv4_at(frame: &[u8], offset: usize) -> Option<Ipv4Addr> {
    let octets: [u8; 4] = frame.get(offset..offset + 4)?.try_into().ok()?;
    Some(Ipv4Addr::from(octets))
}

fn ipv6_at(frame: &[u8], offset: usize) -> Option<Ipv6Addr> {
    let octets: [u8; 16] = frame.get(offset..offset + 16)?.try_into().ok()?;
    Some(Ipv6Addr::from(octets))
}
