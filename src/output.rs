//! Text rendering of decoded records
use std::io::{self, Write};

use crate::decode::{AddressFamily, decode_frame};
use crate::record::{CaptureRecord, Timestamp};

/// Everything printed for one displayed record
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSummary<'a> {
    /// Zero-based index in the capture
    pub index: u64,
    /// Seconds since the first displayed record
    pub relative_time: f64,
    /// Length of the frame on the wire
    pub length: u32,
    pub family: AddressFamily,
    /// The captured bytes
    pub payload: &'a [u8],
}
impl<'a> DecodedSummary<'a> {
    pub fn new(index: u64, record: &'a CaptureRecord, baseline: &Timestamp) -> Self {
        Self {
            index,
            relative_time: record.timestamp.seconds_since(baseline),
            length: record.original_length,
            family: decode_frame(&record.payload),
            payload: &record.payload,
        }
    }
}

/// Writes one record block followed by a blank line
///
/// ```text
/// Packet 1:
///   Time: 0.000000
///   Length: 60 bytes
///   Protocol: IPv4/UDP
///   Source: 10.0.0.1
///   Destination: 10.0.0.2
///   Data: 00 1b 21 ...
/// ```
pub fn write_summary<W: Write>(out: &mut W, summary: &DecodedSummary<'_>) -> io::Result<()> {
    writeln!(out, "Packet {}:", summary.index + 1)?;
    writeln!(out, "  Time: {:.6}", summary.relative_time)?;
    writeln!(out, "  Length: {} bytes", summary.length)?;
    writeln!(out, "  Protocol: {}", summary.family)?;
    if let Some((source, destination)) = summary.family.addresses() {
        writeln!(out, "  Source: {source}")?;
        writeln!(out, "  Destination: {destination}")?;
    }
    writeln!(out, "  Data: {}", hex_dump(summary.payload))?;
    writeln!(out)
}

/// Lowercase two digit hex of every byte, separated by single spaces
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            hex.push(' ');
        }
        hex.push_str(&format!("{byte:02x}"));
    }
    hex
}
