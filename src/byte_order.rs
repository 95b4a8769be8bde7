//! Byte order handling for pcap and pcapng files
//!
//! Both container formats store their integers in the byte order of the
//! machine that wrote them, announced once by a magic value at the start of
//! the file (or section).
use std::io::Read;

/// Decoding of fixed-size integers in one byte order
pub trait ByteOrder: Clone + Copy {
    /// Converts a byte array to a u16
    fn u16_from_bytes(self, bytes: [u8; 2]) -> u16;
    /// Converts a byte array to a u32
    fn u32_from_bytes(self, bytes: [u8; 4]) -> u32;
    fn u64_from_bytes(self, bytes: [u8; 8]) -> u64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BigEndian;
impl ByteOrder for BigEndian {
    fn u16_from_bytes(self, bytes: [u8; 2]) -> u16 {
        u16::from_be_bytes(bytes)
    }
    fn u32_from_bytes(self, bytes: [u8; 4]) -> u32 {
        u32::from_be_bytes(bytes)
    }
    fn u64_from_bytes(self, bytes: [u8; 8]) -> u64 {
        u64::from_be_bytes(bytes)
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LittleEndian;
impl ByteOrder for LittleEndian {
    fn u16_from_bytes(self, bytes: [u8; 2]) -> u16 {
        u16::from_le_bytes(bytes)
    }
    fn u32_from_bytes(self, bytes: [u8; 4]) -> u32 {
        u32::from_le_bytes(bytes)
    }
    fn u64_from_bytes(self, bytes: [u8; 8]) -> u64 {
        u64::from_le_bytes(bytes)
    }
}

/// Byte order selected at runtime from a file's magic value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    #[default]
    LittleEndian,
    BigEndian,
}
impl ByteOrder for Endianness {
    fn u16_from_bytes(self, bytes: [u8; 2]) -> u16 {
        match self {
            Endianness::BigEndian => BigEndian.u16_from_bytes(bytes),
            Endianness::LittleEndian => LittleEndian.u16_from_bytes(bytes),
        }
    }
    fn u32_from_bytes(self, bytes: [u8; 4]) -> u32 {
        match self {
            Endianness::BigEndian => BigEndian.u32_from_bytes(bytes),
            Endianness::LittleEndian => LittleEndian.u32_from_bytes(bytes),
        }
    }
    fn u64_from_bytes(self, bytes: [u8; 8]) -> u64 {
        match self {
            Endianness::BigEndian => BigEndian.u64_from_bytes(bytes),
            Endianness::LittleEndian => LittleEndian.u64_from_bytes(bytes),
        }
    }
}
impl Endianness {
    /// Reads a u16 at `offset` of an already bounds-checked header buffer
    #[inline(always)]
    pub(crate) fn u16_at(self, bytes: &[u8], offset: usize) -> u16 {
        self.u16_from_bytes([bytes[offset], bytes[offset + 1]])
    }
    /// Reads a u32 at `offset` of an already bounds-checked header buffer
    #[inline(always)]
    pub(crate) fn u32_at(self, bytes: &[u8], offset: usize) -> u32 {
        self.u32_from_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    }
}

/// Reads that report how far a short input got instead of failing outright
pub trait ReadExt {
    /// Fills as much of `buf` as the reader can provide.
    ///
    /// Unlike [Read::read_exact] the number of bytes read is returned when the
    /// input ends early, which lets callers tell a clean end of file (0 bytes)
    /// apart from a truncated structure.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, std::io::Error>;
    /// Reads and drops `count` bytes, returning how many were actually skipped
    fn skip_bytes(&mut self, count: u64) -> Result<u64, std::io::Error>;
}
impl<R: Read> ReadExt for R {
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, std::io::Error> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(filled)
    }
    fn skip_bytes(&mut self, count: u64) -> Result<u64, std::io::Error> {
        std::io::copy(&mut self.by_ref().take(count), &mut std::io::sink())
    }
}
