//! Textual forms of network addresses
use std::net::{Ipv4Addr, Ipv6Addr};

/// Dotted-decimal form of an IPv4 address, e.g. `192.168.0.1`
pub fn format_ipv4(address: Ipv4Addr) -> String {
    address.to_string()
}

/// Compressed colon-hex form of an IPv6 address
///
/// See [compress_ipv6_segments].
pub fn format_ipv6(address: Ipv6Addr) -> String {
    compress_ipv6_segments(&address.segments())
}

/// Renders eight 16 bit segments as lowercase hex joined by `:`, with the
/// longest run of zero segments replaced by `::`.
///
/// When several runs are equally long the first one is compressed. Unlike
/// [Ipv6Addr]'s `Display`, a run of a single zero segment is compressed too and
/// IPv4-mapped addresses are not given a dotted suffix.
pub fn compress_ipv6_segments(segments: &[u16; 8]) -> String {
    let mut best: Option<(usize, usize)> = None;
    let mut current: Option<(usize, usize)> = None;
    for (i, segment) in segments.iter().enumerate() {
        if *segment != 0 {
            current = None;
            continue;
        }
        let (start, length) = current.map_or((i, 1), |(start, length)| (start, length + 1));
        current = Some((start, length));
        if best.is_none_or(|(_, best_length)| length > best_length) {
            best = Some((start, length));
        }
    }

    let hex = |segments: &[u16]| {
        segments
            .iter()
            .map(|segment| format!("{segment:x}"))
            .collect::<Vec<_>>()
            .join(":")
    };
    match best {
        None => hex(segments),
        Some((start, length)) => {
            let head = hex(&segments[..start]);
            let tail = hex(&segments[start + length..]);
            format!("{head}::{tail}")
        }
    }
}
