//! The read, filter, decode and print pipeline
use std::io::{Read, Write};

use tracing::{debug, info};

use crate::{
    output::{DecodedSummary, write_summary},
    range::{RangeFilter, RecordRange},
    reader::{CaptureError, CaptureReader},
    record::Timestamp,
};

/// Which records to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DumpOptions {
    /// Zero-based index of the first record to print
    pub from: u64,
    /// Zero-based index of the last record to print, inclusive
    pub to: Option<u64>,
}
impl From<DumpOptions> for RecordRange {
    fn from(options: DumpOptions) -> Self {
        RecordRange::new(options.from, options.to)
    }
}

/// What a completed run did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DumpSummary {
    /// Records written to the output
    pub displayed: u64,
    /// Records read from the capture, skipped ones included
    pub read: u64,
    /// Displayed records whose frame was cut short by the snapshot length
    pub truncated: u64,
}

/// Prints every record of `reader` that falls inside the range of `options`
///
/// Relative times are measured from the first printed record. The first error
/// ends the run; records printed before it have already been written to `out`.
pub fn dump<R: Read, W: Write>(
    reader: CaptureReader<R>,
    options: DumpOptions,
    out: &mut W,
) -> Result<DumpSummary, CaptureError> {
    let file_type = reader.file_type();
    let mut records = RangeFilter::new(reader, options.into());
    let mut summary = DumpSummary::default();
    let mut first_timestamp: Option<Timestamp> = None;

    for item in records.by_ref() {
        let (index, record) = item?;
        let baseline = *first_timestamp.get_or_insert_with(|| {
            log_baseline(&record.timestamp);
            record.timestamp
        });
        debug!(
            index,
            captured_length = record.captured_length,
            original_length = record.original_length,
            "Record"
        );
        if record.is_truncated() {
            summary.truncated += 1;
        }
        write_summary(out, &DecodedSummary::new(index, &record, &baseline))?;
        summary.displayed += 1;
    }
    summary.read = records.next_index();
    info!(
        %file_type,
        displayed = summary.displayed,
        read = summary.read,
        truncated = summary.truncated,
        "Dump finished"
    );
    Ok(summary)
}

#[cfg(feature = "chrono")]
fn log_baseline(timestamp: &Timestamp) {
    match timestamp.to_datetime() {
        Some(datetime) => debug!(%datetime, "First displayed record"),
        None => debug!(?timestamp, "First displayed record"),
    }
}
#[cfg(not(feature = "chrono"))]
fn log_baseline(timestamp: &Timestamp) {
    debug!(?timestamp, "First displayed record");
}
