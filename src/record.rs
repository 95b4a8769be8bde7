/// Capture time of a record, reduced to microsecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timestamp {
    pub seconds: i64,
    /// Always below 1_000_000
    pub micros: u32,
}
impl Timestamp {
    pub fn new(seconds: i64, micros: u32) -> Self {
        Self {
            seconds: seconds.saturating_add(i64::from(micros / 1_000_000)),
            micros: micros % 1_000_000,
        }
    }
    /// Builds a timestamp from a count of `units_per_second` ticks since the epoch
    pub fn from_units(ticks: u64, units_per_second: u64) -> Self {
        let units_per_second = units_per_second.max(1);
        let seconds = ticks / units_per_second;
        let fraction = ticks % units_per_second;
        let micros = (u128::from(fraction) * 1_000_000 / u128::from(units_per_second)) as u32;
        // Only a one tick per second resolution can reach past i64::MAX seconds
        Self::new(i64::try_from(seconds).unwrap_or(i64::MAX), micros)
    }
    /// Microseconds since the epoch, wide enough for any `seconds`
    pub fn total_micros(&self) -> i128 {
        i128::from(self.seconds) * 1_000_000 + i128::from(self.micros)
    }
    /// Seconds elapsed since `baseline`, negative if this timestamp is earlier
    pub fn seconds_since(&self, baseline: &Timestamp) -> f64 {
        (self.total_micros() - baseline.total_micros()) as f64 / 1_000_000.0
    }
    #[cfg(feature = "chrono")]
    pub fn to_datetime(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp(self.seconds, self.micros * 1_000)
    }
}

/// One stored packet as read from a capture file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRecord {
    pub timestamp: Timestamp,
    /// Number of bytes stored in the file, always `payload.len()`
    pub captured_length: u32,
    /// Length of the frame on the wire
    pub original_length: u32,
    pub payload: Vec<u8>,
}
impl CaptureRecord {
    pub fn new(timestamp: Timestamp, original_length: u32, payload: Vec<u8>) -> Self {
        Self {
            timestamp,
            captured_length: payload.len() as u32,
            original_length,
            payload,
        }
    }
    /// Whether the frame was cut short by the snapshot length
    pub fn is_truncated(&self) -> bool {
        self.captured_length < self.original_length
    }
}
