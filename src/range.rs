//! Index based selection of records
/// The inclusive window of zero-based record indices to display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordRange {
    pub from: u64,
    /// `None` reads to the end of the input
    pub to: Option<u64>,
}
impl RecordRange {
    pub fn new(from: u64, to: Option<u64>) -> Self {
        Self { from, to }
    }
    pub fn contains(&self, index: u64) -> bool {
        index >= self.from && self.to.is_none_or(|to| index <= to)
    }
    /// Whether no index past `index` can be in the range
    pub fn is_past(&self, index: u64) -> bool {
        self.to.is_some_and(|to| index > to)
    }
}

/// Numbers the records of `inner` and forwards only those inside the range
///
/// Indices count every record of the underlying stream, skipped ones included.
/// Once the end of the range is passed no further records are pulled from
/// `inner`. Errors are forwarded wherever they occur.
#[derive(Debug)]
pub struct RangeFilter<I> {
    inner: I,
    range: RecordRange,
    next_index: u64,
    finished: bool,
}
impl<I> RangeFilter<I> {
    pub fn new(inner: I, range: RecordRange) -> Self {
        Self {
            inner,
            range,
            next_index: 0,
            finished: false,
        }
    }
    /// Index the next record pulled from the inner sequence will get
    pub fn next_index(&self) -> u64 {
        self.next_index
    }
}
impl<I, T, E> Iterator for RangeFilter<I>
where
    I: Iterator<Item = Result<T, E>>,
{
    type Item = Result<(u64, T), E>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            if self.range.is_past(self.next_index) {
                self.finished = true;
                break;
            }
            let value = match self.inner.next() {
                Some(Ok(value)) => value,
                Some(Err(err)) => {
                    self.finished = true;
                    return Some(Err(err));
                }
                None => {
                    self.finished = true;
                    break;
                }
            };
            let index = self.next_index;
            self.next_index += 1;
            if self.range.contains(index) {
                return Some(Ok((index, value)));
            }
        }
        None
    }
}
