use std::cmp::Ordering;

use num_traits::PrimInt;

use crate::cursor::{BidirectionalCursor, Cursor, RandomAccessCursor, Tier};
use crate::error::LazyError;
use crate::sequence::Sequence;

/// Half-open integer range `[start, end)` usable as a source sequence
///
/// Elements are produced by value; nothing is stored besides the bounds.
/// A range whose end lies before its start is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange<T> {
    start: T,
    end: T,
}

impl<T: PrimInt> IntRange<T> {
    pub fn new(start: T, end: T) -> Self {
        IntRange {
            start,
            end: end.max(start),
        }
    }

    pub fn len(&self) -> usize {
        span(self.start, self.end)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Number of steps from `from` to `to`, saturating at `usize::MAX`
fn span<T: PrimInt>(from: T, to: T) -> usize {
    steps_between(from, to)
        .and_then(|steps| usize::try_from(steps).ok())
        .unwrap_or(usize::MAX)
}

/// Signed number of steps from `from` to `to`, if it fits in an `i128`
fn steps_between<T: PrimInt>(from: T, to: T) -> Option<i128> {
    if let (Some(from), Some(to)) = (from.to_i128(), to.to_i128()) {
        return to.checked_sub(from);
    }
    // Only unsigned values above i128::MAX get here, where the
    // difference in T cannot overflow.
    if to >= from {
        (to - from).to_i128()
    } else {
        (from - to).to_i128().map(|steps| -steps)
    }
}

/// `start` moved by `steps`, if the result is representable in `T`
fn step_from<T: PrimInt>(start: T, steps: i128) -> Option<T> {
    if let Some(target) = start.to_i128().and_then(|start| start.checked_add(steps)) {
        return num_traits::cast(target);
    }
    let magnitude: T = num_traits::cast(steps.unsigned_abs())?;
    if steps >= 0 {
        start.checked_add(&magnitude)
    } else {
        start.checked_sub(&magnitude)
    }
}

/// Convenience function to create an integer range source
pub fn range<T: PrimInt>(start: T, end: T) -> IntRange<T> {
    IntRange::new(start, end)
}

impl<T: PrimInt> Sequence for IntRange<T> {
    type Cursor = RangeCursor<T>;

    fn begin(self) -> Self::Cursor {
        RangeCursor {
            range: self,
            current: self.start,
        }
    }

    fn end(self) -> Self::Cursor {
        RangeCursor {
            range: self,
            current: self.end,
        }
    }
}

/// Random-access cursor over an `IntRange`
#[derive(Debug, Clone, Copy)]
pub struct RangeCursor<T> {
    range: IntRange<T>,
    current: T,
}

impl<T: PrimInt> RangeCursor<T> {
    /// Offset of this cursor from the start of its range
    pub fn position(&self) -> usize {
        span(self.range.start, self.current)
    }
}

impl<T: PrimInt> PartialEq for RangeCursor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.range == other.range && self.current == other.current
    }
}

impl<T: PrimInt> PartialOrd for RangeCursor<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.range != other.range {
            return None;
        }
        Some(self.current.cmp(&other.current))
    }
}

impl<T: PrimInt> Cursor for RangeCursor<T> {
    type Item = T;
    const TIER: Tier = Tier::RandomAccess;

    fn value(&self) -> Result<Self::Item, LazyError> {
        if self.current < self.range.end {
            Ok(self.current)
        } else {
            Err(LazyError::EndOfSequence)
        }
    }

    fn next(self) -> Self {
        if self.current < self.range.end {
            RangeCursor {
                current: self.current + T::one(),
                ..self
            }
        } else {
            self
        }
    }

    fn same_origin(&self, other: &Self) -> bool {
        self.range == other.range
    }

    fn advance(self, n: usize) -> Self {
        match step_from(self.current, n as i128) {
            Some(current) if current < self.range.end => RangeCursor { current, ..self },
            _ => self.range.end(),
        }
    }
}

impl<T: PrimInt> BidirectionalCursor for RangeCursor<T> {
    fn prev(self) -> Self {
        if self.current > self.range.start {
            RangeCursor {
                current: self.current - T::one(),
                ..self
            }
        } else {
            self
        }
    }
}

impl<T: PrimInt> RandomAccessCursor for RangeCursor<T> {
    fn offset(self, k: isize) -> Result<Self, LazyError> {
        match step_from(self.current, k as i128) {
            Some(current) if current >= self.range.start && current <= self.range.end => {
                Ok(RangeCursor { current, ..self })
            }
            _ => Err(LazyError::OffsetOutOfRange {
                offset: k,
                len: self.range.len(),
            }),
        }
    }

    fn distance(&self, origin: &Self) -> Result<isize, LazyError> {
        if !self.same_origin(origin) {
            return Err(LazyError::ForeignCursor);
        }
        steps_between(origin.current, self.current)
            .and_then(|steps| isize::try_from(steps).ok())
            .ok_or(LazyError::OffsetOutOfRange {
                offset: isize::MAX,
                len: self.range.len(),
            })
    }
}
