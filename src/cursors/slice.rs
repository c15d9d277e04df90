use std::cmp::Ordering;
use std::fmt;

use crate::cursor::{BidirectionalCursor, Cursor, RandomAccessCursor, Tier};
use crate::error::LazyError;

/// Random-access cursor over a borrowed slice
///
/// Yields `&'a T`, so a slice of `Cell<T>` can be written through.
pub enum SliceCursor<'a, T> {
    /// Cursor pointing at an element
    Valid {
        data: &'a [T],
        /// Index in the data slice (0-based)
        position: usize,
    },
    /// Cursor one past the last element
    End { data: &'a [T] },
}

impl<'a, T> SliceCursor<'a, T> {
    pub fn new(data: &'a [T]) -> Self {
        Self::at(data, 0)
    }

    /// Cursor at `position`, or the end cursor if `position` is past the last element
    pub fn at(data: &'a [T], position: usize) -> Self {
        if position >= data.len() {
            return SliceCursor::End { data };
        }
        SliceCursor::Valid { data, position }
    }

    pub fn end(data: &'a [T]) -> Self {
        SliceCursor::End { data }
    }

    /// Index of this cursor in the slice; the end cursor reports the slice length
    pub fn position(&self) -> usize {
        match self {
            SliceCursor::Valid { position, .. } => *position,
            SliceCursor::End { data } => data.len(),
        }
    }

    pub fn source(&self) -> &'a [T] {
        match self {
            SliceCursor::Valid { data, .. } => data,
            SliceCursor::End { data } => data,
        }
    }
}

impl<T> Clone for SliceCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SliceCursor<'_, T> {}

impl<T> fmt::Debug for SliceCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceCursor::Valid { position, .. } => {
                f.debug_struct("Valid").field("position", position).finish()
            }
            SliceCursor::End { data } => f.debug_struct("End").field("len", &data.len()).finish(),
        }
    }
}

impl<T> PartialEq for SliceCursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_origin(other) && self.position() == other.position()
    }
}

impl<T> PartialOrd for SliceCursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.same_origin(other) {
            return None;
        }
        Some(self.position().cmp(&other.position()))
    }
}

impl<'a, T> Cursor for SliceCursor<'a, T> {
    type Item = &'a T;
    const TIER: Tier = Tier::RandomAccess;

    fn value(&self) -> Result<Self::Item, LazyError> {
        match self {
            SliceCursor::Valid { data, position } => {
                data.get(*position).ok_or(LazyError::EndOfSequence)
            }
            SliceCursor::End { .. } => Err(LazyError::EndOfSequence),
        }
    }

    fn next(self) -> Self {
        match self {
            SliceCursor::Valid { data, position } => Self::at(data, position + 1),
            SliceCursor::End { data } => SliceCursor::End { data },
        }
    }

    fn same_origin(&self, other: &Self) -> bool {
        std::ptr::eq(self.source(), other.source())
    }

    fn advance(self, n: usize) -> Self {
        let data = self.source();
        Self::at(data, self.position().saturating_add(n))
    }

    fn try_advance(self, n: usize, end: &Self) -> Result<Self, LazyError> {
        let available = end.position().saturating_sub(self.position());
        if n > available {
            return Err(LazyError::CountExceedsLength {
                requested: n,
                available,
            });
        }
        Ok(self.advance(n))
    }
}

impl<T> BidirectionalCursor for SliceCursor<'_, T> {
    fn prev(self) -> Self {
        let data = self.source();
        Self::at(data, self.position().saturating_sub(1))
    }
}

impl<T> RandomAccessCursor for SliceCursor<'_, T> {
    fn offset(self, k: isize) -> Result<Self, LazyError> {
        let data = self.source();
        match self.position().checked_add_signed(k) {
            Some(position) if position <= data.len() => Ok(Self::at(data, position)),
            _ => Err(LazyError::OffsetOutOfRange {
                offset: k,
                len: data.len(),
            }),
        }
    }

    fn distance(&self, origin: &Self) -> Result<isize, LazyError> {
        if !self.same_origin(origin) {
            return Err(LazyError::ForeignCursor);
        }
        Ok(self.position() as isize - origin.position() as isize)
    }
}
