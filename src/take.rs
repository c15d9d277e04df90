use std::cmp::Ordering;

use log::{debug, trace};

use crate::cursor::{BidirectionalCursor, Cursor, RandomAccessCursor, Tier};
use crate::error::LazyError;
use crate::sequence::{Elements, ItemOf, Sequence};

/// Stop condition of a bounded view
pub trait Predicate<T> {
    /// Set when `test` never fails; bounds then come from the end cursor alone
    const ACCEPTS_ALL: bool = false;

    fn test(&self, item: &T) -> bool;
}

impl<T, F> Predicate<T> for F
where
    F: Fn(&T) -> bool,
{
    fn test(&self, item: &T) -> bool {
        self(item)
    }
}

/// Predicate that accepts every element; bounds come from the end cursor alone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Always;

impl<T> Predicate<T> for Always {
    const ACCEPTS_ALL: bool = true;

    fn test(&self, _: &T) -> bool {
        true
    }
}

/// View over `[begin, end)` of a source that stops at the first element
/// failing a predicate
///
/// The view holds source cursors, not the source itself. `take` and `slice`
/// are the same view with the `Always` predicate and bounds computed up
/// front.
#[derive(Debug, Clone)]
pub struct TakeWhile<C, P> {
    begin: C,
    end: C,
    predicate: P,
}

/// View over a fixed range of a source
pub type Take<C> = TakeWhile<C, Always>;

impl<C, P> TakeWhile<C, P>
where
    C: Cursor,
    P: Predicate<C::Item>,
{
    pub fn new(begin: C, end: C, predicate: P) -> Self {
        trace!("take view over {:?} source", C::TIER);
        TakeWhile {
            begin,
            end,
            predicate,
        }
    }
}

impl<'v, C, P> Sequence for &'v TakeWhile<C, P>
where
    C: Cursor,
    P: Predicate<C::Item>,
{
    type Cursor = TakeCursor<'v, C, P>;

    fn begin(self) -> Self::Cursor {
        TakeCursor::new(self.begin.clone(), self)
    }

    fn end(self) -> Self::Cursor {
        TakeCursor::new(self.end.clone(), self)
    }
}

impl<'v, C, P> IntoIterator for &'v TakeWhile<C, P>
where
    C: Cursor,
    P: Predicate<C::Item>,
{
    type Item = Result<C::Item, LazyError>;
    type IntoIter = Elements<TakeCursor<'v, C, P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements()
    }
}

/// Take elements from the start of `source` while `predicate` holds
pub fn take_while<S, P>(source: S, predicate: P) -> TakeWhile<S::Cursor, P>
where
    S: Sequence,
    P: Fn(&ItemOf<S>) -> bool,
{
    TakeWhile::new(source.begin(), source.end(), predicate)
}

/// Take elements from `[begin, end)` while `predicate` holds
pub fn take_while_range<C, P>(begin: C, end: C, predicate: P) -> TakeWhile<C, P>
where
    C: Cursor,
    P: Fn(&C::Item) -> bool,
{
    TakeWhile::new(begin, end, predicate)
}

/// View over the explicit cursor range `[begin, end)`
pub fn take_range<C: Cursor>(begin: C, end: C) -> Take<C> {
    TakeWhile::new(begin, end, Always)
}

/// The first `count` elements of `source`
///
/// Fails with `CountExceedsLength` if the source is shorter than `count`.
pub fn take<S: Sequence>(source: S, count: usize) -> Result<Take<S::Cursor>, LazyError> {
    let begin = source.begin();
    let end = begin
        .clone()
        .try_advance(count, &source.end())
        .inspect_err(|error| debug!("take({}) rejected: {}", count, error))?;
    Ok(take_range(begin, end))
}

/// Elements `[from, to)` of `source`
///
/// Fails with `InvalidSlice` if `from > to` and with `CountExceedsLength` if
/// the source is shorter than `to`.
pub fn slice<S: Sequence>(
    source: S,
    from: usize,
    to: usize,
) -> Result<Take<S::Cursor>, LazyError> {
    if from > to {
        debug!("slice({}, {}) rejected: bounds are reversed", from, to);
        return Err(LazyError::InvalidSlice { from, to });
    }
    let first = source.begin();
    let end = first
        .clone()
        .try_advance(to, &source.end())
        .inspect_err(|error| debug!("slice({}, {}) rejected: {}", from, to, error))?;
    Ok(take_range(first.advance(from), end))
}

/// Extension trait to add bounded views to sequences
pub trait TakeExt: Sequence {
    fn take_while<P>(self, predicate: P) -> TakeWhile<Self::Cursor, P>
    where
        P: Fn(&ItemOf<Self>) -> bool,
    {
        take_while(self, predicate)
    }

    fn take(self, count: usize) -> Result<Take<Self::Cursor>, LazyError> {
        take(self, count)
    }

    fn slice(self, from: usize, to: usize) -> Result<Take<Self::Cursor>, LazyError> {
        slice(self, from, to)
    }
}

impl<S: Sequence> TakeExt for S {}

/// Cursor of a TakeWhile view
///
/// A cursor is *exhausted* once its source cursor reaches the view's end or
/// sits on an element failing the predicate. All exhausted cursors compare
/// equal, so "ran out" and "predicate stopped us" are the same boundary.
/// The end test runs first, so the predicate is never applied past the end
/// of the source.
///
/// Stepping back or doing arithmetic from an exhausted cursor starts from the
/// view's logical end, the first exhausted position after `begin`. Finding it
/// scans forward from `begin` unless the predicate accepts everything.
/// Offsets are otherwise not clamped to the view's bounds.
pub struct TakeCursor<'v, C, P> {
    cursor: C,
    begin: &'v C,
    end: &'v C,
    predicate: &'v P,
}

impl<'v, C, P> TakeCursor<'v, C, P> {
    fn new(cursor: C, view: &'v TakeWhile<C, P>) -> Self {
        TakeCursor {
            cursor,
            begin: &view.begin,
            end: &view.end,
            predicate: &view.predicate,
        }
    }

    /// The wrapped source cursor
    pub fn inner(&self) -> &C {
        &self.cursor
    }

    fn moved(&self, cursor: C) -> Self {
        TakeCursor {
            cursor,
            begin: self.begin,
            end: self.end,
            predicate: self.predicate,
        }
    }
}

impl<C, P> TakeCursor<'_, C, P>
where
    C: Cursor,
    P: Predicate<C::Item>,
{
    /// Whether iteration stops here
    pub fn is_exhausted(&self) -> bool {
        self.stops_at(&self.cursor)
    }

    fn stops_at(&self, cursor: &C) -> bool {
        if *cursor == *self.end {
            return true;
        }
        match cursor.value() {
            Ok(item) => !self.predicate.test(&item),
            Err(_) => true,
        }
    }

    /// Source cursor this cursor stands for; exhausted cursors stand for the
    /// logical end
    fn resolved(&self) -> C {
        if P::ACCEPTS_ALL || !self.is_exhausted() {
            return self.cursor.clone();
        }
        let mut cursor = self.begin.clone();
        while !self.stops_at(&cursor) {
            cursor = cursor.next();
        }
        cursor
    }
}

impl<C: Clone, P> Clone for TakeCursor<'_, C, P> {
    fn clone(&self) -> Self {
        self.moved(self.cursor.clone())
    }
}

impl<C: Copy, P> Copy for TakeCursor<'_, C, P> {}

impl<C, P> PartialEq for TakeCursor<'_, C, P>
where
    C: Cursor,
    P: Predicate<C::Item>,
{
    fn eq(&self, other: &Self) -> bool {
        self.same_origin(other)
            && (self.cursor == other.cursor || (self.is_exhausted() && other.is_exhausted()))
    }
}

impl<C, P> PartialOrd for TakeCursor<'_, C, P>
where
    C: Cursor + PartialOrd,
    P: Predicate<C::Item>,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.same_origin(other) {
            return None;
        }
        if self == other {
            return Some(Ordering::Equal);
        }
        self.resolved().partial_cmp(&other.resolved())
    }
}

impl<C, P> Cursor for TakeCursor<'_, C, P>
where
    C: Cursor,
    P: Predicate<C::Item>,
{
    type Item = C::Item;
    const TIER: Tier = C::TIER;

    fn value(&self) -> Result<Self::Item, LazyError> {
        if self.cursor == *self.end {
            return Err(LazyError::EndOfSequence);
        }
        let item = self.cursor.value()?;
        if self.predicate.test(&item) {
            Ok(item)
        } else {
            Err(LazyError::EndOfSequence)
        }
    }

    fn next(self) -> Self {
        if self.is_exhausted() {
            return self;
        }
        let cursor = self.cursor.clone().next();
        self.moved(cursor)
    }

    fn same_origin(&self, other: &Self) -> bool {
        std::ptr::eq(self.end, other.end) && self.cursor.same_origin(&other.cursor)
    }
}

impl<C, P> BidirectionalCursor for TakeCursor<'_, C, P>
where
    C: BidirectionalCursor,
    P: Predicate<C::Item>,
{
    fn prev(self) -> Self {
        let cursor = self.resolved();
        if cursor == *self.begin {
            return self.moved(cursor);
        }
        self.moved(cursor.prev())
    }
}

impl<C, P> RandomAccessCursor for TakeCursor<'_, C, P>
where
    C: RandomAccessCursor,
    P: Predicate<C::Item>,
{
    fn offset(self, k: isize) -> Result<Self, LazyError> {
        let cursor = self.resolved().offset(k)?;
        Ok(self.moved(cursor))
    }

    fn distance(&self, origin: &Self) -> Result<isize, LazyError> {
        if !self.same_origin(origin) {
            return Err(LazyError::ForeignCursor);
        }
        self.resolved().distance(&origin.resolved())
    }
}
