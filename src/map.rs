use std::cmp::Ordering;
use std::ops::Deref;

use log::trace;

use crate::cursor::{BidirectionalCursor, Cursor, RandomAccessCursor, Tier};
use crate::error::LazyError;
use crate::sequence::{Elements, ItemOf, Sequence};

/// View that transforms every element of a sequence with a mapping function
///
/// The function is applied when an element is read, never before. The view
/// owns the function and its cursors borrow it, so one function instance
/// serves every cursor copy.
pub struct Map<S, F> {
    source: S,
    function: F,
}

impl<S, F, U> Map<S, F>
where
    S: Sequence,
    F: Fn(ItemOf<S>) -> U,
{
    pub fn new(source: S, function: F) -> Self {
        trace!("map view over {:?} source", <S::Cursor as Cursor>::TIER);
        Map { source, function }
    }
}

impl<'v, S, F, U> Sequence for &'v Map<S, F>
where
    S: Sequence,
    F: Fn(ItemOf<S>) -> U,
{
    type Cursor = MapCursor<'v, S::Cursor, F>;

    fn begin(self) -> Self::Cursor {
        MapCursor::new(self.source.begin(), &self.function)
    }

    fn end(self) -> Self::Cursor {
        MapCursor::new(self.source.end(), &self.function)
    }
}

impl<'v, S, F, U> IntoIterator for &'v Map<S, F>
where
    S: Sequence,
    F: Fn(ItemOf<S>) -> U,
{
    type Item = Result<U, LazyError>;
    type IntoIter = Elements<MapCursor<'v, S::Cursor, F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements()
    }
}

/// Convenience function to create a Map view
pub fn map<S, F, U>(source: S, function: F) -> Map<S, F>
where
    S: Sequence,
    F: Fn(ItemOf<S>) -> U,
{
    Map::new(source, function)
}

/// Extension trait to add .map() method support for sequences
pub trait MapExt: Sequence {
    fn map<F, U>(self, function: F) -> Map<Self, F>
    where
        F: Fn(ItemOf<Self>) -> U,
    {
        Map::new(self, function)
    }
}

impl<S: Sequence> MapExt for S {}

/// Owns one synthesized element and gives member access to it
///
/// A mapped element has no storage location to point at; this proxy stands
/// in for a reference to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueProxy<T>(T);

impl<T> ValueProxy<T> {
    pub fn new(value: T) -> Self {
        ValueProxy(value)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValueProxy<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// Cursor of a Map view
pub struct MapCursor<'v, C, F> {
    cursor: C,
    function: &'v F,
}

impl<'v, C, F> MapCursor<'v, C, F> {
    pub fn new(cursor: C, function: &'v F) -> Self {
        MapCursor { cursor, function }
    }

    /// The wrapped source cursor
    pub fn inner(&self) -> &C {
        &self.cursor
    }
}

impl<'v, C, F, U> MapCursor<'v, C, F>
where
    C: Cursor,
    F: Fn(C::Item) -> U,
{
    /// Read the current element through a proxy
    pub fn proxy(&self) -> Result<ValueProxy<U>, LazyError> {
        self.value().map(ValueProxy::new)
    }
}

impl<C: Clone, F> Clone for MapCursor<'_, C, F> {
    fn clone(&self) -> Self {
        MapCursor {
            cursor: self.cursor.clone(),
            function: self.function,
        }
    }
}

impl<C: Copy, F> Copy for MapCursor<'_, C, F> {}

impl<C, F> MapCursor<'_, C, F> {
    fn shares_function(&self, other: &Self) -> bool {
        std::ptr::eq(self.function, other.function)
    }
}

// Inequality is the primitive; some sources state it more cheaply than equality.
// Cursors of different views are never equal.
#[allow(clippy::partialeq_ne_impl)]
impl<C: PartialEq, F> PartialEq for MapCursor<'_, C, F> {
    fn ne(&self, other: &Self) -> bool {
        !self.shares_function(other) || self.cursor != other.cursor
    }

    fn eq(&self, other: &Self) -> bool {
        !self.ne(other)
    }
}

impl<C: PartialOrd, F> PartialOrd for MapCursor<'_, C, F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.shares_function(other) {
            return None;
        }
        self.cursor.partial_cmp(&other.cursor)
    }

    fn lt(&self, other: &Self) -> bool {
        self.shares_function(other) && self.cursor < other.cursor
    }

    fn gt(&self, other: &Self) -> bool {
        other < self
    }
}

impl<'v, C, F, U> Cursor for MapCursor<'v, C, F>
where
    C: Cursor,
    F: Fn(C::Item) -> U,
{
    type Item = U;
    const TIER: Tier = C::TIER;

    fn value(&self) -> Result<Self::Item, LazyError> {
        let item = self.cursor.value()?;
        Ok((self.function)(item))
    }

    fn next(self) -> Self {
        MapCursor {
            cursor: self.cursor.next(),
            function: self.function,
        }
    }

    fn same_origin(&self, other: &Self) -> bool {
        self.shares_function(other) && self.cursor.same_origin(&other.cursor)
    }

    fn advance(self, n: usize) -> Self {
        MapCursor {
            cursor: self.cursor.advance(n),
            function: self.function,
        }
    }

    fn try_advance(self, n: usize, end: &Self) -> Result<Self, LazyError> {
        Ok(MapCursor {
            cursor: self.cursor.try_advance(n, &end.cursor)?,
            function: self.function,
        })
    }
}

impl<'v, C, F, U> BidirectionalCursor for MapCursor<'v, C, F>
where
    C: BidirectionalCursor,
    F: Fn(C::Item) -> U,
{
    fn prev(self) -> Self {
        MapCursor {
            cursor: self.cursor.prev(),
            function: self.function,
        }
    }
}

impl<'v, C, F, U> RandomAccessCursor for MapCursor<'v, C, F>
where
    C: RandomAccessCursor,
    F: Fn(C::Item) -> U,
{
    fn offset(self, k: isize) -> Result<Self, LazyError> {
        Ok(MapCursor {
            cursor: self.cursor.offset(k)?,
            function: self.function,
        })
    }

    fn distance(&self, origin: &Self) -> Result<isize, LazyError> {
        if !self.same_origin(origin) {
            return Err(LazyError::ForeignCursor);
        }
        self.cursor.distance(&origin.cursor)
    }
}
