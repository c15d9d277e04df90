use std::collections::LinkedList;
use std::collections::linked_list;

use crate::cursor::{Cursor, Tier};
use crate::error::LazyError;
use crate::sequence::Sequence;

/// Forward-only cursor over any cloneable iterator
///
/// The cursor holds the element under it plus the rest of the iterator, so
/// reading the current element never advances anything. Positions are
/// counted from the start; two cursors compare equal when they come from the
/// same source and sit at the same position.
pub enum IterCursor<I: Iterator> {
    /// Cursor pointing at an element
    Valid {
        origin: usize,
        current: I::Item,
        rest: I,
        position: usize,
    },
    /// Cursor past the last element
    End { origin: usize, position: usize },
}

impl<I: Iterator> IterCursor<I> {
    /// Start a cursor over `iter`, which walks the collection `source`
    pub fn new<S: ?Sized>(source: &S, mut iter: I) -> Self {
        let origin = Self::origin_of(source);
        match iter.next() {
            Some(current) => IterCursor::Valid {
                origin,
                current,
                rest: iter,
                position: 0,
            },
            None => IterCursor::End {
                origin,
                position: 0,
            },
        }
    }

    /// End cursor for a collection of `len` elements
    pub fn end<S: ?Sized>(source: &S, len: usize) -> Self {
        IterCursor::End {
            origin: Self::origin_of(source),
            position: len,
        }
    }

    pub fn position(&self) -> usize {
        match self {
            IterCursor::Valid { position, .. } => *position,
            IterCursor::End { position, .. } => *position,
        }
    }

    fn origin(&self) -> usize {
        match self {
            IterCursor::Valid { origin, .. } => *origin,
            IterCursor::End { origin, .. } => *origin,
        }
    }

    fn origin_of<S: ?Sized>(source: &S) -> usize {
        (source as *const S).cast::<()>().addr()
    }
}

impl<I> Clone for IterCursor<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        match self {
            IterCursor::Valid {
                origin,
                current,
                rest,
                position,
            } => IterCursor::Valid {
                origin: *origin,
                current: current.clone(),
                rest: rest.clone(),
                position: *position,
            },
            IterCursor::End { origin, position } => IterCursor::End {
                origin: *origin,
                position: *position,
            },
        }
    }
}

impl<I: Iterator> PartialEq for IterCursor<I> {
    fn eq(&self, other: &Self) -> bool {
        self.origin() == other.origin() && self.position() == other.position()
    }
}

impl<I> Cursor for IterCursor<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    type Item = I::Item;
    const TIER: Tier = Tier::Forward;

    fn value(&self) -> Result<Self::Item, LazyError> {
        match self {
            IterCursor::Valid { current, .. } => Ok(current.clone()),
            IterCursor::End { .. } => Err(LazyError::EndOfSequence),
        }
    }

    fn next(self) -> Self {
        match self {
            IterCursor::Valid {
                origin,
                mut rest,
                position,
                ..
            } => match rest.next() {
                Some(current) => IterCursor::Valid {
                    origin,
                    current,
                    rest,
                    position: position + 1,
                },
                None => IterCursor::End {
                    origin,
                    position: position + 1,
                },
            },
            end @ IterCursor::End { .. } => end,
        }
    }

    fn same_origin(&self, other: &Self) -> bool {
        self.origin() == other.origin()
    }
}

impl<'a, T> Sequence for &'a LinkedList<T> {
    type Cursor = IterCursor<linked_list::Iter<'a, T>>;

    fn begin(self) -> Self::Cursor {
        IterCursor::new(self, self.iter())
    }

    fn end(self) -> Self::Cursor {
        IterCursor::end(self, self.len())
    }
}
