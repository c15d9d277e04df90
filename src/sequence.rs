use log::debug;

use crate::cursor::{BidirectionalCursor, Cursor};
use crate::cursors::SliceCursor;
use crate::error::LazyError;

/// Element type produced by a sequence's cursors
pub type ItemOf<S> = <<S as Sequence>::Cursor as Cursor>::Item;

/// A restartable lazy sequence
///
/// A sequence is a cheap `Copy` handle (a shared reference to a collection
/// or a view, or a small value such as an integer range) that hands out
/// cursor pairs. `begin` and `end` are pure: every call produces a fresh
/// cursor at the start or the end, and no iteration state is stored on the
/// sequence itself.
///
/// Views that capture a function or predicate implement this trait on their
/// shared reference, so every cursor borrows the view it came from and the
/// view must outlive them.
pub trait Sequence: Copy {
    type Cursor: Cursor;

    /// Cursor at the first element
    fn begin(self) -> Self::Cursor;

    /// Cursor one past the last element
    fn end(self) -> Self::Cursor;

    /// Iterate the elements, reading each one exactly once
    fn elements(self) -> Elements<Self::Cursor> {
        Elements::new(self.begin(), self.end())
    }

    /// Drain the sequence into any container
    fn collect<B>(self) -> Result<B, LazyError>
    where
        B: FromIterator<ItemOf<Self>>,
    {
        self.elements().collect()
    }

    /// Drain the sequence into an array of exactly `N` elements
    ///
    /// Fails with `LengthMismatch` if the sequence yields fewer or more than
    /// `N` elements. Surplus elements are counted but never read.
    fn collect_array<const N: usize>(self) -> Result<[ItemOf<Self>; N], LazyError> {
        let end = self.end();
        let mut cursor = self.begin();
        let mut items = Vec::with_capacity(N);

        while cursor != end && items.len() < N {
            items.push(cursor.value()?);
            cursor = cursor.next();
        }

        let mut actual = items.len();
        while cursor != end {
            actual += 1;
            cursor = cursor.next();
        }

        if actual != N {
            debug!("collect_array: expected {} elements, view yields {}", N, actual);
            return Err(LazyError::LengthMismatch {
                expected: N,
                actual,
            });
        }

        items.try_into().map_err(|items: Vec<_>| LazyError::LengthMismatch {
            expected: N,
            actual: items.len(),
        })
    }
}

impl<'a, T> Sequence for &'a [T] {
    type Cursor = SliceCursor<'a, T>;

    fn begin(self) -> Self::Cursor {
        SliceCursor::new(self)
    }

    fn end(self) -> Self::Cursor {
        SliceCursor::end(self)
    }
}

impl<'a, T> Sequence for &'a Vec<T> {
    type Cursor = SliceCursor<'a, T>;

    fn begin(self) -> Self::Cursor {
        SliceCursor::new(self.as_slice())
    }

    fn end(self) -> Self::Cursor {
        SliceCursor::end(self.as_slice())
    }
}

impl<'a, T, const N: usize> Sequence for &'a [T; N] {
    type Cursor = SliceCursor<'a, T>;

    fn begin(self) -> Self::Cursor {
        SliceCursor::new(self.as_slice())
    }

    fn end(self) -> Self::Cursor {
        SliceCursor::end(self.as_slice())
    }
}

/// Iterator draining a cursor pair front to back
///
/// Each element is read with exactly one `value` call. Reading an element
/// can only fail when a cursor misbehaves; the error is yielded and the
/// iterator then stops.
pub struct Elements<C> {
    front: C,
    back: C,
}

impl<C: Cursor> Elements<C> {
    pub fn new(front: C, back: C) -> Self {
        Elements { front, back }
    }

    fn finish(&mut self) {
        self.front = self.back.clone();
    }
}

impl<C: Cursor> Iterator for Elements<C> {
    type Item = Result<C::Item, LazyError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        match self.front.value() {
            Ok(item) => {
                self.front = self.front.clone().next();
                Some(Ok(item))
            }
            Err(error) => {
                self.finish();
                Some(Err(error))
            }
        }
    }
}

impl<C: BidirectionalCursor> DoubleEndedIterator for Elements<C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back = self.back.clone().prev();
        match self.back.value() {
            Ok(item) => Some(Ok(item)),
            Err(error) => {
                self.finish();
                Some(Err(error))
            }
        }
    }
}
