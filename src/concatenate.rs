use std::cmp::Ordering;
use std::fmt;

use log::trace;

use crate::cursor::{BidirectionalCursor, Cursor, RandomAccessCursor, Tier};
use crate::error::LazyError;
use crate::sequence::{Elements, ItemOf, Sequence};

/// One side of a concatenation: a cursor pair or a nested concatenation
pub trait Part {
    type Item;
    type Cursor<'v>: Cursor<Item = Self::Item>
    where
        Self: 'v;

    fn begin_cursor(&self) -> Self::Cursor<'_>;

    fn end_cursor(&self) -> Self::Cursor<'_>;
}

/// The `[begin, end)` cursor pair of one concatenated sequence
#[derive(Debug, Clone)]
pub struct Segment<C> {
    begin: C,
    end: C,
}

impl<C: Cursor> Segment<C> {
    pub fn new(begin: C, end: C) -> Self {
        Segment { begin, end }
    }

    /// Segment spanning all of `source`
    pub fn of<S: Sequence<Cursor = C>>(source: S) -> Self {
        Segment::new(source.begin(), source.end())
    }
}

impl<C: Cursor> Part for Segment<C> {
    type Item = C::Item;
    type Cursor<'v>
        = C
    where
        Self: 'v;

    fn begin_cursor(&self) -> C {
        self.begin.clone()
    }

    fn end_cursor(&self) -> C {
        self.end.clone()
    }
}

/// View presenting two parts as one sequence
///
/// The parts may have different cursor types as long as they yield the same
/// element type; a mismatch does not compile. More than two sequences nest
/// to the right, the view owning the nested view, see
/// [`concatenate!`](crate::concatenate!).
///
/// Cursors borrow the view and hold only the active part's cursor.
#[derive(Debug, Clone)]
pub struct Concatenate<F, B> {
    front: F,
    back: B,
}

impl<F, B> Concatenate<F, B>
where
    F: Part,
    B: Part<Item = F::Item>,
{
    pub fn new(front: F, back: B) -> Self {
        let view = Concatenate { front, back };
        trace!("concatenate view over {:?} parts", tier_of(&(&view).begin()));
        view
    }
}

fn tier_of<C: Cursor>(_: &C) -> Tier {
    C::TIER
}

impl<'v, F, B> Sequence for &'v Concatenate<F, B>
where
    F: Part,
    B: Part<Item = F::Item>,
{
    type Cursor = ConcatCursor<'v, F, B>;

    fn begin(self) -> Self::Cursor {
        let front = self.front.begin_cursor();
        let slot = if front == self.front.end_cursor() {
            Slot::Back(self.back.begin_cursor())
        } else {
            Slot::Front(front)
        };
        ConcatCursor { slot, view: self }
    }

    fn end(self) -> Self::Cursor {
        ConcatCursor {
            slot: Slot::Back(self.back.end_cursor()),
            view: self,
        }
    }
}

impl<F, B> Part for Concatenate<F, B>
where
    F: Part,
    B: Part<Item = F::Item>,
{
    type Item = F::Item;
    type Cursor<'v>
        = ConcatCursor<'v, F, B>
    where
        Self: 'v;

    fn begin_cursor(&self) -> ConcatCursor<'_, F, B> {
        self.begin()
    }

    fn end_cursor(&self) -> ConcatCursor<'_, F, B> {
        self.end()
    }
}

impl<'v, F, B> IntoIterator for &'v Concatenate<F, B>
where
    F: Part,
    B: Part<Item = F::Item>,
{
    type Item = Result<F::Item, LazyError>;
    type IntoIter = Elements<ConcatCursor<'v, F, B>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements()
    }
}

/// Concatenate two sequences
pub fn concatenate<S1, S2>(
    first: S1,
    second: S2,
) -> Concatenate<Segment<S1::Cursor>, Segment<S2::Cursor>>
where
    S1: Sequence,
    S2: Sequence,
    S2::Cursor: Cursor<Item = ItemOf<S1>>,
{
    Concatenate::new(Segment::of(first), Segment::of(second))
}

/// Concatenate two or more sequences into one view
///
/// `concatenate!(a, b, c)` builds a view over `a` followed by the view
/// `concatenate(b, c)`, which it owns.
///
/// ```
/// use lazyseq::Sequence;
///
/// let low = [1, 2, 3];
/// let high = vec![4, 5];
/// let all = lazyseq::concatenate!(&low, &high, &[6]);
///
/// let values: Vec<&i32> = all.collect().unwrap();
/// assert_eq!(values, vec![&1, &2, &3, &4, &5, &6]);
/// ```
///
/// A single sequence is rejected:
///
/// ```compile_fail
/// let only = [1, 2, 3];
/// let all = lazyseq::concatenate!(&only);
/// ```
///
/// So are sequences with different element types:
///
/// ```compile_fail
/// let numbers = [1, 2, 3];
/// let words = ["four", "five"];
/// let all = lazyseq::concatenate!(&numbers, &words);
/// ```
#[macro_export]
macro_rules! concatenate {
    ($first:expr, $second:expr $(,)?) => {
        $crate::concatenate::concatenate($first, $second)
    };
    ($first:expr, $($rest:expr),+ $(,)?) => {
        $crate::concatenate::Concatenate::new(
            $crate::concatenate::Segment::of($first),
            $crate::concatenate!($($rest),+),
        )
    };
    ($($_:expr)? $(,)?) => {
        compile_error!("concatenate! requires at least two sequences")
    };
}

/// Extension trait to add .followed_by() method support for sequences
pub trait ConcatExt: Sequence {
    fn followed_by<S>(self, other: S) -> Concatenate<Segment<Self::Cursor>, Segment<S::Cursor>>
    where
        S: Sequence,
        S::Cursor: Cursor<Item = ItemOf<Self>>,
    {
        concatenate(self, other)
    }
}

impl<S: Sequence> ConcatExt for S {}

/// Active part of a concatenation cursor
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<A, B> {
    Front(A),
    Back(B),
}

/// Cursor of a Concatenate view
///
/// While not at the end, the active part's cursor is strictly before that
/// part's end. The end of the concatenation is always `Slot::Back` holding
/// the back part's end cursor.
pub struct ConcatCursor<'v, F: Part + 'v, B: Part + 'v> {
    slot: Slot<F::Cursor<'v>, B::Cursor<'v>>,
    view: &'v Concatenate<F, B>,
}

impl<'v, F: Part + 'v, B: Part + 'v> ConcatCursor<'v, F, B> {
    pub fn slot(&self) -> &Slot<F::Cursor<'v>, B::Cursor<'v>> {
        &self.slot
    }

    fn shares_view(&self, other: &Self) -> bool {
        std::ptr::eq(self.view, other.view)
    }
}

impl<'v, F, B> ConcatCursor<'v, F, B>
where
    F: Part + 'v,
    B: Part<Item = F::Item> + 'v,
    F::Cursor<'v>: RandomAccessCursor,
    B::Cursor<'v>: RandomAccessCursor,
{
    fn front_len(&self) -> Result<isize, LazyError> {
        let front = &self.view.front;
        front.end_cursor().distance(&front.begin_cursor())
    }

    fn len(&self) -> Result<isize, LazyError> {
        let back = &self.view.back;
        let back_len = back.end_cursor().distance(&back.begin_cursor())?;
        Ok(self.front_len()? + back_len)
    }

    /// Index of this cursor in the concatenation
    fn index(&self) -> Result<isize, LazyError> {
        match &self.slot {
            Slot::Front(a) => a.distance(&self.view.front.begin_cursor()),
            Slot::Back(b) => Ok(self.front_len()? + b.distance(&self.view.back.begin_cursor())?),
        }
    }
}

impl<'v, F: Part + 'v, B: Part + 'v> Clone for ConcatCursor<'v, F, B> {
    fn clone(&self) -> Self {
        ConcatCursor {
            slot: self.slot.clone(),
            view: self.view,
        }
    }
}

impl<'v, F: Part + 'v, B: Part + 'v> fmt::Debug for ConcatCursor<'v, F, B>
where
    F::Cursor<'v>: fmt::Debug,
    B::Cursor<'v>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcatCursor").field("slot", &self.slot).finish()
    }
}

impl<'v, F: Part + 'v, B: Part + 'v> PartialEq for ConcatCursor<'v, F, B> {
    fn eq(&self, other: &Self) -> bool {
        self.shares_view(other) && self.slot == other.slot
    }
}

impl<'v, F: Part + 'v, B: Part + 'v> PartialOrd for ConcatCursor<'v, F, B>
where
    F::Cursor<'v>: PartialOrd,
    B::Cursor<'v>: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.shares_view(other) {
            return None;
        }
        match (&self.slot, &other.slot) {
            (Slot::Front(a), Slot::Front(b)) => a.partial_cmp(b),
            (Slot::Back(a), Slot::Back(b)) => a.partial_cmp(b),
            (Slot::Front(_), Slot::Back(_)) => Some(Ordering::Less),
            (Slot::Back(_), Slot::Front(_)) => Some(Ordering::Greater),
        }
    }
}

impl<'v, F, B> Cursor for ConcatCursor<'v, F, B>
where
    F: Part + 'v,
    B: Part<Item = F::Item> + 'v,
{
    type Item = F::Item;
    const TIER: Tier = <F::Cursor<'v> as Cursor>::TIER.min(<B::Cursor<'v> as Cursor>::TIER);

    fn value(&self) -> Result<Self::Item, LazyError> {
        match &self.slot {
            Slot::Front(a) => a.value(),
            Slot::Back(b) => b.value(),
        }
    }

    fn next(self) -> Self {
        let view = self.view;
        let slot = match self.slot {
            Slot::Front(a) => {
                let a = a.next();
                if a == view.front.end_cursor() {
                    Slot::Back(view.back.begin_cursor())
                } else {
                    Slot::Front(a)
                }
            }
            Slot::Back(b) => Slot::Back(b.next()),
        };
        ConcatCursor { slot, view }
    }

    fn same_origin(&self, other: &Self) -> bool {
        self.shares_view(other)
    }
}

impl<'v, F, B> BidirectionalCursor for ConcatCursor<'v, F, B>
where
    F: Part + 'v,
    B: Part<Item = F::Item> + 'v,
    F::Cursor<'v>: BidirectionalCursor,
    B::Cursor<'v>: BidirectionalCursor,
{
    fn prev(self) -> Self {
        let view = self.view;
        let slot = match self.slot {
            Slot::Front(a) if a == view.front.begin_cursor() => Slot::Front(a),
            Slot::Front(a) => Slot::Front(a.prev()),
            Slot::Back(b) if b == view.back.begin_cursor() => {
                let front_end = view.front.end_cursor();
                if front_end == view.front.begin_cursor() {
                    Slot::Back(b)
                } else {
                    Slot::Front(front_end.prev())
                }
            }
            Slot::Back(b) => Slot::Back(b.prev()),
        };
        ConcatCursor { slot, view }
    }
}

impl<'v, F, B> RandomAccessCursor for ConcatCursor<'v, F, B>
where
    F: Part + 'v,
    B: Part<Item = F::Item> + 'v,
    F::Cursor<'v>: RandomAccessCursor,
    B::Cursor<'v>: RandomAccessCursor,
{
    fn offset(self, k: isize) -> Result<Self, LazyError> {
        let len = self.len()?;
        let out_of_range = LazyError::OffsetOutOfRange {
            offset: k,
            len: len as usize,
        };
        let target = match self.index()?.checked_add(k) {
            Some(target) if (0..=len).contains(&target) => target,
            _ => return Err(out_of_range),
        };

        // Past the front part, the remainder is handed to the back part,
        // which crosses its own boundaries when it is a concatenation too.
        let front_len = self.front_len()?;
        let view = self.view;
        let slot = if target < front_len {
            Slot::Front(view.front.begin_cursor().offset(target)?)
        } else {
            Slot::Back(view.back.begin_cursor().offset(target - front_len)?)
        };
        Ok(ConcatCursor { slot, view })
    }

    fn distance(&self, origin: &Self) -> Result<isize, LazyError> {
        if !self.same_origin(origin) {
            return Err(LazyError::ForeignCursor);
        }
        Ok(self.index()? - origin.index()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursors::{IterCursor, SliceCursor, range};
    use crate::map::map;
    use crate::take::{take, take_while};
    use static_assertions::{assert_impl_all, assert_not_impl_any};
    use std::cell::Cell;
    use std::collections::{LinkedList, linked_list};

    type Slice = SliceCursor<'static, i32>;
    type List = IterCursor<linked_list::Iter<'static, i32>>;

    type Pair<A, B> = ConcatCursor<'static, Segment<A>, Segment<B>>;
    type Nested = ConcatCursor<'static, Segment<Slice>, Concatenate<Segment<Slice>, Segment<Slice>>>;

    assert_impl_all!(Pair<Slice, Slice>: RandomAccessCursor);
    assert_impl_all!(Nested: RandomAccessCursor);
    assert_impl_all!(Pair<Slice, List>: Cursor);
    assert_not_impl_any!(Pair<Slice, List>: BidirectionalCursor);
    assert_not_impl_any!(Pair<List, Slice>: BidirectionalCursor);

    #[test]
    fn test_length_and_order() {
        let first = [1, 2, 3];
        let second = vec![4, 5];
        let joined = concatenate(&first, &second);

        let values: Vec<&i32> = joined.collect().unwrap();
        assert_eq!(values, vec![&1, &2, &3, &4, &5]);
    }

    #[test]
    fn test_random_access() {
        let first = [1, 2, 3];
        let second = [4, 5];
        let joined = concatenate(&first, &second);
        let begin = joined.begin();

        assert_eq!(*begin.at(1).unwrap(), 2);
        assert_eq!(*begin.at(3).unwrap(), 4);
        assert_eq!(*begin.at(4).unwrap(), 5);
        assert_eq!(joined.end().distance(&begin).unwrap(), 5);
        assert_eq!(begin.distance(&joined.end()).unwrap(), -5);
    }

    #[test]
    fn test_offset_crosses_many_boundaries() {
        let a = [1];
        let b: [i32; 0] = [];
        let c = [2, 3];
        let d = [4];
        let joined = crate::concatenate!(&a, &b, &c, &d);
        let begin = joined.begin();
        let end = joined.end();

        assert_eq!(*begin.clone().offset(3).unwrap().value().unwrap(), 4);
        assert_eq!(*begin.clone().offset(1).unwrap().value().unwrap(), 2);
        assert!(begin.clone().offset(4).unwrap() == end);
        assert!(end.clone().offset(-4).unwrap() == begin);
        assert_eq!(*end.clone().offset(-2).unwrap().value().unwrap(), 3);
        assert_eq!(end.distance(&begin).unwrap(), 4);

        let second = begin.clone().offset(1).unwrap();
        assert!(second.clone().offset(0).unwrap() == second);
        assert_eq!(*second.offset(2).unwrap().offset(-3).unwrap().value().unwrap(), 1);
    }

    #[test]
    fn test_offset_out_of_range() {
        let first = [1, 2];
        let second = [3];
        let joined = concatenate(&first, &second);

        assert_eq!(
            joined.begin().offset(4).err(),
            Some(LazyError::OffsetOutOfRange { offset: 4, len: 3 })
        );
        assert_eq!(
            joined.end().offset(-4).err(),
            Some(LazyError::OffsetOutOfRange { offset: -4, len: 3 })
        );
    }

    #[test]
    fn test_bidirectional_symmetry() {
        let first = [1, 2, 3];
        let second = [4, 5];
        let joined = concatenate(&first, &second);

        let cursor = joined.end().prev().prev().prev().prev().prev();
        assert!(cursor == joined.begin());

        // Decrementing the end lands on the true last element
        assert_eq!(*joined.end().prev().value().unwrap(), 5);
        assert_eq!(*joined.end().prev().prev().prev().value().unwrap(), 3);
    }

    #[test]
    fn test_reverse_iteration() {
        let first = [1, 2];
        let second = vec![3, 4];
        let joined = concatenate(&first, &second);

        let reversed: Vec<&i32> = joined.elements().rev().map(Result::unwrap).collect();
        assert_eq!(reversed, vec![&4, &3, &2, &1]);
    }

    #[test]
    fn test_empty_parts() {
        let empty: [i32; 0] = [];
        let full = [1, 2];

        let values: Vec<&i32> = concatenate(&empty, &full).collect().unwrap();
        assert_eq!(values, vec![&1, &2]);

        let values: Vec<&i32> = concatenate(&full, &empty).collect().unwrap();
        assert_eq!(values, vec![&1, &2]);

        let both = concatenate(&empty, &empty);
        assert!(both.begin() == both.end());
        assert_eq!(both.end().distance(&both.begin()).unwrap(), 0);

        let middle = crate::concatenate!(&full, &empty, &full);
        let values: Vec<&i32> = middle.collect().unwrap();
        assert_eq!(values, vec![&1, &2, &1, &2]);
        assert_eq!(*middle.begin().next().next().prev().value().unwrap(), 2);
    }

    #[test]
    fn test_leading_empty_part_backwards() {
        let empty: [i32; 0] = [];
        let full = [7, 8];
        let joined = concatenate(&empty, &full);

        // Stepping back from the start stays at the start
        let begin = joined.begin();
        assert!(begin.clone().prev() == begin);
        assert!(joined.end().prev().prev() == begin);
    }

    #[test]
    fn test_canonical_end() {
        let first = [1];
        let second = [2];
        let joined = concatenate(&first, &second);

        let end = joined.begin().next().next();
        assert!(matches!(end.slot(), Slot::Back(_)));
        assert!(end == joined.end());

        // End stays at the end
        assert!(end.next() == joined.end());
    }

    #[test]
    fn test_slots() {
        let a = [1];
        let b = [2];
        let c = [3];
        let joined = crate::concatenate!(&a, &b, &c);
        let cursor = joined.begin();

        assert!(matches!(cursor.slot(), Slot::Front(_)));
        let cursor = cursor.next();
        assert!(matches!(cursor.slot(), Slot::Back(inner) if matches!(inner.slot(), Slot::Front(_))));
        let cursor = cursor.next();
        assert!(matches!(cursor.slot(), Slot::Back(inner) if matches!(inner.slot(), Slot::Back(_))));
    }

    #[test]
    fn test_heterogeneous_sources() {
        let list: LinkedList<i32> = [1, 2].into_iter().collect();
        let array = [3, 4];
        let joined = concatenate(&list, &array);

        assert_eq!(tier_of(&joined.begin()), Tier::Forward);
        let values: Vec<&i32> = joined.collect().unwrap();
        assert_eq!(values, vec![&1, &2, &3, &4]);
    }

    #[test]
    fn test_views_and_ranges() {
        let data = [1, 2, 3];
        let doubled = map(&data, |value| value * 2);
        let joined = concatenate(&doubled, range(10, 12));

        assert_eq!(tier_of(&joined.begin()), Tier::RandomAccess);
        let values: Vec<i32> = joined.collect().unwrap();
        assert_eq!(values, vec![2, 4, 6, 10, 11]);
        assert_eq!(joined.begin().at(3).unwrap(), 10);
    }

    #[test]
    fn test_take_views() {
        let data = [1, 2, 3, 4, 5];
        let head = take(&data, 2).unwrap();
        let small = take_while(&data, |value| **value < 4);
        let joined = concatenate(&head, &small);

        let values: Vec<&i32> = joined.collect().unwrap();
        assert_eq!(values, vec![&1, &2, &1, &2, &3]);
    }

    #[test]
    fn test_write_through_concatenation() {
        let mut first = [1, 2];
        let mut second = [3, 4];
        let front = Cell::from_mut(&mut first[..]).as_slice_of_cells();
        let back = Cell::from_mut(&mut second[..]).as_slice_of_cells();

        let joined = concatenate(front, back);
        joined.begin().at(2).unwrap().set(30);

        assert_eq!(second, [30, 4]);
    }

    #[test]
    fn test_foreign_cursors() {
        let data = [1, 2, 3];
        let other = [1, 2, 3];
        let a = concatenate(&data, &data);
        let b = concatenate(&data, &other);

        assert_eq!(
            a.begin().checked_eq(&b.begin()),
            Err(LazyError::ForeignCursor)
        );
        assert_eq!(
            a.end().distance(&b.begin()),
            Err(LazyError::ForeignCursor)
        );
        assert_eq!(a.begin().checked_eq(&a.begin()), Ok(true));

        assert!(a.begin() != b.begin());
        assert_eq!(a.begin().partial_cmp(&b.end()), None);
        assert!(!(a.begin() < b.end()) && !(a.begin() > b.end()));
    }

    #[test]
    fn test_copies_over_same_parts_are_foreign() {
        let data = [1, 2];
        let first = concatenate(&data, &data);
        let second = first.clone();

        assert!(first.begin() != second.begin());
        assert_eq!(first.end().distance(&second.begin()), Err(LazyError::ForeignCursor));
    }

    #[test]
    fn test_cursor_size_grows_linearly() {
        let a = [1, 2];
        let joined = crate::concatenate!(&a, &a, &a, &a, &a, &a, &a, &a);

        let values: Vec<&i32> = joined.collect().unwrap();
        assert_eq!(values.len(), 16);

        let begin = joined.begin();
        assert!(std::mem::size_of_val(&begin) <= 8 * std::mem::size_of::<Slice>());
        assert_eq!(*begin.at(13).unwrap(), 2);
        assert_eq!(joined.end().distance(&joined.begin()).unwrap(), 16);
    }

    #[test]
    fn test_take_while_front_backwards() {
        let data = [1, 2, 7, 3];
        let small = take_while(&data, |value| **value < 5);
        let joined = concatenate(&small, &[9]);

        assert_eq!(*joined.end().prev().value().unwrap(), 9);
        assert_eq!(*joined.end().prev().prev().value().unwrap(), 2);
        assert!(joined.end().prev().prev().prev().prev() == joined.begin());

        let reversed: Vec<&i32> = joined.elements().rev().map(Result::unwrap).collect();
        assert_eq!(reversed, vec![&9, &2, &1]);
    }

    #[test]
    fn test_explicit_parts() {
        let data = [1, 2, 3, 4];
        let tail = Segment::new((&data).begin().advance(2), (&data).end());
        let head = Segment::new((&data).begin(), (&data).begin().next());
        let joined = Concatenate::new(tail, head);

        let values: Vec<&i32> = joined.collect().unwrap();
        assert_eq!(values, vec![&3, &4, &1]);
        assert_eq!(*joined.end().prev().value().unwrap(), 1);
    }

    #[test]
    fn test_extension_method() {
        let first = vec![1, 2];
        let second = [3];
        let values: Vec<&i32> = (&first).followed_by(&second).collect().unwrap();
        assert_eq!(values, vec![&1, &2, &3]);
    }

    #[test]
    fn test_trailing_comma_macro() {
        let a = [1];
        let b = [2];
        let values: Vec<&i32> = crate::concatenate!(&a, &b,).collect().unwrap();
        assert_eq!(values, vec![&1, &2]);
    }

    #[test]
    fn test_restartable() {
        let first = [1, 2];
        let second = [3];
        let joined = concatenate(&first, &second);

        let once: Vec<&i32> = joined.collect().unwrap();
        let twice: Vec<&i32> = joined.collect().unwrap();
        assert_eq!(once, twice);
        assert!(joined.begin() == joined.begin());
    }
}
