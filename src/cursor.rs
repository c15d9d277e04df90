use crate::error::LazyError;

/// Traversal capability of a cursor
///
/// Tiers are strictly ordered: every random-access cursor is bidirectional
/// and every bidirectional cursor is forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Forward,
    Bidirectional,
    RandomAccess,
}

impl Tier {
    /// The weaker of two tiers
    pub const fn min(self, other: Tier) -> Tier {
        if (self as u8) <= (other as u8) {
            self
        } else {
            other
        }
    }
}

/// Forward cursor over a lazy sequence
///
/// A cursor is a position in a sequence. Cursors are plain values: cloning a
/// cursor gives an independent position, and advancing one copy never
/// affects another. The end of a sequence is represented by an end cursor;
/// comparing against it with `==` is the termination test.
pub trait Cursor: Clone + PartialEq {
    /// The type of elements produced at each position
    type Item;

    /// Strongest traversal capability this cursor supports
    const TIER: Tier;

    /// Get the element at the current cursor position
    ///
    /// Returns `EndOfSequence` if the cursor is positioned at the end
    fn value(&self) -> Result<Self::Item, LazyError>;

    /// Advance the cursor to the next element
    ///
    /// If already at the end, returns a cursor still positioned at the end
    fn next(self) -> Self;

    /// Whether both cursors were produced by the same view
    fn same_origin(&self, other: &Self) -> bool;

    /// Advance the cursor to the next element, returning an error if `self`
    /// is already at `end`
    fn try_next(self, end: &Self) -> Result<Self, LazyError> {
        if self == *end {
            return Err(LazyError::AlreadyAtEnd);
        }
        Ok(self.next())
    }

    /// Advance `n` positions, stopping at the end of the sequence
    fn advance(self, n: usize) -> Self {
        let mut cursor = self;
        for _ in 0..n {
            cursor = cursor.next();
        }
        cursor
    }

    /// Advance `n` positions, failing if `end` is reached first
    fn try_advance(self, n: usize, end: &Self) -> Result<Self, LazyError> {
        let mut cursor = self;
        for available in 0..n {
            if cursor == *end {
                return Err(LazyError::CountExceedsLength {
                    requested: n,
                    available,
                });
            }
            cursor = cursor.next();
        }
        Ok(cursor)
    }

    /// Equality that rejects cursors from different views
    fn checked_eq(&self, other: &Self) -> Result<bool, LazyError> {
        if !self.same_origin(other) {
            return Err(LazyError::ForeignCursor);
        }
        Ok(self == other)
    }
}

/// Cursor that can also step backwards
pub trait BidirectionalCursor: Cursor {
    /// Step back to the previous element
    ///
    /// If already at the first position, returns a cursor still positioned there
    fn prev(self) -> Self;
}

/// Cursor with constant-time offset arithmetic
///
/// Implementations follow array-index semantics: ordering is monotonic,
/// `a < b` and `a.distance(&b)` agree in sign, and offsetting by `k` then by
/// `-k` returns the original cursor. `partial_cmp` returns `None` for cursors
/// of different origins.
pub trait RandomAccessCursor: BidirectionalCursor + PartialOrd {
    /// Move by `k` positions, backwards when `k` is negative
    fn offset(self, k: isize) -> Result<Self, LazyError>;

    /// Signed number of steps from `origin` to `self`
    fn distance(&self, origin: &Self) -> Result<isize, LazyError>;

    /// Element `k` positions away from this cursor
    fn at(&self, k: isize) -> Result<Self::Item, LazyError> {
        self.clone().offset(k)?.value()
    }
}
