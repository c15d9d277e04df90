//! # LazySeq - Lazy Sequence Views
//!
//! Composable lazy views over existing sequences, built on a cursor
//! abstraction with capability tiers.
//!
//! A view never copies its source. It computes elements on demand when a
//! cursor is read, and it can be iterated as often as needed. The library
//! provides:
//!
//! - **Cursor tiers**: Forward, bidirectional and random-access cursors as a
//!   trait hierarchy; every view offers the weakest tier of its sources
//! - **Views**: `map`, `take`, `slice`, `take_while` and `concatenate`, freely
//!   nested
//! - **Zero panics**: Out-of-range reads and cross-view comparisons are
//!   reported through `Result` types
//! - **Write-through**: Views over `Cell` slices write back into the source
//!
//! ```
//! use lazyseq::{MapExt, Sequence, TakeExt};
//!
//! let data = vec![1, 2, 3, 4, 5];
//! let squares = data.map(|value| value * value);
//! let small = (&squares).take_while(|value| *value < 10);
//!
//! let values: Vec<i32> = small.collect().unwrap();
//! assert_eq!(values, vec![1, 4, 9]);
//! ```

pub mod concatenate;
pub mod cursor;
pub mod cursors;
pub mod error;
pub mod map;
pub mod sequence;
pub mod take;

pub use concatenate::{ConcatCursor, ConcatExt, Concatenate, Part, Segment, Slot, concatenate};
pub use cursor::{BidirectionalCursor, Cursor, RandomAccessCursor, Tier};
pub use cursors::{IntRange, IterCursor, RangeCursor, SliceCursor, range};
pub use error::LazyError;
pub use map::{Map, MapCursor, MapExt, ValueProxy, map};
pub use sequence::{Elements, ItemOf, Sequence};
pub use take::{
    Always, Predicate, Take, TakeCursor, TakeExt, TakeWhile, slice, take, take_range, take_while,
    take_while_range,
};
