pub mod iter;
pub mod range;
pub mod slice;

pub use iter::IterCursor;
pub use range::{IntRange, RangeCursor, range};
pub use slice::SliceCursor;
