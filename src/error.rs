use thiserror::Error;

/// Errors reported by cursors, views and sinks
///
/// Every contract violation the library can detect is reported through this
/// type instead of a panic. Failures raised by user-supplied functions or
/// predicates are not caught and never show up here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LazyError {
    /// Attempted to read the element under an end (or exhausted) cursor
    #[error("Cannot read value at end of sequence")]
    EndOfSequence,

    /// Attempted a checked step on a cursor already at the end
    #[error("Already at end of sequence")]
    AlreadyAtEnd,

    /// Asked for more elements than the sequence holds
    #[error("Requested {requested} elements but the sequence holds only {available}")]
    CountExceedsLength { requested: usize, available: usize },

    /// A slice whose start lies after its end
    #[error("Invalid slice: from ({from}) is greater than to ({to})")]
    InvalidSlice { from: usize, to: usize },

    /// A random-access offset leaving the underlying sequence
    #[error("Offset {offset} leaves the sequence (length {len})")]
    OffsetOutOfRange { offset: isize, len: usize },

    /// Two cursors from different views were compared or subtracted
    #[error("Cursors belong to different views")]
    ForeignCursor,

    /// A fixed-size sink received a view of another length
    #[error("Expected exactly {expected} elements, the view yields {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let error = LazyError::CountExceedsLength {
            requested: 5,
            available: 3,
        };
        assert_eq!(
            error.to_string(),
            "Requested 5 elements but the sequence holds only 3"
        );

        let error = LazyError::InvalidSlice { from: 4, to: 2 };
        assert!(error.to_string().contains("from (4)"));

        let error = LazyError::LengthMismatch {
            expected: 2,
            actual: 3,
        };
        assert!(error.to_string().contains("exactly 2"));
    }

    #[test]
    fn test_errors_are_comparable() {
        assert_eq!(LazyError::EndOfSequence, LazyError::EndOfSequence.clone());
        assert_ne!(LazyError::EndOfSequence, LazyError::AlreadyAtEnd);
    }
}
