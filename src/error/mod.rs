//! Error types for bufchain.

use std::fmt;

/// Errors that can occur while writing to or reading from a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// The chunk budget ran out before every byte could be written.
    ///
    /// Appends are not transactional: the first `written` bytes of the
    /// failed call stay in the chain.
    Overflow {
        /// Bytes of the failed call that were committed before the error.
        written: usize,
        /// Bytes the caller asked to write.
        requested: usize,
    },

    /// An index or position fell outside its valid bounds.
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The exclusive upper bound it was checked against.
        bound: usize,
    },

    /// Malformed call parameters.
    InvalidArgument {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::Overflow { written, requested } => {
                write!(
                    f,
                    "buffer chain overflow: wrote {} of {} bytes",
                    written, requested
                )
            }
            ChainError::OutOfRange { index, bound } => {
                write!(f, "index {} out of range (bound {})", index, bound)
            }
            ChainError::InvalidArgument { message } => {
                write!(f, "invalid argument: {}", message)
            }
        }
    }
}

impl std::error::Error for ChainError {}
