//! Configuration for chain geometry.
//!
//! A chain is shaped by two numbers fixed for its whole life:
//!
//! - `chunk_capacity` - bytes per chunk, the unit of allocation
//! - `max_chunks` - hard ceiling on the number of chunks
//!
//! # Example
//!
//! ```
//! use bufchain::ChainConfig;
//!
//! let config = ChainConfig::new(4096, 16)?;
//! assert_eq!(config.capacity(), 64 * 1024);
//!
//! let config = ChainConfig::default().with_max_chunks(32);
//! assert!(config.validate().is_ok());
//! # Ok::<(), bufchain::ChainError>(())
//! ```

use crate::error::ChainError;

/// Default chunk capacity (4 KiB).
pub const DEFAULT_CHUNK_CAPACITY: usize = 4 * 1024;

/// Default chunk budget (256 chunks, 1 MiB total with the default capacity).
pub const DEFAULT_MAX_CHUNKS: usize = 256;

/// Geometry of a [`Chain`](crate::Chain).
///
/// Total addressable capacity is `chunk_capacity * max_chunks`. Both values
/// must be non-zero, a chunk may not exceed `isize::MAX` bytes, and the
/// product must fit in a `usize`.
///
/// # Example
///
/// ```
/// use bufchain::{Chain, ChainConfig};
///
/// let config = ChainConfig::new(5, 10)?;
/// let chain = Chain::with_config(config)?;
/// assert_eq!(chain.capacity(), 50);
/// # Ok::<(), bufchain::ChainError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainConfig {
    chunk_capacity: usize,
    max_chunks: usize,
}

impl ChainConfig {
    /// Creates a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidArgument`] if:
    /// - `chunk_capacity` is zero or larger than `isize::MAX`
    /// - `max_chunks` is zero
    /// - `chunk_capacity * max_chunks` overflows `usize`
    pub fn new(chunk_capacity: usize, max_chunks: usize) -> Result<Self, ChainError> {
        if chunk_capacity == 0 {
            return Err(ChainError::InvalidArgument {
                message: "chunk_capacity must be non-zero",
            });
        }

        if chunk_capacity > isize::MAX as usize {
            return Err(ChainError::InvalidArgument {
                message: "chunk_capacity exceeds isize::MAX",
            });
        }

        if max_chunks < 1 {
            return Err(ChainError::InvalidArgument {
                message: "max_chunks must be at least 1",
            });
        }

        if chunk_capacity.checked_mul(max_chunks).is_none() {
            return Err(ChainError::InvalidArgument {
                message: "chunk_capacity * max_chunks overflows usize",
            });
        }

        Ok(Self {
            chunk_capacity,
            max_chunks,
        })
    }

    /// Sets the chunk capacity.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`ChainConfig::validate`] to check it.
    pub fn with_chunk_capacity(mut self, capacity: usize) -> Self {
        self.chunk_capacity = capacity;
        self
    }

    /// Sets the chunk budget.
    ///
    /// Note: This does not validate the configuration.
    pub fn with_max_chunks(mut self, max_chunks: usize) -> Self {
        self.max_chunks = max_chunks;
        self
    }

    /// Returns the per-chunk capacity.
    pub fn chunk_capacity(&self) -> usize {
        self.chunk_capacity
    }

    /// Returns the maximum number of chunks.
    pub fn max_chunks(&self) -> usize {
        self.max_chunks
    }

    /// Returns the total addressable capacity in bytes.
    ///
    /// Saturates for configurations that would fail validation.
    pub fn capacity(&self) -> usize {
        self.chunk_capacity.saturating_mul(self.max_chunks)
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), ChainError> {
        Self::new(self.chunk_capacity, self.max_chunks).map(|_| ())
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            max_chunks: DEFAULT_MAX_CHUNKS,
        }
    }
}
