//! bufchain
//!
//! A bounded, append-only segmented byte buffer.
//!
//! A [`Chain`] is a fixed budget of fixed-capacity [`Chunk`]s. Writes fill the
//! current chunk and spill into freshly allocated ones, so the buffer grows
//! without a single large allocation and without ever copying written bytes.
//! A [`Cursor`] reads the chain as one continuous stream: it peeks, steps,
//! seeks and searches across chunk boundaries.
//!
//! The crate intentionally:
//! - does NOT grow past the configured chunk budget
//! - does NOT synchronize (use from one thread, or share read-only)
//! - does NOT encode, compress or persist bytes
//!
//! # Example
//!
//! ```
//! use bufchain::{Chain, ChainError};
//!
//! fn main() -> Result<(), ChainError> {
//!     let mut chain = Chain::new(5, 10)?;
//!     chain.extend_from_slice(b"ABCDEFGHIJ")?;
//!
//!     // "EF" straddles the first two chunks
//!     let found = chain.find(b"EF").expect("pattern present");
//!     assert_eq!(found.position(), 4);
//!
//!     let mut cursor = found.duplicate();
//!     cursor.next();
//!     assert_eq!(cursor.peek()?, b'F');
//!     assert_eq!(found.peek()?, b'E');
//!     Ok(())
//! }
//! ```
//!
//! # Overflow
//!
//! Appends are not transactional. When the budget runs out mid-write, the
//! prefix that fit stays in the chain and the error reports its length:
//!
//! ```
//! use bufchain::{Chain, ChainError};
//!
//! let mut chain = Chain::new(4, 2)?;
//! let err = chain.extend_from_slice(b"0123456789").unwrap_err();
//! assert_eq!(err, ChainError::Overflow { written: 8, requested: 10 });
//! assert_eq!(chain.size(), 8);
//! # Ok::<(), ChainError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chain;
mod chunk;
mod config;
mod cursor;
mod error;

mod hash; // internal blake3 impl

//
// Public surface
//

pub use chain::Chain;
pub use chunk::{Chunk, Digest};
pub use config::{ChainConfig, DEFAULT_CHUNK_CAPACITY, DEFAULT_MAX_CHUNKS};
pub use cursor::Cursor;
pub use error::ChainError;
