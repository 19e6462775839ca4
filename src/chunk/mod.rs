//! Chunk types.
//!
//! - [`Chunk`] - Fixed-capacity, append-only byte container
//! - [`Digest`] - 32-byte content digest

mod data;
mod hash;

pub use data::Chunk;
pub use hash::Digest;
