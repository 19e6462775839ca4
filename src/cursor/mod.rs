//! Cursors - positional read handles over a [`Chain`].
//!
//! A cursor is a shared borrow of the chain plus a `(chunk index, offset)`
//! pair. It never owns or copies chunk storage, and any number of cursors can
//! walk the same chain independently.

use crate::chain::Chain;
use crate::error::ChainError;

/// A read position in a [`Chain`], treating its chunks as one byte stream.
///
/// Logical position is `chunk_index * chunk_capacity + offset`. Forward and
/// backward seeks clamp to the written data rather than failing.
///
/// # Example
///
/// ```
/// use bufchain::Chain;
///
/// let mut chain = Chain::new(5, 10)?;
/// chain.extend_from_slice(b"ABCDEFGHIJKLMNOP")?;
///
/// let mut cursor = chain.head();
/// assert_eq!(cursor.advance(10), 10);
/// assert_eq!(cursor.peek()?, b'K');
///
/// let mark = cursor.duplicate();
/// assert_eq!(cursor.rewind(5), 5);
/// assert_eq!(cursor.peek()?, b'F');
/// assert_eq!(mark.peek()?, b'K');
/// # Ok::<(), bufchain::ChainError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    chain: &'a Chain,
    chunk_index: usize,
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(chain: &'a Chain, chunk_index: usize, offset: usize) -> Self {
        Self {
            chain,
            chunk_index,
            offset,
        }
    }

    /// Returns the byte under the cursor without moving.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::OutOfRange`] if the chain is empty, or if the
    /// cursor addresses a chunk that is not allocated.
    pub fn peek(&self) -> Result<u8, ChainError> {
        if self.chain.is_empty() {
            return Err(ChainError::OutOfRange {
                index: self.position(),
                bound: 0,
            });
        }
        match self.chain.get_chunk(self.chunk_index)? {
            Some(chunk) => chunk.get(self.offset),
            None => Err(ChainError::OutOfRange {
                index: self.chunk_index,
                bound: self.chain.chunk_count(),
            }),
        }
    }

    /// Returns true if a written byte follows the cursor.
    ///
    /// The next position must land in an allocated chunk and inside that
    /// chunk's written length, not merely its capacity.
    pub fn has_next(&self) -> bool {
        let (chunk_index, offset) = self.chain.locate(self.position() + 1);
        match self.chain.get_chunk(chunk_index) {
            Ok(Some(chunk)) => offset < chunk.len(),
            Ok(None) | Err(_) => false,
        }
    }

    /// Steps forward one byte.
    ///
    /// Returns false, without moving, at the end of the written data.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        if self.offset + 1 < self.chain.chunk_capacity() {
            self.offset += 1;
        } else {
            self.offset = 0;
            self.chunk_index += 1;
        }
        true
    }

    /// Moves forward `n` bytes, stopping at the last written byte.
    ///
    /// Returns the distance actually moved.
    pub fn advance(&mut self, n: usize) -> usize {
        let old = self.position();
        let target = old.saturating_add(n).min(self.chain.tail_position());
        // A cursor already past the tail never moves backwards here
        let new = target.max(old);
        self.seek(new);
        new - old
    }

    /// Moves backward `n` bytes, stopping at position 0.
    ///
    /// Returns the distance actually moved.
    pub fn rewind(&mut self, n: usize) -> usize {
        let old = self.position();
        let new = old.saturating_sub(n);
        self.seek(new);
        old - new
    }

    /// Returns the logical position.
    pub fn position(&self) -> usize {
        self.chunk_index * self.chain.chunk_capacity() + self.offset
    }

    /// Returns the index of the chunk under the cursor.
    pub fn chunk_index(&self) -> usize {
        self.chunk_index
    }

    /// Returns the offset inside the current chunk.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns an independent cursor at the same position.
    pub fn duplicate(&self) -> Cursor<'a> {
        self.clone()
    }

    /// Returns the chain this cursor reads.
    pub fn chain(&self) -> &'a Chain {
        self.chain
    }

    fn seek(&mut self, position: usize) {
        let (chunk_index, offset) = self.chain.locate(position);
        self.chunk_index = chunk_index;
        self.offset = offset;
    }
}

impl PartialEq for Cursor<'_> {
    /// Cursors are equal when they read the same chain at the same position.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.chain, other.chain)
            && self.chunk_index == other.chunk_index
            && self.offset == other.offset
    }
}

impl Eq for Cursor<'_> {}
