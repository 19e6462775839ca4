//! The chain - a bounded, lazily grown sequence of chunks.
//!
//! - [`Chain`] - owns every chunk; the write and lookup surface
//! - [`Chain::find`] - boundary-crossing pattern search (see `search.rs`)

mod search;

use bytes::{Buf, Bytes, BytesMut};
use tracing::{debug, warn};

use crate::chunk::Chunk;
use crate::config::ChainConfig;
use crate::cursor::Cursor;
use crate::error::ChainError;

#[cfg(feature = "hash-blake3")]
use crate::chunk::Digest;
#[cfg(feature = "hash-blake3")]
use crate::hash::Blake3Hasher;

/// A bounded, append-only byte buffer made of fixed-capacity chunks.
///
/// The chain starts with one empty chunk and allocates the next one only when
/// a write runs past the current chunk, up to `max_chunks`. Chunks are never
/// moved, resized or freed while the chain lives, so growing the buffer never
/// copies bytes that were already written.
///
/// Reading happens through [`Cursor`]s, which borrow the chain. The borrow
/// checker therefore rules out appending while a cursor is alive.
///
/// # Example
///
/// ```
/// use bufchain::Chain;
///
/// let mut chain = Chain::new(5, 10)?;
/// chain.append(b"1234567890AB", 0, 12)?;
/// assert_eq!(chain.size(), 12);
///
/// let mut cursor = chain.head();
/// assert_eq!(cursor.advance(4), 4);
/// assert_eq!(cursor.peek()?, b'5');
/// assert!(cursor.next());
/// assert_eq!(cursor.peek()?, b'6');
/// # Ok::<(), bufchain::ChainError>(())
/// ```
#[derive(Debug)]
pub struct Chain {
    config: ChainConfig,
    /// Allocated chunks; the last one receives writes.
    chunks: Vec<Chunk>,
}

impl Chain {
    /// Creates a chain of `max_chunks` chunks holding `chunk_capacity` bytes each.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidArgument`] if either value is zero, a chunk
    /// would exceed `isize::MAX` bytes, or the total capacity overflows `usize`.
    pub fn new(chunk_capacity: usize, max_chunks: usize) -> Result<Self, ChainError> {
        Self::with_config(ChainConfig::new(chunk_capacity, max_chunks)?)
    }

    /// Creates a chain from a configuration, validating it first.
    pub fn with_config(config: ChainConfig) -> Result<Self, ChainError> {
        config.validate()?;
        Ok(Self {
            config,
            chunks: vec![Chunk::new(config.chunk_capacity())],
        })
    }

    /// Appends `count` bytes of `source` starting at `start`.
    ///
    /// Bytes fill the current chunk, then spill into newly allocated chunks.
    ///
    /// # Errors
    ///
    /// - [`ChainError::InvalidArgument`] if `start + count` exceeds
    ///   `source.len()`. Nothing is written.
    /// - [`ChainError::Overflow`] if the chunk budget runs out. The append is
    ///   not atomic: the bytes reported in `written` stay in the chain.
    pub fn append(&mut self, source: &[u8], start: usize, count: usize) -> Result<(), ChainError> {
        let end = start
            .checked_add(count)
            .filter(|&end| end <= source.len())
            .ok_or(ChainError::InvalidArgument {
                message: "start + count exceeds source length",
            })?;

        let src = &source[start..end];
        let mut written = 0;
        loop {
            written += self.write_chunk_mut().write(&src[written..]);
            if written == src.len() {
                return Ok(());
            }
            self.allocate_chunk(written, src.len())?;
        }
    }

    /// Appends every byte of `bytes`.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<(), ChainError> {
        self.append(bytes, 0, bytes.len())
    }

    /// Drains `buf` into the chain, one contiguous segment at a time.
    ///
    /// Follows the same overflow contract as [`append`](Chain::append);
    /// `written` counts bytes drained from `buf` by this call.
    pub fn append_buf<B: Buf>(&mut self, mut buf: B) -> Result<(), ChainError> {
        let requested = buf.remaining();
        let mut written = 0;
        while buf.has_remaining() {
            let n = self.write_chunk_mut().write(buf.chunk());
            buf.advance(n);
            written += n;
            if buf.has_remaining() && !self.write_chunk().has_space() {
                self.allocate_chunk(written, requested)?;
            }
        }
        Ok(())
    }

    /// Returns a cursor at logical position 0.
    pub fn head(&self) -> Cursor<'_> {
        Cursor::new(self, 0, 0)
    }

    /// Returns a cursor at the last written byte, or at 0 if the chain is empty.
    pub fn tail(&self) -> Cursor<'_> {
        let (chunk, offset) = self.locate(self.tail_position());
        Cursor::new(self, chunk, offset)
    }

    /// Returns a cursor at an absolute logical position.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidArgument`] if `position >= size()`.
    pub fn cursor_at(&self, position: usize) -> Result<Cursor<'_>, ChainError> {
        if position >= self.size() {
            return Err(ChainError::InvalidArgument {
                message: "cursor position exceeds chain size",
            });
        }
        let (chunk, offset) = self.locate(position);
        Ok(Cursor::new(self, chunk, offset))
    }

    /// Looks up a chunk by index.
    ///
    /// Returns `Ok(None)` for an index within the budget whose chunk has not
    /// been allocated yet.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::OutOfRange`] if `index >= max_chunks()`.
    pub fn get_chunk(&self, index: usize) -> Result<Option<&Chunk>, ChainError> {
        if index >= self.config.max_chunks() {
            return Err(ChainError::OutOfRange {
                index,
                bound: self.config.max_chunks(),
            });
        }
        Ok(self.chunks.get(index))
    }

    /// Iterates over the allocated chunks in order.
    pub fn chunks(&self) -> impl ExactSizeIterator<Item = &Chunk> + '_ {
        self.chunks.iter()
    }

    /// Iterates over the logical byte stream.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.chunks.iter().flat_map(|c| c.as_slice().iter().copied())
    }

    /// Copies the logical stream into one contiguous [`Bytes`].
    pub fn to_bytes(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(self.size());
        for chunk in &self.chunks {
            out.extend_from_slice(chunk.as_slice());
        }
        out.freeze()
    }

    /// Computes the BLAKE3 digest of the logical stream.
    ///
    /// Equal to hashing [`to_bytes`](Chain::to_bytes), without the copy.
    #[cfg(feature = "hash-blake3")]
    pub fn digest(&self) -> Digest {
        let mut hasher = Blake3Hasher::new();
        for chunk in &self.chunks {
            hasher.update(chunk.as_slice());
        }
        hasher.finalize()
    }

    /// Returns the number of bytes written.
    pub fn size(&self) -> usize {
        self.write_chunk_index() * self.config.chunk_capacity() + self.write_chunk().len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns the per-chunk capacity.
    pub fn chunk_capacity(&self) -> usize {
        self.config.chunk_capacity()
    }

    /// Returns the chunk budget.
    pub fn max_chunks(&self) -> usize {
        self.config.max_chunks()
    }

    /// Returns the number of chunks allocated so far.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Returns the total addressable capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.config.capacity()
    }

    /// Returns how many more bytes fit before the chain overflows.
    pub fn remaining(&self) -> usize {
        self.capacity() - self.size()
    }

    /// Returns the configuration the chain was built with.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Splits a logical position into (chunk index, intra-chunk offset).
    pub(crate) fn locate(&self, position: usize) -> (usize, usize) {
        let capacity = self.config.chunk_capacity();
        (position / capacity, position % capacity)
    }

    /// Position of the last written byte; 0 for an empty chain.
    pub(crate) fn tail_position(&self) -> usize {
        self.size().saturating_sub(1)
    }

    fn write_chunk_index(&self) -> usize {
        self.chunks.len() - 1
    }

    fn write_chunk(&self) -> &Chunk {
        &self.chunks[self.write_chunk_index()]
    }

    fn write_chunk_mut(&mut self) -> &mut Chunk {
        let index = self.write_chunk_index();
        &mut self.chunks[index]
    }

    /// Moves the write pointer to a fresh chunk, or reports overflow.
    fn allocate_chunk(&mut self, written: usize, requested: usize) -> Result<(), ChainError> {
        let next = self.chunks.len();
        if next >= self.config.max_chunks() {
            warn!(
                written,
                requested,
                max_chunks = self.config.max_chunks(),
                "buffer chain overflow"
            );
            return Err(ChainError::Overflow { written, requested });
        }
        debug!(
            index = next,
            capacity = self.config.chunk_capacity(),
            "allocating chunk"
        );
        self.chunks.push(Chunk::new(self.config.chunk_capacity()));
        Ok(())
    }
}

impl Default for Chain {
    fn default() -> Self {
        let config = ChainConfig::default();
        Self {
            config,
            chunks: vec![Chunk::new(config.chunk_capacity())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Chain {
        Chain::new(5, 10).unwrap()
    }

    #[test]
    fn test_new_starts_with_one_empty_chunk() {
        let chain = chain();
        assert!(chain.is_empty());
        assert_eq!(chain.size(), 0);
        assert_eq!(chain.chunk_count(), 1);
        assert_eq!(chain.capacity(), 50);
        assert_eq!(chain.remaining(), 50);
    }

    #[test]
    fn test_new_rejects_zero_chunks() {
        assert!(matches!(
            Chain::new(5, 0),
            Err(ChainError::InvalidArgument { .. })
        ));
        assert!(Chain::new(0, 5).is_err());
    }

    #[test]
    fn test_new_rejects_unallocatable_chunk() {
        assert!(matches!(
            Chain::new(usize::MAX, 1),
            Err(ChainError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_append_within_one_chunk() {
        let mut chain = chain();
        chain.append(b"abc", 0, 3).unwrap();
        assert_eq!(chain.size(), 3);
        assert_eq!(chain.chunk_count(), 1);
    }

    #[test]
    fn test_append_respects_start_and_count() {
        let mut chain = chain();
        chain.append(b"xxHelloxx", 2, 5).unwrap();
        assert_eq!(chain.to_bytes(), Bytes::from_static(b"Hello"));
    }

    #[test]
    fn test_append_allocates_lazily() {
        let mut chain = chain();
        chain.append(b"12345", 0, 5).unwrap();
        // Exactly full; the next chunk is not allocated until needed
        assert_eq!(chain.chunk_count(), 1);
        assert_eq!(chain.get_chunk(1).unwrap().map(Chunk::len), None);

        chain.append(b"6", 0, 1).unwrap();
        assert_eq!(chain.chunk_count(), 2);
        assert_eq!(chain.size(), 6);
    }

    #[test]
    fn test_append_crosses_several_chunks() {
        let mut chain = chain();
        chain.extend_from_slice(b"1234567890AB").unwrap();
        let sizes: Vec<usize> = chain.chunks().map(Chunk::len).collect();
        assert_eq!(sizes, vec![5, 5, 2]);
    }

    #[test]
    fn test_append_validation() {
        let mut chain = chain();
        let source = [0u8; 10];

        assert!(matches!(
            chain.append(&source, 0, 20),
            Err(ChainError::InvalidArgument { .. })
        ));
        assert!(chain.append(&source, 11, 0).is_err());
        assert!(chain.append(&source, usize::MAX, 2).is_err());
        // start == len with count 0 is an empty range
        assert!(chain.append(&source, 10, 0).is_ok());
        assert!(chain.is_empty());
    }

    #[test]
    fn test_append_zero_bytes_on_full_chain() {
        let mut chain = Chain::new(2, 1).unwrap();
        chain.extend_from_slice(b"ab").unwrap();
        assert!(chain.extend_from_slice(b"").is_ok());
    }

    #[test]
    fn test_overflow_keeps_committed_prefix() {
        let mut chain = Chain::new(4, 2).unwrap();
        chain.extend_from_slice(b"abc").unwrap();

        let err = chain.extend_from_slice(b"defghij").unwrap_err();
        assert_eq!(
            err,
            ChainError::Overflow {
                written: 5,
                requested: 7
            }
        );
        assert_eq!(chain.size(), 8);
        assert_eq!(chain.to_bytes(), Bytes::from_static(b"abcdefgh"));
        assert_eq!(chain.chunk_count(), 2);
    }

    #[test]
    fn test_append_buf_spans_segments() {
        let mut chain = chain();
        let buf = Buf::chain(&b"Hello "[..], &b"World"[..]);
        chain.append_buf(buf).unwrap();
        assert_eq!(chain.size(), 11);
        assert_eq!(chain.to_bytes(), Bytes::from_static(b"Hello World"));
    }

    #[test]
    fn test_append_buf_overflow() {
        let mut chain = Chain::new(3, 2).unwrap();
        let err = chain.append_buf(Bytes::from_static(b"abcdefgh")).unwrap_err();
        assert_eq!(
            err,
            ChainError::Overflow {
                written: 6,
                requested: 8
            }
        );
        assert_eq!(chain.remaining(), 0);
    }

    #[test]
    fn test_get_chunk() {
        let mut chain = chain();
        chain.extend_from_slice(b"1234567").unwrap();

        assert_eq!(chain.get_chunk(0).unwrap().unwrap().as_slice(), b"12345");
        assert_eq!(chain.get_chunk(1).unwrap().unwrap().as_slice(), b"67");
        assert!(chain.get_chunk(2).unwrap().is_none());
        assert!(chain.get_chunk(9).unwrap().is_none());
        assert_eq!(
            chain.get_chunk(10).unwrap_err(),
            ChainError::OutOfRange {
                index: 10,
                bound: 10
            }
        );
    }

    #[test]
    fn test_cursor_factories() {
        let mut chain = chain();
        chain.extend_from_slice(b"ABCDEFGHIJKL").unwrap();

        assert_eq!(chain.head().position(), 0);
        assert_eq!(chain.tail().position(), 11);
        assert_eq!(chain.tail().peek(), Ok(b'L'));

        let cursor = chain.cursor_at(7).unwrap();
        assert_eq!(cursor.chunk_index(), 1);
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.peek(), Ok(b'H'));

        assert!(matches!(
            chain.cursor_at(12),
            Err(ChainError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_cursor_at_on_empty_chain() {
        let chain = chain();
        assert!(chain.cursor_at(0).is_err());
        assert_eq!(chain.tail().position(), 0);
    }

    #[test]
    fn test_bytes_iterates_logical_stream() {
        let mut chain = chain();
        chain.extend_from_slice(b"segmented").unwrap();
        let collected: Vec<u8> = chain.bytes().collect();
        assert_eq!(collected, b"segmented");
    }

    #[test]
    fn test_default_chain() {
        let chain = Chain::default();
        assert_eq!(chain.chunk_capacity(), crate::config::DEFAULT_CHUNK_CAPACITY);
        assert_eq!(chain.max_chunks(), crate::config::DEFAULT_MAX_CHUNKS);
        assert_eq!(chain.config(), &ChainConfig::default());
    }

    #[cfg(feature = "hash-blake3")]
    #[test]
    fn test_digest_independent_of_geometry() {
        let mut small = Chain::new(3, 10).unwrap();
        let mut large = Chain::new(16, 2).unwrap();
        small.extend_from_slice(b"Hello World").unwrap();
        large.extend_from_slice(b"Hello World").unwrap();

        assert_eq!(small.digest(), large.digest());
        assert_eq!(small.digest(), Blake3Hasher::hash(&small.to_bytes()));
    }
}
