//! The Chunk type - a fixed-capacity, append-only slab of bytes.

use bytes::Bytes;
use std::fmt;

use crate::error::ChainError;

#[cfg(feature = "hash-blake3")]
use super::Digest;
#[cfg(feature = "hash-blake3")]
use crate::hash::Blake3Hasher;

/// A fixed-capacity byte container owned by a [`Chain`](crate::Chain).
///
/// Storage is allocated once, zero-filled, and never resized. Bytes are only
/// ever appended at the write position, so everything before
/// [`len`](Chunk::len) is immutable once written.
///
/// Chunks are created by their chain; callers only see them through
/// [`Chain::get_chunk`](crate::Chain::get_chunk) and
/// [`Chain::chunks`](crate::Chain::chunks).
///
/// # Example
///
/// ```
/// use bufchain::Chain;
///
/// let mut chain = Chain::new(5, 10)?;
/// chain.extend_from_slice(b"Hello!")?;
///
/// let first = chain.get_chunk(0)?.unwrap();
/// assert_eq!(first.as_slice(), b"Hello");
/// assert!(!first.has_space());
/// # Ok::<(), bufchain::ChainError>(())
/// ```
pub struct Chunk {
    data: Box<[u8]>,
    write_pos: usize,
}

impl Chunk {
    /// Allocates an empty chunk able to hold `capacity` bytes.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            write_pos: 0,
        }
    }

    /// Copies as much of `src` as fits and returns the number of bytes copied.
    ///
    /// A short count is not an error; it means the chunk is now full and the
    /// rest belongs in another chunk.
    pub(crate) fn write(&mut self, src: &[u8]) -> usize {
        let n = src.len().min(self.remaining());
        self.data[self.write_pos..self.write_pos + n].copy_from_slice(&src[..n]);
        self.write_pos += n;
        n
    }

    /// Returns the byte at `index`.
    ///
    /// Bounds are checked against the capacity, not the written length: an
    /// allocated but unwritten index reads as zero.
    pub fn get(&self, index: usize) -> Result<u8, ChainError> {
        self.data
            .get(index)
            .copied()
            .ok_or(ChainError::OutOfRange {
                index,
                bound: self.data.len(),
            })
    }

    /// Returns `len` written bytes starting at `start`.
    ///
    /// Fails with [`ChainError::OutOfRange`] if the range reaches past the
    /// written region.
    pub fn slice(&self, start: usize, len: usize) -> Result<&[u8], ChainError> {
        let end = start.checked_add(len).ok_or(ChainError::OutOfRange {
            index: start,
            bound: self.write_pos,
        })?;
        if end > self.write_pos {
            return Err(ChainError::OutOfRange {
                index: end,
                bound: self.write_pos,
            });
        }
        Ok(&self.data[start..end])
    }

    /// Returns the written bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.write_pos]
    }

    /// Copies the written bytes into a new [`Bytes`].
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_slice())
    }

    /// Returns true while the chunk can accept more bytes.
    pub fn has_space(&self) -> bool {
        self.write_pos < self.data.len()
    }

    /// Returns the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.write_pos
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.write_pos == 0
    }

    /// Returns the fixed capacity.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the free space left.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.write_pos
    }

    /// Computes the BLAKE3 digest of the written bytes.
    #[cfg(feature = "hash-blake3")]
    pub fn digest(&self) -> Digest {
        Blake3Hasher::hash(self.as_slice())
    }
}

impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("capacity", &self.capacity())
            .field("len", &self.write_pos)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let chunk = Chunk::new(5);
        assert!(chunk.is_empty());
        assert!(chunk.has_space());
        assert_eq!(chunk.len(), 0);
        assert_eq!(chunk.capacity(), 5);
    }

    #[test]
    fn test_write_within_capacity() {
        let mut chunk = Chunk::new(5);
        assert_eq!(chunk.write(b"abc"), 3);
        assert_eq!(chunk.len(), 3);
        assert_eq!(chunk.remaining(), 2);
        assert_eq!(chunk.as_slice(), b"abc");
    }

    #[test]
    fn test_write_short_when_full() {
        let mut chunk = Chunk::new(5);
        assert_eq!(chunk.write(b"abc"), 3);
        assert_eq!(chunk.write(b"defgh"), 2);
        assert!(!chunk.has_space());
        assert_eq!(chunk.as_slice(), b"abcde");

        // Full chunk accepts nothing more
        assert_eq!(chunk.write(b"x"), 0);
        assert_eq!(chunk.len(), 5);
    }

    #[test]
    fn test_get_reads_unwritten_as_zero() {
        let mut chunk = Chunk::new(4);
        chunk.write(b"Hi");
        assert_eq!(chunk.get(0), Ok(b'H'));
        assert_eq!(chunk.get(1), Ok(b'i'));
        assert_eq!(chunk.get(3), Ok(0));
    }

    #[test]
    fn test_get_out_of_range() {
        let chunk = Chunk::new(4);
        assert_eq!(
            chunk.get(4),
            Err(ChainError::OutOfRange { index: 4, bound: 4 })
        );
    }

    #[test]
    fn test_slice() {
        let mut chunk = Chunk::new(8);
        chunk.write(b"buffer");
        assert_eq!(chunk.slice(1, 3), Ok(&b"uff"[..]));
        assert_eq!(chunk.slice(6, 0), Ok(&b""[..]));
        assert!(chunk.slice(4, 3).is_err());
        assert!(chunk.slice(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_to_bytes_copies_written_region() {
        let mut chunk = Chunk::new(8);
        chunk.write(b"abc");
        assert_eq!(chunk.to_bytes(), Bytes::from_static(b"abc"));
    }

    #[test]
    fn test_debug_omits_contents() {
        let mut chunk = Chunk::new(8);
        chunk.write(b"abc");
        let s = format!("{:?}", chunk);
        assert_eq!(s, "Chunk { capacity: 8, len: 3 }");
    }

    #[cfg(feature = "hash-blake3")]
    #[test]
    fn test_digest_covers_written_bytes_only() {
        let mut a = Chunk::new(8);
        a.write(b"abc");
        let mut b = Chunk::new(16);
        b.write(b"abc");
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a.digest(), Blake3Hasher::hash(b"abc"));
    }
}
