//! Pattern search over the logical stream.
//!
//! The scan walks one byte at a time with a single running match count. On a
//! mismatch it restarts once, checking only whether the current byte opens a
//! new match. There is no failure table, so a pattern whose prefix repeats
//! inside itself (e.g. `AAB` in `AAAB`) can be missed.

use tracing::trace;

use super::Chain;
use crate::cursor::Cursor;

impl Chain {
    /// Finds the first occurrence of `pattern`, which may span chunk boundaries.
    ///
    /// Returns a cursor at the first byte of the match, or `None` if the
    /// pattern is empty or not found by the one-step-restart scan described in
    /// the module docs.
    ///
    /// # Example
    ///
    /// ```
    /// use bufchain::Chain;
    ///
    /// let mut chain = Chain::new(5, 10)?;
    /// chain.extend_from_slice(b"ABCDEFGHIJ")?;
    ///
    /// let found = chain.find(b"EF").unwrap();
    /// assert_eq!(found.position(), 4);
    /// assert_eq!(found.peek()?, b'E');
    /// # Ok::<(), bufchain::ChainError>(())
    /// ```
    pub fn find(&self, pattern: &[u8]) -> Option<Cursor<'_>> {
        let (&first, _) = pattern.split_first()?;
        if self.is_empty() {
            return None;
        }

        let mut cursor = self.head();
        let mut matched = 0;
        loop {
            let byte = cursor.peek().ok()?;
            if byte == pattern[matched] {
                matched += 1;
            } else {
                matched = usize::from(byte == first);
            }

            if matched == pattern.len() {
                cursor.rewind(matched - 1);
                trace!(position = cursor.position(), len = pattern.len(), "pattern found");
                return Some(cursor);
            }

            if !cursor.next() {
                return None;
            }
        }
    }
}
