//! BLAKE3-based content digests.

use crate::chunk::Digest;

/// Incremental BLAKE3 hasher producing [`Digest`] values.
#[derive(Debug, Clone, Default)]
pub(crate) struct Blake3Hasher {
    state: blake3::Hasher,
}

impl Blake3Hasher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    pub(crate) fn finalize(&self) -> Digest {
        Digest::new(self.state.finalize().into())
    }

    /// One-shot digest of a contiguous slice.
    pub(crate) fn hash(data: &[u8]) -> Digest {
        Digest::new(blake3::hash(data).into())
    }
}
