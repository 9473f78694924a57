use std::sync::Arc;

use bytes::Bytes;

/// An opaque, immutable atomic byte sequence that a builder leaf can hold.
///
/// Implementations must report their length in O(1) and expose their raw
/// bytes by reference. The builder never copies a chunk on construction or
/// combination; it only reads the bytes back during materialization.
pub trait Chunk {
    /// The raw bytes of this chunk.
    fn as_bytes(&self) -> &[u8];

    /// Length in bytes.
    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns `true` if the chunk holds no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Chunk for Bytes {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn len(&self) -> usize {
        Bytes::len(self)
    }
}

impl Chunk for Vec<u8> {
    fn as_bytes(&self) -> &[u8] {
        self.as_slice()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl Chunk for Arc<[u8]> {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl Chunk for Box<[u8]> {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl Chunk for &'static [u8] {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl Chunk for &'static str {
    fn as_bytes(&self) -> &[u8] {
        str::as_bytes(self)
    }
}

impl Chunk for String {
    fn as_bytes(&self) -> &[u8] {
        String::as_bytes(self)
    }

    fn len(&self) -> usize {
        String::len(self)
    }
}
