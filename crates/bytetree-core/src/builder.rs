//! The persistent builder tree and its combinators.
//!
//! A [`Builder`] is a cheap handle to an immutable node. Combinators never
//! touch an existing node: they allocate one new branch that references its
//! inputs, so a builder may be shared by any number of larger builders.
//!
//! # Invariants
//!
//! - `bytes(Leaf(c)) = c` and `bytes(Branch([b1..bn])) = bytes(b1) ++ .. ++ bytes(bn)`.
//! - The graph is acyclic: a new node only ever references finished builders.
//! - No traversal recurses on tree depth. Sizing, iteration, flattening and
//!   dropping all run on an explicit stack.

use std::fmt;
use std::io::Write;
use std::mem;
use std::sync::Arc;

use bytes::Bytes;
use tracing::trace;

use crate::chunk::Chunk;
use crate::config::FlattenConfig;
use crate::error::{BuilderError, BuilderResult};
use crate::flatten::{self, Flattener};
use crate::text::TextBuilder;

/// A node of the builder tree.
pub(crate) enum Node<C> {
    /// One atomic chunk, referenced as-is.
    Leaf(C),
    /// Ordered children, concatenated left to right.
    Branch(Vec<Builder<C>>),
}

impl<C> Drop for Node<C> {
    fn drop(&mut self) {
        let Node::Branch(children) = self else {
            return;
        };
        // Unlink uniquely owned descendants onto a work list so a long append
        // chain is released iteratively.
        let mut pending = mem::take(children);
        while let Some(child) = pending.pop() {
            if let Some(mut node) = Arc::into_inner(child.node) {
                if let Node::Branch(grandchildren) = &mut node {
                    pending.append(grandchildren);
                }
            }
        }
    }
}

/// A persistent deferred-concatenation builder over chunks of type `C`.
///
/// Cloning a builder clones a reference, never payload. All combinators take
/// their builder arguments by value and return a new builder in O(1); keep a
/// clone if the input is still needed.
///
/// ```
/// use bytetree_core::Builder;
///
/// let greeting: Builder = Builder::from_string("world").prepend_string("hello ");
/// assert_eq!(greeting.to_bytes(), "hello world");
/// assert_eq!(greeting.byte_size(), 11);
/// ```
pub struct Builder<C = Bytes> {
    pub(crate) node: Arc<Node<C>>,
}

impl<C> Clone for Builder<C> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<C: Chunk> Builder<C> {
    fn branch(children: Vec<Builder<C>>) -> Self {
        Self {
            node: Arc::new(Node::Branch(children)),
        }
    }

    // ---------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------

    /// Wrap one chunk as a leaf. The chunk is moved in, not copied.
    pub fn from_bytes(chunk: C) -> Self {
        Self {
            node: Arc::new(Node::Leaf(chunk)),
        }
    }

    /// Encode `s` as UTF-8 and wrap it as a leaf.
    ///
    /// An owned `String` is already its own UTF-8 encoding and is moved
    /// without copying; a `&str` is copied once.
    pub fn from_string(s: impl Into<String>) -> Self
    where
        C: From<String>,
    {
        Self::from_bytes(C::from(s.into()))
    }

    /// The empty builder, identical to `concat([])`.
    pub fn empty() -> Self {
        Self::branch(Vec::new())
    }

    // ---------------------------------------------------------------
    // Combination
    // ---------------------------------------------------------------

    /// `bytes(self) ++ bytes(suffix)`.
    pub fn append_builder(self, suffix: Builder<C>) -> Self {
        Self::branch(vec![self, suffix])
    }

    /// `bytes(prefix) ++ bytes(self)`.
    pub fn prepend_builder(self, prefix: Builder<C>) -> Self {
        prefix.append_builder(self)
    }

    /// Append one chunk.
    pub fn append(self, chunk: impl Into<C>) -> Self {
        self.append_builder(Self::from_bytes(chunk.into()))
    }

    /// Prepend one chunk.
    pub fn prepend(self, chunk: impl Into<C>) -> Self {
        Self::from_bytes(chunk.into()).append_builder(self)
    }

    /// Append the UTF-8 encoding of `s`.
    pub fn append_string(self, s: impl Into<String>) -> Self
    where
        C: From<String>,
    {
        self.append_builder(Self::from_string(s))
    }

    /// Prepend the UTF-8 encoding of `s`.
    pub fn prepend_string(self, s: impl Into<String>) -> Self
    where
        C: From<String>,
    {
        Self::from_string(s).append_builder(self)
    }

    /// Concatenate builders in order. O(k) in the number of builders.
    pub fn concat(builders: impl IntoIterator<Item = Builder<C>>) -> Self {
        Self::branch(builders.into_iter().collect())
    }

    // ---------------------------------------------------------------
    // Traversal
    // ---------------------------------------------------------------

    fn nodes(&self) -> Nodes<'_, C> {
        Nodes { stack: vec![self] }
    }

    fn leaves(&self) -> impl Iterator<Item = &C> + '_ {
        self.nodes().filter_map(|node| match node {
            Node::Leaf(chunk) => Some(chunk),
            Node::Branch(_) => None,
        })
    }

    /// Leaf bytes in materialization order (left-to-right, depth first).
    pub fn chunks(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.leaves().map(Chunk::as_bytes)
    }

    /// Number of leaves, counting a shared leaf once per path to it.
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Number of nodes, counting a shared node once per path to it.
    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Returns `true` if the builder represents no bytes.
    pub fn is_empty(&self) -> bool {
        self.leaves().all(Chunk::is_empty)
    }

    // ---------------------------------------------------------------
    // Materialization
    // ---------------------------------------------------------------

    /// Total byte count, or [`BuilderError::SizeOverflow`] if it does not fit
    /// in `usize`.
    pub fn checked_byte_size(&self) -> BuilderResult<usize> {
        let mut total: usize = 0;
        for chunk in self.leaves() {
            let len = chunk.len();
            total = total
                .checked_add(len)
                .ok_or(BuilderError::SizeOverflow {
                    accumulated: total,
                    chunk: len,
                })?;
        }
        Ok(total)
    }

    /// Total byte count. O(nodes), independent of payload size.
    ///
    /// # Panics
    ///
    /// Panics if the count overflows `usize`. Such a builder cannot be
    /// materialized either.
    pub fn byte_size(&self) -> usize {
        match self.checked_byte_size() {
            Ok(size) => size,
            Err(err) => panic!("{err}"),
        }
    }

    /// Flatten into one contiguous [`Bytes`] using the default strategy.
    pub fn to_bytes(&self) -> Bytes {
        self.to_bytes_with(&FlattenConfig::default())
    }

    /// Flatten into one contiguous [`Bytes`] using `config`.
    pub fn to_bytes_with(&self, config: &FlattenConfig) -> Bytes {
        Bytes::from(flatten::flatten(self, config))
    }

    /// Flatten into an owned vector using the default strategy.
    pub fn to_vec(&self) -> Vec<u8> {
        flatten::flatten(self, &FlattenConfig::default())
    }

    /// Flatten by handing every leaf slice to a caller-supplied primitive.
    pub fn to_bytes_with_flattener<F: Flattener + ?Sized>(&self, flattener: &F) -> Bytes {
        Bytes::from(flatten::gather(self, flattener))
    }

    /// Write every leaf to `sink` in order and return the bytes written.
    pub fn write_to<W: Write>(&self, mut sink: W) -> BuilderResult<usize> {
        let mut written = 0usize;
        for chunk in self.chunks() {
            sink.write_all(chunk)?;
            written += chunk.len();
        }
        sink.flush()?;
        trace!(bytes = written, "wrote builder to sink");
        Ok(written)
    }
}

impl Builder<Bytes> {
    /// Reinterpret a text builder as a byte builder in O(1).
    pub fn from_text_builder(text: TextBuilder) -> Self {
        text.into_bytes_builder()
    }
}

/// Pre-order node iterator, left to right.
struct Nodes<'a, C> {
    stack: Vec<&'a Builder<C>>,
}

impl<'a, C> Iterator for Nodes<'a, C> {
    type Item = &'a Node<C>;

    fn next(&mut self) -> Option<Self::Item> {
        let builder = self.stack.pop()?;
        let node: &'a Node<C> = &builder.node;
        if let Node::Branch(children) = node {
            self.stack.extend(children.iter().rev());
        }
        Some(node)
    }
}

impl<C: Chunk> Default for Builder<C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<C: Chunk> fmt::Debug for Builder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("leaves", &self.leaf_count())
            .field("bytes", &self.checked_byte_size().ok())
            .finish()
    }
}

impl<C: Chunk> FromIterator<Builder<C>> for Builder<C> {
    fn from_iter<I: IntoIterator<Item = Builder<C>>>(iter: I) -> Self {
        Self::concat(iter)
    }
}

impl From<Bytes> for Builder<Bytes> {
    fn from(chunk: Bytes) -> Self {
        Self::from_bytes(chunk)
    }
}

impl From<Vec<u8>> for Builder<Bytes> {
    fn from(data: Vec<u8>) -> Self {
        Self::from_bytes(Bytes::from(data))
    }
}

impl From<&'static [u8]> for Builder<Bytes> {
    fn from(data: &'static [u8]) -> Self {
        Self::from_bytes(Bytes::from_static(data))
    }
}

impl From<String> for Builder<Bytes> {
    fn from(s: String) -> Self {
        Self::from_string(s)
    }
}

impl From<&str> for Builder<Bytes> {
    fn from(s: &str) -> Self {
        Self::from_string(s)
    }
}

impl From<TextBuilder> for Builder<Bytes> {
    fn from(text: TextBuilder) -> Self {
        Self::from_text_builder(text)
    }
}
