//! Persistent deferred-concatenation builder for binary data.
//!
//! Concatenating immutable byte sequences eagerly copies the accumulated
//! prefix on every step, which is quadratic in the number of appends. A
//! [`Builder`] instead records pending concatenation as a tree and copies the
//! payload once, when it is materialized.
//!
//! # Key Types
//!
//! - [`Builder`] — immutable tree of leaf chunks and ordered branches
//! - [`Chunk`] — the atomic byte-sequence capability a leaf holds
//! - [`TextBuilder`] — the same structure over UTF-8 text
//! - [`FlattenConfig`] / [`FlattenStrategy`] — how materialization sizes its buffer
//! - [`Flattener`] — pluggable list-of-slices concatenation primitive
//!
//! # Design Rules
//!
//! 1. Constructors and combinators are O(1) in payload size and never fail.
//! 2. No operation mutates an existing node; children are shared through `Arc`.
//! 3. Materialization is a pure, repeatable projection that copies each leaf once.
//! 4. Nothing recurses on tree depth, including drop.

pub mod builder;
pub mod chunk;
pub mod config;
pub mod error;
pub mod flatten;
pub mod text;

pub use builder::Builder;
pub use chunk::Chunk;
pub use config::FlattenConfig;
pub use error::{BuilderError, BuilderResult};
pub use flatten::{FlattenStrategy, Flattener, SliceConcat};
pub use text::TextBuilder;
