//! Materialization strategies.
//!
//! Every strategy walks the tree once, left to right, and copies each leaf
//! exactly once. They differ only in how the destination buffer is sized.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builder::Builder;
use crate::chunk::Chunk;
use crate::config::FlattenConfig;
use crate::error::BuilderError;

/// How a builder is flattened into contiguous bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlattenStrategy {
    /// Size the tree first, allocate once, then copy every leaf.
    #[default]
    TwoPass,
    /// Copy leaves into a growable buffer in a single traversal.
    Streaming,
    /// Collect leaf slices and hand them to a [`Flattener`].
    Gather,
}

impl FlattenStrategy {
    /// Stable lowercase name, as used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TwoPass => "two-pass",
            Self::Streaming => "streaming",
            Self::Gather => "gather",
        }
    }
}

impl fmt::Display for FlattenStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlattenStrategy {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "two-pass" => Ok(Self::TwoPass),
            "streaming" => Ok(Self::Streaming),
            "gather" => Ok(Self::Gather),
            other => Err(BuilderError::Config(format!(
                "unknown flatten strategy: {other}"
            ))),
        }
    }
}

/// A "list of chunks to one contiguous sequence" primitive.
///
/// Implementations must return exactly the in-order concatenation of
/// `chunks`.
pub trait Flattener {
    fn flatten(&self, chunks: &[&[u8]]) -> Vec<u8>;
}

/// The standard library's slice concatenation.
#[derive(Clone, Copy, Debug, Default)]
pub struct SliceConcat;

impl Flattener for SliceConcat {
    fn flatten(&self, chunks: &[&[u8]]) -> Vec<u8> {
        chunks.concat()
    }
}

pub(crate) fn flatten<C: Chunk>(builder: &Builder<C>, config: &FlattenConfig) -> Vec<u8> {
    let out = match config.strategy {
        FlattenStrategy::TwoPass => two_pass(builder),
        FlattenStrategy::Streaming => streaming(builder, config.initial_capacity),
        FlattenStrategy::Gather => gather(builder, &SliceConcat),
    };
    debug!(strategy = %config.strategy, bytes = out.len(), "materialized builder");
    out
}

fn two_pass<C: Chunk>(builder: &Builder<C>) -> Vec<u8> {
    let size = builder.byte_size();
    let mut out = Vec::with_capacity(size);
    for chunk in builder.chunks() {
        out.extend_from_slice(chunk);
    }
    debug_assert_eq!(out.len(), size);
    out
}

fn streaming<C: Chunk>(builder: &Builder<C>, capacity: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(capacity);
    for chunk in builder.chunks() {
        out.extend_from_slice(chunk);
    }
    out
}

pub(crate) fn gather<C: Chunk, F: Flattener + ?Sized>(builder: &Builder<C>, flattener: &F) -> Vec<u8> {
    let slices: Vec<&[u8]> = builder.chunks().collect();
    flattener.flatten(&slices)
}
