use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BuilderError, BuilderResult};
use crate::flatten::FlattenStrategy;

/// Configuration for materializing builders.
///
/// Missing fields fall back to [`FlattenConfig::default`] when loaded from
/// TOML:
///
/// ```toml
/// strategy = "streaming"
/// initial_capacity = 65536
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenConfig {
    /// Which flatten strategy to use.
    pub strategy: FlattenStrategy,
    /// Capacity hint for the output buffer. Only used by
    /// [`FlattenStrategy::Streaming`].
    pub initial_capacity: usize,
}

impl FlattenConfig {
    /// Size once, allocate once.
    pub fn two_pass() -> Self {
        Self::default()
    }

    /// Single traversal into a buffer that starts at `initial_capacity`.
    pub fn streaming(initial_capacity: usize) -> Self {
        Self {
            strategy: FlattenStrategy::Streaming,
            initial_capacity,
        }
    }

    /// Delegate the copy to the slice concatenation primitive.
    pub fn gather() -> Self {
        Self {
            strategy: FlattenStrategy::Gather,
            ..Default::default()
        }
    }

    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(text: &str) -> BuilderResult<Self> {
        toml::from_str(text).map_err(|e| BuilderError::Config(e.to_string()))
    }

    /// Render this configuration as TOML.
    pub fn to_toml_string(&self) -> BuilderResult<String> {
        toml::to_string(self).map_err(|e| BuilderError::Config(e.to_string()))
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> BuilderResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), strategy = %config.strategy, "loaded flatten config");
        Ok(config)
    }
}
