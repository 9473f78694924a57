use thiserror::Error;

/// Errors produced by builder operations.
///
/// Constructors and combinators are total and never return these. Only size
/// accounting, sink output, and configuration loading can fail.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// The total byte count does not fit in `usize`.
    #[error("byte count overflow: {accumulated} bytes accumulated, next chunk has {chunk}")]
    SizeOverflow { accumulated: usize, chunk: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The flatten configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result alias for builder operations.
pub type BuilderResult<T> = Result<T, BuilderError>;
