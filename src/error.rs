//! Error types for the rules adapter and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::Square;

/// Errors reported by the rules engine seam.
#[derive(Debug, Error)]
pub enum RulesError {
    /// The move is not legal in the current position.
    #[error("illegal move: {from}{to}")]
    IllegalMove { from: Square, to: Square },

    /// Text that is not an algebraic square name.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// Invalid FEN string.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
}

/// Errors raised while loading [`crate::config::BoardConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}
