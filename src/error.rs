//! Crate-wide error type.

use std::path::PathBuf;

/// Errors produced while loading points or setting up a search.
///
/// The evolutionary core itself does not fail on well-formed input; every
/// variant here belongs to input handling or configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The point file could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from an already opened source failed.
    #[error("failed to read points: {0}")]
    Read(#[from] std::io::Error),

    /// A line did not have the `name x y` shape.
    #[error("line {line}: expected `name x y`, got {content:?}")]
    MalformedRecord { line: usize, content: String },

    /// A coordinate was not an integer.
    #[error("line {line}: invalid coordinate {value:?}")]
    InvalidCoordinate { line: usize, value: String },

    /// Two points share a name.
    #[error("duplicate point name {0:?}")]
    DuplicatePoint(String),

    /// [`GaConfig::validate`](crate::ga::GaConfig::validate) rejected the configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
