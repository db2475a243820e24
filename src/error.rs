use std::time::Duration;

use thiserror::Error;

/// Error type returned by furigana-rs public APIs.
#[derive(Debug, Error)]
pub enum FuriganaError {
    /// No MeCab executable could be located.
    #[error("mecab executable not found: {0}")]
    ExecutableNotFound(String),
    /// The analyzer process could not be started.
    #[error("failed to start mecab: {0}")]
    Spawn(String),
    /// Pipe or filesystem failure while talking to the analyzer.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The analyzer did not answer in time and was killed.
    #[error("mecab did not respond within {0:?}")]
    Timeout(Duration),
    /// The analyzer answered with something that is not node/field output.
    #[error("unexpected output from mecab: {0}")]
    UnexpectedOutput(String),
    /// User-provided arguments were invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FuriganaError>;
