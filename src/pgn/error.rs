use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SplitError {
    #[error("Failed to open file '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to initialize zstd decoder for '{}': {source}", .path.display())]
    Decoder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error reading input: {0}")]
    Read(#[source] io::Error),

    #[error("Invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("No input files match '{0}'")]
    NoInput(String),

    #[error("None of the {count} matched input files could be opened")]
    NoReadableInput { count: usize },

    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = SplitError> = std::result::Result<T, E>;
