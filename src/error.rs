use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a MIDI/audio pair into annotations.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// An operation that needs at least one note got none.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse MIDI file {path}: {message}")]
    Midi { path: PathBuf, message: String },

    #[error("failed to decode audio file {path}: {source}")]
    Audio {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("resampling failed: {0}")]
    Resample(String),

    #[error("failed to write {path}: {source}")]
    Npy {
        path: PathBuf,
        #[source]
        source: ndarray_npy::WriteNpyError,
    },
}
