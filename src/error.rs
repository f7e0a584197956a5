//! Error types of the crate.
//!
//! Most failures that can happen while scoring a corpus are *not* errors: an unreadable document is
//! recorded in the report and skipped, a malformed classifier record is ignored and a zero
//! denominator yields `0.0`. The variants below are what remains.
use std::path::PathBuf;
use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A file could not be read or written.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be listed.
    #[error("Could not list directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The two label files do not hold the same number of records.
    #[error("Label files are misaligned: the gold file has {gold} records, the predicted file has {predicted}")]
    MisalignedLabels { gold: usize, predicted: usize },

    /// A record of a label file has no label token.
    #[error("Missing label on line {line} of {path}")]
    MissingLabel { path: PathBuf, line: usize },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn read_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::ReadDir {
            path: path.into(),
            source,
        }
    }
}
