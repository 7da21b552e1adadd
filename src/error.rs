//! Error types shared by the network, the trainer and the file loaders.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while building or training a network.
///
/// None of these are recoverable at the point they are raised: a session that
/// hits one should be aborted as a whole.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The topology or hyperparameters are unusable.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// A supplied value is not a finite number.
    #[error("invalid data format: {0}")]
    DataFormat(String),
    /// A vector or sequence has the wrong length for the topology.
    #[error("invalid data shape: {0}")]
    DataShape(String),
    /// A required file does not exist.
    #[error("resource not found: {}", .0.display())]
    ResourceNotFound(PathBuf),
    /// Any other I/O failure while reading or writing data files.
    #[error("i/o error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Converts an I/O error raised while accessing `path`.
    pub(crate) fn from_io(err: io::Error, path: PathBuf) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Error::ResourceNotFound(path),
            _ => Error::Io(format!("{}: {}", path.display(), err)),
        }
    }
}
