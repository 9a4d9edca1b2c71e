use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures a run can end with. Undecodable bytes are not in here: they are
/// replaced while reading and only logged.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A directory could not be listed, or the root is unusable.
    #[error("failed to traverse '{root}': {message}")]
    Traversal { root: PathBuf, message: String },

    /// A file could not be opened or read.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tokenizer could not be loaded or rejected the input.
    #[error("tokenizer '{encoding}' failed: {message}")]
    Tokenization { encoding: String, message: String },

    /// The destination could not be created or written.
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    #[must_use]
    pub fn traversal(
        root: impl Into<PathBuf>,
        message: impl ToString,
    ) -> Self {
        Self::Traversal {
            root: root.into(),
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn read(
        path: &Path,
        source: std::io::Error,
    ) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    #[must_use]
    pub fn tokenization(
        encoding: impl Into<String>,
        message: impl ToString,
    ) -> Self {
        Self::Tokenization {
            encoding: encoding.into(),
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn write(
        path: &Path,
        source: std::io::Error,
    ) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns true if this is a tokenizer failure.
    #[must_use]
    pub const fn is_tokenization(&self) -> bool {
        matches!(self, Self::Tokenization { .. })
    }
}
