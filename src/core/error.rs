//! Fatal error taxonomy
//!
//! Everything here aborts a run. Recoverable problems (malformed links,
//! duplicate anchors) are [`Warning`](crate::core::model::Warning)s instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("root directory does not exist: {}", path.display())]
    RootNotFound { path: PathBuf },

    #[error("root is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },
}

impl CheckError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CheckError::Io {
            path: path.into(),
            source,
        }
    }
}
