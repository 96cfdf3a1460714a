use std::{io, path::PathBuf};

use thiserror::Error;

use crate::timer::TimerStatus;

/// Failures of the session core. Each variant is reported once and never
/// retried: a session is a one-shot ritual.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A clock operation was invoked outside its valid state. Indicates an
    /// orchestration bug, not a user-facing condition.
    #[error("cannot {operation} while the timer is {status:?}")]
    InvalidState {
        operation: &'static str,
        status: TimerStatus,
    },

    #[error("invalid session duration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("session log {path} is malformed: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write thumbnail {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("thumbnail {0} already exists")]
    ThumbnailExists(PathBuf),
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PersistenceError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
