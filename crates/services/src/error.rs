//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::model::{PostError, PostId, RatingError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Why a session could not be loaded into the player.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadError {
    #[error("training session {0} was not found")]
    NotFound(PostId),
    #[error("could not reach the session store: {0}")]
    Network(String),
    #[error("stored session is unreadable: {0}")]
    Invalid(String),
}

impl LoadError {
    pub(crate) fn from_storage(id: PostId, err: StorageError) -> Self {
        match err {
            StorageError::NotFound => LoadError::NotFound(id),
            StorageError::Serialization(msg) => LoadError::Invalid(msg),
            other => LoadError::Network(other.to_string()),
        }
    }
}

/// Speech output failed. Never fatal to playback.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnnounceError {
    #[error("speech backend unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors emitted by `PostService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PostServiceError {
    #[error("training session {0} was not found")]
    NotFound(PostId),
    #[error(transparent)]
    Post(#[from] PostError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `RatingService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RatingServiceError {
    #[error("training session {0} was not found")]
    NotFound(PostId),
    #[error(transparent)]
    Rating(#[from] RatingError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
