//! Unified error types for geoscope.

use tokio_rusqlite::rusqlite;

/// Unified error types for the geoscope core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Geometry contains a coordinate outside [-180,180] x [-90,90].
    #[error("OUT_OF_BOUNDS: {0}")]
    OutOfBounds(String),

    /// Invalid input parameters (e.g., empty AOI name).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Stored geometry failed to decode.
    #[error("INVALID_GEOMETRY: {0}")]
    InvalidGeometry(String),

    /// No AOI with the requested id.
    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    /// Database operation failed.
    #[error("STORE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORE_ERROR: migration failed: {0}")]
    MigrationFailed(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}
