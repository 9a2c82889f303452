//! Unified error type for the planetarium service.
//!
//! All layers funnel their failures into [`Error`], which carries enough
//! context for the HTTP layer to derive a status code via
//! [`Error::http_status`]. A missing record is *not* an error anywhere in the
//! store or service APIs (those return `Option`); the [`Error::NotFound`]
//! variant exists only so route handlers can render the empty outcome as 404.

use std::fmt;

/// Unified error type covering all failure modes in planetarium.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity could not be found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "planet").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// Request data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The keyed store rejected an operation or was unreachable.
    #[error("Storage error: {source}")]
    Storage {
        /// The underlying database error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The remote catalog failed at the transport, status, or parse level.
    #[error("Remote catalog error: {0}")]
    Remote(String),

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::Validation(_) => 400,
            Error::Storage { .. } => 500,
            Error::Remote(_) => 502,
            Error::Internal(_) => 500,
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::Storage`].
    pub fn storage(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Storage {
            source: source.into(),
        }
    }

    /// Convenience constructor for [`Error::Remote`].
    pub fn remote(message: impl Into<String>) -> Self {
        Error::Remote(message.into())
    }
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::storage(e)
    }
}

impl From<r2d2::Error> for Error {
    fn from(e: r2d2::Error) -> Self {
        Error::storage(e)
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = Error::not_found("planet", "abc");
        assert_eq!(err.http_status(), 404);
        assert_eq!(err.to_string(), "planet not found: abc");
    }

    #[test]
    fn remote_maps_to_502() {
        assert_eq!(Error::remote("connection refused").http_status(), 502);
    }

    #[test]
    fn storage_maps_to_500() {
        let err = Error::from(rusqlite::Error::InvalidQuery);
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn validation_maps_to_400() {
        assert_eq!(Error::Validation("name required".into()).http_status(), 400);
    }
}
