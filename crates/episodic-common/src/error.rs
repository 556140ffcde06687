//! Common error types used throughout episodic.
//!
//! Library crates funnel their failures into [`Error`], which carries enough
//! context for the HTTP layer to derive a status code via [`Error::http_status`].

/// Common error type for episodic.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity was not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "episode").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// Request data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A storage tier failed to read or write.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The active storage tier does not accept writes.
    #[error("Catalog is read-only: {0}")]
    ReadOnly(String),

    /// A remote peer returned an error or could not be reached.
    #[error("Remote error: {0}")]
    Remote(String),

    /// A stored document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::Validation(_) => 400,
            Error::Storage(_) => 500,
            Error::ReadOnly(_) => 503,
            Error::Remote(_) => 502,
            Error::Serialization(_) => 500,
            Error::Io(_) => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Short machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound { .. } => "not_found",
            Error::Validation(_) => "validation_error",
            Error::Storage(_) => "storage_error",
            Error::ReadOnly(_) => "read_only",
            Error::Remote(_) => "remote_error",
            Error::Serialization(_) => "serialization_error",
            Error::Io(_) => "io_error",
            Error::Internal(_) => "internal_error",
        }
    }

    /// Create a new NotFound error.
    pub fn not_found(entity: impl Into<String>, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create a new Validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new Storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a new Remote error.
    pub fn remote<S: Into<String>>(msg: S) -> Self {
        Self::Remote(msg.into())
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::not_found("episode", "abc-123");
        assert_eq!(err.to_string(), "episode not found: abc-123");

        let err = Error::validation("title is required");
        assert_eq!(err.to_string(), "Validation error: title is required");

        let err = Error::storage("disk full");
        assert_eq!(err.to_string(), "Storage error: disk full");

        let err = Error::ReadOnly("remote mirror".into());
        assert_eq!(err.to_string(), "Catalog is read-only: remote mirror");
    }

    #[test]
    fn test_http_status() {
        assert_eq!(Error::not_found("episode", "x").http_status(), 404);
        assert_eq!(Error::validation("bad").http_status(), 400);
        assert_eq!(Error::storage("boom").http_status(), 500);
        assert_eq!(Error::ReadOnly("mirror".into()).http_status(), 503);
        assert_eq!(Error::remote("timeout").http_status(), 502);
        assert_eq!(Error::internal("bug").http_status(), 500);
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.code(), "io_error");
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = Error::from(json_err);
        assert!(matches!(err, Error::Serialization(_)));
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn test_result_type() {
        fn ok_fn() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(ok_fn().unwrap(), 42);

        fn err_fn() -> Result<i32> {
            Err(Error::internal("boom"))
        }
        assert!(err_fn().is_err());
    }
}
