//! Error types for growlog.
//!
//! This module defines all error types used throughout the growlog crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for growlog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Record Store Errors ===
    /// A stored value did not decode as the expected shape.
    #[error("stored value under '{key}' did not decode: {source}")]
    Decode {
        /// The logical key whose value was undecodable.
        key: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// Writing a value to durable storage failed.
    #[error("failed to persist '{key}': {source}")]
    Persist {
        /// The logical key that could not be written.
        key: String,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// An edit or delete target lies outside the current record list.
    #[error("index {index} out of range for list of {len} record(s)")]
    IndexOutOfRange {
        /// The requested zero-based index.
        index: usize,
        /// The current list length.
        len: usize,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for growlog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a decode error for the value stored under `key`.
    #[must_use]
    pub fn decode(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            key: key.into(),
            source,
        }
    }

    /// Create a persist error for the value stored under `key`.
    #[must_use]
    pub fn persist(key: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Persist {
            key: key.into(),
            source,
        }
    }

    /// Create an out-of-range error for `index` against a list of `len`.
    #[must_use]
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Check if this error is an out-of-range edit/delete target.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }

    /// Check if this error means a stored value failed to decode.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_range_display() {
        let err = Error::index_out_of_range(5, 3);
        assert_eq!(err.to_string(), "index 5 out of range for list of 3 record(s)");
    }

    #[test]
    fn test_is_out_of_range() {
        assert!(Error::index_out_of_range(0, 0).is_out_of_range());
        assert!(!Error::DatabaseMigration {
            message: "x".to_string()
        }
        .is_out_of_range());
    }

    #[test]
    fn test_decode_error_display() {
        let json_err = serde_json::from_str::<Vec<i32>>("not json").unwrap_err();
        let err = Error::decode("child_data", json_err);
        assert!(err.is_decode());
        let msg = err.to_string();
        assert!(msg.contains("child_data"));
        assert!(msg.contains("did not decode"));
    }

    #[test]
    fn test_persist_error_display() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err = Error::persist("child_data", sqlite_err);
            assert!(err.to_string().contains("failed to persist 'child_data'"));
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
