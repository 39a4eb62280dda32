use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// All errors produced by the traffic report pipeline.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A textual traffic quantity could not be decoded into a byte count.
    #[error("Malformed traffic quantity {quantity:?}: {reason}")]
    MalformedQuantity {
        quantity: String,
        reason: String,
    },

    /// A leaderboard entry's user id has no matching identity row.
    #[error("No identity found for user {0}")]
    IdentityNotFound(i64),

    /// An accounting window whose start does not precede its end.
    #[error("Invalid accounting window: start {start} does not precede end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The relational store failed while fetching rows or identities.
    #[error("Database error: {0}")]
    Database(#[source] anyhow::Error),

    /// The report sink failed to deliver the rendered report.
    #[error("Report delivery failed: {0}")]
    Delivery(#[source] anyhow::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the report crates.
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_error_display_malformed_quantity() {
        let err = ReportError::MalformedQuantity {
            quantity: "X".to_string(),
            reason: "quantity too short".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Malformed traffic quantity"));
        assert!(msg.contains("\"X\""));
        assert!(msg.contains("quantity too short"));
    }

    #[test]
    fn test_error_display_identity_not_found() {
        let err = ReportError::IdentityNotFound(42);
        assert_eq!(err.to_string(), "No identity found for user 42");
    }

    #[test]
    fn test_error_display_invalid_window() {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let err = ReportError::InvalidWindow { start, end };
        let msg = err.to_string();
        assert!(msg.contains("Invalid accounting window"));
        assert!(msg.contains("2024-01-02"));
        assert!(msg.contains("2024-01-01"));
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ReportError::FileRead {
            path: PathBuf::from("/etc/traffic-report.toml"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/etc/traffic-report.toml"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_config() {
        let err = ReportError::Config("missing database url".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing database url");
    }

    #[test]
    fn test_error_display_database() {
        let err = ReportError::Database(anyhow::anyhow!("connection refused"));
        let msg = err.to_string();
        assert!(msg.contains("Database error"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_error_display_delivery() {
        let err = ReportError::Delivery(anyhow::anyhow!("telegram returned 403"));
        let msg = err.to_string();
        assert!(msg.contains("Report delivery failed"));
        assert!(msg.contains("403"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ReportError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: ReportError = anyhow::anyhow!("opaque failure").into();
        assert!(err.to_string().contains("opaque failure"));
    }
}
