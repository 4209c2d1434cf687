//! Error types module
//!
//! All request-level failures are unified under the `AppError` enum. Each variant
//! describes its own HTTP presentation through [`ErrorMetadata`], so the API layer
//! only has to wrap and render it.

use std::io;
use std::time::Duration;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like a missing upload field
    Debug,
    /// Warning level - for problems with the uploaded content or a slow tool
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "EXTRACTOR_NOT_FOUND")
    fn error_code(&self) -> &'static str;

    /// Client-facing message
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No file selected.")]
    NoFileSelected,

    /// The extraction tool could not be spawned. The payload is the reason shown to the client.
    #[error("{0}")]
    ExtractorNotFound(String),

    #[error("{0}")]
    ExtractorParseFailure(String),

    #[error("{0}")]
    ExtractorEmptyResult(String),

    #[error("Hash calculation failed: {0}")]
    HashFailure(String),

    #[error("Report rendering failed: {0}")]
    RenderFailure(String),

    #[error("{operation} timed out after {}s", .after.as_secs())]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(format!("{:#}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::NoFileSelected => (400, "NO_FILE_SELECTED", LogLevel::Debug),
        AppError::ExtractorNotFound(_) => (500, "EXTRACTOR_NOT_FOUND", LogLevel::Error),
        AppError::ExtractorParseFailure(_) => (500, "EXTRACTOR_PARSE_FAILURE", LogLevel::Warn),
        AppError::ExtractorEmptyResult(_) => (500, "EXTRACTOR_EMPTY_RESULT", LogLevel::Warn),
        AppError::HashFailure(_) => (500, "HASH_FAILURE", LogLevel::Error),
        AppError::RenderFailure(_) => (500, "RENDER_FAILURE", LogLevel::Error),
        AppError::Timeout { .. } => (504, "TIMEOUT", LogLevel::Warn),
        AppError::NotFound(_) => (404, "NOT_FOUND", LogLevel::Debug),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", LogLevel::Debug),
        AppError::PayloadTooLarge(_) => (413, "PAYLOAD_TOO_LARGE", LogLevel::Debug),
        AppError::Storage(_) => (500, "STORAGE_ERROR", LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn client_message(&self) -> String {
        match self {
            // Storage and internal details can carry filesystem paths.
            AppError::Storage(_) => "Failed to store the uploaded file".to_string(),
            AppError::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }
}

impl AppError {
    /// Variant name, used as a structured logging field.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::NoFileSelected => "NoFileSelected",
            AppError::ExtractorNotFound(_) => "ExtractorNotFound",
            AppError::ExtractorParseFailure(_) => "ExtractorParseFailure",
            AppError::ExtractorEmptyResult(_) => "ExtractorEmptyResult",
            AppError::HashFailure(_) => "HashFailure",
            AppError::RenderFailure(_) => "RenderFailure",
            AppError::Timeout { .. } => "Timeout",
            AppError::NotFound(_) => "NotFound",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Storage(_) => "Storage",
            AppError::Internal(_) => "Internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractor_reasons_are_verbatim() {
        let err = AppError::ExtractorNotFound("ExifTool not found.".to_string());
        assert_eq!(err.client_message(), "ExifTool not found.");
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "EXTRACTOR_NOT_FOUND");
    }

    #[test]
    fn test_no_file_selected_is_bad_request() {
        let err = AppError::NoFileSelected;
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.client_message(), "No file selected.");
    }

    #[test]
    fn test_timeout_message() {
        let err = AppError::Timeout {
            operation: "Metadata extraction",
            after: Duration::from_secs(30),
        };
        assert_eq!(err.to_string(), "Metadata extraction timed out after 30s");
        assert_eq!(err.http_status_code(), 504);
    }

    #[test]
    fn test_internal_details_hidden_from_client() {
        let err = AppError::Internal("/srv/uploads/abc: permission denied".to_string());
        assert!(!err.client_message().contains("/srv"));
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::Other, "disk gone");
        match AppError::from(io_err) {
            AppError::Internal(msg) => assert!(msg.contains("disk gone")),
            other => panic!("Expected Internal variant, got {:?}", other),
        }
    }
}
