//! Metadata extraction capability.
//!
//! The pipeline only sees [`MetadataExtractor`]; the production implementation shells
//! out to ExifTool, tests inject in-process fakes.

mod exiftool;

pub use exiftool::ExifToolExtractor;

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use metascan_core::{AppError, RawMetadataRecord};

pub(crate) const EXTRACTION_OPERATION: &str = "Metadata extraction";

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("ExifTool not found.")]
    ToolNotFound,

    #[error("Metadata extraction failed: {0}")]
    Unparseable(String),

    #[error("Metadata extraction failed: {0}")]
    ToolFailed(String),

    #[error("No metadata found in file.")]
    Empty,

    #[error("Metadata extraction timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Metadata extraction failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::ToolNotFound => AppError::ExtractorNotFound(err.to_string()),
            ExtractError::Empty => AppError::ExtractorEmptyResult(err.to_string()),
            ExtractError::Timeout(after) => AppError::Timeout {
                operation: EXTRACTION_OPERATION,
                after,
            },
            ExtractError::Unparseable(_) | ExtractError::ToolFailed(_) | ExtractError::Io(_) => {
                AppError::ExtractorParseFailure(err.to_string())
            }
        }
    }
}

/// Reads embedded metadata from a stored file.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    /// Flat `Group:Field` record for the file at `path`. Never empty on success.
    async fn extract(&self, path: &Path) -> Result<RawMetadataRecord, ExtractError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use metascan_core::ErrorMetadata;

    #[test]
    fn test_not_found_maps_verbatim() {
        let app: AppError = ExtractError::ToolNotFound.into();
        assert!(matches!(app, AppError::ExtractorNotFound(_)));
        assert_eq!(app.client_message(), "ExifTool not found.");
    }

    #[test]
    fn test_parse_and_tool_failures_share_category() {
        let app: AppError = ExtractError::Unparseable("expected value".into()).into();
        assert_eq!(app.client_message(), "Metadata extraction failed: expected value");

        let app: AppError = ExtractError::ToolFailed("exit status 1".into()).into();
        assert!(matches!(app, AppError::ExtractorParseFailure(_)));
    }

    #[test]
    fn test_empty_maps_verbatim() {
        let app: AppError = ExtractError::Empty.into();
        assert!(matches!(app, AppError::ExtractorEmptyResult(_)));
        assert_eq!(app.client_message(), "No metadata found in file.");
    }

    #[test]
    fn test_timeout_is_gateway_timeout() {
        let app: AppError = ExtractError::Timeout(Duration::from_secs(30)).into();
        assert_eq!(app.http_status_code(), 504);
        assert_eq!(app.client_message(), "Metadata extraction timed out after 30s");
    }
}
