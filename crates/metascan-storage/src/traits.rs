//! Storage abstraction trait
//!
//! This module defines the Storage trait that every storage area implements.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use metascan_core::AppError;
use std::path::PathBuf;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(msg) => AppError::NotFound(msg),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::UploadFailed(msg)
            | StorageError::DownloadFailed(msg)
            | StorageError::DeleteFailed(msg) => AppError::Storage(msg),
            StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Chunked file contents, used for streaming downloads.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Storage abstraction trait
///
/// The metadata extractor and the PDF renderer are external programs that operate
/// on paths, so every area exposes [`Storage::local_path`] in addition to the
/// byte-level operations.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `storage_key`, replacing any previous file.
    /// Returns the filesystem path of the stored file.
    async fn upload(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<PathBuf>;

    /// Download a file as a stream of chunks
    async fn download_stream(&self, storage_key: &str) -> StorageResult<ByteStream>;

    /// Delete a file by its storage key. Deleting a missing file succeeds.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Size in bytes of a stored file
    async fn content_length(&self, storage_key: &str) -> StorageResult<u64>;

    /// Validated filesystem path for `storage_key`. The file need not exist yet.
    fn local_path(&self, storage_key: &str) -> StorageResult<PathBuf>;

    /// Remove every file in the area, leaving it empty.
    async fn purge(&self) -> StorageResult<()>;
}
