//! MetaScan Core Library
//!
//! This crate provides the report data model, error types and configuration
//! shared by the storage, processing and API crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, ScannerConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    CaseDetails, FileDetails, FileHashes, MetadataGroups, RawMetadataRecord, ReportRecord,
    UploadResponse,
};
