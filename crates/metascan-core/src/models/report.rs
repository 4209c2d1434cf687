//! Report data model: what the extractor returns, what the assembler builds,
//! and what the upload endpoint sends back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::constants::NOT_APPLICABLE;

/// Flat `group:field` → value mapping exactly as the extractor produced it.
pub type RawMetadataRecord = serde_json::Map<String, Value>;

/// Group name → field name → value.
pub type MetadataGroups = BTreeMap<String, BTreeMap<String, Value>>;

/// Content digests of the uploaded bytes, lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileHashes {
    #[serde(rename = "MD5")]
    pub md5: String,
    #[serde(rename = "SHA256")]
    pub sha256: String,
}

/// Free-text case fields supplied with the upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CaseDetails {
    pub investigator_name: String,
    pub case_id: String,
    pub description: String,
}

impl CaseDetails {
    /// Missing or blank values become `"N/A"`.
    pub fn new(
        investigator_name: Option<String>,
        case_id: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            investigator_name: or_not_applicable(investigator_name),
            case_id: or_not_applicable(case_id),
            description: or_not_applicable(description),
        }
    }
}

impl Default for CaseDetails {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

fn or_not_applicable(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => NOT_APPLICABLE.to_string(),
    }
}

/// Flattened summary shown at the top of the report and in the web UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FileDetails {
    #[serde(rename = "File Name")]
    pub file_name: String,
    #[serde(rename = "File Size")]
    #[schema(value_type = Object)]
    pub file_size: Value,
    #[serde(rename = "File Type")]
    #[schema(value_type = Object)]
    pub file_type: Value,
    #[serde(rename = "MIME Type")]
    #[schema(value_type = Object)]
    pub mime_type: Value,
    #[serde(rename = "MD5")]
    pub md5: String,
    #[serde(rename = "SHA256")]
    pub sha256: String,
    #[serde(rename = "GPS Coordinates")]
    pub gps_coordinates: String,
}

/// Everything the renderer needs. Built once by the assembler, never mutated.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportRecord {
    pub filename: String,
    #[schema(value_type = Object)]
    pub metadata_groups: MetadataGroups,
    pub file_details: FileDetails,
    pub hashes: FileHashes,
    pub gps_coordinates: String,
    /// Base64 JPEG
    pub thumbnail: Option<String>,
    pub case: CaseDetails,
    pub tool_name: String,
    pub report_date: String,
}

/// Successful `POST /upload` body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub thumbnail: Option<String>,
    pub pdf_report: String,
    #[schema(value_type = Object)]
    pub metadata_groups: MetadataGroups,
    pub file_details: FileDetails,
}

impl UploadResponse {
    pub fn new(report: ReportRecord, pdf_report: String) -> Self {
        Self {
            success: true,
            filename: report.filename,
            thumbnail: report.thumbnail,
            pdf_report,
            metadata_groups: report.metadata_groups,
            file_details: report.file_details,
        }
    }
}
