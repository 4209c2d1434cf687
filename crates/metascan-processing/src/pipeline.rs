//! Upload → report pipeline: stage → extract → normalize → hash → render → clean up.
//!
//! One call handles one upload. The staged copy of the upload never outlives the
//! call, whatever the outcome; only the finished PDF is kept, in the report area.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use metascan_core::constants::REPORT_SUFFIX;
use metascan_core::{AppError, CaseDetails, Config, ReportRecord};
use metascan_storage::{Storage, StorageAreas};
use uuid::Uuid;

use crate::extractor::MetadataExtractor;
use crate::gps;
use crate::hash::hash_file;
use crate::normalize::normalize;
use crate::report::{assemble, PdfRenderer, ReportTemplate};
use crate::thumbnail::thumbnail_base64;

/// Longest sanitized name in bytes; leaves room for the request prefix within
/// common filesystem name limits.
const MAX_FILENAME_BYTES: usize = 200;

/// Length of the request id fragment embedded in report names.
const REPORT_ID_LEN: usize = 8;

/// A file received from the client.
#[derive(Debug)]
pub struct UploadedFile {
    /// Name as sent by the client, unsanitized.
    pub filename: String,
    pub data: Vec<u8>,
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct GeneratedReport {
    pub report: ReportRecord,
    /// File name of the PDF inside the report area.
    pub pdf_report: String,
}

/// Reduce a client-supplied name to a safe flat file name.
///
/// Directory components are dropped (both `/` and `\`), and anything that is not
/// alphanumeric, `.`, `-` or `_` becomes `_`.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    if base.contains("..") {
        return "invalid_filename".to_string();
    }

    let mut sanitized = String::new();
    for c in base.chars() {
        let c = if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
            c
        } else {
            '_'
        };
        if sanitized.len() + c.len_utf8() > MAX_FILENAME_BYTES {
            break;
        }
        sanitized.push(c);
    }

    if sanitized.trim_matches(['.', '_']).is_empty() {
        "file".to_string()
    } else {
        sanitized
    }
}

/// `<stem>_<id>_report.pdf`
fn report_file_name(safe_filename: &str, request_id: &str) -> String {
    let stem = Path::new(safe_filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(safe_filename);
    let id = &request_id[..REPORT_ID_LEN.min(request_id.len())];
    format!("{}_{}{}", stem, id, REPORT_SUFFIX)
}

pub struct ReportPipeline {
    staging: Arc<dyn Storage>,
    reports: Arc<dyn Storage>,
    extractor: Arc<dyn MetadataExtractor>,
    renderer: Arc<dyn PdfRenderer>,
    template: ReportTemplate,
    tool_name: String,
    thumbnail_max_dimension: u32,
}

impl ReportPipeline {
    pub fn new(
        storage: &StorageAreas,
        extractor: Arc<dyn MetadataExtractor>,
        renderer: Arc<dyn PdfRenderer>,
        config: &Config,
    ) -> Result<Self, AppError> {
        Ok(Self {
            staging: storage.staging.clone(),
            reports: storage.reports.clone(),
            extractor,
            renderer,
            template: ReportTemplate::new()?,
            tool_name: config.tool_name().to_string(),
            thumbnail_max_dimension: config.thumbnail_max_dimension(),
        })
    }

    /// Produce the report for one upload.
    ///
    /// The staged upload is deleted before this returns, on success and on every
    /// error path.
    #[tracing::instrument(skip(self, upload, case), fields(filename = %upload.filename, size_bytes = upload.data.len()))]
    pub async fn run(
        &self,
        upload: UploadedFile,
        case: CaseDetails,
    ) -> Result<GeneratedReport, AppError> {
        if upload.filename.trim().is_empty() {
            return Err(AppError::NoFileSelected);
        }

        let start = Instant::now();
        let request_id = Uuid::new_v4().simple().to_string();
        let safe_filename = sanitize_filename(&upload.filename);
        let staged_key = format!("{}_{}", request_id, safe_filename);

        let staged_path = match self.staging.upload(&staged_key, upload.data).await {
            Ok(path) => path,
            Err(e) => {
                self.remove_staged(&staged_key).await;
                return Err(e.into());
            }
        };

        let result = self
            .build(&safe_filename, &request_id, staged_path, case)
            .await;

        self.remove_staged(&staged_key).await;

        match &result {
            Ok(generated) => tracing::info!(
                pdf_report = %generated.pdf_report,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Report generated"
            ),
            Err(e) => tracing::debug!(error = %e, "Report generation aborted"),
        }

        result
    }

    async fn remove_staged(&self, staged_key: &str) {
        if let Err(e) = self.staging.delete(staged_key).await {
            tracing::warn!(key = %staged_key, error = %e, "Failed to remove staged upload");
        }
    }

    async fn build(
        &self,
        safe_filename: &str,
        request_id: &str,
        staged_path: PathBuf,
        case: CaseDetails,
    ) -> Result<GeneratedReport, AppError> {
        let raw = self.extractor.extract(&staged_path).await?;
        tracing::debug!(extractor = self.extractor.name(), fields = raw.len(), "Metadata extracted");

        let groups = normalize(raw);
        let gps = gps::to_decimal(&groups);

        let hash_path = staged_path.clone();
        let hashes = tokio::task::spawn_blocking(move || hash_file(hash_path))
            .await
            .map_err(|e| AppError::Internal(format!("hash task failed: {}", e)))?
            .map_err(|e| AppError::HashFailure(e.to_string()))?;

        let max_dimension = self.thumbnail_max_dimension;
        let thumbnail =
            tokio::task::spawn_blocking(move || thumbnail_base64(&staged_path, max_dimension))
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Thumbnail task failed");
                    None
                });

        let report = assemble(
            safe_filename,
            groups,
            hashes,
            gps,
            case,
            thumbnail,
            &self.tool_name,
            Utc::now(),
        );

        let html = self.template.render(&report)?;

        let pdf_report = report_file_name(safe_filename, request_id);
        let output = self.reports.local_path(&pdf_report)?;
        self.renderer.render(&html, &output).await?;

        Ok(GeneratedReport { report, pdf_report })
    }
}
