use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use metascan_core::{AppError, CaseDetails, UploadResponse};
use metascan_processing::UploadedFile;

use crate::error::{multipart_error, ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Fields of the upload form, as received.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    investigator_name: Option<String>,
    case_id: Option<String>,
    description: Option<String>,
}

/// Read the whole form. A `file` part with no file name counts as no file, which is
/// what browsers send when nothing was chosen.
async fn read_upload_form(
    mut multipart: Multipart,
    max_file_size: usize,
) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "file" => {
                if form.file.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(multipart_error)?;

                if filename.trim().is_empty() {
                    continue;
                }
                if data.len() > max_file_size {
                    return Err(AppError::PayloadTooLarge(format!(
                        "{} bytes exceeds max {} bytes",
                        data.len(),
                        max_file_size
                    )));
                }

                form.file = Some(UploadedFile {
                    filename,
                    data: data.to_vec(),
                });
            }
            "investigatorName" => {
                form.investigator_name = Some(field.text().await.map_err(multipart_error)?)
            }
            "caseId" => form.case_id = Some(field.text().await.map_err(multipart_error)?),
            "description" => {
                form.description = Some(field.text().await.map_err(multipart_error)?)
            }
            other => tracing::debug!(field = %other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}

/// Upload a file and generate its forensic report
///
/// Extracts embedded metadata, computes MD5/SHA-256, renders the PDF report into the
/// download area and returns the grouped metadata with the report's file name.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "reports",
    request_body(
        content = inline(Object),
        content_type = "multipart/form-data",
        description = "Fields: `file` (required), `investigatorName`, `caseId`, `description`"
    ),
    responses(
        (status = 200, description = "Report generated", body = UploadResponse),
        (status = 400, description = "No file selected or malformed form", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Extraction, hashing or rendering failed", body = ErrorResponse),
        (status = 504, description = "External tool timed out", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let form = read_upload_form(multipart?, state.config.max_file_size_bytes()).await?;

    let upload = form.file.ok_or(AppError::NoFileSelected)?;
    let case = CaseDetails::new(form.investigator_name, form.case_id, form.description);

    let generated = state.pipeline.run(upload, case).await?;

    Ok(Json(UploadResponse::new(
        generated.report,
        generated.pdf_report,
    )))
}
