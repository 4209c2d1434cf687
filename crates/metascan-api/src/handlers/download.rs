use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response, StatusCode},
    response::IntoResponse,
};
use futures::StreamExt;
use metascan_core::AppError;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use std::sync::Arc;

/// Report names are flat file names; anything that could address another directory
/// is rejected before storage is touched.
fn is_valid_report_name(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.contains("..")
        && !filename.contains(['/', '\\', '\0'])
}

/// `attachment` disposition with an ASCII fallback name and the exact UTF-8 name.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        utf8_percent_encode(filename, NON_ALPHANUMERIC)
    )
}

/// Download a generated PDF report
#[utoipa::path(
    get,
    path = "/download/{filename}",
    tag = "reports",
    params(
        ("filename" = String, Path, description = "Report file name returned by /upload as `pdf_report`")
    ),
    responses(
        (status = 200, description = "PDF report", content_type = "application/pdf"),
        (status = 400, description = "Invalid file name", body = ErrorResponse),
        (status = 404, description = "Report not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "download_report"))]
pub async fn download_report(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    if !is_valid_report_name(&filename) {
        return Err(AppError::InvalidInput("Invalid report file name".to_string()).into());
    }

    let reports = &state.storage.reports;
    let content_length = reports.content_length(&filename).await?;
    let stream = reports.download_stream(&filename).await?;

    tracing::debug!(filename = %filename, size_bytes = content_length, "Serving report");

    // Wrap storage stream for axum Body
    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(header::CONTENT_LENGTH, content_length)
        .header(header::CONTENT_DISPOSITION, content_disposition(&filename))
        .body(Body::from_stream(body_stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
