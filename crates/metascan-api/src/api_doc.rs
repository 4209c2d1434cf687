//! OpenAPI documentation, served at `/api-docs/openapi.json`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use metascan_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MetaScan API",
        version = "0.1.0",
        description = "Forensic metadata reports for uploaded images: embedded EXIF/GPS/XMP metadata, file hashes and a downloadable PDF report."
    ),
    paths(
        handlers::upload::upload_file,
        handlers::download::download_report,
        handlers::health::health_check,
    ),
    components(schemas(
        models::UploadResponse,
        models::FileDetails,
        models::FileHashes,
        models::CaseDetails,
        error::ErrorResponse,
        handlers::health::HealthCheckResponse,
    )),
    tags(
        (name = "reports", description = "Upload files and download their reports"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
