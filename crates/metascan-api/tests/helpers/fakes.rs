use async_trait::async_trait;
use metascan_core::RawMetadataRecord;
use metascan_processing::{ExtractError, MetadataExtractor, PdfRenderer, RenderError};
use serde_json::json;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const FAKE_PDF: &[u8] = b"%PDF-1.4\n% metascan test report\n%%EOF\n";

/// Returns the same record for every file.
pub struct StaticExtractor(pub RawMetadataRecord);

#[async_trait]
impl MetadataExtractor for StaticExtractor {
    async fn extract(&self, _path: &Path) -> Result<RawMetadataRecord, ExtractError> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Behaves like a host without ExifTool installed.
pub struct MissingExtractor;

#[async_trait]
impl MetadataExtractor for MissingExtractor {
    async fn extract(&self, _path: &Path) -> Result<RawMetadataRecord, ExtractError> {
        Err(ExtractError::ToolNotFound)
    }

    fn name(&self) -> &'static str {
        "missing"
    }
}

/// Writes a fixed PDF body.
pub struct FakePdfRenderer;

#[async_trait]
impl PdfRenderer for FakePdfRenderer {
    async fn render(&self, _html: &str, output: &Path) -> Result<(), RenderError> {
        tokio::fs::write(output, FAKE_PDF).await?;
        Ok(())
    }
}

/// Writes the fixed PDF body and keeps every HTML document it was given.
#[derive(Default)]
pub struct CapturingRenderer {
    html: Mutex<Vec<String>>,
}

impl CapturingRenderer {
    pub fn last_html(&self) -> Option<String> {
        self.html.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl PdfRenderer for CapturingRenderer {
    async fn render(&self, html: &str, output: &Path) -> Result<(), RenderError> {
        self.html.lock().unwrap().push(html.to_string());
        tokio::fs::write(output, FAKE_PDF).await?;
        Ok(())
    }
}

/// Metadata of a camera JPEG taken in Pittsburgh.
pub fn camera_record() -> RawMetadataRecord {
    match json!({
        "SourceFile": "/tmp/upload.jpg",
        "ExifToolVersion": 12.76,
        "File:FileSize": "3 bytes",
        "File:FileType": "JPEG",
        "File:MIMEType": "image/jpeg",
        "EXIF:Make": "Canon",
        "EXIF:Model": "Canon EOS 5D",
        "EXIF:GPSLatitude": "40 deg 26' 46.00\"",
        "EXIF:GPSLatitudeRef": "North",
        "EXIF:GPSLongitude": "79 deg 58' 56.00\"",
        "EXIF:GPSLongitudeRef": "West"
    }) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!("fixture is an object"),
    }
}

pub fn camera_extractor() -> Arc<dyn MetadataExtractor> {
    Arc::new(StaticExtractor(camera_record()))
}

pub fn fake_renderer() -> Arc<dyn PdfRenderer> {
    Arc::new(FakePdfRenderer)
}
