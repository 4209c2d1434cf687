use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use metascan_core::{Config, RawMetadataRecord};
use serde_json::Value;
use tokio::process::Command;

use super::{ExtractError, MetadataExtractor};

/// Runs `exiftool -json -G <file>` and returns the first (only) JSON object.
#[derive(Debug, Clone)]
pub struct ExifToolExtractor {
    binary: String,
    timeout: Duration,
}

impl ExifToolExtractor {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.exiftool_path(), config.extraction_timeout())
    }
}

#[async_trait]
impl MetadataExtractor for ExifToolExtractor {
    #[tracing::instrument(skip(self), fields(binary = %self.binary))]
    async fn extract(&self, path: &Path) -> Result<RawMetadataRecord, ExtractError> {
        let start = Instant::now();

        let child = Command::new(&self.binary)
            .args(["-json", "-G"])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ExtractError::ToolNotFound,
                _ => ExtractError::Io(e),
            })?;

        // Dropping the future on timeout drops the child, which kills it.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "ExifTool did not finish in time, process killed"
                );
                ExtractError::Timeout(self.timeout)
            })??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = match stderr.trim() {
                "" => format!("exiftool exited with {}", output.status),
                msg => msg.to_string(),
            };
            return Err(ExtractError::ToolFailed(detail));
        }

        let record = parse_output(&output.stdout)?;

        tracing::debug!(
            fields = record.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Metadata extracted"
        );

        Ok(record)
    }

    fn name(&self) -> &'static str {
        "exiftool"
    }
}

/// ExifTool prints a JSON array with one object per input file.
fn parse_output(stdout: &[u8]) -> Result<RawMetadataRecord, ExtractError> {
    let parsed: Value =
        serde_json::from_slice(stdout).map_err(|e| ExtractError::Unparseable(e.to_string()))?;

    let first = match parsed {
        Value::Array(items) => items.into_iter().next(),
        _ => {
            return Err(ExtractError::Unparseable(
                "expected a JSON array".to_string(),
            ))
        }
    };

    match first {
        None => Err(ExtractError::Empty),
        Some(Value::Object(map)) if map.is_empty() => Err(ExtractError::Empty),
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(ExtractError::Unparseable(
            "expected a JSON object per file".to_string(),
        )),
    }
}
