use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use metascan_core::{AppError, Config};
use tokio::process::Command;

pub(crate) const RENDER_OPERATION: &str = "Report rendering";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("PDF converter not found: {0}")]
    ToolNotFound(String),

    #[error("PDF conversion failed: {0}")]
    ToolFailed(String),

    #[error("PDF converter produced no output")]
    NoOutput,

    #[error("PDF conversion timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("PDF conversion I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Timeout(after) => AppError::Timeout {
                operation: RENDER_OPERATION,
                after,
            },
            other => AppError::RenderFailure(other.to_string()),
        }
    }
}

/// Converts rendered report HTML into a PDF file.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    /// Write a PDF of `html` to `output`. On error no file is left at `output`.
    async fn render(&self, html: &str, output: &Path) -> Result<(), RenderError>;
}

/// HTML → PDF through the `wkhtmltopdf` binary.
#[derive(Debug, Clone)]
pub struct WkhtmltopdfRenderer {
    binary: String,
    timeout: Duration,
}

impl WkhtmltopdfRenderer {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.wkhtmltopdf_path(), config.render_timeout())
    }

    async fn convert(&self, input: &Path, output: &Path) -> Result<(), RenderError> {
        let child = Command::new(&self.binary)
            .args(["--quiet", "--encoding", "utf-8", "--page-size", "A4"])
            .arg(input)
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => RenderError::ToolNotFound(self.binary.clone()),
                _ => RenderError::Io(e),
            })?;

        let result = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| RenderError::Timeout(self.timeout))??;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(RenderError::ToolFailed(match stderr.trim() {
                "" => format!("wkhtmltopdf exited with {}", result.status),
                msg => msg.to_string(),
            }));
        }

        match tokio::fs::metadata(output).await {
            Ok(meta) if meta.len() > 0 => Ok(()),
            _ => Err(RenderError::NoOutput),
        }
    }
}

#[async_trait]
impl PdfRenderer for WkhtmltopdfRenderer {
    #[tracing::instrument(skip(self, html), fields(binary = %self.binary, html_bytes = html.len()))]
    async fn render(&self, html: &str, output: &Path) -> Result<(), RenderError> {
        let start = Instant::now();

        // wkhtmltopdf decides the input type from the extension.
        let input = tempfile::Builder::new()
            .prefix("metascan-report-")
            .suffix(".html")
            .tempfile()?;
        tokio::fs::write(input.path(), html).await?;

        match self.convert(input.path(), output).await {
            Ok(()) => {
                tracing::debug!(
                    output = %output.display(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "PDF rendered"
                );
                Ok(())
            }
            Err(e) => {
                remove_partial(output).await;
                tracing::warn!(error = %e, output = %output.display(), "PDF rendering failed");
                Err(e)
            }
        }
    }
}

async fn remove_partial(output: &Path) {
    if let Err(e) = tokio::fs::remove_file(output).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(output = %output.display(), error = %e, "Failed to remove partial PDF");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metascan_core::ErrorMetadata;

    #[test]
    fn test_timeout_maps_to_gateway_timeout() {
        let app: AppError = RenderError::Timeout(Duration::from_secs(60)).into();
        assert_eq!(app.http_status_code(), 504);
        assert_eq!(app.to_string(), "Report rendering timed out after 60s");
    }

    #[test]
    fn test_other_errors_are_render_failures() {
        let app: AppError = RenderError::NoOutput.into();
        assert!(matches!(app, AppError::RenderFailure(_)));
        assert_eq!(app.http_status_code(), 500);
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("r.pdf");
        let renderer = WkhtmltopdfRenderer::new("/nonexistent/wkhtmltopdf", Duration::from_secs(5));

        let err = renderer.render("<p>x</p>", &out).await.unwrap_err();
        assert!(matches!(err, RenderError::ToolNotFound(_)));
        assert!(!out.exists());
    }

    #[cfg(unix)]
    mod process {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        fn fake_tool(dir: &Path, body: &str) -> String {
            let path = dir.join("fake-wkhtmltopdf");
            std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path.to_string_lossy().into_owned()
        }

        // Arguments: --quiet --encoding utf-8 --page-size A4 <in> <out>
        #[tokio::test]
        async fn test_successful_conversion() {
            let dir = tempfile::tempdir().unwrap();
            let bin = fake_tool(dir.path(), r#"cp "$6" "$7""#);
            let out = dir.path().join("r.pdf");

            WkhtmltopdfRenderer::new(bin, Duration::from_secs(10))
                .render("<p>hello</p>", &out)
                .await
                .unwrap();

            assert_eq!(std::fs::read_to_string(&out).unwrap(), "<p>hello</p>");
        }

        #[tokio::test]
        async fn test_failure_removes_partial_output() {
            let dir = tempfile::tempdir().unwrap();
            let bin = fake_tool(dir.path(), "echo partial > \"$7\"\necho 'render error' >&2\nexit 2");
            let out = dir.path().join("r.pdf");

            let err = WkhtmltopdfRenderer::new(bin, Duration::from_secs(10))
                .render("<p>x</p>", &out)
                .await
                .unwrap_err();

            assert!(matches!(err, RenderError::ToolFailed(ref m) if m.contains("render error")));
            assert!(!out.exists());
        }

        #[tokio::test]
        async fn test_missing_output() {
            let dir = tempfile::tempdir().unwrap();
            let bin = fake_tool(dir.path(), "exit 0");
            let out = dir.path().join("r.pdf");

            let err = WkhtmltopdfRenderer::new(bin, Duration::from_secs(10))
                .render("<p>x</p>", &out)
                .await
                .unwrap_err();
            assert!(matches!(err, RenderError::NoOutput));
        }

        #[tokio::test]
        async fn test_timeout_removes_partial_output() {
            let dir = tempfile::tempdir().unwrap();
            let bin = fake_tool(dir.path(), "echo partial > \"$7\"\nsleep 10");
            let out = dir.path().join("r.pdf");

            let err = WkhtmltopdfRenderer::new(bin, Duration::from_millis(300))
                .render("<p>x</p>", &out)
                .await
                .unwrap_err();
            assert!(matches!(err, RenderError::Timeout(_)));
            assert!(!out.exists());
        }
    }
}
