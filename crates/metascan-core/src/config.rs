//! Configuration module
//!
//! Process-wide settings (folders, tool locations, timeouts, limits) loaded once
//! from the environment and passed explicitly to the pipeline and router.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const SERVER_PORT: u16 = 5000;
const EXTRACTION_TIMEOUT_SECS: u64 = 30;
const RENDER_TIMEOUT_SECS: u64 = 60;
const MAX_FILE_SIZE_MB: usize = 50;
const THUMBNAIL_MAX_DIMENSION: u32 = 400;

/// Log output format for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Scanner service configuration
#[derive(Clone, Debug)]
pub struct ScannerConfig {
    pub server_port: u16,
    pub environment: String,
    pub log_format: LogFormat,
    /// Transient staging area for uploads (emptied on start)
    pub upload_folder: PathBuf,
    /// Generated reports (emptied on start, kept for the run)
    pub download_folder: PathBuf,
    /// Branding shown in the report header
    pub tool_name: String,
    pub exiftool_path: String,
    pub wkhtmltopdf_path: String,
    pub extraction_timeout: Duration,
    pub render_timeout: Duration,
    pub max_file_size_bytes: usize,
    pub thumbnail_max_dimension: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            log_format: LogFormat::Pretty,
            upload_folder: PathBuf::from("uploads"),
            download_folder: PathBuf::from("downloads"),
            tool_name: "MetaScanX".to_string(),
            exiftool_path: "exiftool".to_string(),
            wkhtmltopdf_path: "wkhtmltopdf".to_string(),
            extraction_timeout: Duration::from_secs(EXTRACTION_TIMEOUT_SECS),
            render_timeout: Duration::from_secs(RENDER_TIMEOUT_SECS),
            max_file_size_bytes: MAX_FILE_SIZE_MB * 1024 * 1024,
            thumbnail_max_dimension: THUMBNAIL_MAX_DIMENSION,
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ScannerConfig>);

impl Config {
    fn as_scanner(&self) -> &ScannerConfig {
        &self.0
    }

    pub fn new(config: ScannerConfig) -> Self {
        Config(Box::new(config))
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ScannerConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_scanner().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_scanner().server_port
    }

    pub fn environment(&self) -> &str {
        &self.as_scanner().environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.as_scanner().log_format
    }

    pub fn upload_folder(&self) -> &PathBuf {
        &self.as_scanner().upload_folder
    }

    pub fn download_folder(&self) -> &PathBuf {
        &self.as_scanner().download_folder
    }

    pub fn tool_name(&self) -> &str {
        &self.as_scanner().tool_name
    }

    pub fn exiftool_path(&self) -> &str {
        &self.as_scanner().exiftool_path
    }

    pub fn wkhtmltopdf_path(&self) -> &str {
        &self.as_scanner().wkhtmltopdf_path
    }

    pub fn extraction_timeout(&self) -> Duration {
        self.as_scanner().extraction_timeout
    }

    pub fn render_timeout(&self) -> Duration {
        self.as_scanner().render_timeout
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.as_scanner().max_file_size_bytes
    }

    pub fn thumbnail_max_dimension(&self) -> u32 {
        self.as_scanner().thumbnail_max_dimension
    }
}

impl ScannerConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let log_format = match env::var("LOG_FORMAT")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        Ok(ScannerConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            log_format,
            upload_folder: env::var("UPLOAD_FOLDER")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            download_folder: env::var("DOWNLOAD_FOLDER")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("downloads")),
            tool_name: env::var("TOOL_NAME").unwrap_or_else(|_| "MetaScanX".to_string()),
            exiftool_path: env::var("EXIFTOOL_PATH").unwrap_or_else(|_| "exiftool".to_string()),
            wkhtmltopdf_path: env::var("WKHTMLTOPDF_PATH")
                .unwrap_or_else(|_| "wkhtmltopdf".to_string()),
            extraction_timeout: Duration::from_secs(
                env::var("EXTRACTION_TIMEOUT_SECS")
                    .unwrap_or_else(|_| EXTRACTION_TIMEOUT_SECS.to_string())
                    .parse()
                    .unwrap_or(EXTRACTION_TIMEOUT_SECS),
            ),
            render_timeout: Duration::from_secs(
                env::var("RENDER_TIMEOUT_SECS")
                    .unwrap_or_else(|_| RENDER_TIMEOUT_SECS.to_string())
                    .parse()
                    .unwrap_or(RENDER_TIMEOUT_SECS),
            ),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            thumbnail_max_dimension: env::var("THUMBNAIL_MAX_DIMENSION")
                .unwrap_or_else(|_| THUMBNAIL_MAX_DIMENSION.to_string())
                .parse()
                .unwrap_or(THUMBNAIL_MAX_DIMENSION),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.extraction_timeout.is_zero() {
            return Err(anyhow::anyhow!("EXTRACTION_TIMEOUT_SECS cannot be 0"));
        }
        if self.render_timeout.is_zero() {
            return Err(anyhow::anyhow!("RENDER_TIMEOUT_SECS cannot be 0"));
        }
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB cannot be 0"));
        }
        if self.thumbnail_max_dimension == 0 {
            return Err(anyhow::anyhow!("THUMBNAIL_MAX_DIMENSION cannot be 0"));
        }
        if self.upload_folder == self.download_folder {
            return Err(anyhow::anyhow!(
                "UPLOAD_FOLDER and DOWNLOAD_FOLDER must be different directories \
                (both are emptied on startup)"
            ));
        }
        Ok(())
    }
}
