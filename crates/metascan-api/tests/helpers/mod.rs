//! Test helpers: build AppState and router for integration tests.
//!
//! The external tools are replaced by in-process fakes; both storage areas live in a
//! temp directory owned by the returned [`TestApp`].

pub mod fakes;

use axum_test::TestServer;
use metascan_api::setup::routes;
use metascan_api::state::AppState;
use metascan_core::{Config, ScannerConfig};
use metascan_processing::{MetadataExtractor, PdfRenderer};
use metascan_storage::{LocalStorage, StorageAreas};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Test application: server and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub upload_dir: PathBuf,
    pub download_dir: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn staged_files(&self) -> usize {
        count_files(&self.upload_dir)
    }

    pub fn report_files(&self) -> usize {
        count_files(&self.download_dir)
    }
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .expect("Failed to read storage directory")
        .count()
}

/// Setup test app with the given tools and default limits.
pub async fn setup_test_app(
    extractor: Arc<dyn MetadataExtractor>,
    renderer: Arc<dyn PdfRenderer>,
) -> TestApp {
    setup_test_app_with(extractor, renderer, |_| {}).await
}

/// Setup test app, letting the caller adjust configuration first.
pub async fn setup_test_app_with(
    extractor: Arc<dyn MetadataExtractor>,
    renderer: Arc<dyn PdfRenderer>,
    configure: impl FnOnce(&mut ScannerConfig),
) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let upload_dir = temp_dir.path().join("uploads");
    let download_dir = temp_dir.path().join("downloads");

    let mut scanner = ScannerConfig {
        upload_folder: upload_dir.clone(),
        download_folder: download_dir.clone(),
        ..ScannerConfig::default()
    };
    configure(&mut scanner);
    let config = Config::new(scanner);

    let storage = StorageAreas {
        staging: Arc::new(
            LocalStorage::new(&upload_dir)
                .await
                .expect("Failed to create staging storage"),
        ),
        reports: Arc::new(
            LocalStorage::new(&download_dir)
                .await
                .expect("Failed to create report storage"),
        ),
    };

    let state = AppState::new(config.clone(), storage, extractor, renderer)
        .expect("Failed to build app state");
    let router = routes::setup_routes(&config, state);
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        upload_dir,
        download_dir,
        _temp_dir: temp_dir,
    }
}
