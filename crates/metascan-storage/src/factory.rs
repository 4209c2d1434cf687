use crate::{LocalStorage, Storage, StorageResult};
use metascan_core::Config;
use std::sync::Arc;

/// The two filesystem areas used by the service.
#[derive(Clone)]
pub struct StorageAreas {
    /// Uploads in flight; each file lives for one request.
    pub staging: Arc<dyn Storage>,
    /// Generated PDF reports, served by the download endpoint.
    pub reports: Arc<dyn Storage>,
}

/// Create both storage areas from configuration and empty them.
pub async fn create_storage_areas(config: &Config) -> StorageResult<StorageAreas> {
    let staging = LocalStorage::new(config.upload_folder().clone()).await?;
    let reports = LocalStorage::new(config.download_folder().clone()).await?;

    staging.purge().await?;
    reports.purge().await?;

    Ok(StorageAreas {
        staging: Arc::new(staging),
        reports: Arc::new(reports),
    })
}
