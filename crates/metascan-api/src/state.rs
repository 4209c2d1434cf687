//! Application state shared by every handler.

use metascan_core::{AppError, Config};
use metascan_processing::{MetadataExtractor, PdfRenderer, ReportPipeline};
use metascan_storage::StorageAreas;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub storage: StorageAreas,
    pub pipeline: ReportPipeline,
}

impl AppState {
    /// Wire the pipeline to the storage areas and the two external tools.
    pub fn new(
        config: Config,
        storage: StorageAreas,
        extractor: Arc<dyn MetadataExtractor>,
        renderer: Arc<dyn PdfRenderer>,
    ) -> Result<Arc<Self>, AppError> {
        let pipeline = ReportPipeline::new(&storage, extractor, renderer, &config)?;

        Ok(Arc::new(Self {
            config,
            storage,
            pipeline,
        }))
    }
}
