pub mod report;

pub use report::{
    CaseDetails, FileDetails, FileHashes, MetadataGroups, RawMetadataRecord, ReportRecord,
    UploadResponse,
};
