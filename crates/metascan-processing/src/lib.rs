//! MetaScan Processing Library
//!
//! Everything between a stored upload and a finished PDF: metadata extraction,
//! key normalization, GPS conversion, hashing, thumbnailing, report assembly and
//! rendering, and the pipeline that runs them in order.

pub mod extractor;
pub mod gps;
pub mod hash;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod thumbnail;

pub use extractor::{ExifToolExtractor, ExtractError, MetadataExtractor};
pub use hash::hash_file;
pub use normalize::normalize;
pub use pipeline::{sanitize_filename, GeneratedReport, ReportPipeline, UploadedFile};
pub use report::{assemble, PdfRenderer, RenderError, ReportTemplate, WkhtmltopdfRenderer};
pub use thumbnail::thumbnail_base64;
