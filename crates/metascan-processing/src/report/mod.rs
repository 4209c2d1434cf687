//! Report building: assemble the record, render it to HTML, convert to PDF.

mod assemble;
mod pdf;
mod template;

pub use assemble::assemble;
pub use pdf::{PdfRenderer, RenderError, WkhtmltopdfRenderer};
pub use template::ReportTemplate;
