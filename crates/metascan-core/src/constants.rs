//! Literal values that appear in reports and API responses.

/// Sentinel returned by the GPS normalizer when no usable coordinate exists.
pub const GPS_NOT_AVAILABLE: &str = "Not Available";

/// Placeholder for summary and case fields that were not supplied.
pub const NOT_APPLICABLE: &str = "N/A";

/// Synthetic group for extractor keys that carry no `group:` prefix.
pub const FILE_GROUP: &str = "File";

/// Group holding the digests computed by the hasher.
pub const HASH_GROUP: &str = "Hash";

/// Group holding the synthetic `Coordinates` field.
pub const GPS_GROUP: &str = "GPS";

/// Suffix appended to the upload's base name to build the PDF file name.
pub const REPORT_SUFFIX: &str = "_report.pdf";
