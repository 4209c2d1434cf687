use chrono::{DateTime, Utc};
use metascan_core::constants::{FILE_GROUP, GPS_GROUP, HASH_GROUP, NOT_APPLICABLE};
use metascan_core::{CaseDetails, FileDetails, FileHashes, MetadataGroups, ReportRecord};
use serde_json::Value;

const REPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Build the final report record.
///
/// The computed GPS string and digests are written into the groups as
/// `GPS.Coordinates`, `Hash.MD5` and `Hash.SHA256`, replacing any extractor field
/// of the same name.
#[allow(clippy::too_many_arguments)]
pub fn assemble(
    filename: &str,
    mut groups: MetadataGroups,
    hashes: FileHashes,
    gps: String,
    case: CaseDetails,
    thumbnail: Option<String>,
    tool_name: &str,
    generated_at: DateTime<Utc>,
) -> ReportRecord {
    groups
        .entry(GPS_GROUP.to_string())
        .or_default()
        .insert("Coordinates".to_string(), Value::String(gps.clone()));

    let hash_group = groups.entry(HASH_GROUP.to_string()).or_default();
    hash_group.insert("MD5".to_string(), Value::String(hashes.md5.clone()));
    hash_group.insert("SHA256".to_string(), Value::String(hashes.sha256.clone()));

    let file_field = |field: &str| {
        groups
            .get(FILE_GROUP)
            .and_then(|fields| fields.get(field))
            .cloned()
            .unwrap_or_else(|| Value::String(NOT_APPLICABLE.to_string()))
    };

    let file_details = FileDetails {
        file_name: filename.to_string(),
        file_size: file_field("FileSize"),
        file_type: file_field("FileType"),
        mime_type: file_field("MIMEType"),
        md5: hashes.md5.clone(),
        sha256: hashes.sha256.clone(),
        gps_coordinates: gps.clone(),
    };

    ReportRecord {
        filename: filename.to_string(),
        metadata_groups: groups,
        file_details,
        hashes,
        gps_coordinates: gps,
        thumbnail,
        case,
        tool_name: tool_name.to_string(),
        report_date: generated_at.format(REPORT_DATE_FORMAT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn hashes() -> FileHashes {
        FileHashes {
            md5: "m".repeat(32),
            sha256: "s".repeat(64),
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn test_computed_values_win() {
        let mut groups = MetadataGroups::new();
        let mut hash = BTreeMap::new();
        hash.insert("MD5".to_string(), json!("from-extractor"));
        hash.insert("SHA256".to_string(), json!("from-extractor"));
        groups.insert("Hash".to_string(), hash);
        let mut gps = BTreeMap::new();
        gps.insert("Coordinates".to_string(), json!("stale"));
        gps.insert("GPSAltitude".to_string(), json!("12 m"));
        groups.insert("GPS".to_string(), gps);

        let report = assemble(
            "a.jpg",
            groups,
            hashes(),
            "1.000000, 2.000000".to_string(),
            CaseDetails::default(),
            None,
            "MetaScanX",
            at(),
        );

        let g = &report.metadata_groups;
        assert_eq!(g["Hash"]["MD5"], json!("m".repeat(32)));
        assert_eq!(g["Hash"]["SHA256"], json!("s".repeat(64)));
        assert_eq!(g["GPS"]["Coordinates"], json!("1.000000, 2.000000"));
        assert_eq!(g["GPS"]["GPSAltitude"], json!("12 m"));

        let details = &report.file_details;
        assert_eq!(details.md5, "m".repeat(32));
        assert_eq!(details.sha256, "s".repeat(64));
        assert_eq!(details.gps_coordinates, "1.000000, 2.000000");
    }

    #[test]
    fn test_file_details_from_file_group() {
        let mut groups = MetadataGroups::new();
        let mut file = BTreeMap::new();
        file.insert("FileSize".to_string(), json!("2.1 MB"));
        file.insert("FileType".to_string(), json!("JPEG"));
        groups.insert("File".to_string(), file);

        let report = assemble(
            "photo.jpg",
            groups,
            hashes(),
            "Not Available".to_string(),
            CaseDetails::new(Some("Jo".into()), Some("C-1".into()), None),
            Some("dGh1bWI=".to_string()),
            "MetaScanX",
            at(),
        );

        let details = &report.file_details;
        assert_eq!(details.file_name, "photo.jpg");
        assert_eq!(details.file_size, json!("2.1 MB"));
        assert_eq!(details.file_type, json!("JPEG"));
        assert_eq!(details.mime_type, json!("N/A"));
        assert_eq!(details.md5, "m".repeat(32));
        assert_eq!(details.gps_coordinates, "Not Available");

        assert_eq!(report.report_date, "2024-03-09 14:05:07");
        assert_eq!(report.case.description, "N/A");
        assert_eq!(report.thumbnail.as_deref(), Some("dGh1bWI="));
    }

    #[test]
    fn test_empty_groups_still_get_computed_groups() {
        let report = assemble(
            "x.bin",
            MetadataGroups::new(),
            hashes(),
            "Not Available".to_string(),
            CaseDetails::default(),
            None,
            "MetaScanX",
            at(),
        );

        let names: Vec<_> = report.metadata_groups.keys().cloned().collect();
        assert_eq!(names, vec!["GPS", "Hash"]);
        assert_eq!(report.file_details.file_size, json!("N/A"));
    }
}
