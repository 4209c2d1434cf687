//! Flat extractor keys → grouped metadata.

use metascan_core::constants::FILE_GROUP;
use metascan_core::{MetadataGroups, RawMetadataRecord};

/// Rewrite a compound `Group:Field` key to `Group_Field`. Keys without a group
/// belong to the synthetic `File` group.
fn normalized_key(raw: &str) -> String {
    match raw.split_once(':') {
        Some((group, field)) => format!("{}_{}", group, field),
        None => format!("{}_{}", FILE_GROUP, raw),
    }
}

/// Group every entry of `raw` by the text before the first `_` of its normalized key.
///
/// Values pass through untouched. When two raw keys normalize to the same
/// group/field pair the later one wins.
pub fn normalize(raw: RawMetadataRecord) -> MetadataGroups {
    let mut groups = MetadataGroups::new();

    for (key, value) in raw {
        let key = normalized_key(&key);
        // Always present: normalized_key inserts one.
        let Some((group, field)) = key.split_once('_') else {
            continue;
        };
        groups
            .entry(group.to_string())
            .or_default()
            .insert(field.to_string(), value);
    }

    groups
}
