//! GPS coordinate conversion.
//!
//! The extractor reports positions as sexagesimal strings such as
//! `40 deg 26' 46.00"` with a separate hemisphere reference tag. The report wants a
//! single `"<lat>, <lon>"` pair in signed decimal degrees. Conversion is fail-soft:
//! anything unusable yields [`GPS_NOT_AVAILABLE`] and never aborts a report.

use metascan_core::constants::GPS_NOT_AVAILABLE;
use metascan_core::MetadataGroups;
use serde_json::Value;

/// Groups searched for GPS tags, in order. `-G` output files them under `EXIF`,
/// `-G1` output under `GPS`.
const GPS_SOURCE_GROUPS: [&str; 2] = ["EXIF", "GPS"];

#[derive(Clone, Copy)]
enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn negative_refs(self) -> [&'static str; 2] {
        match self {
            Axis::Latitude => ["S", "SOUTH"],
            Axis::Longitude => ["W", "WEST"],
        }
    }
}

/// Convert the GPS fields in `groups` to `"<lat>, <lon>"` with six decimals.
pub fn to_decimal(groups: &MetadataGroups) -> String {
    let lat = lookup(groups, "GPSLatitude");
    let lon = lookup(groups, "GPSLongitude");

    let (Some(lat), Some(lon)) = (lat, lon) else {
        return GPS_NOT_AVAILABLE.to_string();
    };

    let lat_ref = lookup(groups, "GPSLatitudeRef")
        .and_then(Value::as_str)
        .unwrap_or("N");
    let lon_ref = lookup(groups, "GPSLongitudeRef")
        .and_then(Value::as_str)
        .unwrap_or("E");

    match (
        coordinate(lat, lat_ref, Axis::Latitude),
        coordinate(lon, lon_ref, Axis::Longitude),
    ) {
        (Some(lat), Some(lon)) => format!("{:.6}, {:.6}", lat, lon),
        _ => GPS_NOT_AVAILABLE.to_string(),
    }
}

/// First non-empty value for `field` across the GPS source groups.
fn lookup<'a>(groups: &'a MetadataGroups, field: &str) -> Option<&'a Value> {
    GPS_SOURCE_GROUPS
        .iter()
        .filter_map(|group| groups.get(*group)?.get(field))
        .find(|value| !is_empty(value))
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn coordinate(value: &Value, reference: &str, axis: Axis) -> Option<f64> {
    let magnitude = match value {
        Value::String(s) => parse_sexagesimal(s)?,
        // Numeric mode (`exiftool -n`) already reports decimal degrees.
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite())?,
        _ => return None,
    };

    let reference = reference.trim().to_ascii_uppercase();
    let signed = if axis.negative_refs().contains(&reference.as_str()) {
        -magnitude
    } else {
        magnitude
    };

    // Normalize -0.0 so a zero coordinate never prints as "-0.000000".
    Some(signed + 0.0)
}

/// Parse `D deg M' S"` into decimal degrees.
///
/// The three markers must appear in that order with exactly one number before each;
/// whitespace around tokens is free. Anything after the seconds marker is rejected.
pub fn parse_sexagesimal(input: &str) -> Option<f64> {
    let (degrees, rest) = input.split_once("deg")?;
    let (minutes, rest) = rest.split_once('\'')?;
    let (seconds, tail) = rest.split_once('"')?;

    if !tail.trim().is_empty() {
        return None;
    }

    let degrees = number(degrees)?;
    let minutes = number(minutes)?;
    let seconds = number(seconds)?;

    Some(degrees + minutes / 60.0 + seconds / 3600.0)
}

fn number(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}
