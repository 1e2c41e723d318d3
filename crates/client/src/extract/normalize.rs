//! Raw field map to canonical record.
//!
//! Reserved labels go to their dedicated record fields; every other label is
//! kept verbatim in `additional`. The serialized track list is parsed back
//! into timed entries, silently dropping entries that do not match.

use std::sync::LazyLock;

use dlsenc_core::labels::{ALBUM_TITLE, BRAND, CAST, MAIN_IMAGE, TRACK_LIST};
use dlsenc_core::{CanonicalRecord, RawFieldMap, Track};
use regex::Regex;

/// `<title> (<minutes>:<seconds>)`; the title is a single run of non-space characters.
static TRACK_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\t\n\x0C\r ]+) \(([0-9]+):([0-9]+)\)").expect("invalid regex"));

/// Map a raw field map onto the canonical record schema.
pub fn normalize(fields: RawFieldMap) -> CanonicalRecord {
    let mut record = CanonicalRecord::default();

    for (label, value) in fields {
        match label.as_str() {
            ALBUM_TITLE => record.album_title = value,
            CAST => record.actor = value,
            BRAND => record.brand = value,
            MAIN_IMAGE => record.main_image = value,
            TRACK_LIST => record.track_list = parse_track_list(&value),
            _ => {
                record.additional.insert(label, value);
            }
        }
    }

    record
}

/// Parse every `"<title> (<m>:<s>)"` entry in `text`, in order.
pub fn parse_track_list(text: &str) -> Vec<Track> {
    TRACK_ENTRY
        .captures_iter(text)
        .filter_map(|caps| Track::from_minutes_seconds(&caps[1], &caps[2], &caps[3]))
        .collect()
}
