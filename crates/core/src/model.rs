//! Canonical record model.
//!
//! A [`CanonicalRecord`] is built once per item by the extraction core and
//! handed to storage, naming and encoding. Its serialized form is the JSON
//! written next to the run logs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label -> text mapping produced by a page extractor.
pub type RawFieldMap = BTreeMap<String, String>;

/// A single timed track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Track title
    pub track_title: String,
    /// Duration rendered as `<minutes>分<seconds>秒`
    pub track_duration: String,
}

impl Track {
    /// Build a track from raw minute and second digits.
    ///
    /// Minutes and seconds are folded through a total-seconds value, so the
    /// seconds part does not need to be below 60 (`1:75` becomes `2分15秒`).
    /// Returns `None` when the digits do not fit in a `u64`.
    pub fn from_minutes_seconds(title: &str, minutes: &str, seconds: &str) -> Option<Self> {
        let minutes: u64 = minutes.parse().ok()?;
        let seconds: u64 = seconds.parse().ok()?;
        let total = minutes.checked_mul(60)?.checked_add(seconds)?;
        Some(Self::from_seconds(title, total))
    }

    /// Build a track from a total duration in seconds.
    pub fn from_seconds(title: &str, total: u64) -> Self {
        Self { track_title: title.to_string(), track_duration: format!("{}分{}秒", total / 60, total % 60) }
    }

    /// Total duration in seconds, read back from `track_duration`.
    pub fn seconds(&self) -> Option<u64> {
        let rest = self.track_duration.strip_suffix('秒')?;
        let (minutes, seconds) = rest.split_once('分')?;
        let minutes: u64 = minutes.parse().ok()?;
        let seconds: u64 = seconds.parse().ok()?;
        minutes.checked_mul(60)?.checked_add(seconds)
    }
}

/// Layout-independent record for one item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub album_title: String,
    /// Cast names, possibly several joined by `・`
    pub actor: String,
    pub brand: String,
    /// Cover image reference; replaced by a local path when the image is resolved on disk
    pub main_image: String,
    pub track_list: Vec<Track>,
    /// Every extracted label that has no dedicated field
    pub additional: BTreeMap<String, String>,
}

impl CanonicalRecord {
    /// Individual cast names.
    ///
    /// Splits on the separators seen in cast credits (`,` `・` `／` `/` `、` `，`)
    /// and drops empty parts.
    pub fn actors(&self) -> Vec<String> {
        self.actor
            .split([',', '・', '／', '/', '、', '，'])
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

/// Serialize tracks back into the `"<title> (<m>:<ss>)"` list form.
///
/// Tracks whose duration cannot be read back are left out.
pub fn render_track_list(tracks: &[Track]) -> String {
    tracks
        .iter()
        .filter_map(|track| {
            let total = track.seconds()?;
            Some(format!("{} ({}:{:02})", track.track_title, total / 60, total % 60))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minutes_seconds_plain() {
        let track = Track::from_minutes_seconds("トラック1", "3", "45").unwrap();
        assert_eq!(track.track_title, "トラック1");
        assert_eq!(track.track_duration, "3分45秒");
    }

    #[test]
    fn test_from_minutes_seconds_carries_seconds() {
        let track = Track::from_minutes_seconds("t", "1", "75").unwrap();
        assert_eq!(track.track_duration, "2分15秒");
    }

    #[test]
    fn test_from_minutes_seconds_leading_zeros() {
        let track = Track::from_minutes_seconds("t", "01", "00").unwrap();
        assert_eq!(track.track_duration, "1分0秒");
    }

    #[test]
    fn test_from_minutes_seconds_overflow() {
        assert!(Track::from_minutes_seconds("t", "99999999999999999999999", "0").is_none());
    }

    #[test]
    fn test_seconds_read_back() {
        let track = Track::from_seconds("t", 3725);
        assert_eq!(track.track_duration, "62分5秒");
        assert_eq!(track.seconds(), Some(3725));
    }

    #[test]
    fn test_seconds_unreadable() {
        let track = Track { track_title: "t".into(), track_duration: "3:45".into() };
        assert_eq!(track.seconds(), None);
    }

    #[test]
    fn test_render_track_list() {
        let tracks = vec![Track::from_seconds("トラック1", 60), Track::from_seconds("トラック2", 125)];
        assert_eq!(render_track_list(&tracks), "トラック1 (1:00), トラック2 (2:05)");
    }

    #[test]
    fn test_render_track_list_skips_unreadable() {
        let tracks = vec![
            Track { track_title: "bad".into(), track_duration: "?".into() },
            Track::from_seconds("good", 5),
        ];
        assert_eq!(render_track_list(&tracks), "good (0:05)");
    }

    #[test]
    fn test_actors_split() {
        let record = CanonicalRecord { actor: "柚木つばめ・涼花みなせ, 伊ヶ崎綾香／ ".into(), ..Default::default() };
        assert_eq!(record.actors(), vec!["柚木つばめ", "涼花みなせ", "伊ヶ崎綾香"]);
    }

    #[test]
    fn test_actors_empty() {
        assert!(CanonicalRecord::default().actors().is_empty());
    }

    #[test]
    fn test_record_json_keys() {
        let record = CanonicalRecord {
            album_title: "a".into(),
            track_list: vec![Track::from_seconds("t", 61)],
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["album_title"], "a");
        assert_eq!(value["track_list"][0]["track_title"], "t");
        assert_eq!(value["track_list"][0]["track_duration"], "1分1秒");
        assert!(value["additional"].as_object().unwrap().is_empty());
    }
}
