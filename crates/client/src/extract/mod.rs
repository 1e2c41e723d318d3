//! Product page extraction.
//!
//! Turns a saved product page into a [`CanonicalRecord`].
//!
//! ### Dispatch
//! - Items whose identifier starts with `d_` use the D-style layout, all
//!   others the RJ-style layout. See [`LayoutKind::for_identifier`].
//!
//! ### Extraction
//! - Each layout is an [`Extractor`] producing a label -> text map.
//! - Fields with fallbacks resolve through a [`Cascade`]; a field that no
//!   attempt finds is simply absent.
//!
//! ### Normalization
//! - Reserved labels map to record fields, the track list string is parsed
//!   into timed tracks, everything else is kept in `additional`.
//!
//! Nothing here performs I/O or logs. The only error is a page that cannot be
//! parsed at all.

pub mod cascade;
pub mod document;
pub mod layout_a;
pub mod layout_b;
pub mod normalize;
mod outline;

pub use cascade::Cascade;
pub use document::Document;
pub use layout_a::RjExtractor;
pub use layout_b::DExtractor;
pub use normalize::{normalize, parse_track_list};

use dlsenc_core::labels::LAYOUT_B_PREFIX;
use dlsenc_core::{CanonicalRecord, Error, RawFieldMap};

/// Page layout convention of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// RJ-style pages (layout A).
    Rj,
    /// D-style pages (layout B).
    D,
}

impl LayoutKind {
    /// Pick the layout from the item identifier.
    pub fn for_identifier(identifier: &str) -> Self {
        if identifier.starts_with(LAYOUT_B_PREFIX) { LayoutKind::D } else { LayoutKind::Rj }
    }

    /// Extractor for this layout.
    pub fn extractor(self) -> &'static dyn Extractor {
        match self {
            LayoutKind::Rj => &RjExtractor,
            LayoutKind::D => &DExtractor,
        }
    }
}

/// A page layout that can be read into a raw field map.
pub trait Extractor: Send + Sync {
    /// Layout handled by this extractor.
    fn kind(&self) -> LayoutKind;

    /// Read fields from an already parsed page.
    fn read(&self, doc: &Document) -> RawFieldMap;

    /// Parse `html` and read its fields.
    fn extract(&self, html: &str) -> Result<RawFieldMap, Error> {
        let doc = Document::parse(html)?;
        Ok(self.read(&doc))
    }
}

/// Extract the canonical record of the item `identifier` from its page text.
pub fn extract_record(html: &str, identifier: &str) -> Result<CanonicalRecord, Error> {
    let fields = LayoutKind::for_identifier(identifier).extractor().extract(html)?;
    Ok(normalize(fields))
}

/// Store `value` under `label` when a value was found.
pub(crate) fn insert_field(fields: &mut RawFieldMap, label: &str, value: Option<String>) {
    if let Some(value) = value {
        fields.insert(label.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlsenc_core::Track;

    const RJ_PAGE: &str = r#"
<!DOCTYPE html>
<html>
<head><title>テスト作品</title></head>
<body>
    <h1 id="work_name">テストアルバム</h1>
    <div><span itemprop="brand" class="maker_name"><a>テストブランド</a></span></div>
    <table id="work_outline">
        <tr><th>声優</th><td><a>テスト声優</a></td></tr>
        <tr><th>販売日</th><td><a>2024年05月01日</a></td></tr>
    </table>
    <div class="work_parts type_tracklist">
        <h3 class="work_parts_heading">収録内容</h3>
        <div class="work_parts_area">
            <ul class="work_tracklist">
                <li class="work_tracklist_item"><div class="title">トラック1</div><div class="time">01:00</div></li>
                <li class="work_tracklist_item"><div class="title">トラック2</div><div class="time">02:00</div></li>
                <li class="work_tracklist_item"><div class="title">トラック3</div><div class="time">03:00</div></li>
            </ul>
        </div>
    </div>
    <div class="work_main_image"><img src="test.jpg" alt="メイン画像"></div>
</body>
</html>"#;

    #[test]
    fn test_layout_for_identifier() {
        assert_eq!(LayoutKind::for_identifier("d_123456"), LayoutKind::D);
        assert_eq!(LayoutKind::for_identifier("d_"), LayoutKind::D);
        assert_eq!(LayoutKind::for_identifier("RJ01234567"), LayoutKind::Rj);
        assert_eq!(LayoutKind::for_identifier("dd_123"), LayoutKind::Rj);
        assert_eq!(LayoutKind::for_identifier("D_123"), LayoutKind::Rj);
        assert_eq!(LayoutKind::for_identifier(""), LayoutKind::Rj);
    }

    #[test]
    fn test_layout_for_identifier_is_stable() {
        for id in ["d_000001", "RJ000001", "test"] {
            let first = LayoutKind::for_identifier(id);
            assert!((0..5).all(|_| LayoutKind::for_identifier(id) == first));
        }
    }

    #[test]
    fn test_extractor_matches_kind() {
        assert_eq!(LayoutKind::Rj.extractor().kind(), LayoutKind::Rj);
        assert_eq!(LayoutKind::D.extractor().kind(), LayoutKind::D);
    }

    #[test]
    fn test_extract_record_rj() {
        let record = extract_record(RJ_PAGE, "test").unwrap();

        assert_eq!(record.album_title, "テストアルバム");
        assert_eq!(record.brand, "テストブランド");
        assert_eq!(record.actor, "テスト声優");
        assert_eq!(record.main_image, "");
        assert_eq!(
            record.track_list,
            vec![
                Track::from_seconds("トラック1", 60),
                Track::from_seconds("トラック2", 120),
                Track::from_seconds("トラック3", 180),
            ]
        );
        assert_eq!(record.track_list[0].track_duration, "1分0秒");
        assert_eq!(record.additional.get("販売日").map(String::as_str), Some("2024年05月01日"));
        assert_eq!(record.additional.get("収録内容").map(String::as_str), Some("収録内容"));
    }

    #[test]
    fn test_extract_record_dispatches_to_d() {
        // An RJ-style page read as D-style only yields the outline table.
        let record = extract_record(RJ_PAGE, "d_123456").unwrap();
        assert_eq!(record.album_title, "");
        assert_eq!(record.actor, "テスト声優");
        assert!(record.track_list.is_empty());
        assert!(record.main_image.is_empty());
    }

    #[test]
    fn test_extract_record_prose() {
        let record = extract_record("This is not valid HTML", "RJ000001").unwrap();
        assert_eq!(record, CanonicalRecord::default());
    }

    #[test]
    fn test_extract_record_blank_is_parse_failure() {
        let result = extract_record("", "RJ000001");
        assert!(matches!(result, Err(Error::ParseFailed(_))));
    }
}
