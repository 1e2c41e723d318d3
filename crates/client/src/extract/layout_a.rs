//! RJ-style product pages.
//!
//! Title in `h1#work_name`, brand under `span[itemprop=brand].maker_name`,
//! metadata in the `#work_outline` table and a `.work_parts.type_tracklist`
//! block listing timed tracks.

use dlsenc_core::RawFieldMap;
use dlsenc_core::labels::{ALBUM_TITLE, BRAND, DEFAULT_SEPARATOR, TRACK_LIST, TRACK_LIST_HEADING};

use super::cascade::{Cascade, non_blank};
use super::document::{Document, select_text, selector};
use super::outline::collect_outline;
use super::{Extractor, LayoutKind, insert_field};

/// Extractor for RJ-style pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct RjExtractor;

impl Extractor for RjExtractor {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Rj
    }

    fn read(&self, doc: &Document) -> RawFieldMap {
        let mut fields = RawFieldMap::new();

        insert_field(&mut fields, ALBUM_TITLE, Cascade::new().attempt(|| Some(doc.text("h1#work_name"))).resolve());
        insert_field(
            &mut fields,
            BRAND,
            Cascade::new()
                .attempt(|| Some(doc.text("span[itemprop='brand'].maker_name a")))
                .resolve(),
        );

        collect_outline(doc, &mut fields);
        collect_track_list(doc, &mut fields);

        fields
    }
}

/// Read the track list block into a heading and a `"<title> (<time>), ..."` string.
fn collect_track_list(doc: &Document, fields: &mut RawFieldMap) {
    let item_selector = selector(".work_tracklist_item");

    for block in doc.select(".work_parts.type_tracklist") {
        insert_field(fields, TRACK_LIST_HEADING, non_blank(select_text(block, ".work_parts_heading")));

        let entries: Vec<String> = block
            .select(&item_selector)
            .filter_map(|item| {
                let title = non_blank(select_text(item, ".title"))?;
                let time = non_blank(select_text(item, ".time"))?;
                Some(format!("{title} ({time})"))
            })
            .collect();

        if !entries.is_empty() {
            fields.insert(TRACK_LIST.to_string(), entries.join(DEFAULT_SEPARATOR));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlsenc_core::labels::CAST;

    const RJ_PAGE: &str = r#"
<!DOCTYPE html>
<html>
<head>
    <title>テスト作品</title>
</head>
<body>
    <h1 id="work_name">テストアルバム</h1>
    <div>
        <span itemprop="brand" class="maker_name"><a> テストブランド </a></span>
    </div>
    <table id="work_outline">
        <tr>
            <th>声優</th>
            <td><a>テスト声優A</a>, <a>テスト声優B</a></td>
        </tr>
        <tr>
            <th>ジャンル</th>
            <td><div>テストジャンル1</div><div>テストジャンル2</div></td>
        </tr>
    </table>
    <div class="work_parts type_tracklist">
        <div class="work_parts_heading">【トラックリスト】</div>
        <div class="work_tracklist">
            <div class="work_tracklist_item">
                <p class="title">トラック1</p>
                <p class="time">3:45</p>
            </div>
            <div class="work_tracklist_item">
                <p class="title">トラック2</p>
                <p class="time">4:20</p>
            </div>
            <div class="work_tracklist_item">
                <p class="title">タイトルのみ</p>
            </div>
        </div>
    </div>
</body>
</html>"#;

    fn field<'a>(fields: &'a RawFieldMap, label: &str) -> Option<&'a str> {
        fields.get(label).map(String::as_str)
    }

    #[test]
    fn test_rj_fields() {
        let fields = RjExtractor.extract(RJ_PAGE).unwrap();

        assert_eq!(field(&fields, ALBUM_TITLE), Some("テストアルバム"));
        assert_eq!(field(&fields, BRAND), Some("テストブランド"));
        assert_eq!(field(&fields, CAST), Some("テスト声優A・テスト声優B"));
        assert_eq!(field(&fields, "ジャンル"), Some("テストジャンル1, テストジャンル2"));
        assert_eq!(field(&fields, TRACK_LIST_HEADING), Some("【トラックリスト】"));
        assert_eq!(field(&fields, TRACK_LIST), Some("トラック1 (3:45), トラック2 (4:20)"));
    }

    #[test]
    fn test_rj_list_markup_tracks() {
        let html = r#"
            <div class="work_parts type_tracklist">
                <h3 class="work_parts_heading">収録内容</h3>
                <ul class="work_tracklist">
                    <li class="work_tracklist_item"><div class="title">トラック1</div><div class="time">01:00</div></li>
                    <li class="work_tracklist_item"><div class="title">トラック2</div><div class="time">02:00</div></li>
                    <li class="work_tracklist_item"><div class="title">トラック3</div><div class="time">03:00</div></li>
                </ul>
            </div>"#;
        let fields = RjExtractor.extract(html).unwrap();
        assert_eq!(field(&fields, TRACK_LIST), Some("トラック1 (01:00), トラック2 (02:00), トラック3 (03:00)"));
        assert_eq!(field(&fields, TRACK_LIST_HEADING), Some("収録内容"));
    }

    #[test]
    fn test_rj_missing_structure_degrades() {
        let fields = RjExtractor.extract("<html><body><p>nothing here</p></body></html>").unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_rj_outline_overrides_brand_anchor() {
        let html = r#"
            <span itemprop="brand" class="maker_name"><a>アンカー</a></span>
            <table id="work_outline"><tr><th>サークル名</th><td><a>表のサークル</a></td></tr></table>"#;
        let fields = RjExtractor.extract(html).unwrap();
        assert_eq!(field(&fields, BRAND), Some("表のサークル"));
    }

    #[test]
    fn test_rj_blank_input_is_parse_failure() {
        assert!(RjExtractor.extract("   ").is_err());
    }
}
