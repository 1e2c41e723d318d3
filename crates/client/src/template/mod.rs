//! Product page templates.
//!
//! Generates minimal RJ-style or D-style pages for items that have no saved
//! store page, so the regular extraction path can read them. The interactive
//! [`run_wizard`] collects the values and writes the page into the HTML
//! directory.

mod wizard;

use std::collections::BTreeMap;

use dlsenc_core::Error;

use crate::extract::LayoutKind;

pub use wizard::run_wizard;

/// Errors raised while generating a page.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Reading answers or writing the page failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// No file name was entered.
    #[error("no file name given")]
    MissingName,

    /// The user declined to overwrite an existing page.
    #[error("not overwriting existing file: {0}")]
    Declined(String),
}

impl From<TemplateError> for Error {
    fn from(err: TemplateError) -> Self {
        Error::TemplateFailed(err.to_string())
    }
}

/// A track row of an RJ-style page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateTrack {
    pub title: String,
    /// Duration as typed, e.g. `4:30`
    pub duration: String,
}

/// Values rendered into a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateData {
    pub album_title: String,
    pub brand_name: String,
    /// Outline table rows, label -> value
    pub details: BTreeMap<String, String>,
    /// Only rendered for RJ-style pages
    pub tracks: Vec<TemplateTrack>,
    pub layout: LayoutKind,
}

/// Render `data` as a page in its layout's markup.
pub fn render_html(data: &TemplateData) -> String {
    let title = escape(&data.album_title);
    let brand = escape(&data.brand_name);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n");
    html.push_str(&format!("    <title>{title}</title>\n"));
    html.push_str("</head>\n<body>\n");

    match data.layout {
        LayoutKind::Rj => {
            html.push_str(&format!("    <h1 id=\"work_name\">{title}</h1>\n"));
            html.push_str("    <div class=\"maker_name\">\n");
            html.push_str(&format!(
                "        <span itemprop=\"brand\" class=\"maker_name\"><a href=\"#\">{brand}</a></span>\n"
            ));
            html.push_str("    </div>\n");
        }
        LayoutKind::D => {
            html.push_str(&format!("    <h1 class=\"productTitle__txt\">{title}</h1>\n"));
            html.push_str(&format!("    <a class=\"circleName__txt\">{brand}</a>\n"));
        }
    }

    html.push_str("    <table id=\"work_outline\">\n");
    for (label, value) in &data.details {
        html.push_str("        <tr>\n");
        html.push_str(&format!("            <th>{}</th>\n", escape(label)));
        html.push_str(&format!("            <td>{}</td>\n", escape(value)));
        html.push_str("        </tr>\n");
    }
    html.push_str("    </table>\n");

    if data.layout == LayoutKind::Rj {
        html.push_str("    <div class=\"work_parts type_tracklist\">\n");
        html.push_str("        <div class=\"work_parts_heading\">【収録内容】</div>\n");
        for track in &data.tracks {
            html.push_str("        <div class=\"work_tracklist_item\">\n");
            html.push_str(&format!("            <span class=\"title\">{}</span>\n", escape(&track.title)));
            html.push_str(&format!("            <span class=\"time\">{}</span>\n", escape(&track.duration)));
            html.push_str("        </div>\n");
        }
        html.push_str("    </div>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_record;
    use dlsenc_core::Track;

    fn data(layout: LayoutKind) -> TemplateData {
        TemplateData {
            album_title: "テストアルバム".into(),
            brand_name: "テストサークル".into(),
            details: BTreeMap::from([
                ("声優".to_string(), "声優A".to_string()),
                ("販売日".to_string(), "2024年01月01日".to_string()),
            ]),
            tracks: vec![
                TemplateTrack { title: "トラック1".into(), duration: "4:30".into() },
                TemplateTrack { title: "トラック2".into(), duration: "1:05".into() },
            ],
            layout,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;");
        assert_eq!(escape("そのまま"), "そのまま");
    }

    #[test]
    fn test_rj_page_reads_back() {
        let html = render_html(&data(LayoutKind::Rj));
        let record = extract_record(&html, "RJ000001").unwrap();

        assert_eq!(record.album_title, "テストアルバム");
        assert_eq!(record.brand, "テストサークル");
        assert_eq!(record.actor, "声優A");
        assert_eq!(record.track_list, vec![Track::from_seconds("トラック1", 270), Track::from_seconds("トラック2", 65)]);
        assert_eq!(record.additional.get("販売日").map(String::as_str), Some("2024年01月01日"));
        assert_eq!(record.additional.get("収録内容").map(String::as_str), Some("【収録内容】"));
    }

    #[test]
    fn test_d_page_reads_back_without_tracks() {
        let html = render_html(&data(LayoutKind::D));
        assert!(!html.contains("work_tracklist_item"));

        let record = extract_record(&html, "d_000001").unwrap();
        assert_eq!(record.album_title, "テストアルバム");
        assert_eq!(record.brand, "テストサークル");
        assert_eq!(record.actor, "声優A");
        assert!(record.track_list.is_empty());
    }

    #[test]
    fn test_render_html_line_layout() {
        let html = render_html(&data(LayoutKind::D));

        assert!(html.starts_with("<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n"));
        assert!(html.contains("    <title>テストアルバム</title>\n</head>\n<body>\n"));
        assert!(html.contains("    <a class=\"circleName__txt\">テストサークル</a>\n    <table id=\"work_outline\">\n"));
        assert!(html.contains("        <tr>\n            <th>声優</th>\n            <td>声優A</td>\n        </tr>\n"));
        assert!(html.ends_with("    </table>\n</body>\n</html>\n"));
    }

    #[test]
    fn test_values_are_escaped() {
        let mut data = data(LayoutKind::Rj);
        data.album_title = "<script>x</script> & co".into();
        let html = render_html(&data);
        assert!(!html.contains("<script>"));

        let record = extract_record(&html, "RJ000001").unwrap();
        assert_eq!(record.album_title, "<script>x</script> & co");
    }

    #[test]
    fn test_template_error_conversion() {
        let err: Error = TemplateError::MissingName.into();
        assert!(matches!(err, Error::TemplateFailed(_)));
    }
}
