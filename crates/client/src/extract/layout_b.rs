//! D-style product pages.
//!
//! These pages are less regular than RJ-style ones, so most fields go through
//! a cascade:
//!
//! - title: `h1.productTitle__txt` without its campaign badge, then the
//!   `<title>` / `og:title` text (mined for cast and brand as well)
//! - brand: whatever the title text yielded, then `a.circleName__txt`
//! - cast: title text, the `声優` information list entry, then a `CV`/`声優`
//!   line in the summary blocks
//! - main image: the first `<img>` whose `src` mentions `main`, then `og:image`
//!
//! The outline table is read last and wins over the cascades for any label it
//! carries. Track lists are not read from this layout.

use std::sync::LazyLock;

use dlsenc_core::RawFieldMap;
use dlsenc_core::labels::{ALBUM_TITLE, BRAND, CAST, CAST_SEPARATOR, MAIN_IMAGE, MARKETING_MARKER, TITLE_PIPE};
use regex::Regex;

use super::cascade::{Cascade, non_blank};
use super::document::{Document, element_text, select_text, selector};
use super::outline::collect_outline;
use super::{Extractor, LayoutKind, insert_field};

/// `【title】subtitle【cast】(brand)`
static TITLE_CAST_BRAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【([^】]+)】([^【]+)【([^】]+)】\(([^)]+)\)").expect("invalid regex"));

/// `title(brand)`
static TITLE_BRAND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(.+)\(([^)]+)\)").expect("invalid regex"));

/// Tokens marking a summary line as a cast credit.
const CAST_TOKENS: [&str; 2] = ["CV", CAST];

/// Extractor for D-style pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct DExtractor;

impl Extractor for DExtractor {
    fn kind(&self) -> LayoutKind {
        LayoutKind::D
    }

    fn read(&self, doc: &Document) -> RawFieldMap {
        let mut fields = RawFieldMap::new();

        let heading = non_blank(doc.text_without("h1.productTitle__txt", "span.productTitle__txt--campaign"));
        let parts = if heading.is_none() { title_tag_parts(doc) } else { TitleParts::default() };

        insert_field(&mut fields, ALBUM_TITLE, Cascade::new().candidate(heading).candidate(parts.title).resolve());
        insert_field(
            &mut fields,
            BRAND,
            Cascade::new()
                .candidate(parts.brand)
                .attempt(|| Some(doc.text("a.circleName__txt")))
                .resolve(),
        );
        insert_field(
            &mut fields,
            CAST,
            Cascade::new()
                .candidate(parts.cast)
                .attempt(|| cast_from_information_list(doc))
                .attempt(|| cast_from_summary(doc))
                .resolve(),
        );
        insert_field(
            &mut fields,
            MAIN_IMAGE,
            Cascade::new()
                .attempt(|| main_image_from_img(doc))
                .attempt(|| Some(doc.attr_or("meta[property='og:image']", "content", "")))
                .resolve(),
        );

        collect_outline(doc, &mut fields);

        fields
    }
}

/// Fields mined from the page `<title>`.
#[derive(Debug, Default, PartialEq, Eq)]
struct TitleParts {
    title: Option<String>,
    cast: Option<String>,
    brand: Option<String>,
}

/// Read the `<title>` (or `og:title`) and split it into fields.
///
/// Only titles carrying the marketing marker are used; anything after the
/// full-width pipe is site boilerplate.
fn title_tag_parts(doc: &Document) -> TitleParts {
    let title = Cascade::new()
        .attempt(|| Some(doc.first_text("title")))
        .attempt(|| Some(doc.attr_or("meta[property='og:title']", "content", "")))
        .resolve();

    match title {
        Some(title) if title.contains(MARKETING_MARKER) => {
            parse_title_segment(title.split(TITLE_PIPE).next().unwrap_or_default())
        }
        _ => TitleParts::default(),
    }
}

fn parse_title_segment(segment: &str) -> TitleParts {
    if let Some(caps) = TITLE_CAST_BRAND.captures(segment) {
        return TitleParts {
            title: non_blank(format!("{}{}", &caps[1], &caps[2])),
            cast: non_blank(&caps[3]),
            brand: non_blank(&caps[4]),
        };
    }

    if let Some(caps) = TITLE_BRAND.captures(segment) {
        return TitleParts { title: non_blank(&caps[1]), cast: None, brand: non_blank(&caps[2]) };
    }

    TitleParts { title: non_blank(segment), cast: None, brand: None }
}

/// Anchors of the information list entry labelled `声優`.
fn cast_from_information_list(doc: &Document) -> Option<String> {
    let name_selector = selector("dd.informationList__txt a");

    doc.select("div.productInformation__item dl.informationList")
        .into_iter()
        .filter(|entry| select_text(*entry, "dt.informationList__ttl") == CAST)
        .find_map(|entry| {
            let names: Vec<String> = entry
                .select(&name_selector)
                .map(element_text)
                .filter(|name| !name.is_empty())
                .collect();
            (!names.is_empty()).then(|| names.join(CAST_SEPARATOR))
        })
}

/// First cast credit line in the summary blocks.
///
/// The name is the first whitespace-delimited token after the first colon,
/// e.g. `シナリオ＆CV:柚木つばめ` -> `柚木つばめ`. Scanning stops at the first
/// credit line with a colon even when no name follows it.
fn cast_from_summary(doc: &Document) -> Option<String> {
    doc.select(".m-productSummary .summary")
        .into_iter()
        .find_map(|block| {
            let text: String = block.text().collect();
            text.lines()
                .map(str::trim)
                .find(|line| CAST_TOKENS.iter().any(|token| line.contains(token)) && line.contains(':'))
                .map(|line| {
                    let after_colon = line.split(':').nth(1).unwrap_or_default();
                    after_colon.split_whitespace().next().unwrap_or_default().to_string()
                })
        })
}

/// `src` of the first `<img>` pointing at a main image, with protocol-relative URLs made absolute.
fn main_image_from_img(doc: &Document) -> Option<String> {
    doc.select("img")
        .into_iter()
        .filter_map(|img| img.value().attr("src"))
        .find(|src| src.contains("main"))
        .map(|src| if src.starts_with("//") { format!("https:{src}") } else { src.to_string() })
}
