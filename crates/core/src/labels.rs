//! Field labels and separators shared by the page extractors.
//!
//! Labels are the literal texts the product pages use, so they stay in the
//! pages' own language. Any label not listed here is carried verbatim into
//! [`CanonicalRecord::additional`](crate::model::CanonicalRecord::additional).

/// Album title.
pub const ALBUM_TITLE: &str = "アルバムタイトル";

/// Brand (circle) name.
pub const BRAND: &str = "サークル名";

/// Voice cast credit.
pub const CAST: &str = "声優";

/// Serialized track list, `"<title> (<m>:<ss>), ..."`.
pub const TRACK_LIST: &str = "トラックリスト";

/// Cover image reference.
pub const MAIN_IMAGE: &str = "メイン画像";

/// Heading of the track list block. Not reserved, lands in `additional`.
pub const TRACK_LIST_HEADING: &str = "収録内容";

/// Joins multiple cast names.
pub const CAST_SEPARATOR: &str = "・";

/// Joins multiple values for every label other than [`CAST`].
pub const DEFAULT_SEPARATOR: &str = ", ";

/// Identifier prefix of items whose pages follow the D-style layout.
pub const LAYOUT_B_PREFIX: &str = "d_";

/// Marker that must appear in a D-style `<title>` before it is mined for fields.
pub const MARKETING_MARKER: &str = "同人";

/// Full-width pipe separating the product part of a D-style `<title>`.
pub const TITLE_PIPE: char = '｜';

/// Separator used when joining several values found under `label`.
pub fn separator_for(label: &str) -> &'static str {
    if label == CAST { CAST_SEPARATOR } else { DEFAULT_SEPARATOR }
}

/// Whether `label` is routed to a dedicated record field instead of `additional`.
pub fn is_reserved(label: &str) -> bool {
    matches!(label, ALBUM_TITLE | BRAND | CAST | TRACK_LIST | MAIN_IMAGE)
}
