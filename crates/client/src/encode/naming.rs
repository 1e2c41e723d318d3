//! Output directory naming.

use std::fs;
use std::path::{Path, PathBuf};

use dlsenc_core::config::SanitizeRules;
use dlsenc_core::labels::CAST_SEPARATOR;
use dlsenc_core::{AppConfig, CanonicalRecord, Error};

/// Characters of the album title kept in directory names.
pub const TITLE_MAX_CHARS: usize = 20;

/// Appended to truncated titles.
pub const TRUNCATION_MARK: &str = "(…略)";

/// Actors named in a directory before the rest collapse into `他`.
const MAX_DIR_ACTORS: usize = 2;

const OTHERS: &str = "他";

/// Shorten `title` to [`TITLE_MAX_CHARS`] characters, marking the cut.
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() <= TITLE_MAX_CHARS {
        return title.to_string();
    }
    let mut short: String = title.chars().take(TITLE_MAX_CHARS).collect();
    short.push_str(TRUNCATION_MARK);
    short
}

/// Apply the sanitisation rules to a directory name.
///
/// `any` rules replace every occurrence of the pattern. `end` rules treat the
/// key as a character set and replace each trailing character from that set
/// with the value.
pub fn sanitize(name: &str, rules: &SanitizeRules) -> String {
    let mut result = name.to_string();

    for (from, to) in &rules.any {
        if !from.is_empty() {
            result = result.replace(from.as_str(), to);
        }
    }

    for (from, to) in &rules.end {
        let trimmed = result.trim_end_matches(|c: char| from.contains(c));
        let count = result[trimmed.len()..].chars().count();
        if count > 0 {
            result = format!("{trimmed}{}", to.repeat(count));
        }
    }

    result
}

/// Directory name for the record's cast: the first two actors joined by `・`,
/// followed by `他` when there are more.
pub fn actor_dir(record: &CanonicalRecord) -> String {
    let mut actors = record.actors();
    if actors.is_empty() {
        let trimmed = record.actor.trim();
        if !trimmed.is_empty() {
            actors.push(trimmed.to_string());
        }
    }
    if actors.len() > MAX_DIR_ACTORS {
        actors.truncate(MAX_DIR_ACTORS);
        actors.push(OTHERS.to_string());
    }
    actors.join(CAST_SEPARATOR)
}

/// Turn `name` into a single path component.
///
/// Separators become their full-width forms and a dot-only name has every dot
/// widened. The result never names the current or parent directory.
fn path_component(name: &str) -> String {
    let component = name.replace('/', "／").replace('\\', "＼");
    if !component.is_empty() && component.chars().all(|c| c == '.') {
        return "．".repeat(component.len());
    }
    component
}

/// Output directory of an item: `<mp3 root>/<actor>/<brand>/【<key>】<title>`.
pub fn output_dir(config: &AppConfig, key: &str, record: &CanonicalRecord) -> PathBuf {
    let rules = &config.setting.sanitize_rules;
    let title = sanitize(&truncate_title(&record.album_title), rules);

    config
        .mp3_output_root()
        .join(path_component(&sanitize(&actor_dir(record), rules)))
        .join(path_component(&sanitize(&record.brand, rules)))
        .join(path_component(&format!("【{key}】{title}")))
}

/// Remove the files in `dir` when it exists, otherwise create it with its
/// parents. Subdirectories are left alone.
pub fn prepare_output_dir(dir: &Path) -> Result<(), Error> {
    let fail = |e: std::io::Error| Error::OutputDirFailed(format!("{}: {e}", dir.display()));

    if !dir.exists() {
        return fs::create_dir_all(dir).map_err(fail);
    }

    for entry in fs::read_dir(dir).map_err(fail)? {
        let entry = entry.map_err(fail)?;
        if !entry.file_type().map_err(fail)?.is_dir() {
            fs::remove_file(entry.path()).map_err(fail)?;
        }
    }

    Ok(())
}
