use std::fs;
use std::path::{Path, PathBuf};

use dlsenc_core::Error;
use walkdir::WalkDir;

/// Locate the saved cover image of `key` under `image_dir`.
///
/// The search root is the last subdirectory (in name order) whose name
/// contains `key`. Below it, files named `*<key>_img_main*` are candidates:
/// a `.webp` is returned as soon as it is seen, otherwise the first `.jpg`.
pub fn find_main_image(image_dir: &Path, key: &str) -> Result<Option<PathBuf>, Error> {
    let Some(search_dir) = search_dir(image_dir, key)? else {
        return Ok(None);
    };

    let needle = format!("{key}_img_main");
    let mut jpg = None;

    for entry in WalkDir::new(&search_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::ImageLookupFailed(format!("{}: {e}", search_dir.display())))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !name.contains(&needle) {
            continue;
        }

        let lower = name.to_lowercase();
        if lower.ends_with(".webp") {
            return Ok(Some(entry.into_path()));
        }
        if lower.ends_with(".jpg") && jpg.is_none() {
            jpg = Some(entry.into_path());
        }
    }

    Ok(jpg)
}

fn search_dir(image_dir: &Path, key: &str) -> Result<Option<PathBuf>, Error> {
    let entries = fs::read_dir(image_dir)
        .map_err(|e| Error::ImageLookupFailed(format!("{}: {e}", image_dir.display())))?;

    let mut matches: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter(|entry| entry.file_name().to_string_lossy().contains(key))
        .map(|entry| entry.path())
        .collect();

    matches.sort();
    Ok(matches.pop())
}
