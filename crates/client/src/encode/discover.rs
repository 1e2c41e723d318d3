//! Audio source discovery.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dlsenc_core::Error;
use walkdir::WalkDir;

/// Rank of a supported audio extension; higher wins for files sharing a base name.
fn priority(path: &Path) -> Option<u8> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "wav" => Some(3),
        "flac" => Some(2),
        "mp3" => Some(1),
        _ => None,
    }
}

/// Audio files below `dir`, one per base name, sorted by base name.
///
/// When several files share a base name (extension stripped) the WAV is
/// kept over the FLAC, and the FLAC over the MP3. Files whose path contains
/// any of `exclude` are skipped.
pub fn find_audio_files(dir: &Path, exclude: &[String]) -> Result<Vec<PathBuf>, Error> {
    let mut best: BTreeMap<String, (u8, PathBuf)> = BTreeMap::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::ReadFailed(format!("{}: {e}", dir.display())))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let path_text = path.to_string_lossy();
        if let Some(excl) = exclude.iter().find(|excl| path_text.contains(excl.as_str())) {
            tracing::debug!(path = %path.display(), exclude = %excl, "skipping excluded audio file");
            continue;
        }

        let Some(rank) = priority(path) else { continue };
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else { continue };

        if let Some((current, previous)) = best.get(&stem) {
            if *current >= rank {
                tracing::trace!(kept = %previous.display(), skipped = %path.display(), "lower priority duplicate");
                continue;
            }
            tracing::debug!(
                name = %stem, from = *current, to = rank, previous = %previous.display(), path = %path.display(),
                "replacing audio file with higher priority format"
            );
        }
        best.insert(stem, (rank, path.to_path_buf()));
    }

    Ok(best.into_values().map(|(_, path)| path).collect())
}
