use std::fs;
use std::path::Path;

use dlsenc_core::Error;

/// Names of the immediate subdirectories of `source_dir`, sorted.
///
/// Each subdirectory is one item; its name is the item key.
pub fn load_targets(source_dir: &Path) -> Result<Vec<String>, Error> {
    let entries = fs::read_dir(source_dir)
        .map_err(|e| Error::TargetsUnavailable(format!("{}: {e}", source_dir.display())))?;

    let mut targets = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::TargetsUnavailable(format!("{}: {e}", source_dir.display())))?;
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if !is_dir {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => targets.push(name),
            Err(name) => tracing::warn!(name = ?name, "skipping target with non UTF-8 name"),
        }
    }

    targets.sort();
    Ok(targets)
}
