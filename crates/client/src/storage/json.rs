use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use dlsenc_core::{CanonicalRecord, Error};

/// Write each record to `<dir>/<key>.json` as pretty-printed JSON.
///
/// `dir` is created when missing. Existing files are overwritten.
pub fn save_records(dir: &Path, records: &BTreeMap<String, CanonicalRecord>) -> Result<(), Error> {
    fs::create_dir_all(dir).map_err(|e| Error::SaveFailed(format!("{}: {e}", dir.display())))?;

    for (key, record) in records {
        let path = dir.join(format!("{key}.json"));
        let mut body = serde_json::to_string_pretty(record)?;
        body.push('\n');
        fs::write(&path, body).map_err(|e| Error::SaveFailed(format!("{}: {e}", path.display())))?;
        tracing::debug!(key = %key, path = %path.display(), "saved record");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlsenc_core::Track;

    #[test]
    fn test_save_records_writes_one_file_per_key() {
        let temp = tempfile::tempdir().unwrap();
        let out = temp.path().join("json");

        let mut records = BTreeMap::new();
        let record = CanonicalRecord {
            album_title: "テストアルバム".into(),
            actor: "テスト声優".into(),
            track_list: vec![Track::from_seconds("トラック1", 225)],
            ..Default::default()
        };
        records.insert("RJ000001".to_string(), record.clone());
        records.insert("d_000001".to_string(), CanonicalRecord::default());

        save_records(&out, &records).unwrap();

        let body = fs::read_to_string(out.join("RJ000001.json")).unwrap();
        assert!(body.contains("\n  \"album_title\": \"テストアルバム\""));
        let parsed: CanonicalRecord = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, record);
        assert!(out.join("d_000001.json").exists());
    }

    #[test]
    fn test_save_records_unwritable_dir() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let result = save_records(&blocker.join("json"), &BTreeMap::new());
        assert!(matches!(result, Err(Error::SaveFailed(_))));
    }
}
