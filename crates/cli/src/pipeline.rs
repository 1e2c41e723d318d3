//! The batch: extract every item's record, then encode its audio.
//!
//! Items are handled one at a time. A page that is missing or unparsable, or
//! a cover that cannot be found, excludes the item and the batch moves on;
//! a failure while encoding stops the batch.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use dlsenc_client::encode::{find_audio_files, output_dir, prepare_output_dir};
use dlsenc_client::{EncodeJob, Encoder, extract_record, find_main_image, load_targets, save_records};
use dlsenc_core::{AppConfig, CanonicalRecord, Error};

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Records extracted, keyed by item
    pub records: BTreeMap<String, CanonicalRecord>,
    /// Items without a readable or parsable page
    pub not_applicable: Vec<String>,
    /// Items whose cover image could not be resolved
    pub missing_image: Vec<String>,
    /// Number of files encoded
    pub encoded: usize,
}

impl BatchReport {
    fn log_summary(&self, config: &AppConfig) {
        tracing::info!(
            records = self.records.len(),
            encoded = self.encoded,
            not_applicable = self.not_applicable.len(),
            missing_image = self.missing_image.len(),
            "batch summary"
        );

        if !self.not_applicable.is_empty() {
            tracing::warn!(
                keys = ?self.not_applicable,
                html_dir = %config.dir_setting.html_dir.display(),
                "items skipped: check that a page exists for each of them"
            );
        }

        if config.setting.set_main_image && !self.missing_image.is_empty() {
            tracing::warn!(
                keys = ?self.missing_image,
                image_dir = %config.dir_setting.image_dir.display(),
                "items skipped: no main image found"
            );
        }
    }
}

enum ItemOutcome {
    Ready(CanonicalRecord),
    NotApplicable(Error),
    MissingImage(Error),
}

/// Run the whole batch with `encoder`.
pub async fn run(config: &AppConfig, encoder: &dyn Encoder) -> Result<BatchReport, Error> {
    let targets = load_targets(&config.dir_setting.source_dir)?;
    tracing::info!(count = targets.len(), targets = ?targets, "loaded targets");

    let mut report = collect_records(config, &targets).await;

    if config.setting.save_parsed_data {
        save_records(&config.dir_setting.log_dir, &report.records)?;
        tracing::info!(dir = %config.dir_setting.log_dir.display(), "saved parsed records");
    }

    if config.setting.convert {
        report.encoded = convert_all(config, encoder, &report.records).await?;
    } else {
        tracing::info!("conversion disabled, skipping encode");
    }

    report.log_summary(config);
    Ok(report)
}

async fn collect_records(config: &AppConfig, targets: &[String]) -> BatchReport {
    let mut report = BatchReport::default();

    for key in targets {
        match process_item(config, key) {
            ItemOutcome::Ready(record) => {
                tracing::debug!(
                    key = %key,
                    album_title = %record.album_title,
                    actor = %record.actor,
                    "extracted record"
                );
                report.records.insert(key.clone(), record);
            }
            ItemOutcome::NotApplicable(err) => {
                tracing::warn!(key = %key, error = %err, "page not applicable");
                report.not_applicable.push(key.clone());
            }
            ItemOutcome::MissingImage(err) => {
                tracing::warn!(key = %key, error = %err, "main image missing");
                report.missing_image.push(key.clone());
            }
        }

        // Lets a pending interrupt stop the batch between items.
        tokio::task::yield_now().await;
    }

    report
}

fn process_item(config: &AppConfig, key: &str) -> ItemOutcome {
    let page = config.dir_setting.html_dir.join(format!("{key}.html"));
    let bytes = match fs::read(&page) {
        Ok(bytes) => bytes,
        Err(e) => return ItemOutcome::NotApplicable(Error::ReadFailed(format!("{}: {e}", page.display()))),
    };
    // Saved pages are not always valid UTF-8.
    let html = String::from_utf8_lossy(&bytes);

    let mut record = match extract_record(&html, key) {
        Ok(record) => record,
        Err(e) => return ItemOutcome::NotApplicable(e),
    };

    if config.setting.set_main_image {
        match resolve_main_image(&config.dir_setting.image_dir, key) {
            Ok(path) => record.main_image = path,
            Err(e) => return ItemOutcome::MissingImage(e),
        }
    }

    ItemOutcome::Ready(record)
}

fn resolve_main_image(image_dir: &Path, key: &str) -> Result<String, Error> {
    let found = find_main_image(image_dir, key)?.ok_or_else(|| Error::ImageNotFound(key.to_string()))?;
    let absolute =
        std::path::absolute(&found).map_err(|e| Error::ImageLookupFailed(format!("{}: {e}", found.display())))?;
    Ok(absolute.display().to_string())
}

async fn convert_all(
    config: &AppConfig, encoder: &dyn Encoder, records: &BTreeMap<String, CanonicalRecord>,
) -> Result<usize, Error> {
    tracing::info!(keys = ?records.keys().collect::<Vec<_>>(), "converting");

    let mut encoded = 0;
    for (key, record) in records {
        match convert_item(config, encoder, key, record).await {
            Ok(count) => encoded += count,
            Err(e) => {
                tracing::error!(key = %key, error = %e, "conversion failed");
                return Err(e);
            }
        }
    }

    Ok(encoded)
}

async fn convert_item(
    config: &AppConfig, encoder: &dyn Encoder, key: &str, record: &CanonicalRecord,
) -> Result<usize, Error> {
    let source = config.dir_setting.source_dir.join(key);
    let files = find_audio_files(&source, &config.setting.exclude_strings)?;
    if files.is_empty() {
        return Err(Error::AudioNotFound(source.display().to_string()));
    }

    let out_dir = output_dir(config, key, record);
    prepare_output_dir(&out_dir)?;
    tracing::debug!(key = %key, output_dir = %out_dir.display(), files = files.len(), "prepared output directory");

    for file in &files {
        let job = EncodeJob::for_record(record, file, &out_dir);
        encoder.encode(&job).await?;
        tracing::info!(key = %key, file = %file.display(), output = %job.output.display(), "encoded");
    }

    Ok(files.len())
}
