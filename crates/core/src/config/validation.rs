//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use std::path::Path;

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("failed to create {field} directory: {reason}")]
    CreateDirFailed { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - any of `source_dir`, `html_dir`, `image_dir`, `log_dir`, `output_dir` is empty
    /// - `mp3_output_dir_name` is empty or contains a path separator
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, path) in self.directories() {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid { field: field.into(), reason: "must not be empty".into() });
            }
        }

        let name = &self.dir_setting.mp3_output_dir_name;
        if name.is_empty() {
            return Err(ConfigError::Invalid {
                field: "mp3_output_dir_name".into(),
                reason: "must not be empty".into(),
            });
        }
        if name.contains(['/', '\\']) {
            return Err(ConfigError::Invalid {
                field: "mp3_output_dir_name".into(),
                reason: "must be a single directory name".into(),
            });
        }

        if !self.setting.convert && !self.setting.save_parsed_data {
            tracing::warn!(
                convert = self.setting.convert,
                save_parsed_data = self.setting.save_parsed_data,
                "Both convert and save_parsed_data are off; \
                 a run only reports what it parsed"
            );
        }

        Ok(())
    }

    /// Create the working directories that do not exist yet.
    ///
    /// The image directory is only read, so it is left alone.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        for (field, path) in self.directories() {
            if field == "image_dir" || path.is_dir() {
                continue;
            }
            std::fs::create_dir_all(path)
                .map_err(|e| ConfigError::CreateDirFailed { field: field.into(), reason: e.to_string() })?;
            tracing::debug!(field, path = %path.display(), "created directory");
        }
        Ok(())
    }

    fn directories(&self) -> [(&'static str, &Path); 5] {
        let dirs = &self.dir_setting;
        [
            ("source_dir", dirs.source_dir.as_path()),
            ("html_dir", dirs.html_dir.as_path()),
            ("image_dir", dirs.image_dir.as_path()),
            ("log_dir", dirs.log_dir.as_path()),
            ("output_dir", dirs.output_dir.as_path()),
        ]
    }
}
