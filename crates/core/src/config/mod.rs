//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (DLS_ENCODER_*)
//! 2. TOML config file (`--config`, `DLS_ENCODER_CONFIG_FILE` or `./config/config.toml`)
//! 3. Built-in defaults

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Environment variable naming an explicit config file.
pub const CONFIG_FILE_ENV: &str = "DLS_ENCODER_CONFIG_FILE";

/// Config file picked up when neither the flag nor the variable is set.
pub const DEFAULT_CONFIG_FILE: &str = "./config/config.toml";

const ENV_PREFIX: &str = "DLS_ENCODER_";

/// Application configuration with layered loading.
///
/// Nested keys map to environment variables with `__` between levels,
/// e.g. `DLS_ENCODER_SETTING__DEBUG=true`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub setting: Setting,

    #[serde(default)]
    pub dir_setting: DirSetting,
}

/// Behaviour switches for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    /// Resolve each item's cover image from the image directory.
    #[serde(default = "default_true")]
    pub set_main_image: bool,

    /// Write every parsed record as JSON into the log directory.
    #[serde(default = "default_true")]
    pub save_parsed_data: bool,

    /// Run the encoder after parsing.
    #[serde(default = "default_true")]
    pub convert: bool,

    /// Debug-level logging.
    #[serde(default)]
    pub debug: bool,

    /// Audio paths containing any of these strings are skipped.
    #[serde(default)]
    pub exclude_strings: Vec<String>,

    /// Replacements applied to directory names built from record fields.
    #[serde(default)]
    pub sanitize_rules: SanitizeRules,
}

/// Character replacements for generated directory names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SanitizeRules {
    /// Replaced wherever they occur.
    #[serde(default)]
    pub any: BTreeMap<String, String>,

    /// Replaced only in the trailing run of the name.
    #[serde(default)]
    pub end: BTreeMap<String, String>,
}

/// Directory layout of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirSetting {
    /// One subdirectory of audio files per item; the subdirectory name is the item key.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Saved product pages, `<key>.html`.
    #[serde(default = "default_html_dir")]
    pub html_dir: PathBuf,

    /// Saved page assets holding `<key>_img_main.{webp,jpg}`.
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Run logs and parsed JSON records.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Subdirectory of `output_dir` receiving encoded files.
    #[serde(default = "default_mp3_output_dir_name")]
    pub mp3_output_dir_name: String,
}

fn default_true() -> bool {
    true
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("./data/source")
}

fn default_html_dir() -> PathBuf {
    PathBuf::from("./data/html")
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("./data/html")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./data/output")
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("./data/log")
}

fn default_mp3_output_dir_name() -> String {
    "mp3-output".into()
}

impl Default for Setting {
    fn default() -> Self {
        Self {
            set_main_image: true,
            save_parsed_data: true,
            convert: true,
            debug: false,
            exclude_strings: Vec::new(),
            sanitize_rules: SanitizeRules::default(),
        }
    }
}

impl Default for DirSetting {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            html_dir: default_html_dir(),
            image_dir: default_image_dir(),
            output_dir: default_output_dir(),
            log_dir: default_log_dir(),
            mp3_output_dir_name: default_mp3_output_dir_name(),
        }
    }
}

impl AppConfig {
    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `DLS_ENCODER_`
    /// 2. TOML file: `explicit_file`, else `DLS_ENCODER_CONFIG_FILE`, else
    ///    `./config/config.toml` when it exists
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - An explicitly named configuration file does not exist
    /// - The file or environment values cannot be parsed
    /// - Validation fails after loading
    pub fn load(explicit_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = Self::config_file(explicit_file)? {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    fn config_file(explicit_file: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
        let named = explicit_file
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_FILE_ENV).map(PathBuf::from));

        match named {
            Some(path) if path.is_file() => Ok(Some(path)),
            Some(path) => Err(ConfigError::LoadFailed(format!("config file not found: {}", path.display()))),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                Ok(fallback.is_file().then_some(fallback))
            }
        }
    }

    /// Directory receiving encoded files for all items.
    pub fn mp3_output_root(&self) -> PathBuf {
        self.dir_setting
            .output_dir
            .join(&self.dir_setting.mp3_output_dir_name)
    }
}
