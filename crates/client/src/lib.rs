//! Client code for dls-encoder.
//!
//! This crate provides the product page extraction core, the filesystem
//! helpers and encoder around it, and the page templates used by the CLI.

pub mod encode;
pub mod extract;
pub mod storage;
pub mod template;

pub use encode::{EncodeError, EncodeJob, Encoder, FfmpegEncoder};
pub use extract::{DExtractor, Extractor, LayoutKind, RjExtractor, extract_record, normalize};
pub use storage::{find_main_image, load_targets, save_records};
pub use template::{TemplateData, TemplateError, render_html, run_wizard};
