//! Core types and shared functionality for dls-encoder.
//!
//! This crate provides:
//! - The canonical record model shared by extraction, storage and encoding
//! - Unified error types
//! - Configuration structures
//! - Field labels and separators used by the page extractors

pub mod config;
pub mod error;
pub mod labels;
pub mod model;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use model::{CanonicalRecord, RawFieldMap, Track, render_track_list};
