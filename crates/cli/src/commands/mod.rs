//! Subcommand implementations.

pub mod create_html;
pub mod encode;
