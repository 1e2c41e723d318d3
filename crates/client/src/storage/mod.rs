//! Filesystem helpers around the batch: target listing, cover lookup and
//! record persistence.

mod json;
mod main_image;
mod targets;

pub use json::save_records;
pub use main_image::find_main_image;
pub use targets::load_targets;
