//! CLI command implementations

mod config_gen;
mod import_export;

pub use config_gen::config_generate;
pub use import_export::{export_records, import_records};
