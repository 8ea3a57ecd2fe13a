//! Service layer for business logic
//!
//! Shared between the HTTP handlers and the CLI commands.

mod blog_service;
mod catalog_service;
mod click_service;
pub mod import;
pub mod matching;
pub mod store_page;

pub use blog_service::*;
pub use catalog_service::*;
pub use click_service::*;
pub use import::{ImportBatch, normalize_rows, parse_import_csv};
pub use matching::{WantedSlug, matches};
pub use store_page::{StorePageData, assemble};
