pub mod csv_handler;
pub mod csv_line;
pub mod slug;
pub mod url_validator;

pub use csv_line::parse_line;
pub use slug::{canonicalize, slugify};
pub use url_validator::parse_redirect_target;

/// 生成新的记录 id
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
