pub mod auth;
pub mod request_log;

pub use auth::AdminAuth;
pub use request_log::{RequestId, RequestLog};
