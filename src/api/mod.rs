//! HTTP 层：路由、中间件、会话签名和共享状态

pub mod constants;
pub mod middleware;
pub mod services;
pub mod session;
pub mod state;

pub use session::SessionSigner;
pub use state::AppState;
