//! Admin API 服务模块
//!
//! 该模块包含管理后台的所有端点：
//! - 认证（登录、登出、会话状态）
//! - store / coupon CRUD 与 CSV 导入导出
//! - 博客文章管理
//! - 点击统计

pub mod analytics;
pub mod auth;
mod blog;
pub mod error_code;
mod helpers;
mod import_export;
mod records;
pub mod routes;
mod types;

// 重新导出类型
pub use types::*;

// 重新导出帮助函数
pub use helpers::{
    GENERIC_STORAGE_MESSAGE, api_result, error_from_coupon, error_response, json_response,
    success_response,
};

// 重新导出错误码
pub use error_code::ErrorCode;

pub use routes::admin_routes;
