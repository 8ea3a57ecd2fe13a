//! API 模块常量定义

/// 管理后台路由前缀，也是会话 Cookie 的 path
pub const ADMIN_PREFIX: &str = "/admin";

/// 登录端点，不经过会话校验
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";

/// 管理员会话 Cookie 名称
pub const SESSION_COOKIE_NAME: &str = "admin_session";

/// 热门商家接口默认返回数量
pub const DEFAULT_TRENDING_LIMIT: usize = 10;
