use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum CouponError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Conflict(String),
    Serialization(String),
    Unauthorized(String),
}

impl CouponError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            CouponError::DatabaseConfig(_) => "E001",
            CouponError::DatabaseConnection(_) => "E002",
            CouponError::DatabaseOperation(_) => "E003",
            CouponError::FileOperation(_) => "E004",
            CouponError::Validation(_) => "E005",
            CouponError::NotFound(_) => "E006",
            CouponError::Conflict(_) => "E007",
            CouponError::Serialization(_) => "E008",
            CouponError::Unauthorized(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            CouponError::DatabaseConfig(_) => "Database Configuration Error",
            CouponError::DatabaseConnection(_) => "Database Connection Error",
            CouponError::DatabaseOperation(_) => "Database Operation Error",
            CouponError::FileOperation(_) => "File Operation Error",
            CouponError::Validation(_) => "Validation Error",
            CouponError::NotFound(_) => "Resource Not Found",
            CouponError::Conflict(_) => "Resource Conflict",
            CouponError::Serialization(_) => "Serialization Error",
            CouponError::Unauthorized(_) => "Unauthorized",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            CouponError::DatabaseConfig(msg)
            | CouponError::DatabaseConnection(msg)
            | CouponError::DatabaseOperation(msg)
            | CouponError::FileOperation(msg)
            | CouponError::Validation(msg)
            | CouponError::NotFound(msg)
            | CouponError::Conflict(msg)
            | CouponError::Serialization(msg)
            | CouponError::Unauthorized(msg) => msg,
        }
    }

    /// 对应的 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            CouponError::Validation(_) => StatusCode::BAD_REQUEST,
            CouponError::NotFound(_) => StatusCode::NOT_FOUND,
            CouponError::Conflict(_) => StatusCode::CONFLICT,
            CouponError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            CouponError::DatabaseConfig(_)
            | CouponError::DatabaseConnection(_)
            | CouponError::DatabaseOperation(_)
            | CouponError::FileOperation(_)
            | CouponError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 存储层错误：对外只返回通用信息，详情写日志
    pub fn is_storage_error(&self) -> bool {
        self.http_status() == StatusCode::INTERNAL_SERVER_ERROR
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CouponError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CouponError {}

// 便捷的构造函数
impl CouponError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        CouponError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        CouponError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        CouponError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        CouponError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        CouponError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        CouponError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        CouponError::Conflict(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        CouponError::Serialization(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        CouponError::Unauthorized(msg.into())
    }
}

impl From<sea_orm::DbErr> for CouponError {
    fn from(err: sea_orm::DbErr) -> Self {
        CouponError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CouponError {
    fn from(err: std::io::Error) -> Self {
        CouponError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CouponError {
    fn from(err: serde_json::Error) -> Self {
        CouponError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CouponError>;
