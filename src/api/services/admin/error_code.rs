//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::CouponError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 认证错误
/// - 3000-3099: 记录错误
/// - 4000-4099: 导入导出错误
/// - 5000-5099: 存储错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    ServiceUnavailable = 1006,

    // 认证错误 2000-2099
    AuthFailed = 2000,
    RateLimitExceeded = 2004,

    // 记录错误 3000-3099
    RecordNotFound = 3000,
    RecordConflict = 3001,
    RecordValidation = 3002,
    UnknownCollection = 3003,

    // 导入导出错误 4000-4099
    ImportFailed = 4000,
    ExportFailed = 4001,
    InvalidMultipartData = 4002,
    CsvFileMissing = 4004,

    // 存储错误 5000-5099
    StorageError = 5000,
}

impl From<&CouponError> for ErrorCode {
    fn from(err: &CouponError) -> Self {
        match err {
            CouponError::Validation(_) => ErrorCode::RecordValidation,
            CouponError::NotFound(_) => ErrorCode::RecordNotFound,
            CouponError::Conflict(_) => ErrorCode::RecordConflict,
            CouponError::Unauthorized(_) => ErrorCode::Unauthorized,
            CouponError::Serialization(_)
            | CouponError::DatabaseConfig(_)
            | CouponError::DatabaseConnection(_)
            | CouponError::DatabaseOperation(_)
            | CouponError::FileOperation(_) => ErrorCode::StorageError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::Success).unwrap(), "0");
        assert_eq!(
            serde_json::to_string(&ErrorCode::RecordNotFound).unwrap(),
            "3000"
        );
    }

    #[test]
    fn test_from_coupon_error() {
        assert_eq!(
            ErrorCode::from(&CouponError::conflict("dup")),
            ErrorCode::RecordConflict
        );
        assert_eq!(
            ErrorCode::from(&CouponError::file_operation("disk")),
            ErrorCode::StorageError
        );
    }
}
