//! Admin API 帮助函数

use actix_web::HttpResponse;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use serde::Serialize;
use tracing::error;

use crate::api::constants;
use crate::config::AdminConfig;
use crate::errors::CouponError;
use crate::services::RecordPage;
use crate::storage::Collection;

use super::error_code::ErrorCode;
use super::types::{ApiResponse, PaginatedResponse, PaginationInfo};

/// 存储错误对外统一返回的信息
pub const GENERIC_STORAGE_MESSAGE: &str = "Something went wrong, please try again later";

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建 201 响应
pub fn created_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::CREATED, ErrorCode::Success, "Created", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 CouponError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
///
/// 存储错误只返回通用信息，详情写日志。
pub fn error_from_coupon(err: &CouponError) -> HttpResponse {
    let status = err.http_status();
    let error_code = ErrorCode::from(err);
    if err.is_storage_error() {
        error!("{}", err.format_colored());
        return error_response(status, error_code, GENERIC_STORAGE_MESSAGE);
    }
    error_response(status, error_code, err.message())
}

/// 统一 Result → HttpResponse 转换
///
/// 成功时返回 200 OK + JSON 数据，失败时自动映射 CouponError。
pub fn api_result<T, E>(result: Result<T, E>) -> HttpResponse
where
    T: Serialize,
    E: Into<CouponError>,
{
    match result {
        Ok(data) => success_response(data),
        Err(e) => {
            let err: CouponError = e.into();
            error_from_coupon(&err)
        }
    }
}

/// 分页响应
pub fn paginated_response(page: RecordPage) -> HttpResponse {
    let pagination = PaginationInfo {
        page: page.page,
        page_size: page.page_size,
        total: page.total,
        total_pages: page.total_pages(),
    };
    HttpResponse::Ok()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(PaginatedResponse {
            code: ErrorCode::Success as i32,
            data: page.items,
            pagination,
        })
}

/// 解析路径中的集合名，只接受 `stores` / `coupons`
pub fn parse_collection(raw: &str) -> Result<Collection, HttpResponse> {
    raw.parse::<Collection>().map_err(|_| {
        error_response(
            StatusCode::NOT_FOUND,
            ErrorCode::UnknownCollection,
            &format!("Unknown collection: {}", raw),
        )
    })
}

/// 会话 Cookie 构建器
pub struct SessionCookieBuilder {
    secure: bool,
    ttl_hours: u64,
}

impl SessionCookieBuilder {
    pub fn from_config(config: &AdminConfig) -> Self {
        Self {
            secure: config.cookie_secure,
            ttl_hours: config.session_ttl_hours,
        }
    }

    fn build_cookie_base(
        &self,
        value: String,
        max_age: actix_web::cookie::time::Duration,
    ) -> Cookie<'static> {
        let mut cookie = Cookie::new(constants::SESSION_COOKIE_NAME, value);
        cookie.set_path(constants::ADMIN_PREFIX);
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(SameSite::Lax);
        cookie.set_max_age(max_age);
        cookie
    }

    pub fn build_session_cookie(&self, value: String) -> Cookie<'static> {
        self.build_cookie_base(
            value,
            actix_web::cookie::time::Duration::hours(self.ttl_hours as i64),
        )
    }

    pub fn build_expired_session_cookie(&self) -> Cookie<'static> {
        self.build_cookie_base(String::new(), actix_web::cookie::time::Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response() {
        let response = success_response("success_data");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_error_from_coupon_status() {
        let response = error_from_coupon(&CouponError::not_found("missing"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = error_from_coupon(&CouponError::validation("bad"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = error_from_coupon(&CouponError::database_operation("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_parse_collection() {
        assert_eq!(parse_collection("stores").unwrap(), Collection::Stores);
        let response = parse_collection("links").unwrap_err();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let builder = SessionCookieBuilder::from_config(&AdminConfig::default());
        let cookie = builder.build_session_cookie("1.abc".to_string());
        assert_eq!(cookie.name(), "admin_session");
        assert_eq!(cookie.path(), Some("/admin"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(
            cookie.max_age(),
            Some(actix_web::cookie::time::Duration::hours(24))
        );
    }
}
