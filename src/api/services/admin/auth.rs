//! Admin API 认证相关端点

use actix_governor::{Governor, GovernorConfigBuilder, KeyExtractor, SimpleKeyExtractionError};
use actix_web::dev::ServiceRequest;
use actix_web::http::StatusCode;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, web};
use chrono::Utc;
use governor::middleware::NoOpMiddleware;
use subtle::ConstantTimeEq;
use tracing::{debug, info, warn};

use crate::api::constants;
use crate::api::state::AppState;
use crate::config::AdminConfig;

use super::error_code::ErrorCode;
use super::helpers::{SessionCookieBuilder, error_response, json_response, success_response};
use super::types::{ApiResponse, LoginCredentials, MessageResponse, SessionStatus};

/// 基于连接 IP 的限流 key 提取器
///
/// 使用 TCP peer address，不信任 X-Forwarded-For。
#[derive(Clone, Copy)]
pub struct LoginKeyExtractor;

impl KeyExtractor for LoginKeyExtractor {
    type Key = String;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        let key = req
            .peer_addr()
            .map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Ok(key)
    }
}

/// 创建登录限流器
///
/// 每 `login_period_secs` 秒补充一个令牌，突发最多 `login_burst` 次请求，
/// 超限返回 HTTP 429 Too Many Requests
pub fn login_rate_limiter(config: &AdminConfig) -> Governor<LoginKeyExtractor, NoOpMiddleware> {
    let period = config.login_period_secs.max(1);
    let burst = config.login_burst.max(1);

    let governor_config = GovernorConfigBuilder::default()
        .seconds_per_request(period)
        .burst_size(burst)
        .key_extractor(LoginKeyExtractor)
        .finish()
        .expect("Invalid rate limit config");

    debug!(
        "Login rate limiter created: 1 req/{}s, burst {}",
        period, burst
    );
    Governor::new(&governor_config)
}

fn password_matches(given: &str, expected: &str) -> bool {
    given.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// 登录：校验密码并签发会话 Cookie
pub async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<LoginCredentials>,
) -> HttpResponse {
    if !password_matches(&credentials.password, &state.admin.password) {
        warn!("Admin API: login failed - invalid password");
        return error_response(
            StatusCode::UNAUTHORIZED,
            ErrorCode::AuthFailed,
            "Invalid password",
        );
    }

    info!("Admin API: login successful");

    let cookie = SessionCookieBuilder::from_config(&state.admin)
        .build_session_cookie(state.session.issue(Utc::now()));

    HttpResponse::Ok()
        .cookie(cookie)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: ErrorCode::Success as i32,
            message: "Login successful".to_string(),
            data: Some(SessionStatus {
                authenticated: true,
                expires_in: state.session.ttl().num_seconds(),
            }),
        })
}

/// 登出：清除会话 Cookie
pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    let cookie = SessionCookieBuilder::from_config(&state.admin).build_expired_session_cookie();
    info!("Admin API: logout");

    HttpResponse::Ok()
        .cookie(cookie)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: ErrorCode::Success as i32,
            message: "Logged out".to_string(),
            data: Some(MessageResponse {
                message: "Logged out".to_string(),
            }),
        })
}

/// 当前会话状态（能走到这里说明中间件已校验通过）
pub async fn session(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let remaining = req
        .cookie(constants::SESSION_COOKIE_NAME)
        .and_then(|c| c.value().split_once('.').map(|(ts, _)| ts.to_string()))
        .and_then(|ts| ts.parse::<i64>().ok())
        .map(|issued_at| state.session.ttl().num_seconds() - (Utc::now().timestamp() - issued_at));

    match remaining {
        Some(expires_in) => success_response(SessionStatus {
            authenticated: true,
            expires_in,
        }),
        None => json_response::<()>(
            StatusCode::UNAUTHORIZED,
            ErrorCode::Unauthorized,
            "No session",
            None,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_matches() {
        assert!(password_matches("hunter2", "hunter2"));
        assert!(!password_matches("hunter3", "hunter2"));
        assert!(!password_matches("hunter", "hunter2"));
        assert!(!password_matches("", "hunter2"));
    }

    #[test]
    fn test_rate_limiter_accepts_zero_config() {
        let config = AdminConfig {
            login_burst: 0,
            login_period_secs: 0,
            ..Default::default()
        };
        let _ = login_rate_limiter(&config);
    }
}
