//! 跳转目标校验
//!
//! 点击跳转只允许 http / https 目标，其他协议一律拒绝。

use url::Url;

#[derive(Debug, PartialEq, Eq)]
pub enum TargetError {
    Empty,
    UnsupportedScheme(String),
    Malformed(String),
}

impl std::fmt::Display for TargetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "redirect target is empty"),
            Self::UnsupportedScheme(scheme) => {
                write!(f, "unsupported redirect scheme: {}", scheme)
            }
            Self::Malformed(msg) => write!(f, "malformed redirect target: {}", msg),
        }
    }
}

impl std::error::Error for TargetError {}

/// 解析并校验跳转目标，返回规范化后的 URL
pub fn parse_redirect_target(raw: &str) -> Result<Url, TargetError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TargetError::Empty);
    }

    let url = Url::parse(raw).map_err(|e| TargetError::Malformed(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(TargetError::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(parse_redirect_target("https://shop.example.com/deal?id=1").is_ok());
        assert!(parse_redirect_target("  http://localhost:8080 ").is_ok());
        assert!(parse_redirect_target("HTTPS://EXAMPLE.COM").is_ok());
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(matches!(
            parse_redirect_target("javascript:alert(1)"),
            Err(TargetError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            parse_redirect_target("ftp://example.com"),
            Err(TargetError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_rejects_empty_and_relative() {
        assert_eq!(parse_redirect_target("   "), Err(TargetError::Empty));
        assert!(matches!(
            parse_redirect_target("/stores/acme"),
            Err(TargetError::Malformed(_))
        ));
    }
}
