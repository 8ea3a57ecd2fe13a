//! 管理员会话签名
//!
//! Cookie 值格式为 `{unix_ts}.{hex(hmac_sha256(secret, unix_ts))}`，
//! 签发后 `ttl` 内有效。

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{trace, warn};

use crate::config::AdminConfig;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct SessionSigner {
    secret: Vec<u8>,
    ttl: Duration,
}

impl std::fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SessionSigner {
    pub fn new(secret: impl AsRef<[u8]>, ttl_hours: u64) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            ttl: Duration::hours(ttl_hours as i64),
        }
    }

    /// 随机密钥，进程重启后旧会话全部失效
    pub fn random(ttl_hours: u64) -> Self {
        let secret: [u8; 32] = rand::random();
        Self::new(secret, ttl_hours)
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        if config.session_secret.is_empty() {
            if config.is_enabled() {
                warn!("admin.session_secret is empty, using a random per-process secret");
            }
            Self::random(config.session_ttl_hours)
        } else {
            Self::new(&config.session_secret, config.session_ttl_hours)
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn mac(&self, timestamp: &str) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length");
        mac.update(timestamp.as_bytes());
        mac
    }

    /// 签发会话值
    pub fn issue(&self, now: DateTime<Utc>) -> String {
        let timestamp = now.timestamp().to_string();
        let signature = hex::encode(self.mac(&timestamp).finalize().into_bytes());
        format!("{}.{}", timestamp, signature)
    }

    /// 签名正确且 `0 <= now - ts < ttl` 时有效
    pub fn verify(&self, value: &str, now: DateTime<Utc>) -> bool {
        let Some((timestamp, signature)) = value.split_once('.') else {
            return false;
        };
        let Ok(issued_at) = timestamp.parse::<i64>() else {
            return false;
        };
        let Ok(signature) = hex::decode(signature) else {
            return false;
        };

        if self.mac(timestamp).verify_slice(&signature).is_err() {
            trace!("Session signature mismatch");
            return false;
        }

        let age = now.timestamp() - issued_at;
        age >= 0 && age < self.ttl.num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_then_verify() {
        let signer = SessionSigner::new("secret", 24);
        let now = Utc::now();
        let value = signer.issue(now);
        assert!(signer.verify(&value, now));
        assert!(signer.verify(&value, now + Duration::hours(23)));
    }

    #[test]
    fn test_expired_after_ttl() {
        let signer = SessionSigner::new("secret", 24);
        let now = Utc::now();
        let value = signer.issue(now);
        assert!(!signer.verify(&value, now + Duration::hours(24)));
        assert!(!signer.verify(&value, now - Duration::minutes(1)));
    }

    #[test]
    fn test_tampered_values_rejected() {
        let signer = SessionSigner::new("secret", 24);
        let now = Utc::now();
        let value = signer.issue(now);
        let (_, signature) = value.split_once('.').unwrap();

        let forged = format!("{}.{}", now.timestamp() + 3600, signature);
        assert!(!signer.verify(&forged, now));
        assert!(!signer.verify("garbage", now));
        assert!(!signer.verify("123.zz", now));

        let other = SessionSigner::new("other-secret", 24);
        assert!(!other.verify(&value, now));
    }

    #[test]
    fn test_value_format() {
        let signer = SessionSigner::new("secret", 24);
        let value = signer.issue(DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(1700000000));
        let (timestamp, signature) = value.split_once('.').unwrap();
        assert_eq!(timestamp, "1700000000");
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
