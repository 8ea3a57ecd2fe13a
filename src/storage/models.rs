use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::utils::slug::slugify;

/// 未填写过期时间时使用的占位值
pub const DEFAULT_EXPIRY: &str = "2099-12-31";

/// 被视为 "没有填写" 的 coupon code / title 占位值（比较时忽略大小写）
pub const COUPON_PLACEHOLDERS: [&str; 6] = ["", "n/a", "na", "—", "-", "none"];

/// 记录所在的集合
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
    /// 商家表，历史上也混存了部分 coupon
    Stores,
    /// 独立的 coupon 表
    Coupons,
}

impl Collection {
    /// file 后端使用的 JSON 文件名
    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Stores => "stores.json",
            Collection::Coupons => "coupons.json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    #[serde(alias = "enabled")]
    Enable,
    #[serde(alias = "disabled")]
    Disable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CouponType {
    Code,
    Deal,
}

/// 记录的角色：商家还是优惠券
///
/// 在写入时根据 coupon 字段决定，读取时不再重复判断。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Store,
    Coupon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Faq {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// Store / Coupon 记录（同一个结构承担两种角色）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_expiry")]
    pub expiry: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_type: Option<CouponType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<RecordKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trending: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_codes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faqs: Vec<Faq>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_keywords: Option<String>,

    #[serde(default = "default_created_at")]
    pub created_at: DateTime<Utc>,
}

fn default_expiry() -> String {
    DEFAULT_EXPIRY.to_string()
}

fn default_created_at() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// coupon code / title 是否是有意义的值
pub fn is_meaningful(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        let normalized = v.trim().to_lowercase();
        !COUPON_PLACEHOLDERS.contains(&normalized.as_str())
    })
}

impl Record {
    /// 创建一个只有名称的新记录，其余字段为默认值
    pub fn new(id: impl Into<String>, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            description: name.clone(),
            name,
            slug: None,
            expiry: default_expiry(),
            coupon_code: None,
            coupon_title: None,
            coupon_type: None,
            status: None,
            kind: None,
            trending: None,
            priority: None,
            active: None,
            category: None,
            logo_url: None,
            tracking_url: None,
            website_url: None,
            link: None,
            country_codes: None,
            faqs: Vec::new(),
            seo_title: None,
            seo_description: None,
            seo_keywords: None,
            created_at,
        }
    }

    /// code 或 title 任一有意义即视为 coupon
    pub fn has_coupon_data(&self) -> bool {
        is_meaningful(self.coupon_code.as_deref()) || is_meaningful(self.coupon_title.as_deref())
    }

    /// 写入时确定记录角色
    pub fn classify(&mut self) {
        self.kind = Some(if self.has_coupon_data() {
            RecordKind::Coupon
        } else {
            RecordKind::Store
        });
    }

    /// 记录角色；旧数据没有 kind 字段时按内容推断
    pub fn kind(&self) -> RecordKind {
        self.kind.unwrap_or_else(|| {
            if self.has_coupon_data() {
                RecordKind::Coupon
            } else {
                RecordKind::Store
            }
        })
    }

    pub fn is_coupon(&self) -> bool {
        self.kind() == RecordKind::Coupon
    }

    /// 缺省状态视为启用
    pub fn is_enabled(&self) -> bool {
        self.status.unwrap_or_default() != RecordStatus::Disable
    }

    /// 存储的 slug，没有时从 name 推导
    pub fn effective_slug(&self) -> String {
        match self.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => slugify(&self.name),
        }
    }

    pub fn has_logo(&self) -> bool {
        self.logo_url.as_deref().is_some_and(|l| !l.trim().is_empty())
    }

    /// 点击跳转的目标地址：trackingUrl 优先，其次 websiteUrl，最后 link
    pub fn outbound_url(&self) -> Option<&str> {
        [&self.tracking_url, &self.website_url, &self.link]
            .into_iter()
            .filter_map(|u| u.as_deref())
            .map(str::trim)
            .find(|u| !u.is_empty())
    }
}

/// 点击日志（只追加）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickRecord {
    pub id: String,
    /// store id 或 coupon id，取决于点击来源
    pub store_id: String,
    pub created_at: DateTime<Utc>,
}

/// 博客文章
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> Record {
        Record::new("id-1", name, Utc::now())
    }

    #[test]
    fn test_has_coupon_data_with_code() {
        let mut r = record("Acme");
        r.coupon_code = Some("SAVE10".to_string());
        assert!(r.has_coupon_data());
    }

    #[test]
    fn test_has_coupon_data_placeholders() {
        let mut r = record("Acme");
        r.coupon_code = Some("N/A".to_string());
        r.coupon_title = Some(String::new());
        assert!(!r.has_coupon_data());

        for placeholder in ["na", " NONE ", "-", "—"] {
            r.coupon_code = Some(placeholder.to_string());
            r.coupon_title = None;
            assert!(!r.has_coupon_data(), "{placeholder:?} should be ignored");
        }
    }

    #[test]
    fn test_has_coupon_data_title_only() {
        let mut r = record("Acme");
        r.coupon_title = Some("20% off sitewide".to_string());
        assert!(r.has_coupon_data());
    }

    #[test]
    fn test_classify_sets_kind() {
        let mut r = record("Acme");
        r.classify();
        assert_eq!(r.kind, Some(RecordKind::Store));

        r.coupon_code = Some("WELCOME".to_string());
        r.classify();
        assert_eq!(r.kind, Some(RecordKind::Coupon));
        assert!(r.is_coupon());
    }

    #[test]
    fn test_missing_status_is_enabled() {
        let mut r = record("Acme");
        assert!(r.is_enabled());
        r.status = Some(RecordStatus::Disable);
        assert!(!r.is_enabled());
    }

    #[test]
    fn test_effective_slug_falls_back_to_name() {
        let mut r = record("Acme Outdoor Gear");
        assert_eq!(r.effective_slug(), "acme-outdoor-gear");
        r.slug = Some("  ".to_string());
        assert_eq!(r.effective_slug(), "acme-outdoor-gear");
        r.slug = Some("acme".to_string());
        assert_eq!(r.effective_slug(), "acme");
    }

    #[test]
    fn test_legacy_json_without_optional_fields() {
        let json = r#"{"id":"s1","name":"Acme","status":"disable"}"#;
        let r: Record = serde_json::from_str(json).unwrap();
        assert_eq!(r.expiry, DEFAULT_EXPIRY);
        assert_eq!(r.kind, None);
        assert_eq!(r.kind(), RecordKind::Store);
        assert!(!r.is_enabled());
        assert_eq!(r.created_at, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_camel_case_serialization() {
        let mut r = record("Acme");
        r.logo_url = Some("https://cdn.example.com/acme.png".to_string());
        let value = serde_json::to_value(&r).unwrap();
        assert!(value.get("logoUrl").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("couponCode").is_none());
    }

    #[test]
    fn test_outbound_url_priority() {
        let mut r = record("Acme");
        assert_eq!(r.outbound_url(), None);
        r.website_url = Some("https://acme.example".to_string());
        assert_eq!(r.outbound_url(), Some("https://acme.example"));
        r.tracking_url = Some("https://track.example/acme".to_string());
        assert_eq!(r.outbound_url(), Some("https://track.example/acme"));
    }

    #[test]
    fn test_collection_parse() {
        assert_eq!("stores".parse::<Collection>().unwrap(), Collection::Stores);
        assert_eq!("coupons".parse::<Collection>().unwrap(), Collection::Coupons);
        assert!("blog".parse::<Collection>().is_err());
        assert_eq!(Collection::Coupons.file_name(), "coupons.json");
    }
}
