//! 记录与请求 slug 的匹配规则
//!
//! 按顺序尝试四条规则，任一规则命中即视为匹配。

use crate::storage::Record;
use crate::utils::slug::{canonicalize, slugify};

/// 请求中的 slug：原样值和规范化后的比较 key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WantedSlug {
    pub raw: String,
    pub canonical: String,
}

impl WantedSlug {
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim().to_string();
        let canonical = canonicalize(&raw);
        Self { raw, canonical }
    }
}

/// 记录一侧参与比较的两个 slug
struct Candidate {
    stored: String,
    from_name: String,
}

impl Candidate {
    fn of(record: &Record) -> Self {
        Self {
            stored: record.effective_slug(),
            from_name: slugify(&record.name),
        }
    }
}

type SlugRule = fn(&Candidate, &WantedSlug) -> bool;

/// 匹配规则表
const SLUG_RULES: [(&str, SlugRule); 4] = [
    ("stored-slug", |c, w| c.stored == w.raw),
    ("canonical-stored-slug", |c, w| canonicalize(&c.stored) == w.canonical),
    ("name-slug", |c, w| c.from_name == w.raw),
    ("canonical-name-slug", |c, w| canonicalize(&c.from_name) == w.canonical),
];

/// 记录是否匹配请求的 slug
pub fn matches(record: &Record, wanted: &WantedSlug) -> bool {
    matching_rule(record, wanted).is_some()
}

/// 返回第一个命中的规则名（用于调试日志）
pub fn matching_rule(record: &Record, wanted: &WantedSlug) -> Option<&'static str> {
    if wanted.raw.is_empty() {
        return None;
    }

    let candidate = Candidate::of(record);
    SLUG_RULES
        .iter()
        .find(|(_, rule)| rule(&candidate, wanted))
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn store(name: &str, slug: Option<&str>) -> Record {
        let mut r = Record::new("id", name, Utc::now());
        r.slug = slug.map(str::to_string);
        r
    }

    #[test]
    fn test_stored_slug_exact() {
        let r = store("Acme", Some("acme-deals"));
        assert_eq!(
            matching_rule(&r, &WantedSlug::new("acme-deals")),
            Some("stored-slug")
        );
    }

    #[test]
    fn test_legacy_suffix_matches_canonical() {
        let r = store("Acme", Some("acme"));
        assert!(matches(&r, &WantedSlug::new("acme-coupon-code")));
        assert!(matches(&r, &WantedSlug::new("acme-coupon")));

        let legacy = store("Acme", Some("acme-coupon-code"));
        assert_eq!(
            matching_rule(&legacy, &WantedSlug::new("acme")),
            Some("canonical-stored-slug")
        );
    }

    #[test]
    fn test_name_slug_when_stored_slug_differs() {
        let r = store("Acme Outdoor", Some("custom-slug"));
        assert_eq!(
            matching_rule(&r, &WantedSlug::new("acme-outdoor")),
            Some("name-slug")
        );
        assert_eq!(
            matching_rule(&r, &WantedSlug::new("acme-outdoor-coupon")),
            Some("canonical-name-slug")
        );
    }

    #[test]
    fn test_case_insensitive_through_canonical() {
        let r = store("Acme", None);
        assert!(matches(&r, &WantedSlug::new("ACME")));
    }

    #[test]
    fn test_no_match() {
        let r = store("Acme", None);
        assert!(!matches(&r, &WantedSlug::new("globex")));
        assert!(!matches(&r, &WantedSlug::new("   ")));
    }
}
