//! 商家页面数据组装
//!
//! 纯函数：输入两张表的全部记录，输出 `{ storeInfo, coupons, otherStores }`。
//! 找不到商家时返回空结果而不是错误。

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::matching::{WantedSlug, matching_rule};
use crate::storage::Record;

/// "其他商家" 默认数量上限
pub const DEFAULT_OTHER_STORES_LIMIT: usize = 12;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePageData {
    pub store_info: Option<Record>,
    pub coupons: Vec<Record>,
    pub other_stores: Vec<Record>,
}

impl StorePageData {
    pub fn is_found(&self) -> bool {
        self.store_info.is_some()
    }
}

/// 组装商家页面数据
///
/// `coupons` 为 stores 表中匹配的旧 coupon 记录加上 coupons 表中匹配的记录，
/// 两者直接拼接，不去重。
pub fn assemble(
    stores: &[Record],
    coupon_table: &[Record],
    slug: &str,
    other_stores_limit: usize,
) -> StorePageData {
    let wanted = WantedSlug::new(slug);

    let enabled: Vec<&Record> = stores.iter().filter(|r| r.is_enabled()).collect();

    let matched: Vec<&Record> = enabled
        .iter()
        .copied()
        .filter(|r| match matching_rule(r, &wanted) {
            Some(rule) => {
                debug!("store page '{}': {} matched by {}", wanted.raw, r.id, rule);
                true
            }
            None => false,
        })
        .collect();

    let store_info = matched
        .iter()
        .find(|r| !r.is_coupon())
        .or_else(|| matched.iter().find(|r| r.has_logo()))
        .or_else(|| matched.first())
        .map(|r| (*r).clone());

    // 没有匹配的商家时整页为空
    let Some(store_info) = store_info else {
        debug!("store page '{}': no matching record", wanted.raw);
        return StorePageData::default();
    };

    let legacy_coupons = matched.iter().filter(|r| r.is_coupon()).map(|r| (*r).clone());

    let table_coupons = coupon_table
        .iter()
        .filter(|r| r.is_enabled() && matching_rule(r, &wanted).is_some())
        .cloned();

    let coupons: Vec<Record> = legacy_coupons.chain(table_coupons).collect();

    let current_name = store_info.name.to_lowercase();
    let mut seen = HashSet::new();
    let other_stores = enabled
        .iter()
        .filter(|r| !r.is_coupon())
        .filter(|r| {
            let name = r.name.to_lowercase();
            name != current_name && seen.insert(name)
        })
        .take(other_stores_limit)
        .map(|r| (*r).clone())
        .collect();

    StorePageData {
        store_info: Some(store_info),
        coupons,
        other_stores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RecordStatus;
    use chrono::{Duration, Utc};

    fn store(id: &str, name: &str) -> Record {
        let mut r = Record::new(id, name, Utc::now());
        r.classify();
        r
    }

    fn coupon(id: &str, name: &str, code: &str) -> Record {
        let mut r = Record::new(id, name, Utc::now());
        r.coupon_code = Some(code.to_string());
        r.classify();
        r
    }

    #[test]
    fn test_unknown_slug_is_empty() {
        let stores = vec![store("s1", "Acme"), store("s2", "Globex")];
        let table = vec![coupon("c1", "Nobody", "SAVE5")];
        let page = assemble(&stores, &table, "nobody-else", 12);
        assert!(page.store_info.is_none());
        assert!(page.coupons.is_empty());
        assert!(page.other_stores.is_empty());
        assert!(!page.is_found());
    }

    #[test]
    fn test_legacy_and_table_coupons_are_concatenated() {
        let stores = vec![store("s1", "Acme"), coupon("c-legacy", "Acme", "OLD5")];
        let table = vec![coupon("c-new", "Acme", "NEW10")];

        let page = assemble(&stores, &table, "acme", 12);
        assert_eq!(page.store_info.as_ref().map(|s| s.id.as_str()), Some("s1"));
        let ids: Vec<&str> = page.coupons.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c-legacy", "c-new"]);
    }

    #[test]
    fn test_store_info_prefers_non_coupon_then_logo() {
        let mut with_logo = coupon("c1", "Acme", "A");
        with_logo.logo_url = Some("https://cdn.example/acme.png".to_string());
        let stores = vec![coupon("c0", "Acme", "B"), with_logo];

        let page = assemble(&stores, &[], "acme", 12);
        assert_eq!(page.store_info.unwrap().id, "c1");

        let stores = vec![coupon("c0", "Acme", "B"), coupon("c1", "Acme", "A")];
        let page = assemble(&stores, &[], "acme", 12);
        assert_eq!(page.store_info.unwrap().id, "c0");
    }

    #[test]
    fn test_disabled_records_are_ignored() {
        let mut disabled = store("s1", "Acme");
        disabled.status = Some(RecordStatus::Disable);
        let mut disabled_coupon = coupon("c1", "Acme", "X");
        disabled_coupon.status = Some(RecordStatus::Disable);

        let page = assemble(&[disabled], &[disabled_coupon], "acme", 12);
        assert!(page.store_info.is_none());
        assert!(page.coupons.is_empty());
    }

    #[test]
    fn test_other_stores_dedup_and_limit() {
        let mut stores = vec![store("s0", "Acme"), store("dup", "ACME")];
        for i in 0..20 {
            stores.push(store(&format!("s{}", i + 1), &format!("Store {}", i)));
        }
        stores.push(store("again", "store 0"));

        let page = assemble(&stores, &[], "acme", 12);
        assert_eq!(page.other_stores.len(), 12);
        assert!(page.other_stores.iter().all(|s| s.name.to_lowercase() != "acme"));
        assert_eq!(page.other_stores[0].name, "Store 0");
        assert!(page.other_stores.iter().all(|s| s.id != "again"));
    }

    #[test]
    fn test_legacy_suffix_request() {
        let mut s = store("s1", "Acme");
        s.created_at = Utc::now() - Duration::days(3);
        let page = assemble(&[s], &[], "acme-coupon-code", 12);
        assert!(page.is_found());
    }
}
