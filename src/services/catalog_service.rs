//! Catalog service
//!
//! Store / coupon 记录的业务逻辑，HTTP 和 CLI 共用。

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::import::{ImportBatch, parse_import_csv};
use super::store_page::{self, DEFAULT_OTHER_STORES_LIMIT, StorePageData};
use crate::errors::{CouponError, Result};
use crate::storage::{
    Collection, CouponType, Faq, Record, RecordKind, RecordStatus, Storage,
};
use crate::utils::csv_handler::export_records_csv;
use crate::utils::generate_id;
use crate::utils::slug::slugify;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

// ============ Request/Response DTOs ============

/// 创建或整体替换记录时的输入
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordInput {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub expiry: Option<String>,
    pub coupon_code: Option<String>,
    pub coupon_title: Option<String>,
    pub coupon_type: Option<CouponType>,
    pub status: Option<RecordStatus>,
    pub trending: Option<bool>,
    pub priority: Option<i64>,
    pub active: Option<bool>,
    pub category: Option<String>,
    pub logo_url: Option<String>,
    pub tracking_url: Option<String>,
    pub website_url: Option<String>,
    pub link: Option<String>,
    pub country_codes: Option<String>,
    pub faqs: Vec<Faq>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
}

/// 空白字符串视为未填写
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RecordInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CouponError::validation("Name is required"));
        }
        Ok(())
    }

    /// 转换为完整记录：填充默认值、推导 slug、确定 kind
    pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> Record {
        let name = self.name.trim().to_string();
        let mut record = Record::new(id, name.clone(), created_at);

        record.slug = Some(non_blank(self.slug).unwrap_or_else(|| slugify(&name)));
        if let Some(description) = non_blank(self.description) {
            record.description = description;
        }
        if let Some(expiry) = non_blank(self.expiry) {
            record.expiry = expiry;
        }
        record.coupon_code = non_blank(self.coupon_code);
        record.coupon_title = non_blank(self.coupon_title);
        record.coupon_type = self.coupon_type;
        record.status = Some(self.status.unwrap_or_default());
        record.trending = self.trending;
        record.priority = self.priority;
        record.active = self.active;
        record.category = non_blank(self.category);
        record.logo_url = non_blank(self.logo_url);
        record.tracking_url = non_blank(self.tracking_url);
        record.website_url = non_blank(self.website_url);
        record.link = non_blank(self.link);
        record.country_codes = non_blank(self.country_codes);
        record.faqs = self.faqs;
        record.seo_title = non_blank(self.seo_title);
        record.seo_description = non_blank(self.seo_description);
        record.seo_keywords = non_blank(self.seo_keywords);

        record.classify();
        record
    }
}

/// 列表过滤条件
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListFilter {
    /// 模糊搜索 name / slug / category（忽略大小写）
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<RecordStatus>,
    pub kind: Option<RecordKind>,
    pub trending_only: bool,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl ListFilter {
    /// 只看启用记录（公开接口使用）
    pub fn enabled_only(mut self) -> Self {
        self.status = Some(RecordStatus::Enable);
        self
    }

    fn accepts(&self, record: &Record) -> bool {
        if let Some(status) = self.status
            && record.status.unwrap_or_default() != status
        {
            return false;
        }
        if let Some(kind) = self.kind
            && record.kind() != kind
        {
            return false;
        }
        if self.trending_only && record.trending != Some(true) {
            return false;
        }
        if let Some(category) = self.category.as_deref().map(str::trim)
            && !category.is_empty()
            && !record
                .category
                .as_deref()
                .is_some_and(|c| c.trim().eq_ignore_ascii_case(category))
        {
            return false;
        }
        if let Some(search) = self.search.as_deref().map(|s| s.trim().to_lowercase())
            && !search.is_empty()
        {
            let haystacks = [
                Some(record.name.as_str()),
                record.slug.as_deref(),
                record.category.as_deref(),
            ];
            return haystacks
                .into_iter()
                .flatten()
                .any(|h| h.to_lowercase().contains(&search));
        }
        true
    }

    fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    fn page_size(&self) -> u64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

/// 分页结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage {
    pub items: Vec<Record>,
    pub total: usize,
    pub page: u64,
    pub page_size: u64,
}

impl RecordPage {
    pub fn total_pages(&self) -> u64 {
        (self.total as u64).div_ceil(self.page_size)
    }
}

/// 导入结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

// ============ CatalogService Implementation ============

pub struct CatalogService {
    storage: Arc<dyn Storage>,
    other_stores_limit: usize,
}

impl CatalogService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            other_stores_limit: DEFAULT_OTHER_STORES_LIMIT,
        }
    }

    pub fn with_other_stores_limit(mut self, limit: usize) -> Self {
        self.other_stores_limit = limit;
        self
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    // ============ CRUD Operations ============

    /// 分页列出记录，最新的在前
    pub async fn list_records(
        &self,
        collection: Collection,
        filter: &ListFilter,
    ) -> Result<RecordPage> {
        let page = filter.page();
        let page_size = filter.page_size();

        let matched: Vec<Record> = self
            .storage
            .list(collection)
            .await?
            .into_iter()
            .filter(|r| filter.accepts(r))
            .collect();

        let total = matched.len();
        // page 来自查询参数，超大值直接落到最后一页之后
        let offset = usize::try_from(page.saturating_sub(1).saturating_mul(page_size))
            .unwrap_or(usize::MAX);
        let items = matched
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .collect();

        Ok(RecordPage {
            items,
            total,
            page,
            page_size,
        })
    }

    pub async fn get_record(&self, collection: Collection, id: &str) -> Result<Record> {
        self.storage
            .get(collection, id)
            .await?
            .ok_or_else(|| CouponError::not_found(format!("Record '{}' not found", id)))
    }

    pub async fn create_record(&self, collection: Collection, input: RecordInput) -> Result<Record> {
        input.validate()?;

        let record = input.into_record(generate_id(), Utc::now());
        self.storage.insert(collection, record.clone()).await?;

        info!(
            "CatalogService: created {:?} '{}' in {}",
            record.kind(),
            record.name,
            collection
        );
        Ok(record)
    }

    /// 整体替换，保留原 id 和 createdAt
    pub async fn update_record(
        &self,
        collection: Collection,
        id: &str,
        input: RecordInput,
    ) -> Result<Record> {
        input.validate()?;

        let existing = self.get_record(collection, id).await?;
        let record = input.into_record(existing.id, existing.created_at);
        self.storage.update(collection, record.clone()).await?;

        info!("CatalogService: updated '{}' in {}", id, collection);
        Ok(record)
    }

    pub async fn delete_record(&self, collection: Collection, id: &str) -> Result<()> {
        self.storage.remove(collection, id).await?;
        info!("CatalogService: deleted '{}' from {}", id, collection);
        Ok(())
    }

    pub async fn delete_all(&self, collection: Collection) -> Result<u64> {
        let removed = self.storage.clear(collection).await?;
        warn!("CatalogService: cleared {} records from {}", removed, collection);
        Ok(removed)
    }

    // ============ Import / Export ============

    /// 导入 CSV 文本：解析、规范化，一次性写入
    pub async fn import_csv(&self, collection: Collection, text: &str) -> Result<ImportSummary> {
        let ImportBatch { inputs, skipped } = parse_import_csv(text);

        let now = Utc::now();
        let records: Vec<Record> = inputs
            .into_iter()
            .map(|input| input.into_record(generate_id(), now))
            .collect();

        let imported = self.storage.insert_many(collection, records).await?;

        info!(
            "CatalogService: imported {} records into {} ({} skipped)",
            imported, collection, skipped
        );
        Ok(ImportSummary { imported, skipped })
    }

    pub async fn export_csv(&self, collection: Collection) -> Result<String> {
        let records = self.storage.list(collection).await?;
        debug!("Exporting {} records from {}", records.len(), collection);
        export_records_csv(&records)
    }

    // ============ Public pages ============

    /// 商家页面数据；找不到时 storeInfo 为 null
    pub async fn store_page(&self, slug: &str) -> Result<StorePageData> {
        let stores = self.storage.list(Collection::Stores).await?;
        let coupons = self.storage.list(Collection::Coupons).await?;
        Ok(store_page::assemble(
            &stores,
            &coupons,
            slug,
            self.other_stores_limit,
        ))
    }

    /// 启用商家的全部分类（去重、排序）
    pub async fn categories(&self) -> Result<Vec<String>> {
        let categories: BTreeSet<String> = self
            .storage
            .list(Collection::Stores)
            .await?
            .into_iter()
            .filter(|r| r.is_enabled() && !r.is_coupon())
            .filter_map(|r| r.category)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        Ok(categories.into_iter().collect())
    }

    /// 热门商家：priority 降序，其次最新
    pub async fn trending_stores(&self, limit: usize) -> Result<Vec<Record>> {
        let mut stores: Vec<Record> = self
            .storage
            .list(Collection::Stores)
            .await?
            .into_iter()
            .filter(|r| r.is_enabled() && !r.is_coupon() && r.trending == Some(true))
            .collect();

        stores.sort_by(|a, b| {
            b.priority
                .unwrap_or(0)
                .cmp(&a.priority.unwrap_or(0))
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        stores.truncate(limit);
        Ok(stores)
    }

    /// 点击跳转时按 id 查找记录（先查 stores，再查 coupons）
    pub async fn find_any(&self, id: &str) -> Result<Option<Record>> {
        if let Some(record) = self.storage.get(Collection::Stores, id).await? {
            return Ok(Some(record));
        }
        self.storage.get(Collection::Coupons, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_record_defaults() {
        let record = RecordInput::new("  Acme Outdoor ").into_record("id-1".into(), Utc::now());
        assert_eq!(record.name, "Acme Outdoor");
        assert_eq!(record.slug.as_deref(), Some("acme-outdoor"));
        assert_eq!(record.description, "Acme Outdoor");
        assert_eq!(record.expiry, crate::storage::models::DEFAULT_EXPIRY);
        assert_eq!(record.status, Some(RecordStatus::Enable));
        assert_eq!(record.kind, Some(RecordKind::Store));
    }

    #[test]
    fn test_into_record_coupon_kind() {
        let mut input = RecordInput::new("Acme");
        input.coupon_code = Some("SAVE10".to_string());
        input.slug = Some("   ".to_string());
        let record = input.into_record("id-2".into(), Utc::now());
        assert_eq!(record.kind, Some(RecordKind::Coupon));
        assert_eq!(record.slug.as_deref(), Some("acme"));
    }

    #[test]
    fn test_validate_requires_name() {
        assert!(RecordInput::new("   ").validate().is_err());
        assert!(RecordInput::new("Acme").validate().is_ok());
    }

    #[test]
    fn test_filter_search_and_category() {
        let mut record = RecordInput::new("Acme Outdoor").into_record("1".into(), Utc::now());
        record.category = Some("Sports".to_string());

        let filter = ListFilter {
            search: Some("OUTDOOR".to_string()),
            ..Default::default()
        };
        assert!(filter.accepts(&record));

        let filter = ListFilter {
            category: Some("sports".to_string()),
            ..Default::default()
        };
        assert!(filter.accepts(&record));

        let filter = ListFilter {
            search: Some("globex".to_string()),
            ..Default::default()
        };
        assert!(!filter.accepts(&record));
    }

    #[test]
    fn test_page_size_is_clamped() {
        let filter = ListFilter {
            page: Some(0),
            page_size: Some(1000),
            ..Default::default()
        };
        assert_eq!(filter.page(), 1);
        assert_eq!(filter.page_size(), MAX_PAGE_SIZE);
        assert_eq!(ListFilter::default().page_size(), DEFAULT_PAGE_SIZE);
    }
}
