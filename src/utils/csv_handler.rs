//! CSV 导出
//!
//! 导出的列名与导入时的别名表一致。导入按行解析，字段里含换行的记录
//! （例如多行 description）导出后不能原样重新导入。

use chrono::Utc;
use csv::WriterBuilder;
use serde::Serialize;

use crate::errors::{CouponError, Result};
use crate::storage::{Collection, Record};

/// CSV 行数据结构（仅用于序列化）
#[derive(Debug, Clone, Serialize)]
pub struct CsvRecordRow<'a> {
    pub name: &'a str,
    pub slug: String,
    pub description: &'a str,
    pub expiry: &'a str,
    #[serde(rename = "couponType")]
    pub coupon_type: &'a str,
    #[serde(rename = "couponCode")]
    pub coupon_code: &'a str,
    #[serde(rename = "couponTitle")]
    pub coupon_title: &'a str,
    pub status: &'a str,
    pub category: &'a str,
    #[serde(rename = "logoUrl")]
    pub logo_url: &'a str,
    #[serde(rename = "trackingUrl")]
    pub tracking_url: &'a str,
    #[serde(rename = "websiteUrl")]
    pub website_url: &'a str,
    pub link: &'a str,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl<'a> From<&'a Record> for CsvRecordRow<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            name: &record.name,
            slug: record.effective_slug(),
            description: &record.description,
            expiry: &record.expiry,
            coupon_type: record
                .coupon_type
                .as_ref()
                .map(AsRef::<str>::as_ref)
                .unwrap_or_default(),
            coupon_code: record.coupon_code.as_deref().unwrap_or_default(),
            coupon_title: record.coupon_title.as_deref().unwrap_or_default(),
            status: if record.is_enabled() { "enable" } else { "disable" },
            category: record.category.as_deref().unwrap_or_default(),
            logo_url: record.logo_url.as_deref().unwrap_or_default(),
            tracking_url: record.tracking_url.as_deref().unwrap_or_default(),
            website_url: record.website_url.as_deref().unwrap_or_default(),
            link: record.link.as_deref().unwrap_or_default(),
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// 把记录序列化为 CSV 文本（带表头）
pub fn export_records_csv(records: &[Record]) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    for record in records {
        writer.serialize(CsvRecordRow::from(record)).map_err(|e| {
            CouponError::serialization(format!("Failed to write CSV row: {}", e))
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CouponError::serialization(format!("Failed to flush CSV: {}", e.error())))?;

    String::from_utf8(bytes)
        .map_err(|e| CouponError::serialization(format!("CSV output is not UTF-8: {}", e)))
}

/// 生成默认导出文件名（带时间戳）
pub fn generate_export_filename(collection: Collection) -> String {
    format!(
        "{}_export_{}.csv",
        collection,
        Utc::now().format("%Y%m%d_%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::CouponType;

    #[test]
    fn test_export_header_and_row() {
        let mut record = Record::new("c1", "Acme", Utc::now());
        record.coupon_code = Some("SAVE10".to_string());
        record.coupon_type = Some(CouponType::Code);
        record.description = "Outdoor gear, tents".to_string();

        let csv = export_records_csv(&[record]).unwrap();
        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("name,slug,description,expiry,couponType,couponCode"));

        let row = lines.next().unwrap();
        assert!(row.starts_with("Acme,acme,\"Outdoor gear, tents\""));
        assert!(row.contains(",code,SAVE10,"));
        assert!(row.contains(",enable,"));
    }

    #[test]
    fn test_multiline_field_spans_lines() {
        let mut record = Record::new("c1", "Acme", Utc::now());
        record.description = "line one\nline two".to_string();

        let csv = export_records_csv(&[record]).unwrap();
        assert!(csv.contains("\"line one\nline two\""));
        // 按行切分时一条记录会变成两行
        assert_eq!(crate::utils::csv_line::split_lines(&csv).count(), 3);
    }

    #[test]
    fn test_export_empty_collection() {
        let csv = export_records_csv(&[]).unwrap();
        assert!(csv.is_empty());
    }

    #[test]
    fn test_generate_export_filename() {
        let filename = generate_export_filename(Collection::Coupons);
        assert!(filename.starts_with("coupons_export_"));
        assert!(filename.ends_with(".csv"));
    }
}
