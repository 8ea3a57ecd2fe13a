//! 批量导入：CSV 表头别名映射 + 记录构造
//!
//! 表头比较时忽略大小写、空白、`_` 和 `-`，例如 `Store Name`、`store_name`
//! 都映射到 `name`。`id` 和 `createdAt` 在写入时分配，这里不处理。

use std::collections::HashMap;

use tracing::debug;

use super::catalog_service::RecordInput;
use crate::storage::{CouponType, RecordStatus};
use crate::utils::csv_line::{parse_line, split_lines};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Field {
    Name,
    Slug,
    Description,
    Desc,
    Details,
    Expiry,
    CouponType,
    CouponCode,
    CouponTitle,
    Status,
    Category,
    LogoUrl,
    TrackingUrl,
    WebsiteUrl,
    Link,
    CountryCodes,
    Trending,
    Priority,
}

/// 规范化后的表头 -> 字段
const HEADER_ALIASES: &[(&str, Field)] = &[
    ("name", Field::Name),
    ("storename", Field::Name),
    ("store", Field::Name),
    ("slug", Field::Slug),
    ("description", Field::Description),
    ("desc", Field::Desc),
    ("details", Field::Details),
    ("expiry", Field::Expiry),
    ("expires", Field::Expiry),
    ("expirydate", Field::Expiry),
    ("coupontype", Field::CouponType),
    ("type", Field::CouponType),
    ("couponcode", Field::CouponCode),
    ("code", Field::CouponCode),
    ("coupontitle", Field::CouponTitle),
    ("title", Field::CouponTitle),
    ("status", Field::Status),
    ("category", Field::Category),
    ("logo", Field::LogoUrl),
    ("logourl", Field::LogoUrl),
    ("trackingurl", Field::TrackingUrl),
    ("trackinglink", Field::TrackingUrl),
    ("websiteurl", Field::WebsiteUrl),
    ("website", Field::WebsiteUrl),
    ("link", Field::Link),
    ("countrycodes", Field::CountryCodes),
    ("country", Field::CountryCodes),
    ("trending", Field::Trending),
    ("priority", Field::Priority),
];

/// 规范化结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportBatch {
    pub inputs: Vec<RecordInput>,
    /// 因为缺少名称而跳过的行数
    pub skipped: usize,
}

fn normalize_header(header: &str) -> String {
    header
        .trim()
        .trim_start_matches('\u{feff}')
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// 表头列位置；同一字段出现多次时取第一列
fn column_map(header: &[String]) -> HashMap<Field, usize> {
    let mut columns = HashMap::new();
    for (idx, raw) in header.iter().enumerate() {
        let key = normalize_header(raw);
        match HEADER_ALIASES.iter().find(|(alias, _)| *alias == key) {
            Some((_, field)) => {
                columns.entry(*field).or_insert(idx);
            }
            None => debug!("Ignoring unknown import column: {:?}", raw),
        }
    }
    columns
}

fn parse_status(value: &str) -> Option<RecordStatus> {
    match value.trim().to_lowercase().as_str() {
        "enable" | "enabled" | "active" => Some(RecordStatus::Enable),
        "disable" | "disabled" | "inactive" => Some(RecordStatus::Disable),
        _ => None,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// 将表头和数据行规范化为记录输入
pub fn normalize_rows(header: &[String], rows: &[Vec<String>]) -> ImportBatch {
    let columns = column_map(header);
    let mut batch = ImportBatch::default();

    for row in rows {
        let cell = |field: Field| -> Option<String> {
            columns
                .get(&field)
                .and_then(|idx| row.get(*idx))
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let Some(name) = cell(Field::Name) else {
            batch.skipped += 1;
            continue;
        };

        let description = cell(Field::Description)
            .or_else(|| cell(Field::Desc))
            .or_else(|| cell(Field::Details))
            .unwrap_or_else(|| name.clone());

        batch.inputs.push(RecordInput {
            name,
            slug: cell(Field::Slug),
            description: Some(description),
            expiry: cell(Field::Expiry),
            coupon_code: cell(Field::CouponCode),
            coupon_title: cell(Field::CouponTitle),
            coupon_type: cell(Field::CouponType).and_then(|t| t.parse::<CouponType>().ok()),
            status: cell(Field::Status).and_then(|s| parse_status(&s)),
            trending: cell(Field::Trending).and_then(|t| parse_flag(&t)),
            priority: cell(Field::Priority).and_then(|p| p.parse().ok()),
            category: cell(Field::Category),
            logo_url: cell(Field::LogoUrl),
            tracking_url: cell(Field::TrackingUrl),
            website_url: cell(Field::WebsiteUrl),
            link: cell(Field::Link),
            country_codes: cell(Field::CountryCodes),
            ..Default::default()
        });
    }

    batch
}

/// 解析整段 CSV 文本：第一行为表头，空行忽略
pub fn parse_import_csv(text: &str) -> ImportBatch {
    let mut lines = split_lines(text);
    let Some(header_line) = lines.next() else {
        return ImportBatch::default();
    };

    let header = parse_line(header_line);
    let rows: Vec<Vec<String>> = lines.map(parse_line).collect();
    normalize_rows(&header, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_store_name_alias_and_description_fallback() {
        let batch = normalize_rows(&strings(&["Store Name"]), &[strings(&["Acme"])]);
        assert_eq!(batch.skipped, 0);
        assert_eq!(batch.inputs.len(), 1);
        assert_eq!(batch.inputs[0].name, "Acme");
        assert_eq!(batch.inputs[0].description.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_description_chain_order() {
        let header = strings(&["name", "details", "desc"]);
        let batch = normalize_rows(&header, &[strings(&["Acme", "from details", "from desc"])]);
        assert_eq!(batch.inputs[0].description.as_deref(), Some("from desc"));

        let batch = normalize_rows(&header, &[strings(&["Acme", "from details", ""])]);
        assert_eq!(batch.inputs[0].description.as_deref(), Some("from details"));
    }

    #[test]
    fn test_empty_names_are_skipped() {
        let batch = normalize_rows(
            &strings(&["name", "logo"]),
            &[strings(&["", "x.png"]), strings(&["Acme"]), strings(&["  "])],
        );
        assert_eq!(batch.inputs.len(), 1);
        assert_eq!(batch.skipped, 2);
        assert_eq!(batch.inputs[0].logo_url, None);
    }

    #[test]
    fn test_coupon_passthrough() {
        let header = strings(&["Name", "Type", "Code", "Title", "Status", "Logo URL"]);
        let row = strings(&["Acme", "CODE", "SAVE10", "10% off", "disabled", "a.png"]);
        let batch = normalize_rows(&header, &[row]);
        let input = &batch.inputs[0];
        assert_eq!(input.coupon_type, Some(CouponType::Code));
        assert_eq!(input.coupon_code.as_deref(), Some("SAVE10"));
        assert_eq!(input.coupon_title.as_deref(), Some("10% off"));
        assert_eq!(input.status, Some(RecordStatus::Disable));
        assert_eq!(input.logo_url.as_deref(), Some("a.png"));
    }

    #[test]
    fn test_parse_import_csv() {
        let text = "store_name,description\r\nAcme,\"Tents, stoves\"\n\n,orphan\nGlobex,\n";
        let batch = parse_import_csv(text);
        assert_eq!(batch.inputs.len(), 2);
        assert_eq!(batch.skipped, 1);
        assert_eq!(batch.inputs[0].description.as_deref(), Some("Tents, stoves"));
        assert_eq!(batch.inputs[1].description.as_deref(), Some("Globex"));
    }

    #[test]
    fn test_header_only_is_empty() {
        assert_eq!(parse_import_csv("name,slug\n"), ImportBatch::default());
        assert_eq!(parse_import_csv(""), ImportBatch::default());
    }
}
