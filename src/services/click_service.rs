//! Click tracking service
//!
//! 记录是尽力而为的：写入失败只记日志，不重试，也不影响跳转。

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error};

use crate::errors::Result;
use crate::storage::{ClickRecord, Storage};
use crate::utils::generate_id;

/// 单个 store / coupon 的点击数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickCount {
    pub store_id: String,
    pub clicks: usize,
}

pub struct ClickService {
    storage: Arc<dyn Storage>,
}

impl ClickService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 追加一条点击，返回是否写入成功
    pub async fn record(&self, store_id: &str) -> bool {
        let click = ClickRecord {
            id: generate_id(),
            store_id: store_id.to_string(),
            created_at: Utc::now(),
        };

        match self.storage.append_click(click).await {
            Ok(()) => {
                debug!("Click recorded for {}", store_id);
                true
            }
            Err(e) => {
                error!("Failed to record click for {}: {}", store_id, e);
                false
            }
        }
    }

    /// 扫描全部点击日志，按点击数降序
    pub async fn counts(&self) -> Result<Vec<ClickCount>> {
        let mut totals: HashMap<String, usize> = HashMap::new();
        for click in self.storage.list_clicks().await? {
            *totals.entry(click.store_id).or_default() += 1;
        }

        let mut counts: Vec<ClickCount> = totals
            .into_iter()
            .map(|(store_id, clicks)| ClickCount { store_id, clicks })
            .collect();
        counts.sort_by(|a, b| {
            b.clicks
                .cmp(&a.clicks)
                .then_with(|| a.store_id.cmp(&b.store_id))
        });
        Ok(counts)
    }

    pub async fn count_for(&self, store_id: &str) -> Result<usize> {
        Ok(self
            .storage
            .list_clicks()
            .await?
            .iter()
            .filter(|c| c.store_id == store_id)
            .count())
    }
}
