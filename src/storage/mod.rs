use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::{BackendKind, StorageConfig};
use crate::errors::Result;

pub mod backend;
pub mod file;
pub mod models;

pub use backend::SeaOrmStorage;
pub use file::FileStorage;
pub use models::{
    BlogPost, ClickRecord, Collection, CouponType, Faq, Record, RecordKind, RecordStatus,
    is_meaningful,
};

/// 存储端口
///
/// 所有 `list*` 方法按 `created_at` 倒序返回（最新的在前）。
/// 没有锁也没有版本号，后写入者覆盖先写入者。
#[async_trait]
pub trait Storage: Send + Sync {
    async fn list(&self, collection: Collection) -> Result<Vec<Record>>;
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Record>>;
    async fn insert(&self, collection: Collection, record: Record) -> Result<()>;
    /// 批量写入，返回写入条数
    async fn insert_many(&self, collection: Collection, records: Vec<Record>) -> Result<usize>;
    /// 按 id 整体替换，记录不存在时返回 NotFound
    async fn update(&self, collection: Collection, record: Record) -> Result<()>;
    /// 按 id 删除，记录不存在时返回 NotFound
    async fn remove(&self, collection: Collection, id: &str) -> Result<()>;
    /// 清空集合，返回删除条数
    async fn clear(&self, collection: Collection) -> Result<u64>;

    async fn list_posts(&self) -> Result<Vec<BlogPost>>;
    async fn get_post(&self, id: &str) -> Result<Option<BlogPost>>;
    async fn insert_post(&self, post: BlogPost) -> Result<()>;
    async fn update_post(&self, post: BlogPost) -> Result<()>;
    async fn remove_post(&self, id: &str) -> Result<()>;

    async fn append_click(&self, click: ClickRecord) -> Result<()>;
    async fn list_clicks(&self) -> Result<Vec<ClickRecord>>;

    fn backend_name(&self) -> &str;
}

pub struct StorageFactory;

impl StorageFactory {
    /// 根据配置选择存储后端，只在启动时调用一次
    pub async fn create(config: &StorageConfig) -> Result<Arc<dyn Storage>> {
        let storage: Arc<dyn Storage> = match config.resolved_backend() {
            BackendKind::Database => {
                // 从 URL 自动推断数据库类型
                let backend_type = backend::infer_backend_from_url(&config.database_url)?;
                Arc::new(
                    SeaOrmStorage::new(&config.database_url, &backend_type, config.pool_size)
                        .await?,
                )
            }
            BackendKind::File | BackendKind::Auto => Arc::new(FileStorage::new(&config.data_dir)?),
        };

        info!("Storage backend selected: {}", storage.backend_name());
        Ok(storage)
    }
}
