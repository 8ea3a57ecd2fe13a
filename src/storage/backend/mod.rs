//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::errors::{CouponError, Result};
use crate::storage::{BlogPost, ClickRecord, Collection, Record, Storage};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{
    click_from_model, click_to_active_model, post_from_model, post_to_active_model,
    record_from_row, record_to_row,
};

/// 按集合分派到 `stores` / `coupons` 两张结构相同的表
///
/// ```ignore
/// on_collection!(collection, table => table::Entity::find().all(db).await)
/// ```
macro_rules! on_collection {
    ($collection:expr, $table:ident => $body:expr) => {
        match $collection {
            $crate::storage::Collection::Stores => {
                use migration::entities::store_record as $table;
                $body
            }
            $crate::storage::Collection::Coupons => {
                use migration::entities::coupon_record as $table;
                $body
            }
        }
    };
}
pub(crate) use on_collection;

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(CouponError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 规范化 backend 名称
pub fn normalize_backend_name(backend: &str) -> String {
    match backend {
        "mariadb" => "mysql".to_string(),
        other => other.to_string(),
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str, pool_size: u32) -> Result<Self> {
        if database_url.is_empty() {
            return Err(CouponError::database_config("database_url 未设置"));
        }

        let backend_name = normalize_backend_name(backend_name);

        // 根据不同数据库类型配置连接选项
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, &backend_name, pool_size).await?
        };

        let storage = SeaOrmStorage { db, backend_name };

        // 运行迁移
        run_migrations(&storage.db).await?;

        info!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn list(&self, collection: Collection) -> Result<Vec<Record>> {
        self.query_records(collection).await
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Record>> {
        self.query_record(collection, id).await
    }

    async fn insert(&self, collection: Collection, record: Record) -> Result<()> {
        self.insert_record(collection, &record).await
    }

    async fn insert_many(&self, collection: Collection, records: Vec<Record>) -> Result<usize> {
        self.insert_records(collection, &records).await
    }

    async fn update(&self, collection: Collection, record: Record) -> Result<()> {
        self.replace_record(collection, &record).await
    }

    async fn remove(&self, collection: Collection, id: &str) -> Result<()> {
        self.delete_record(collection, id).await
    }

    async fn clear(&self, collection: Collection) -> Result<u64> {
        self.delete_all_records(collection).await
    }

    async fn list_posts(&self) -> Result<Vec<BlogPost>> {
        self.query_posts().await
    }

    async fn get_post(&self, id: &str) -> Result<Option<BlogPost>> {
        self.query_post(id).await
    }

    async fn insert_post(&self, post: BlogPost) -> Result<()> {
        self.insert_post_row(&post).await
    }

    async fn update_post(&self, post: BlogPost) -> Result<()> {
        self.replace_post_row(&post).await
    }

    async fn remove_post(&self, id: &str) -> Result<()> {
        self.delete_post_row(id).await
    }

    async fn append_click(&self, click: ClickRecord) -> Result<()> {
        self.insert_click_row(&click).await
    }

    async fn list_clicks(&self) -> Result<Vec<ClickRecord>> {
        self.query_clicks().await
    }

    fn backend_name(&self) -> &str {
        &self.backend_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_backend_from_url() {
        assert_eq!(infer_backend_from_url("sqlite://data.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("sqlite::memory:").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("catalog.sqlite").unwrap(), "sqlite");
        assert_eq!(
            infer_backend_from_url("mariadb://u:p@localhost/db").unwrap(),
            "mysql"
        );
        assert_eq!(
            infer_backend_from_url("postgresql://localhost/db").unwrap(),
            "postgres"
        );
        assert!(infer_backend_from_url("redis://localhost").is_err());
    }

    #[test]
    fn test_normalize_backend_name() {
        assert_eq!(normalize_backend_name("mariadb"), "mysql");
        assert_eq!(normalize_backend_name("postgres"), "postgres");
    }
}
