//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{EntityTrait, QueryOrder};
use tracing::{debug, error};

use super::converters::{click_from_model, post_from_model, record_from_row};
use super::{SeaOrmStorage, on_collection};
use crate::errors::{CouponError, Result};
use crate::storage::{BlogPost, ClickRecord, Collection, Record};

use migration::entities::{blog_post, click};

impl SeaOrmStorage {
    pub(super) async fn query_records(&self, collection: Collection) -> Result<Vec<Record>> {
        let rows: Vec<(String, String, chrono::DateTime<chrono::Utc>)> =
            on_collection!(collection, table => {
                table::Entity::find()
                    .order_by_desc(table::Column::CreatedAt)
                    .all(&self.db)
                    .await
                    .map_err(|e| {
                        error!("加载 {} 失败: {}", collection, e);
                        CouponError::database_operation(format!("加载 {} 失败: {}", collection, e))
                    })?
                    .into_iter()
                    .map(|m| (m.id, m.data, m.created_at))
                    .collect()
            });

        debug!("Loaded {} rows from {}", rows.len(), collection);
        rows.into_iter()
            .map(|(id, data, created_at)| record_from_row(id, &data, created_at))
            .collect()
    }

    pub(super) async fn query_record(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Record>> {
        let row = on_collection!(collection, table => {
            table::Entity::find_by_id(id.to_string())
                .one(&self.db)
                .await?
                .map(|m| (m.id, m.data, m.created_at))
        });

        row.map(|(id, data, created_at)| record_from_row(id, &data, created_at))
            .transpose()
    }

    pub(super) async fn query_posts(&self) -> Result<Vec<BlogPost>> {
        blog_post::Entity::find()
            .order_by_desc(blog_post::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(post_from_model)
            .collect()
    }

    pub(super) async fn query_post(&self, id: &str) -> Result<Option<BlogPost>> {
        blog_post::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .map(post_from_model)
            .transpose()
    }

    pub(super) async fn query_clicks(&self) -> Result<Vec<ClickRecord>> {
        let models = click::Entity::find()
            .order_by_desc(click::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(click_from_model).collect())
    }
}
