//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, TransactionTrait, sea_query::Expr};
use tracing::info;

use super::converters::{click_to_active_model, post_to_active_model, record_to_row};
use super::{SeaOrmStorage, on_collection};
use crate::errors::{CouponError, Result};
use crate::storage::{BlogPost, ClickRecord, Collection, Record};

use migration::entities::{blog_post, click};

impl SeaOrmStorage {
    pub(super) async fn insert_record(&self, collection: Collection, record: &Record) -> Result<()> {
        use sea_orm::ActiveValue::Set;

        let (id, data, created_at) = record_to_row(record)?;
        on_collection!(collection, table => {
            let model = table::ActiveModel {
                id: Set(id),
                data: Set(data),
                created_at: Set(created_at),
            };
            table::Entity::insert(model)
                .exec(&self.db)
                .await
                .map_err(|e| {
                    CouponError::database_operation(format!("插入 {} 失败: {}", collection, e))
                })?;
        });
        Ok(())
    }

    /// 批量写入（使用事务）
    pub(super) async fn insert_records(
        &self,
        collection: Collection,
        records: &[Record],
    ) -> Result<usize> {
        use sea_orm::ActiveValue::Set;

        if records.is_empty() {
            return Ok(0);
        }

        let rows = records
            .iter()
            .map(record_to_row)
            .collect::<Result<Vec<_>>>()?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CouponError::database_operation(format!("开始事务失败: {}", e)))?;

        on_collection!(collection, table => {
            let models: Vec<table::ActiveModel> = rows
                .into_iter()
                .map(|(id, data, created_at)| table::ActiveModel {
                    id: Set(id),
                    data: Set(data),
                    created_at: Set(created_at),
                })
                .collect();
            table::Entity::insert_many(models)
                .exec(&txn)
                .await
                .map_err(|e| CouponError::database_operation(format!("批量插入失败: {}", e)))?;
        });

        txn.commit()
            .await
            .map_err(|e| CouponError::database_operation(format!("提交事务失败: {}", e)))?;

        info!("Batch inserted {} records into {}", records.len(), collection);
        Ok(records.len())
    }

    pub(super) async fn replace_record(&self, collection: Collection, record: &Record) -> Result<()> {
        // created_at 创建后不再修改，只更新 data 列
        let (id, data, _) = record_to_row(record)?;
        let rows_affected = on_collection!(collection, table => {
            table::Entity::update_many()
                .col_expr(table::Column::Data, Expr::value(data))
                .filter(table::Column::Id.eq(id.as_str()))
                .exec(&self.db)
                .await?
                .rows_affected
        });

        if rows_affected == 0 {
            return Err(CouponError::not_found(format!("Record {} not found", id)));
        }
        Ok(())
    }

    pub(super) async fn delete_record(&self, collection: Collection, id: &str) -> Result<()> {
        let rows_affected = on_collection!(collection, table => {
            table::Entity::delete_by_id(id.to_string())
                .exec(&self.db)
                .await
                .map_err(|e| CouponError::database_operation(format!("删除记录失败: {}", e)))?
                .rows_affected
        });

        if rows_affected == 0 {
            return Err(CouponError::not_found(format!("Record {} not found", id)));
        }

        info!("Record deleted from {}: {}", collection, id);
        Ok(())
    }

    pub(super) async fn delete_all_records(&self, collection: Collection) -> Result<u64> {
        let rows_affected = on_collection!(collection, table => {
            table::Entity::delete_many()
                .exec(&self.db)
                .await?
                .rows_affected
        });

        info!("Cleared {} records from {}", rows_affected, collection);
        Ok(rows_affected)
    }

    pub(super) async fn insert_post_row(&self, post: &BlogPost) -> Result<()> {
        blog_post::Entity::insert(post_to_active_model(post)?)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub(super) async fn replace_post_row(&self, post: &BlogPost) -> Result<()> {
        let data = serde_json::to_string(post)?;

        let result = blog_post::Entity::update_many()
            .col_expr(blog_post::Column::Slug, Expr::value(post.slug.clone()))
            .col_expr(blog_post::Column::Data, Expr::value(data))
            .filter(blog_post::Column::Id.eq(post.id.as_str()))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(CouponError::not_found(format!("Post {} not found", post.id)));
        }
        Ok(())
    }

    pub(super) async fn delete_post_row(&self, id: &str) -> Result<()> {
        let result = blog_post::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(CouponError::not_found(format!("Post {} not found", id)));
        }
        Ok(())
    }

    pub(super) async fn insert_click_row(&self, click: &ClickRecord) -> Result<()> {
        click::Entity::insert(click_to_active_model(click))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
