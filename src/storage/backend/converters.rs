use chrono::{DateTime, Utc};

use crate::errors::{CouponError, Result};
use crate::storage::{BlogPost, ClickRecord, Record};
use migration::entities::{blog_post, click};

/// 将 `{id, data, created_at}` 行还原为 Record，行上的 id 为准
pub fn record_from_row(id: String, data: &str, created_at: DateTime<Utc>) -> Result<Record> {
    let mut record: Record = serde_json::from_str(data).map_err(|e| {
        CouponError::serialization(format!("Corrupt record data for {}: {}", id, e))
    })?;
    record.id = id;
    record.created_at = created_at;
    Ok(record)
}

/// 将 Record 拆成 `(id, data, created_at)` 三列
pub fn record_to_row(record: &Record) -> Result<(String, String, DateTime<Utc>)> {
    let data = serde_json::to_string(record)?;
    Ok((record.id.clone(), data, record.created_at))
}

/// 将 Sea-ORM Model 转换为 BlogPost
pub fn post_from_model(model: blog_post::Model) -> Result<BlogPost> {
    let mut post: BlogPost = serde_json::from_str(&model.data).map_err(|e| {
        CouponError::serialization(format!("Corrupt blog post data for {}: {}", model.id, e))
    })?;
    post.id = model.id;
    post.slug = model.slug;
    post.created_at = model.created_at;
    Ok(post)
}

/// 将 BlogPost 转换为 ActiveModel（用于插入/更新）
pub fn post_to_active_model(post: &BlogPost) -> Result<blog_post::ActiveModel> {
    use sea_orm::ActiveValue::*;

    Ok(blog_post::ActiveModel {
        id: Set(post.id.clone()),
        slug: Set(post.slug.clone()),
        data: Set(serde_json::to_string(post)?),
        created_at: Set(post.created_at),
    })
}

pub fn click_from_model(model: click::Model) -> ClickRecord {
    ClickRecord {
        id: model.id,
        store_id: model.store_id,
        created_at: model.created_at,
    }
}

pub fn click_to_active_model(click: &ClickRecord) -> click::ActiveModel {
    use sea_orm::ActiveValue::*;

    click::ActiveModel {
        id: Set(click.id.clone()),
        store_id: Set(click.store_id.clone()),
        created_at: Set(click.created_at),
    }
}
