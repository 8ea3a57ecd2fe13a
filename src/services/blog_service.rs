//! Blog service

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{CouponError, Result};
use crate::storage::{BlogPost, Storage};
use crate::utils::generate_id;
use crate::utils::slug::slugify;

/// 创建或整体替换文章时的输入
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogPostInput {
    pub title: String,
    pub slug: Option<String>,
    pub category: String,
    pub excerpt: String,
    pub image: String,
    pub featured: bool,
    pub content: String,
    pub published_date: Option<String>,
}

impl BlogPostInput {
    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CouponError::validation("Title is required"));
        }
        if self.resolved_slug().is_empty() {
            return Err(CouponError::validation(
                "Slug is required when the title has no letters or digits",
            ));
        }
        Ok(())
    }

    fn resolved_slug(&self) -> String {
        match self.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => slugify(&self.title),
        }
    }

    fn into_post(self, id: String, created_at: chrono::DateTime<Utc>) -> BlogPost {
        let slug = self.resolved_slug();
        BlogPost {
            id,
            title: self.title.trim().to_string(),
            slug,
            category: self.category,
            excerpt: self.excerpt,
            image: self.image,
            featured: self.featured,
            content: self.content,
            created_at,
            published_date: self.published_date.filter(|d| !d.trim().is_empty()),
        }
    }
}

pub struct BlogService {
    storage: Arc<dyn Storage>,
}

impl BlogService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 最新的在前
    pub async fn list_posts(&self, featured_only: bool) -> Result<Vec<BlogPost>> {
        let posts = self.storage.list_posts().await?;
        Ok(posts
            .into_iter()
            .filter(|p| !featured_only || p.featured)
            .collect())
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<BlogPost> {
        let wanted = slug.trim();
        self.storage
            .list_posts()
            .await?
            .into_iter()
            .find(|p| p.slug == wanted)
            .ok_or_else(|| CouponError::not_found(format!("Post '{}' not found", wanted)))
    }

    /// slug 只在创建时检查唯一性
    pub async fn create_post(&self, input: BlogPostInput) -> Result<BlogPost> {
        input.validate()?;

        let slug = input.resolved_slug();
        let posts = self.storage.list_posts().await?;
        if posts.iter().any(|p| p.slug == slug) {
            return Err(CouponError::conflict(format!(
                "A post with slug '{}' already exists",
                slug
            )));
        }

        let post = input.into_post(generate_id(), Utc::now());
        self.storage.insert_post(post.clone()).await?;

        info!("BlogService: created post '{}'", post.slug);
        Ok(post)
    }

    pub async fn update_post(&self, id: &str, input: BlogPostInput) -> Result<BlogPost> {
        input.validate()?;

        let existing = self
            .storage
            .get_post(id)
            .await?
            .ok_or_else(|| CouponError::not_found(format!("Post '{}' not found", id)))?;

        let post = input.into_post(existing.id, existing.created_at);
        self.storage.update_post(post.clone()).await?;

        info!("BlogService: updated post '{}'", id);
        Ok(post)
    }

    pub async fn delete_post(&self, id: &str) -> Result<()> {
        self.storage.remove_post(id).await?;
        info!("BlogService: deleted post '{}'", id);
        Ok(())
    }
}
