//! 前台公开接口 `/api`
//!
//! 只返回启用状态的记录，不需要登录。

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::{debug, trace};

use crate::api::constants::DEFAULT_TRENDING_LIMIT;
use crate::api::services::admin::{
    ErrorCode, api_result, error_from_coupon, json_response, success_response,
};
use crate::api::state::AppState;
use crate::services::ListFilter;
use crate::storage::{Collection, RecordKind};

#[derive(Debug, Default, Deserialize)]
pub struct TrendingQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BlogQuery {
    #[serde(default)]
    pub featured: bool,
}

pub struct PublicService;

impl PublicService {
    /// GET /api/stores
    pub async fn list_stores(
        state: web::Data<AppState>,
        query: web::Query<ListFilter>,
    ) -> HttpResponse {
        let mut filter = query.into_inner().enabled_only();
        filter.kind.get_or_insert(RecordKind::Store);
        Self::list(&state, Collection::Stores, filter).await
    }

    /// GET /api/coupons
    pub async fn list_coupons(
        state: web::Data<AppState>,
        query: web::Query<ListFilter>,
    ) -> HttpResponse {
        Self::list(&state, Collection::Coupons, query.into_inner().enabled_only()).await
    }

    async fn list(state: &AppState, collection: Collection, filter: ListFilter) -> HttpResponse {
        trace!("Public API: list {} with {:?}", collection, filter);
        match state.catalog.list_records(collection, &filter).await {
            Ok(page) => success_response(page),
            Err(e) => error_from_coupon(&e),
        }
    }

    /// GET /api/stores/{slug}
    ///
    /// 找不到商家时返回 404，但仍然带上空的页面数据
    pub async fn store_page(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
        let slug = path.into_inner();
        match state.catalog.store_page(&slug).await {
            Ok(data) if data.is_found() => success_response(data),
            Ok(data) => {
                debug!("Public API: store page not found for slug '{}'", slug);
                json_response(
                    StatusCode::NOT_FOUND,
                    ErrorCode::RecordNotFound,
                    "Store not found",
                    Some(data),
                )
            }
            Err(e) => error_from_coupon(&e),
        }
    }

    /// GET /api/categories
    pub async fn categories(state: web::Data<AppState>) -> HttpResponse {
        api_result(state.catalog.categories().await)
    }

    /// GET /api/trending
    pub async fn trending(
        state: web::Data<AppState>,
        query: web::Query<TrendingQuery>,
    ) -> HttpResponse {
        let limit = query.limit.unwrap_or(DEFAULT_TRENDING_LIMIT);
        api_result(state.catalog.trending_stores(limit).await)
    }

    /// GET /api/blog
    pub async fn blog_posts(
        state: web::Data<AppState>,
        query: web::Query<BlogQuery>,
    ) -> HttpResponse {
        api_result(state.blog.list_posts(query.featured).await)
    }

    /// GET /api/blog/{slug}
    pub async fn blog_post(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
        api_result(state.blog.get_by_slug(&path).await)
    }
}

/// 公开接口路由
pub fn public_routes() -> actix_web::Scope {
    web::scope("/api")
        .route("/stores", web::get().to(PublicService::list_stores))
        .route("/stores/{slug}", web::get().to(PublicService::store_page))
        .route("/coupons", web::get().to(PublicService::list_coupons))
        .route("/categories", web::get().to(PublicService::categories))
        .route("/trending", web::get().to(PublicService::trending))
        .route("/blog", web::get().to(PublicService::blog_posts))
        .route("/blog/{slug}", web::get().to(PublicService::blog_post))
}
