//! Admin API 博客文章管理

use actix_web::{HttpResponse, web};

use crate::api::state::AppState;
use crate::services::BlogPostInput;

use super::helpers::{api_result, created_response, error_from_coupon};

/// GET /admin/blog
pub async fn list_posts(state: web::Data<AppState>) -> HttpResponse {
    api_result(state.blog.list_posts(false).await)
}

/// POST /admin/blog
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<BlogPostInput>,
) -> HttpResponse {
    match state.blog.create_post(body.into_inner()).await {
        Ok(post) => created_response(post),
        Err(e) => error_from_coupon(&e),
    }
}

/// PUT /admin/blog/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<BlogPostInput>,
) -> HttpResponse {
    api_result(state.blog.update_post(&path, body.into_inner()).await)
}

/// DELETE /admin/blog/{id}
pub async fn delete_post(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    api_result(
        state
            .blog
            .delete_post(&id)
            .await
            .map(|()| serde_json::json!({ "id": id })),
    )
}
