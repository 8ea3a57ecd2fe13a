//! Admin API 点击统计

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::api::state::AppState;

use super::helpers::api_result;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickQuery {
    /// 只看某个 store / coupon
    pub store_id: Option<String>,
}

/// GET /admin/analytics/clicks
pub async fn click_counts(
    state: web::Data<AppState>,
    query: web::Query<ClickQuery>,
) -> HttpResponse {
    match query.store_id.as_deref().filter(|id| !id.is_empty()) {
        Some(store_id) => api_result(state.clicks.count_for(store_id).await.map(|clicks| {
            serde_json::json!({ "storeId": store_id, "clicks": clicks })
        })),
        None => api_result(state.clicks.counts().await),
    }
}

/// 统计路由 `/analytics`
pub fn analytics_routes() -> actix_web::Scope {
    web::scope("/analytics").route("/clicks", web::get().to(click_counts))
}
