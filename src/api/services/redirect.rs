//! 点击跳转 `/go`
//!
//! 先记录点击（失败只写日志），再 302 到目标地址。

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::api::state::AppState;
use crate::utils::url_validator::parse_redirect_target;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectQuery {
    pub store_id: Option<String>,
    pub url: Option<String>,
}

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        state: web::Data<AppState>,
        query: web::Query<RedirectQuery>,
    ) -> HttpResponse {
        let query = query.into_inner();
        let store_id = query
            .store_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty());

        if let Some(store_id) = store_id {
            state.clicks.record(store_id).await;
        }

        let target = match query.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => Some(url.to_string()),
            None => match store_id {
                Some(id) => Self::lookup_target(&state, id).await,
                None => None,
            },
        };

        let location = target
            .and_then(|raw| match parse_redirect_target(&raw) {
                Ok(url) => Some(url.to_string()),
                Err(e) => {
                    warn!("Rejected redirect target '{}': {}", raw, e);
                    None
                }
            })
            .unwrap_or_else(|| state.site.default_redirect.clone());

        trace!("Redirecting to {}", location);
        HttpResponse::Found()
            .insert_header((LOCATION, location))
            .finish()
    }

    async fn lookup_target(state: &AppState, id: &str) -> Option<String> {
        match state.catalog.find_any(id).await {
            Ok(Some(record)) => record.outbound_url().map(str::to_string),
            Ok(None) => {
                debug!("Redirect record not found: {}", id);
                None
            }
            Err(e) => {
                warn!("Redirect lookup failed for {}: {}", id, e);
                None
            }
        }
    }
}

/// 跳转路由
pub fn redirect_routes() -> actix_web::Resource {
    web::resource("/go").route(web::get().to(RedirectService::handle_redirect))
}
