//! Admin API store / coupon CRUD 操作

use actix_web::{HttpResponse, web};
use tracing::{info, trace};

use crate::api::state::AppState;
use crate::services::{ListFilter, RecordInput};

use super::helpers::{
    api_result, created_response, error_from_coupon, paginated_response, parse_collection,
};
use super::types::DeleteAllResponse;

/// GET /admin/{collection}
pub async fn list_records(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ListFilter>,
) -> HttpResponse {
    let collection = match parse_collection(&path) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    trace!("Admin API: list {} with {:?}", collection, query);

    match state.catalog.list_records(collection, &query).await {
        Ok(page) => paginated_response(page),
        Err(e) => error_from_coupon(&e),
    }
}

/// POST /admin/{collection}
pub async fn create_record(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<RecordInput>,
) -> HttpResponse {
    let collection = match parse_collection(&path) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match state.catalog.create_record(collection, body.into_inner()).await {
        Ok(record) => created_response(record),
        Err(e) => error_from_coupon(&e),
    }
}

/// DELETE /admin/{collection}
pub async fn delete_all_records(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let collection = match parse_collection(&path) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    info!("Admin API: delete all records in {}", collection);
    api_result(
        state
            .catalog
            .delete_all(collection)
            .await
            .map(|deleted| DeleteAllResponse { deleted }),
    )
}

/// GET /admin/{collection}/{id}
pub async fn get_record(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (collection, id) = path.into_inner();
    let collection = match parse_collection(&collection) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    api_result(state.catalog.get_record(collection, &id).await)
}

/// PUT /admin/{collection}/{id}
pub async fn update_record(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Json<RecordInput>,
) -> HttpResponse {
    let (collection, id) = path.into_inner();
    let collection = match parse_collection(&collection) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    api_result(
        state
            .catalog
            .update_record(collection, &id, body.into_inner())
            .await,
    )
}

/// DELETE /admin/{collection}/{id}
pub async fn delete_record(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (collection, id) = path.into_inner();
    let collection = match parse_collection(&collection) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    api_result(
        state
            .catalog
            .delete_record(collection, &id)
            .await
            .map(|()| serde_json::json!({ "id": id })),
    )
}
