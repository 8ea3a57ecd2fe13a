//! Admin API 导出导入操作

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use actix_web::{HttpRequest, HttpResponse, web};
use futures_util::StreamExt;
use tracing::{error, info};

use crate::api::state::AppState;
use crate::utils::csv_handler::generate_export_filename;

use super::error_code::ErrorCode;
use super::helpers::{api_result, error_from_coupon, error_response, parse_collection};

/// 最大导入文件大小 (10MB)
const MAX_IMPORT_FILE_SIZE: usize = 10 * 1024 * 1024;

fn too_large() -> HttpResponse {
    error_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        ErrorCode::ImportFailed,
        &format!(
            "File size exceeds maximum {} MB",
            MAX_IMPORT_FILE_SIZE / 1024 / 1024
        ),
    )
}

/// 从 multipart 表单中读取 `file` 字段
async fn read_multipart_file(mut payload: Multipart) -> Result<Option<Vec<u8>>, HttpResponse> {
    let mut csv_data = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            error!("Failed to parse multipart field: {}", e);
            error_response(
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidMultipartData,
                &format!("Invalid multipart data: {}", e),
            )
        })?;

        if field.name() != Some("file") {
            // 忽略未知字段
            continue;
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let bytes = chunk.map_err(|e| {
                error!("Failed to read file chunk: {}", e);
                error_response(
                    StatusCode::BAD_REQUEST,
                    ErrorCode::InvalidMultipartData,
                    &format!("Failed to read file: {}", e),
                )
            })?;
            if data.len() + bytes.len() > MAX_IMPORT_FILE_SIZE {
                return Err(too_large());
            }
            data.extend_from_slice(&bytes);
        }
        csv_data = Some(data);
    }

    Ok(csv_data)
}

/// 读取原始请求体（text/csv 或 text/plain）
async fn read_raw_body(mut payload: web::Payload) -> Result<Vec<u8>, HttpResponse> {
    let mut data = Vec::new();
    while let Some(chunk) = payload.next().await {
        let bytes = chunk.map_err(|e| {
            error_response(
                StatusCode::BAD_REQUEST,
                ErrorCode::ImportFailed,
                &format!("Failed to read request body: {}", e),
            )
        })?;
        if data.len() + bytes.len() > MAX_IMPORT_FILE_SIZE {
            return Err(too_large());
        }
        data.extend_from_slice(&bytes);
    }
    Ok(data)
}

/// POST /admin/{collection}/import
///
/// 支持 multipart（`file` 字段）或直接提交 CSV 文本作为请求体。
pub async fn import_records(
    req: HttpRequest,
    payload: web::Payload,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let collection = match parse_collection(&path) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let is_multipart = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    let data = if is_multipart {
        match read_multipart_file(Multipart::new(req.headers(), payload)).await {
            Ok(Some(data)) => data,
            Ok(None) => Vec::new(),
            Err(resp) => return resp,
        }
    } else {
        match read_raw_body(payload).await {
            Ok(data) => data,
            Err(resp) => return resp,
        }
    };

    if data.iter().all(|b| b.is_ascii_whitespace()) {
        return error_response(
            StatusCode::BAD_REQUEST,
            ErrorCode::CsvFileMissing,
            "No CSV data provided",
        );
    }

    let text = String::from_utf8_lossy(&data);
    info!(
        "Admin API: import into {}, {} bytes (multipart={})",
        collection,
        data.len(),
        is_multipart
    );

    api_result(state.catalog.import_csv(collection, &text).await)
}

/// GET /admin/{collection}/export
pub async fn export_records(path: web::Path<String>, state: web::Data<AppState>) -> HttpResponse {
    let collection = match parse_collection(&path) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match state.catalog.export_csv(collection).await {
        Ok(csv) => {
            let filename = generate_export_filename(collection);
            info!("Admin API: exported {} as {}", collection, filename);
            HttpResponse::Ok()
                .insert_header((CONTENT_TYPE, "text/csv; charset=utf-8"))
                .insert_header((
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ))
                .body(csv)
        }
        Err(e) => error_from_coupon(&e),
    }
}
