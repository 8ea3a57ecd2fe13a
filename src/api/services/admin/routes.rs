//! Admin API 路由配置
//!
//! 所有路由都挂在 `/admin` 下，由 [`AdminAuth`] 统一做会话校验。

use std::sync::Arc;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::web;

use crate::api::constants::ADMIN_PREFIX;
use crate::api::middleware::AdminAuth;
use crate::api::session::SessionSigner;
use crate::config::AdminConfig;

use super::analytics::analytics_routes;
use super::auth::{login, login_rate_limiter, logout, session};
use super::blog::{create_post, delete_post, list_posts, update_post};
use super::import_export::{export_records, import_records};
use super::records::{
    create_record, delete_all_records, delete_record, get_record, list_records, update_record,
};

/// 博客管理路由 `/blog`
pub fn blog_routes() -> actix_web::Scope {
    web::scope("/blog")
        .route("", web::get().to(list_posts))
        .route("", web::post().to(create_post))
        .route("/{id}", web::put().to(update_post))
        .route("/{id}", web::delete().to(delete_post))
}

/// store / coupon 管理路由 `/{collection}`
///
/// 包含：
/// - GET /{collection} - 分页列表
/// - POST /{collection} - 创建
/// - DELETE /{collection} - 清空
/// - POST /{collection}/import - CSV 导入
/// - GET /{collection}/export - CSV 导出
/// - GET/PUT/DELETE /{collection}/{id} - 单条操作
pub fn record_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{collection}", web::get().to(list_records))
        .route("/{collection}", web::post().to(create_record))
        .route("/{collection}", web::delete().to(delete_all_records))
        // import/export must be before /{collection}/{id}
        .route("/{collection}/import", web::post().to(import_records))
        .route("/{collection}/export", web::get().to(export_records))
        .route("/{collection}/{id}", web::get().to(get_record))
        .route("/{collection}/{id}", web::put().to(update_record))
        .route("/{collection}/{id}", web::delete().to(delete_record));
}

/// Admin 路由
///
/// 组合所有子模块路由，固定路径在通配路径之前注册
pub fn admin_routes(
    config: &AdminConfig,
    signer: Arc<SessionSigner>,
) -> actix_web::Scope<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    web::scope(ADMIN_PREFIX)
        .wrap(AdminAuth::new(signer, config.is_enabled()))
        .route(
            "/login",
            web::post().to(login).wrap(login_rate_limiter(config)),
        )
        .route("/logout", web::post().to(logout))
        .route("/session", web::get().to(session))
        .service(blog_routes())
        .service(analytics_routes())
        .configure(record_routes)
}
