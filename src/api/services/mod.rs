pub mod admin;
pub mod health;
pub mod public;
pub mod redirect;

pub use admin::admin_routes;
pub use health::{AppStartTime, HealthService, health_routes};
pub use public::{PublicService, public_routes};
pub use redirect::{RedirectService, redirect_routes};

use actix_web::web;

use crate::api::state::AppState;

/// 注册全部路由：管理后台、健康检查、公开接口和点击跳转
pub fn configure_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.service(admin_routes(&state.admin, state.session.clone()))
        .service(health_routes())
        .service(public_routes())
        .service(redirect_routes());
}
