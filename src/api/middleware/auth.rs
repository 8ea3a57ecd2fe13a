use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::CONTENT_TYPE,
};
use chrono::Utc;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, info, trace};

use crate::api::constants;
use crate::api::services::admin::{ApiResponse, ErrorCode};
use crate::api::session::SessionSigner;

/// Admin authentication middleware
///
/// 管理后台关闭（未设置密码）时所有 `/admin` 请求返回 404；
/// 否则除登录端点外都需要有效的会话 Cookie。
#[derive(Clone)]
pub struct AdminAuth {
    signer: Arc<SessionSigner>,
    enabled: bool,
}

impl AdminAuth {
    pub fn new(signer: Arc<SessionSigner>, enabled: bool) -> Self {
        Self { signer, enabled }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAuthMiddleware {
            service: Rc::new(service),
            signer: self.signer.clone(),
            enabled: self.enabled,
        }))
    }
}

pub struct AdminAuthMiddleware<S> {
    service: Rc<S>,
    signer: Arc<SessionSigner>,
    enabled: bool,
}

impl<S, B> AdminAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    /// Handle requests when admin password is not configured
    fn handle_disabled(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        debug!("Admin password not configured - returning 404");
        req.into_response(
            HttpResponse::NotFound()
                .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
                .body("Not Found")
                .map_into_right_body(),
        )
    }

    /// Handle unauthorized requests
    fn handle_unauthorized(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        info!("Admin authentication failed - invalid or missing session");
        req.into_response(
            HttpResponse::Unauthorized()
                .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
                .json(ApiResponse::<()> {
                    code: ErrorCode::Unauthorized as i32,
                    message: "Unauthorized: invalid or missing session".to_string(),
                    data: None,
                })
                .map_into_right_body(),
        )
    }

    fn has_valid_session(req: &ServiceRequest, signer: &SessionSigner) -> bool {
        req.cookie(constants::SESSION_COOKIE_NAME)
            .is_some_and(|cookie| signer.verify(cookie.value(), Utc::now()))
    }
}

impl<S, B> Service<ServiceRequest> for AdminAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let signer = self.signer.clone();
        let enabled = self.enabled;

        Box::pin(async move {
            if !enabled {
                return Ok(Self::handle_disabled(req));
            }

            // Allow login endpoint to pass through without authentication
            if req.path() == constants::ADMIN_LOGIN_PATH {
                trace!("Login endpoint accessed - bypassing authentication");
                let response = srv.call(req).await?.map_into_left_body();
                return Ok(response);
            }

            if Self::has_valid_session(&req, &signer) {
                trace!("Admin authentication successful via session cookie");
                let response = srv.call(req).await?.map_into_left_body();
                return Ok(response);
            }

            Ok(Self::handle_unauthorized(req))
        })
    }
}
