use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, header::CONTENT_TYPE},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde::Serialize;
use std::rc::Rc;
use tracing::{debug, info, trace};

use crate::api::constants;
use crate::api::jwt::get_jwt_service;
use crate::api::services::admin::{ApiResponse, ErrorCode};
use crate::config::get_config;

/// 请求通过认证的方式，放入 request extensions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    Bearer,
    Cookie,
}

/// 无需 access token 的认证端点
const OPEN_AUTH_ENDPOINTS: [&str; 3] = ["login", "refresh", "logout"];

fn is_open_endpoint(path: &str, auth_base: &str) -> bool {
    path.strip_prefix(auth_base)
        .is_some_and(|rest| OPEN_AUTH_ENDPOINTS.contains(&rest))
}

/// Back-office authentication middleware
#[derive(Clone)]
pub struct AdminAuth;

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
        let config = get_config();
        let auth_base = format!("{}/v1/auth/", config.routes.admin_prefix);
        ready(Ok(AdminAuthMiddleware {
            service: Rc::new(service),
            auth_base,
        }))
    }
}

pub struct AdminAuthMiddleware<S> {
    service: Rc<S>,
    auth_base: String,
}

impl<S, B> AdminAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    fn preflight(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        req.into_response(
            HttpResponse::NoContent()
                .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
                .finish()
                .map_into_right_body(),
        )
    }

    /// 未配置管理员密码时后台整体不可见
    fn disabled(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        debug!("Admin password not configured - returning 404");
        req.into_response(
            HttpResponse::NotFound()
                .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
                .body("Not Found")
                .map_into_right_body(),
        )
    }

    fn unauthorized(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        info!("Admin authentication failed for {}", req.path());
        req.into_response(
            HttpResponse::Unauthorized()
                .json(ApiResponse::<()> {
                    code: ErrorCode::Unauthorized as i32,
                    message: "Unauthorized: Invalid or missing token".to_string(),
                    data: None,
                })
                .map_into_right_body(),
        )
    }

    fn bearer_token(req: &ServiceRequest) -> Option<&str> {
        req.headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::trim)
    }

    fn authenticate(req: &ServiceRequest) -> Option<AuthMethod> {
        let jwt = get_jwt_service();

        if let Some(token) = Self::bearer_token(req) {
            match jwt.validate_access_token(token) {
                Ok(_) => return Some(AuthMethod::Bearer),
                Err(e) => debug!("Bearer token rejected: {}", e),
            }
        }

        let cookie = req.cookie(constants::ACCESS_COOKIE_NAME)?;
        match jwt.validate_access_token(cookie.value()) {
            Ok(_) => Some(AuthMethod::Cookie),
            Err(e) => {
                debug!("Access cookie rejected: {}", e);
                None
            }
        }
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
        let auth_base = self.auth_base.clone();

        Box::pin(async move {
            if !get_config().admin_enabled() {
                return Ok(Self::disabled(req));
            }

            if req.method() == Method::OPTIONS {
                return Ok(Self::preflight(req));
            }

            if is_open_endpoint(req.path(), &auth_base) {
                trace!("{} bypasses access token check", req.path());
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            match Self::authenticate(&req) {
                Some(method) => {
                    trace!("Admin authenticated via {:?}", method);
                    req.extensions_mut().insert(method);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                None => Ok(Self::unauthorized(req)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_endpoints() {
        let base = "/admin/v1/auth/";
        assert!(is_open_endpoint("/admin/v1/auth/login", base));
        assert!(is_open_endpoint("/admin/v1/auth/refresh", base));
        assert!(is_open_endpoint("/admin/v1/auth/logout", base));
        assert!(!is_open_endpoint("/admin/v1/auth/verify", base));
        assert!(!is_open_endpoint("/admin/v1/auth/login/extra", base));
        assert!(!is_open_endpoint("/admin/v1/products", base));
    }
}
