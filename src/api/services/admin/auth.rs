//! 后台认证端点：登录、刷新、登出、校验

use actix_governor::{Governor, GovernorConfigBuilder, KeyExtractor, SimpleKeyExtractionError};
use actix_web::dev::ServiceRequest;
use actix_web::http::StatusCode;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use governor::middleware::NoOpMiddleware;
use tracing::{debug, error, info, warn};

use crate::api::constants;
use crate::api::jwt::get_jwt_service;
use crate::api::middleware::AuthMethod;
use crate::config::get_config;
use crate::utils::ip::client_ip;
use crate::utils::password::verify_password;

use super::error_code::ErrorCode;
use super::helpers::{CookieBuilder, error_response, success_response};
use super::types::{AuthSuccessResponse, LoginCredentials, MessageResponse, VerifyResponse};

/// 基于客户端 IP 的限流 key
///
/// 默认使用 TCP peer 地址；peer 是可信代理时才采用 X-Forwarded-For。
#[derive(Clone, Copy)]
pub struct ClientIpKeyExtractor;

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = String;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        let config = get_config();
        let forwarded = req
            .headers()
            .get("X-Forwarded-For")
            .and_then(|h| h.to_str().ok());

        client_ip(&req.connection_info(), forwarded, &config.api.trusted_proxies)
            .ok_or_else(|| SimpleKeyExtractionError::new("Unable to extract client IP"))
    }
}

fn rate_limiter(
    seconds_per_request: u64,
    burst: u32,
    name: &str,
) -> Governor<ClientIpKeyExtractor, NoOpMiddleware> {
    let config = GovernorConfigBuilder::default()
        .seconds_per_request(seconds_per_request)
        .burst_size(burst)
        .key_extractor(ClientIpKeyExtractor)
        .finish()
        .expect("Invalid rate limit config");

    debug!(
        "{} rate limiter created: 1 req/{}s, burst {}",
        name, seconds_per_request, burst
    );
    Governor::new(&config)
}

/// 登录限流：每秒补充 1 个令牌，突发 5 次
pub fn login_rate_limiter() -> Governor<ClientIpKeyExtractor, NoOpMiddleware> {
    rate_limiter(1, 5, "Login")
}

pub fn refresh_rate_limiter() -> Governor<ClientIpKeyExtractor, NoOpMiddleware> {
    rate_limiter(1, 10, "Refresh")
}

/// 联系表单限流：每 10 秒 1 个令牌，突发 3 次
pub fn contact_rate_limiter() -> Governor<ClientIpKeyExtractor, NoOpMiddleware> {
    rate_limiter(10, 3, "Contact")
}

/// 签发新的 access/refresh token 并写入 cookie
fn issue_session(message: &str) -> HttpResponse {
    let jwt = get_jwt_service();
    let (access, refresh) = match (jwt.generate_access_token(), jwt.generate_refresh_token()) {
        (Ok(a), Ok(r)) => (a, r),
        (Err(e), _) | (_, Err(e)) => {
            error!("Admin API: failed to generate token: {}", e);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Failed to generate token",
            );
        }
    };

    let cookies = CookieBuilder::from_config();
    let mut response = success_response(AuthSuccessResponse {
        message: message.to_string(),
        expires_in: cookies.access_token_minutes() * 60,
    });
    for cookie in [cookies.access_cookie(access), cookies.refresh_cookie(refresh)] {
        if let Err(e) = response.add_cookie(&cookie) {
            error!("Admin API: failed to set cookie: {}", e);
        }
    }
    response
}

/// 登录：校验管理员密码（启动时已把明文转换为 Argon2 哈希）
pub async fn login(login_body: web::Json<LoginCredentials>) -> ActixResult<impl Responder> {
    let config = get_config();

    let valid = match verify_password(&login_body.password, &config.api.admin_password) {
        Ok(valid) => valid,
        Err(e) => {
            error!("Admin API: password verification error: {}", e);
            return Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Authentication error",
            ));
        }
    };

    if !valid {
        warn!("Admin API: login failed - invalid password");
        return Ok(error_response(
            StatusCode::UNAUTHORIZED,
            ErrorCode::AuthFailed,
            "Invalid password",
        ));
    }

    info!("Admin API: login successful");
    Ok(issue_session("Login successful"))
}

/// 刷新：校验 refresh cookie 后滑动续期
pub async fn refresh(req: HttpRequest) -> ActixResult<impl Responder> {
    let Some(cookie) = req.cookie(constants::REFRESH_COOKIE_NAME) else {
        warn!("Admin API: refresh token not found in cookie");
        return Ok(error_response(
            StatusCode::UNAUTHORIZED,
            ErrorCode::TokenInvalid,
            "Refresh token not found",
        ));
    };

    if let Err(e) = get_jwt_service().validate_refresh_token(cookie.value()) {
        warn!("Admin API: invalid refresh token: {}", e);
        let code = match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => ErrorCode::TokenExpired,
            _ => ErrorCode::TokenInvalid,
        };
        return Ok(error_response(
            StatusCode::UNAUTHORIZED,
            code,
            "Invalid refresh token",
        ));
    }

    info!("Admin API: token refresh successful");
    Ok(issue_session("Token refreshed"))
}

/// 登出：清除 cookies
pub async fn logout() -> ActixResult<impl Responder> {
    info!("Admin API: logout");

    let cookies = CookieBuilder::from_config();
    let mut response = success_response(MessageResponse {
        message: "Logout successful".to_string(),
    });
    for cookie in [cookies.expired_access_cookie(), cookies.expired_refresh_cookie()] {
        if let Err(e) = response.add_cookie(&cookie) {
            error!("Admin API: failed to clear cookie: {}", e);
        }
    }
    Ok(response)
}

/// 中间件已通过即视为有效
pub async fn verify(req: HttpRequest) -> ActixResult<impl Responder> {
    let method = req
        .extensions()
        .get::<AuthMethod>()
        .copied()
        .unwrap_or(AuthMethod::Cookie);
    let method = match method {
        AuthMethod::Bearer => "bearer",
        AuthMethod::Cookie => "cookie",
    };
    Ok(success_response(VerifyResponse {
        message: "Token is valid".to_string(),
        method: method.to_string(),
    }))
}
