//! API 帮助函数：响应信封、错误映射、Cookie

use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, error::InternalError, web};
use serde::Serialize;
use tracing::{error, warn};

use crate::api::constants;
use crate::config::SameSitePolicy;
use crate::errors::HandlineError;
use crate::storage::Page;

use super::error_code::{ErrorCode, ErrorScope};
use super::types::{ApiResponse, PaginatedResponse};

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

pub fn created_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::CREATED, ErrorCode::Success, "Created", Some(data))
}

pub fn paginated_response<T: Serialize>(page: Page<T>, page_no: u64, page_size: u64) -> HttpResponse {
    HttpResponse::Ok()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(PaginatedResponse::from_page(page, page_no, page_size))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 HandlineError 构建错误响应（按业务域细化错误码）
///
/// 基础设施错误只返回通用信息，详情写入日志。
pub fn error_in(scope: ErrorScope, err: &HandlineError) -> HttpResponse {
    let status = err.http_status();
    let code = scope.code_for(err);
    if err.is_client_facing() {
        warn!("Request rejected: {}", err);
        error_response(status, code, err.message())
    } else {
        error!("Request failed: {}", err);
        let message = status.canonical_reason().unwrap_or("Internal Server Error");
        error_response(status, code, message)
    }
}

pub fn error_from_handline(err: &HandlineError) -> HttpResponse {
    error_in(ErrorScope::GENERAL, err)
}

/// 统一 Result → HttpResponse 转换
///
/// 成功时返回 200 OK + JSON 数据，失败时按业务域映射 HandlineError。
pub fn api_result<T, E>(scope: ErrorScope, result: Result<T, E>) -> HttpResponse
where
    T: Serialize,
    E: Into<HandlineError>,
{
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_in(scope, &e.into()),
    }
}

/// JSON 请求体解析失败时也返回统一信封
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err, _req: &HttpRequest| {
            let message = format!("Invalid JSON body: {}", err);
            let response = error_response(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, &message);
            InternalError::from_response(err, response).into()
        })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        let message = format!("Invalid query string: {}", err);
        let response = error_response(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, &message);
        InternalError::from_response(err, response).into()
    })
}

/// Cookie 构建器，消除重复的 cookie 创建代码
pub struct CookieBuilder {
    same_site: SameSite,
    secure: bool,
    domain: Option<String>,
    access_token_minutes: u64,
    refresh_token_days: u64,
    refresh_path: String,
}

impl CookieBuilder {
    pub fn from_config() -> Self {
        let config = crate::config::get_config();

        let same_site = match config.api.cookie_same_site {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::None => SameSite::None,
            SameSitePolicy::Lax => SameSite::Lax,
        };

        Self {
            same_site,
            secure: config.api.cookie_secure,
            domain: config.api.cookie_domain.clone().filter(|d| !d.is_empty()),
            access_token_minutes: config.api.access_token_minutes,
            refresh_token_days: config.api.refresh_token_days,
            refresh_path: format!(
                "{}{}",
                config.routes.admin_prefix,
                constants::REFRESH_COOKIE_PATH_SUFFIX
            ),
        }
    }

    fn build(
        &self,
        name: &str,
        value: String,
        path: &str,
        max_age: actix_web::cookie::time::Duration,
    ) -> Cookie<'static> {
        let mut cookie = Cookie::new(name.to_string(), value);
        cookie.set_path(path.to_string());
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(self.same_site);
        cookie.set_max_age(max_age);
        if let Some(ref domain) = self.domain {
            cookie.set_domain(domain.clone());
        }
        cookie
    }

    pub fn access_cookie(&self, token: String) -> Cookie<'static> {
        self.build(
            constants::ACCESS_COOKIE_NAME,
            token,
            "/",
            actix_web::cookie::time::Duration::minutes(self.access_token_minutes as i64),
        )
    }

    pub fn refresh_cookie(&self, token: String) -> Cookie<'static> {
        self.build(
            constants::REFRESH_COOKIE_NAME,
            token,
            &self.refresh_path,
            actix_web::cookie::time::Duration::days(self.refresh_token_days as i64),
        )
    }

    pub fn expired_access_cookie(&self) -> Cookie<'static> {
        self.build(
            constants::ACCESS_COOKIE_NAME,
            String::new(),
            "/",
            actix_web::cookie::time::Duration::ZERO,
        )
    }

    pub fn expired_refresh_cookie(&self) -> Cookie<'static> {
        self.build(
            constants::REFRESH_COOKIE_NAME,
            String::new(),
            &self.refresh_path,
            actix_web::cookie::time::Duration::ZERO,
        )
    }

    pub fn access_token_minutes(&self) -> u64 {
        self.access_token_minutes
    }
}
