//! Server mode
//!
//! HTTP server startup: shared state, middleware stack, route scopes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use std::sync::Arc;
use tracing::warn;

use crate::api::middleware::{AdminAuth, RequestIdMiddleware};
use crate::api::services::admin::{admin_v1_routes, json_config, query_config};
use crate::api::services::{AppStartTime, health_routes, public_routes};
use crate::config::{CorsConfig, RoutesConfig, get_config};
use crate::runtime::lifetime;
use crate::runtime::lifetime::startup::StartupContext;
use crate::services::{CatalogService, ContentService, InboxService, OrderService, SearchService};
use crate::storage::SeaOrmStorage;

/// Worker 之间共享的 app_data
///
/// `web::Data` 内部是 Arc，clone 只增加引用计数。
#[derive(Clone)]
pub struct AppState {
    pub storage: web::Data<Arc<SeaOrmStorage>>,
    pub catalog: web::Data<CatalogService>,
    pub content: web::Data<ContentService>,
    pub inbox: web::Data<InboxService>,
    pub search: web::Data<SearchService>,
    pub orders: web::Data<OrderService>,
    pub start_time: web::Data<AppStartTime>,
}

impl From<StartupContext> for AppState {
    fn from(ctx: StartupContext) -> Self {
        Self {
            storage: web::Data::new(ctx.storage),
            catalog: web::Data::new(ctx.catalog),
            content: web::Data::new(ctx.content),
            inbox: web::Data::new(ctx.inbox),
            search: web::Data::new(ctx.search),
            orders: web::Data::new(ctx.orders),
            start_time: web::Data::new(AppStartTime {
                start_datetime: chrono::Utc::now(),
            }),
        }
    }
}

/// 注册 app_data 和三个路由 scope（公开 / 后台 / 健康检查）
///
/// 服务器与集成测试共用。
pub fn configure_app(cfg: &mut web::ServiceConfig, state: &AppState, routes: &RoutesConfig) {
    cfg.app_data(state.storage.clone())
        .app_data(state.catalog.clone())
        .app_data(state.content.clone())
        .app_data(state.inbox.clone())
        .app_data(state.search.clone())
        .app_data(state.orders.clone())
        .app_data(state.start_time.clone())
        .app_data(json_config())
        .app_data(query_config())
        .service(
            web::scope(&routes.admin_prefix)
                .wrap(AdminAuth)
                .service(admin_v1_routes()),
        )
        .service(web::scope(&routes.health_prefix).service(health_routes()))
        .service(web::scope(&routes.api_prefix).service(public_routes()));
}

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(cors_config: &CorsConfig) {
    if !cors_config.enabled {
        return;
    }

    if cors_config.allowed_origins.is_empty() {
        warn!(
            "CORS enabled but allowed_origins is empty. \
            No cross-origin requests will be allowed. \
            Set allowed_origins explicitly or use '[\"*\"]' for any origin."
        );
    }

    let is_any_origin = cors_config.allowed_origins.iter().any(|o| o == "*");
    if is_any_origin && cors_config.allow_credentials {
        tracing::error!(
            "SECURITY WARNING: allow_any_origin + allow_credentials is a dangerous combination! \
            Disabling credentials."
        );
    }
}

/// Build CORS middleware from configuration
pub fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    // 未启用时使用浏览器默认的同源策略
    if !cors_config.enabled {
        return Cors::default();
    }

    let is_any_origin = cors_config.allowed_origins.iter().any(|o| o == "*");

    let mut cors = Cors::default()
        .allowed_methods(["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers([
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
            actix_web::http::header::ACCEPT,
        ])
        .max_age(cors_config.max_age as usize);

    if is_any_origin {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    // any_origin + credentials 会让 actix-cors 回显 Origin，强制关闭
    if cors_config.allow_credentials && !is_any_origin {
        cors = cors.supports_credentials();
    }

    cors
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup()
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let config = get_config();
    let db_for_shutdown = startup.storage.get_db().clone();
    let state = AppState::from(startup);
    let routes = config.routes.clone();
    let cors_config = config.cors.clone();
    validate_cors_config(&cors_config);

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    if config.api.trusted_proxies.is_empty() {
        warn!("Rate limiting: no trusted proxies configured, X-Forwarded-For is ignored");
    } else {
        warn!(
            "Rate limiting: trusted proxies configured: {:?}",
            config.api.trusted_proxies
        );
    }

    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(build_cors_middleware(&cors_config))
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .app_data(web::PayloadConfig::new(1024 * 1024))
            .configure(|cfg| configure_app(cfg, &state, &routes))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(bind_address)?.run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
