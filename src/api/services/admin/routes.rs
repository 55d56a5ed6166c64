//! Admin API 路由配置
//!
//! 将 /v1 下的路由按资源拆分。

use actix_web::web;

use super::auth::{login, login_rate_limiter, logout, refresh, refresh_rate_limiter, verify};
use super::brands::{create_brand, delete_brand, get_brand, list_brands, update_brand};
use super::messages::{delete_message, get_message, list_messages, set_read};
use super::posts::{create_post, delete_post, get_post, list_posts, update_post};
use super::ppe::{
    create_category, create_section, delete_category, delete_section, get_category,
    list_categories, update_category, update_section,
};
use super::products::{
    create_product, delete_product, export_products, get_product, list_products, update_product,
};
use super::stats::get_stats;

/// 认证路由 `/auth`
///
/// - POST /auth/login - 登录（带限流）
/// - POST /auth/refresh - 刷新 token（带限流）
/// - POST /auth/logout - 登出
/// - GET /auth/verify - 验证 token
pub fn auth_routes() -> actix_web::Scope {
    web::scope("/auth")
        .route("/login", web::post().to(login).wrap(login_rate_limiter()))
        .route("/refresh", web::post().to(refresh).wrap(refresh_rate_limiter()))
        .route("/logout", web::post().to(logout))
        .route("/verify", web::get().to(verify))
}

/// 产品路由 `/products`（/export 必须在 /{id} 之前）
pub fn products_routes() -> actix_web::Scope {
    web::scope("/products")
        .route("", web::get().to(list_products))
        .route("", web::post().to(create_product))
        .route("/export", web::get().to(export_products))
        .route("/{id}", web::get().to(get_product))
        .route("/{id}", web::put().to(update_product))
        .route("/{id}", web::delete().to(delete_product))
}

pub fn brands_routes() -> actix_web::Scope {
    web::scope("/brands")
        .route("", web::get().to(list_brands))
        .route("", web::post().to(create_brand))
        .route("/{id}", web::get().to(get_brand))
        .route("/{id}", web::put().to(update_brand))
        .route("/{id}", web::delete().to(delete_brand))
}

/// 文章路由 `/posts/{kind}`，kind = blog | case-studies | careers
pub fn posts_routes() -> actix_web::Scope {
    web::scope("/posts")
        .route("/{kind}", web::get().to(list_posts))
        .route("/{kind}", web::post().to(create_post))
        .route("/{kind}/{id}", web::get().to(get_post))
        .route("/{kind}/{id}", web::put().to(update_post))
        .route("/{kind}/{id}", web::delete().to(delete_post))
}

/// PPE 路由 `/ppe`
///
/// - /ppe/categories[/{id}]
/// - POST /ppe/categories/{id}/sections
/// - PUT/DELETE /ppe/sections/{id}
pub fn ppe_routes() -> actix_web::Scope {
    web::scope("/ppe")
        .route("/categories", web::get().to(list_categories))
        .route("/categories", web::post().to(create_category))
        .route("/categories/{id}", web::get().to(get_category))
        .route("/categories/{id}", web::put().to(update_category))
        .route("/categories/{id}", web::delete().to(delete_category))
        .route("/categories/{id}/sections", web::post().to(create_section))
        .route("/sections/{id}", web::put().to(update_section))
        .route("/sections/{id}", web::delete().to(delete_section))
}

pub fn messages_routes() -> actix_web::Scope {
    web::scope("/messages")
        .route("", web::get().to(list_messages))
        .route("/{id}", web::get().to(get_message))
        .route("/{id}/read", web::put().to(set_read))
        .route("/{id}", web::delete().to(delete_message))
}

/// Admin API v1 路由
pub fn admin_v1_routes() -> actix_web::Scope {
    web::scope("/v1")
        .service(auth_routes())
        .service(products_routes())
        .service(brands_routes())
        .service(posts_routes())
        .service(ppe_routes())
        .service(messages_routes())
        .route("/stats", web::get().to(get_stats))
}
