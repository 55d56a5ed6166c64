//! 公开站点 API
//!
//! 所有读取接口只返回已发布内容，`locale` 参数决定翻译字段的语言。

mod catalog;
mod contact;
mod content;
mod orders;
mod search;

use actix_web::web;

use crate::api::services::admin::auth::contact_rate_limiter;

pub use catalog::FilterRequest;

/// 公开路由，挂载在 `routes.api_prefix` 下
///
/// 产品与 PPE 路由必须在 `/{kind}` 之前注册
pub fn public_routes() -> actix_web::Scope {
    web::scope("")
        .route("/products", web::get().to(catalog::list_products))
        .service(
            web::resource("/products/filter")
                .app_data(catalog::filter_json_config())
                .route(web::post().to(catalog::filter_products)),
        )
        .route("/products/facets", web::get().to(catalog::facet_counts))
        .route("/products/{slug}", web::get().to(catalog::product_detail))
        .route("/brands", web::get().to(content::list_brands))
        .route("/ppe", web::get().to(content::list_ppe))
        .route("/ppe/{slug}", web::get().to(content::ppe_detail))
        .route("/search/all", web::get().to(search::search_all))
        .route(
            "/contact",
            web::post()
                .to(contact::submit_contact)
                .wrap(contact_rate_limiter()),
        )
        .route("/orders", web::get().to(orders::list_orders))
        .route("/orders/{number}", web::get().to(orders::track_order))
        .route(
            "/{kind:blog|case-studies|careers}",
            web::get().to(content::list_posts),
        )
        .route(
            "/{kind:blog|case-studies|careers}/{slug}",
            web::get().to(content::post_detail),
        )
}
