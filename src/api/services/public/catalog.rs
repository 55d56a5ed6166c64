//! 公开产品目录

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, Responder, Result as ActixResult, web};
use serde::Deserialize;
use tracing::trace;

use crate::api::services::admin::{
    ErrorCode, ErrorScope, LocaleQuery, PublicListQuery, api_result, error_in, error_response,
    paginated_response,
};
use crate::catalog::{FacetQuery, ProductFacets};
use crate::content::Locale;
use crate::services::{CatalogService, normalize_paging};

/// `POST /products/filter` 请求体
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterRequest {
    pub facets: ProductFacets,
    pub locale: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// 过滤请求体的 JSON 配置
///
/// 结构合法但分面取值无效（未知 flag / class key）时返回 InvalidFacet，
/// 语法错误仍是 BadRequest。
pub(super) fn filter_json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req: &HttpRequest| {
            let code = match &err {
                JsonPayloadError::Deserialize(e) if e.is_data() => ErrorCode::InvalidFacet,
                _ => ErrorCode::BadRequest,
            };
            let message = format!("Invalid filter body: {}", err);
            let response = error_response(StatusCode::BAD_REQUEST, code, &message);
            InternalError::from_response(err, response).into()
        })
}

pub(super) fn locale_of(code: Option<&str>) -> Locale {
    code.map(Locale::from_code).unwrap_or_default()
}

async fn browse(
    catalog: &CatalogService,
    facets: &ProductFacets,
    locale: Option<&str>,
    page: Option<u64>,
    page_size: Option<u64>,
) -> actix_web::HttpResponse {
    let (page, page_size) = normalize_paging(page, page_size);
    match catalog
        .browse(facets, locale_of(locale), page, page_size)
        .await
    {
        Ok(result) => paginated_response(result, page, page_size),
        Err(e) => error_in(ErrorScope::CATALOG, &e),
    }
}

/// `GET /products?sub_categories=..&classes=..&locale=it&page=1`
pub async fn list_products(
    facets: web::Query<FacetQuery>,
    query: web::Query<PublicListQuery>,
    catalog: web::Data<CatalogService>,
) -> ActixResult<impl Responder> {
    trace!("Public API: browse {:?}", facets);
    let facets = match ProductFacets::from_query(&facets) {
        Ok(f) => f,
        Err(e) => return Ok(error_in(ErrorScope::CATALOG, &e)),
    };
    Ok(browse(
        &catalog,
        &facets,
        query.locale.as_deref(),
        query.page,
        query.page_size,
    )
    .await)
}

pub async fn filter_products(
    body: web::Json<FilterRequest>,
    catalog: web::Data<CatalogService>,
) -> ActixResult<impl Responder> {
    Ok(browse(
        &catalog,
        &body.facets,
        body.locale.as_deref(),
        body.page,
        body.page_size,
    )
    .await)
}

/// 侧边栏计数（所有已发布产品）
pub async fn facet_counts(catalog: web::Data<CatalogService>) -> ActixResult<impl Responder> {
    Ok(api_result(ErrorScope::CATALOG, catalog.facet_counts().await))
}

pub async fn product_detail(
    slug: web::Path<String>,
    query: web::Query<LocaleQuery>,
    catalog: web::Data<CatalogService>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        ErrorScope::CATALOG,
        catalog
            .product_by_slug(&slug, locale_of(query.locale.as_deref()))
            .await,
    ))
}
