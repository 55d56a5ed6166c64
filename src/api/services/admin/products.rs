//! 后台产品管理

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use tracing::{info, trace};

use crate::services::{CatalogService, ProductInput, normalize_paging};
use crate::storage::ProductFilter;

use super::error_code::ErrorScope;
use super::helpers::{api_result, created_response, error_in, paginated_response, success_response};
use super::types::{AdminListQuery, MessageResponse};

pub async fn list_products(
    query: web::Query<AdminListQuery>,
    catalog: web::Data<CatalogService>,
) -> ActixResult<impl Responder> {
    trace!("Admin API: list products {:?}", query);
    let (page, page_size) = normalize_paging(query.page, query.page_size);
    let filter = ProductFilter {
        published_only: query.published_only.unwrap_or(false),
        category: query.category.clone().filter(|c| !c.trim().is_empty()),
        search: query.search.clone().filter(|s| !s.trim().is_empty()),
    };

    Ok(match catalog.list(&filter, page, page_size).await {
        Ok(result) => paginated_response(result, page, page_size),
        Err(e) => error_in(ErrorScope::CATALOG, &e),
    })
}

pub async fn get_product(
    id: web::Path<String>,
    catalog: web::Data<CatalogService>,
) -> ActixResult<impl Responder> {
    Ok(api_result(ErrorScope::CATALOG, catalog.get(&id).await))
}

pub async fn create_product(
    input: web::Json<ProductInput>,
    catalog: web::Data<CatalogService>,
) -> ActixResult<impl Responder> {
    Ok(match catalog.create(input.into_inner()).await {
        Ok(product) => created_response(product),
        Err(e) => error_in(ErrorScope::CATALOG, &e),
    })
}

pub async fn update_product(
    id: web::Path<String>,
    input: web::Json<ProductInput>,
    catalog: web::Data<CatalogService>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        ErrorScope::CATALOG,
        catalog.update(&id, input.into_inner()).await,
    ))
}

pub async fn delete_product(
    id: web::Path<String>,
    catalog: web::Data<CatalogService>,
) -> ActixResult<impl Responder> {
    Ok(match catalog.delete(&id).await {
        Ok(()) => success_response(MessageResponse {
            message: format!("Product {} deleted", id),
        }),
        Err(e) => error_in(ErrorScope::CATALOG, &e),
    })
}

/// 导出全部产品为 CSV
pub async fn export_products(catalog: web::Data<CatalogService>) -> ActixResult<impl Responder> {
    Ok(match catalog.export_csv().await {
        Ok(bytes) => {
            let filename = format!(
                "handline_products_{}.csv",
                chrono::Utc::now().format("%Y%m%d_%H%M%S")
            );
            info!("Admin API: exported products to {}", filename);
            HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .append_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", filename),
                ))
                .body(bytes)
        }
        Err(e) => error_in(ErrorScope::CATALOG, &e),
    })
}
