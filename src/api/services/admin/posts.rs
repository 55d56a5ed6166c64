//! 后台文章管理：博客、案例、招聘共用一组端点，`{kind}` 取路由段名

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use tracing::trace;

use crate::services::{ContentService, PostInput, normalize_paging};
use crate::storage::{PostFilter, PostKind};

use super::error_code::{ErrorCode, ErrorScope};
use super::helpers::{
    api_result, created_response, error_in, error_response, paginated_response, success_response,
};
use super::types::{AdminListQuery, MessageResponse};

/// 路由段 → PostKind；未知类型返回 404 信封
pub(crate) fn post_kind(segment: &str) -> Result<PostKind, HttpResponse> {
    PostKind::from_route_segment(segment).ok_or_else(|| {
        error_response(
            actix_web::http::StatusCode::NOT_FOUND,
            ErrorCode::UnknownPostKind,
            &format!("Unknown content type '{}'", segment),
        )
    })
}

pub async fn list_posts(
    kind: web::Path<String>,
    query: web::Query<AdminListQuery>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    let kind = match post_kind(&kind) {
        Ok(kind) => kind,
        Err(resp) => return Ok(resp),
    };
    trace!("Admin API: list {} {:?}", kind, query);

    let (page, page_size) = normalize_paging(query.page, query.page_size);
    let filter = PostFilter {
        published_only: query.published_only.unwrap_or(false),
        search: query.search.clone().filter(|s| !s.trim().is_empty()),
        ..PostFilter::new(kind)
    };

    Ok(match content.list_posts(&filter, page, page_size).await {
        Ok(result) => paginated_response(result, page, page_size),
        Err(e) => error_in(ErrorScope::CONTENT, &e),
    })
}

pub async fn get_post(
    path: web::Path<(String, String)>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    let (kind, id) = path.into_inner();
    let kind = match post_kind(&kind) {
        Ok(kind) => kind,
        Err(resp) => return Ok(resp),
    };
    Ok(api_result(ErrorScope::CONTENT, content.get_post(kind, &id).await))
}

pub async fn create_post(
    kind: web::Path<String>,
    input: web::Json<PostInput>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    let kind = match post_kind(&kind) {
        Ok(kind) => kind,
        Err(resp) => return Ok(resp),
    };
    Ok(match content.create_post(kind, input.into_inner()).await {
        Ok(post) => created_response(post),
        Err(e) => error_in(ErrorScope::CONTENT, &e),
    })
}

pub async fn update_post(
    path: web::Path<(String, String)>,
    input: web::Json<PostInput>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    let (kind, id) = path.into_inner();
    let kind = match post_kind(&kind) {
        Ok(kind) => kind,
        Err(resp) => return Ok(resp),
    };
    Ok(api_result(
        ErrorScope::CONTENT,
        content.update_post(kind, &id, input.into_inner()).await,
    ))
}

pub async fn delete_post(
    path: web::Path<(String, String)>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    let (kind, id) = path.into_inner();
    let kind = match post_kind(&kind) {
        Ok(kind) => kind,
        Err(resp) => return Ok(resp),
    };
    Ok(match content.delete_post(kind, &id).await {
        Ok(()) => success_response(MessageResponse {
            message: format!("{} {} deleted", kind.label(), id),
        }),
        Err(e) => error_in(ErrorScope::CONTENT, &e),
    })
}
