//! 公开内容：品牌、文章、PPE 知识库

use actix_web::{Responder, Result as ActixResult, web};

use super::catalog::locale_of;
use crate::api::services::admin::{
    ErrorScope, LocaleQuery, PublicListQuery, api_result, error_in, paginated_response, post_kind,
};
use crate::services::{ContentService, normalize_paging};

pub async fn list_brands(
    query: web::Query<LocaleQuery>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        ErrorScope::CONTENT,
        content.brands(locale_of(query.locale.as_deref())).await,
    ))
}

/// `GET /{kind}`，kind = blog | case-studies | careers；只返回已发布
pub async fn list_posts(
    kind: web::Path<String>,
    query: web::Query<PublicListQuery>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    let kind = match post_kind(&kind) {
        Ok(kind) => kind,
        Err(resp) => return Ok(resp),
    };
    let (page, page_size) = normalize_paging(query.page, query.page_size);
    let locale = locale_of(query.locale.as_deref());

    Ok(
        match content.published_posts(kind, locale, page, page_size).await {
            Ok(result) => paginated_response(result, page, page_size),
            Err(e) => error_in(ErrorScope::CONTENT, &e),
        },
    )
}

pub async fn post_detail(
    path: web::Path<(String, String)>,
    query: web::Query<LocaleQuery>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    let (kind, slug) = path.into_inner();
    let kind = match post_kind(&kind) {
        Ok(kind) => kind,
        Err(resp) => return Ok(resp),
    };
    Ok(api_result(
        ErrorScope::CONTENT,
        content
            .published_post(kind, &slug, locale_of(query.locale.as_deref()))
            .await,
    ))
}

/// 分类列表（不含段落）
pub async fn list_ppe(
    query: web::Query<LocaleQuery>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        ErrorScope::CONTENT,
        content.ppe_categories(locale_of(query.locale.as_deref())).await,
    ))
}

pub async fn ppe_detail(
    slug: web::Path<String>,
    query: web::Query<LocaleQuery>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        ErrorScope::CONTENT,
        content
            .ppe_category(&slug, locale_of(query.locale.as_deref()))
            .await,
    ))
}
