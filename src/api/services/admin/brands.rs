//! 后台品牌管理

use actix_web::{Responder, Result as ActixResult, web};

use crate::services::{BrandInput, ContentService};

use super::error_code::ErrorScope;
use super::helpers::{api_result, created_response, error_in, success_response};
use super::types::MessageResponse;

/// 品牌数量少，不分页
pub async fn list_brands(content: web::Data<ContentService>) -> ActixResult<impl Responder> {
    Ok(api_result(ErrorScope::CONTENT, content.all_brands().await))
}

pub async fn get_brand(
    id: web::Path<String>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    Ok(api_result(ErrorScope::CONTENT, content.get_brand(&id).await))
}

pub async fn create_brand(
    input: web::Json<BrandInput>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    Ok(match content.create_brand(input.into_inner()).await {
        Ok(brand) => created_response(brand),
        Err(e) => error_in(ErrorScope::CONTENT, &e),
    })
}

pub async fn update_brand(
    id: web::Path<String>,
    input: web::Json<BrandInput>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        ErrorScope::CONTENT,
        content.update_brand(&id, input.into_inner()).await,
    ))
}

pub async fn delete_brand(
    id: web::Path<String>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    Ok(match content.delete_brand(&id).await {
        Ok(()) => success_response(MessageResponse {
            message: format!("Brand {} deleted", id),
        }),
        Err(e) => error_in(ErrorScope::CONTENT, &e),
    })
}
