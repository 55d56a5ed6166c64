//! 后台 PPE 知识库：分类及其有序段落

use actix_web::{Responder, Result as ActixResult, web};

use crate::services::{ContentService, PpeCategoryInput, PpeSectionInput};

use super::error_code::ErrorScope;
use super::helpers::{api_result, created_response, error_in, success_response};
use super::types::MessageResponse;

pub async fn list_categories(content: web::Data<ContentService>) -> ActixResult<impl Responder> {
    Ok(api_result(ErrorScope::CONTENT, content.all_ppe_categories().await))
}

/// 分类详情，附带段落
pub async fn get_category(
    id: web::Path<String>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    Ok(api_result(ErrorScope::CONTENT, content.get_ppe_category(&id).await))
}

pub async fn create_category(
    input: web::Json<PpeCategoryInput>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    Ok(match content.create_ppe_category(input.into_inner()).await {
        Ok(category) => created_response(category),
        Err(e) => error_in(ErrorScope::CONTENT, &e),
    })
}

pub async fn update_category(
    id: web::Path<String>,
    input: web::Json<PpeCategoryInput>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        ErrorScope::CONTENT,
        content.update_ppe_category(&id, input.into_inner()).await,
    ))
}

/// 同时删除其下所有段落
pub async fn delete_category(
    id: web::Path<String>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    Ok(match content.delete_ppe_category(&id).await {
        Ok(()) => success_response(MessageResponse {
            message: format!("PPE category {} deleted", id),
        }),
        Err(e) => error_in(ErrorScope::CONTENT, &e),
    })
}

pub async fn create_section(
    category_id: web::Path<String>,
    input: web::Json<PpeSectionInput>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    Ok(
        match content
            .create_ppe_section(&category_id, input.into_inner())
            .await
        {
            Ok(section) => created_response(section),
            Err(e) => error_in(ErrorScope::CONTENT, &e),
        },
    )
}

pub async fn update_section(
    id: web::Path<String>,
    input: web::Json<PpeSectionInput>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        ErrorScope::CONTENT,
        content.update_ppe_section(&id, input.into_inner()).await,
    ))
}

pub async fn delete_section(
    id: web::Path<String>,
    content: web::Data<ContentService>,
) -> ActixResult<impl Responder> {
    Ok(match content.delete_ppe_section(&id).await {
        Ok(()) => success_response(MessageResponse {
            message: format!("PPE section {} deleted", id),
        }),
        Err(e) => error_in(ErrorScope::CONTENT, &e),
    })
}
