//! 后台首页统计

use actix_web::{Responder, Result as ActixResult, web};

use crate::services::ContentService;

use super::error_code::ErrorScope;
use super::helpers::api_result;

pub async fn get_stats(content: web::Data<ContentService>) -> ActixResult<impl Responder> {
    Ok(api_result(ErrorScope::GENERAL, content.stats().await))
}
