//! 订单跟踪（模拟数据）

use actix_web::{Responder, Result as ActixResult, web};

use crate::api::services::admin::{ErrorScope, OrderQuery, api_result};
use crate::services::OrderService;

pub async fn list_orders(
    query: web::Query<OrderQuery>,
    orders: web::Data<OrderService>,
) -> ActixResult<impl Responder> {
    let email = query.email.as_deref().unwrap_or_default();
    Ok(api_result(ErrorScope::ORDERS, orders.list_for_email(email)))
}

pub async fn track_order(
    number: web::Path<String>,
    query: web::Query<OrderQuery>,
    orders: web::Data<OrderService>,
) -> ActixResult<impl Responder> {
    let email = query.email.as_deref().unwrap_or_default();
    Ok(api_result(ErrorScope::ORDERS, orders.track(&number, email)))
}
