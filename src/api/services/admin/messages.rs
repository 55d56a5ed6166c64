//! 后台留言收件箱

use actix_web::{Responder, Result as ActixResult, web};
use tracing::info;

use crate::services::{InboxService, normalize_paging};
use crate::storage::MessageFilter;

use super::error_code::ErrorScope;
use super::helpers::{api_result, error_in, paginated_response, success_response};
use super::types::{MessageListQuery, MessageResponse, ReadStateRequest};

pub async fn list_messages(
    query: web::Query<MessageListQuery>,
    inbox: web::Data<InboxService>,
) -> ActixResult<impl Responder> {
    let (page, page_size) = normalize_paging(query.page, query.page_size);
    let filter = MessageFilter {
        unread_only: query.unread_only.unwrap_or(false),
    };

    Ok(match inbox.list(&filter, page, page_size).await {
        Ok(result) => paginated_response(result, page, page_size),
        Err(e) => error_in(ErrorScope::INBOX, &e),
    })
}

pub async fn get_message(
    id: web::Path<String>,
    inbox: web::Data<InboxService>,
) -> ActixResult<impl Responder> {
    Ok(api_result(ErrorScope::INBOX, inbox.get(&id).await))
}

/// 标记已读 / 未读
pub async fn set_read(
    id: web::Path<String>,
    body: web::Json<ReadStateRequest>,
    inbox: web::Data<InboxService>,
) -> ActixResult<impl Responder> {
    let result = inbox.mark_read(&id, body.read).await;
    if result.is_ok() {
        info!("Admin API: message {} marked read={}", id, body.read);
    }
    Ok(api_result(ErrorScope::INBOX, result))
}

pub async fn delete_message(
    id: web::Path<String>,
    inbox: web::Data<InboxService>,
) -> ActixResult<impl Responder> {
    Ok(match inbox.delete(&id).await {
        Ok(()) => success_response(MessageResponse {
            message: format!("Message {} deleted", id),
        }),
        Err(e) => error_in(ErrorScope::INBOX, &e),
    })
}
