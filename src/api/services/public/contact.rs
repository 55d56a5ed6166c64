use actix_web::{Responder, Result as ActixResult, web};

use crate::api::services::admin::{ErrorScope, created_response, error_in};
use crate::services::{ContactRequest, InboxService, SubmitReceipt};

/// 联系表单；通知失败时仍返回成功，`notified` 为 false
pub async fn submit_contact(
    body: web::Json<ContactRequest>,
    inbox: web::Data<InboxService>,
) -> ActixResult<impl Responder> {
    Ok(match inbox.submit(body.into_inner()).await {
        Ok((message, notified)) => created_response(SubmitReceipt {
            id: message.id,
            notified,
        }),
        Err(e) => error_in(ErrorScope::INBOX, &e),
    })
}
