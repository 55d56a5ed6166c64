//! Contact form inbox

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ts_rs::TS;

use super::{Notifier, non_blank};
use crate::api::services::admin::TS_EXPORT_PATH;
use crate::errors::{HandlineError, Result};
use crate::storage::{Message, MessageFilter, Page, SeaOrmStorage};

pub const DEFAULT_SUBJECT: &str = "Website enquiry";

const MAX_NAME_LEN: usize = 120;
const MAX_EMAIL_LEN: usize = 254;
const MAX_SUBJECT_LEN: usize = 200;
const MAX_BODY_LEN: usize = 5000;

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub body: String,
}

/// 只做基本格式检查：local@domain.tld
pub fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

fn check_len(value: &str, max: usize, field: &str) -> Result<()> {
    if value.chars().count() > max {
        return Err(HandlineError::validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

impl ContactRequest {
    /// 校验并转成待保存的消息
    pub fn into_message(self) -> Result<Message> {
        let name = self.name.trim().to_string();
        let email = self.email.trim().to_string();
        let body = self.body.trim().to_string();
        let subject = non_blank(self.subject).unwrap_or_else(|| DEFAULT_SUBJECT.to_string());

        if name.is_empty() {
            return Err(HandlineError::validation("Name is required"));
        }
        if body.is_empty() {
            return Err(HandlineError::validation("Message body is required"));
        }
        if !is_plausible_email(&email) {
            return Err(HandlineError::validation(format!(
                "'{}' is not a valid email address",
                email
            )));
        }
        check_len(&name, MAX_NAME_LEN, "Name")?;
        check_len(&email, MAX_EMAIL_LEN, "Email")?;
        check_len(&subject, MAX_SUBJECT_LEN, "Subject")?;
        check_len(&body, MAX_BODY_LEN, "Message body")?;

        Ok(Message {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            email,
            company: non_blank(self.company),
            phone: non_blank(self.phone),
            subject,
            body,
            read: false,
            created_at: Utc::now(),
        })
    }
}

/// 提交结果：消息已保存；`notified` 表示通知是否已发出
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct SubmitReceipt {
    pub id: String,
    pub notified: bool,
}

pub struct InboxService {
    storage: Arc<SeaOrmStorage>,
    notifier: Arc<dyn Notifier>,
}

impl InboxService {
    pub fn new(storage: Arc<SeaOrmStorage>, notifier: Arc<dyn Notifier>) -> Self {
        Self { storage, notifier }
    }

    /// 保存消息后发送通知；通知失败不影响提交
    pub async fn submit(&self, request: ContactRequest) -> Result<(Message, bool)> {
        let message = request.into_message()?;
        self.storage.insert_message(&message).await?;
        info!("Contact message {} received from {}", message.id, message.email);

        let notified = match self.notifier.notify_new_message(&message).await {
            Ok(sent) => sent,
            Err(e) => {
                warn!(
                    "Notifier {} failed for message {}: {}",
                    self.notifier.name(),
                    message.id,
                    e
                );
                false
            }
        };
        Ok((message, notified))
    }

    pub async fn list(&self, filter: &MessageFilter, page: u64, page_size: u64) -> Result<Page<Message>> {
        self.storage.list_messages(filter, page, page_size).await
    }

    pub async fn get(&self, id: &str) -> Result<Message> {
        self.storage
            .get_message(id)
            .await?
            .ok_or_else(|| HandlineError::not_found(format!("Message '{}' not found", id)))
    }

    pub async fn mark_read(&self, id: &str, read: bool) -> Result<Message> {
        self.storage.set_message_read(id, read).await?;
        self.get(id).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.storage.delete_message(id).await
    }

    pub async fn unread_count(&self) -> Result<u64> {
        self.storage
            .count_messages(&MessageFilter { unread_only: true })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ContactRequest {
        ContactRequest {
            name: " Anna ".into(),
            email: "anna@cantiere.it".into(),
            company: Some("".into()),
            phone: None,
            subject: Some("   ".into()),
            body: "Need a quote for FFP3 masks".into(),
        }
    }

    #[test]
    fn test_plausible_email() {
        assert!(is_plausible_email("a@b.co"));
        assert!(is_plausible_email("first.last@sub.example.org"));
        assert!(!is_plausible_email("no-at-sign"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("a@nodot"));
        assert!(!is_plausible_email("a@.com"));
        assert!(!is_plausible_email("a b@example.com"));
        assert!(!is_plausible_email("a@b@example.com"));
    }

    #[test]
    fn test_into_message_normalizes_fields() {
        let message = request().into_message().unwrap();
        assert_eq!(message.name, "Anna");
        assert_eq!(message.subject, DEFAULT_SUBJECT);
        assert!(message.company.is_none());
        assert!(!message.read);
    }

    #[test]
    fn test_into_message_rejects_invalid() {
        let mut r = request();
        r.name = "  ".into();
        assert!(matches!(r.into_message(), Err(HandlineError::Validation(_))));

        let mut r = request();
        r.body = String::new();
        assert!(r.into_message().is_err());

        let mut r = request();
        r.email = "anna".into();
        assert!(r.into_message().is_err());

        let mut r = request();
        r.body = "x".repeat(MAX_BODY_LEN + 1);
        assert!(r.into_message().is_err());
    }
}
