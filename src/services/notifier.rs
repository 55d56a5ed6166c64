//! 新留言邮件通知
//!
//! HTTP 实现把 JSON 发给配置的邮件网关（同步 ureq，放在 spawn_blocking 中执行）；
//! 未配置网关时使用 Noop 实现。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};
use ureq::Agent;

use crate::config::NotifyConfig;
use crate::errors::{HandlineError, Result};
use crate::storage::Message;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// `Ok(true)` 已发送，`Ok(false)` 未配置
    async fn notify_new_message(&self, message: &Message) -> Result<bool>;

    fn name(&self) -> &'static str;
}

pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify_new_message(&self, message: &Message) -> Result<bool> {
        debug!("Notifier disabled, skipping message {}", message.id);
        Ok(false)
    }

    fn name(&self) -> &'static str {
        "Noop"
    }
}

pub struct HttpNotifier {
    endpoint: String,
    api_key: Option<String>,
    recipient: String,
    sender: String,
    agent: Agent,
}

impl HttpNotifier {
    pub fn new(endpoint: &str, config: &NotifyConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs.max(1))))
            .build()
            .into();

        Self {
            endpoint: endpoint.to_string(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            recipient: config.recipient.clone(),
            sender: config.sender.clone(),
            agent,
        }
    }

    fn payload(&self, message: &Message) -> serde_json::Value {
        let mut text = format!(
            "From: {} <{}>\n",
            message.name, message.email
        );
        if let Some(company) = &message.company {
            text.push_str(&format!("Company: {}\n", company));
        }
        if let Some(phone) = &message.phone {
            text.push_str(&format!("Phone: {}\n", phone));
        }
        text.push('\n');
        text.push_str(&message.body);

        json!({
            "to": self.recipient,
            "from": self.sender,
            "reply_to": message.email,
            "subject": format!("[HandLine] {}", message.subject),
            "text": text,
        })
    }

    /// 同步发送（在 spawn_blocking 中调用）
    fn send_sync(
        agent: Agent,
        endpoint: String,
        api_key: Option<String>,
        body: serde_json::Value,
    ) -> Result<()> {
        let mut request = agent.post(&endpoint).header("Content-Type", "application/json");
        if let Some(key) = api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        request.send_json(&body).map_err(|e| {
            HandlineError::notify(format!("Email gateway request failed: {}", e))
        })?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify_new_message(&self, message: &Message) -> Result<bool> {
        let body = self.payload(message);
        let agent = self.agent.clone();
        let endpoint = self.endpoint.clone();
        let api_key = self.api_key.clone();

        tokio::task::spawn_blocking(move || Self::send_sync(agent, endpoint, api_key, body))
            .await
            .unwrap_or_else(|e| {
                warn!("Notifier spawn_blocking failed: {}", e);
                Err(HandlineError::notify("Notification task failed"))
            })?;

        info!("Notification sent for message {}", message.id);
        Ok(true)
    }

    fn name(&self) -> &'static str {
        "Http"
    }
}

/// 根据配置选择实现
pub fn notifier_from_config(config: &NotifyConfig) -> Arc<dyn Notifier> {
    match config
        .email_endpoint
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
    {
        Some(endpoint) => match url::Url::parse(endpoint) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
                info!("Email notifications enabled: {}", endpoint);
                Arc::new(HttpNotifier::new(endpoint, config))
            }
            Ok(parsed) => {
                warn!(
                    "Unsupported email endpoint scheme '{}', notifications disabled",
                    parsed.scheme()
                );
                Arc::new(NoopNotifier)
            }
            Err(e) => {
                warn!("Invalid email endpoint '{}': {}, notifications disabled", endpoint, e);
                Arc::new(NoopNotifier)
            }
        },
        None => Arc::new(NoopNotifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn message() -> Message {
        Message {
            id: "m1".into(),
            name: "Marco".into(),
            email: "marco@example.com".into(),
            company: Some("Porto Srl".into()),
            phone: None,
            subject: "Quote".into(),
            body: "Need 200 pairs".into(),
            read: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_notifier_from_config() {
        let mut config = NotifyConfig::default();
        assert_eq!(notifier_from_config(&config).name(), "Noop");

        config.email_endpoint = Some("  ".into());
        assert_eq!(notifier_from_config(&config).name(), "Noop");

        config.email_endpoint = Some("not a url".into());
        assert_eq!(notifier_from_config(&config).name(), "Noop");

        config.email_endpoint = Some("ftp://mail.example.com/send".into());
        assert_eq!(notifier_from_config(&config).name(), "Noop");

        config.email_endpoint = Some("http://127.0.0.1:9/send".into());
        assert_eq!(notifier_from_config(&config).name(), "Http");
    }

    #[test]
    fn test_payload_fields() {
        let notifier = HttpNotifier::new("http://127.0.0.1:9/send", &NotifyConfig::default());
        let payload = notifier.payload(&message());

        assert_eq!(payload["reply_to"], "marco@example.com");
        assert_eq!(payload["subject"], "[HandLine] Quote");
        let text = payload["text"].as_str().unwrap();
        assert!(text.contains("Company: Porto Srl"));
        assert!(!text.contains("Phone:"));
        assert!(text.ends_with("Need 200 pairs"));
    }

    #[tokio::test]
    async fn test_noop_reports_not_notified() {
        assert!(!NoopNotifier.notify_new_message(&message()).await.unwrap());
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_notify_error() {
        let config = NotifyConfig {
            timeout_secs: 1,
            ..Default::default()
        };
        // 先占用一个临时端口再释放，保证连接被拒绝
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let endpoint = format!("http://127.0.0.1:{}/send", port);
        let notifier = HttpNotifier::new(&endpoint, &config);
        let err = notifier.notify_new_message(&message()).await.unwrap_err();
        assert!(matches!(err, HandlineError::Notify(_)));
    }
}
