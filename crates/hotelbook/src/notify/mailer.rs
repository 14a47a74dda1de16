use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::EmailConfig;

/// Provider request body: `{ from, to: [..], subject, html }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Per-recipient outcome reported back to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeliveryResult {
    pub fn delivered() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    /// The provider answered with a non-2xx status.
    #[error("{0}")]
    Rejected(String),
    #[error("email transport failed: {0}")]
    Transport(String),
    #[error("RESEND_API_KEY is not configured")]
    NotConfigured,
}

/// Outbound email transport.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Whether `send` can be attempted at all.
    fn ready(&self) -> bool {
        true
    }

    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError>;
}

/// Delivers through the Resend HTTP API.
#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for ResendMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendMailer")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ResendMailer {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            api_key,
        }
    }

    pub fn from_config(config: &EmailConfig) -> Self {
        Self::new(config.api_url.clone(), config.api_key.clone())
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    fn ready(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError> {
        let api_key = self.api_key.as_deref().ok_or(MailerError::NotConfigured)?;

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(email)
            .send()
            .await
            .map_err(|error| MailerError::Transport(error.to_string()))?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        if status.is_success() {
            tracing::info!(to = ?email.to, subject = %email.subject, id = ?body.get("id"), "email sent");
            return Ok(());
        }

        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Failed to send email")
            .to_string();
        tracing::error!(status = status.as_u16(), error = %message, "email provider rejected message");
        Err(MailerError::Rejected(message))
    }
}

/// Logs outbound messages instead of sending them. Used for local development.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError> {
        tracing::info!(
            from = %email.from,
            to = ?email.to,
            subject = %email.subject,
            html_bytes = email.html.len(),
            "email not sent (log mailer)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resend_mailer_without_key_is_not_ready() {
        let mailer = ResendMailer::new("https://api.resend.com/emails", None);
        assert!(!mailer.ready());
        assert!(!format!("{mailer:?}").contains("re_"));

        let keyed = ResendMailer::new("https://api.resend.com/emails", Some("re_123".to_string()));
        assert!(keyed.ready());
        assert!(!format!("{keyed:?}").contains("re_123"));
    }

    #[tokio::test]
    async fn resend_mailer_refuses_to_send_without_key() {
        let mailer = ResendMailer::new("http://127.0.0.1:9/emails", None);
        let email = OutboundEmail {
            from: "HotelBook <onboarding@resend.dev>".to_string(),
            to: vec!["admin@hotelbook.example".to_string()],
            subject: "ping".to_string(),
            html: "<p>ping</p>".to_string(),
        };
        assert!(matches!(
            mailer.send(&email).await,
            Err(MailerError::NotConfigured)
        ));
    }

    #[test]
    fn delivery_results_omit_empty_errors() {
        assert_eq!(
            serde_json::to_value(DeliveryResult::delivered()).expect("json"),
            serde_json::json!({ "success": true })
        );
        assert_eq!(
            serde_json::to_value(DeliveryResult::failed("domain not verified")).expect("json"),
            serde_json::json!({ "success": false, "error": "domain not verified" })
        );
    }
}
