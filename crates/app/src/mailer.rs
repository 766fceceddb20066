//! Outbound mail delivery.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur while delivering mail.
#[derive(Debug, Error)]
pub enum MailerError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The delivery endpoint returned a non-2xx response.
    #[error("unexpected response from mail endpoint: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one HTML email.
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailerError>;
}

/// Configuration for the HTTP mail delivery endpoint.
#[derive(Debug, Clone)]
pub struct HttpMailerConfig {
    /// Endpoint that accepts `{from, to, subject, html}` JSON posts.
    pub endpoint: String,

    /// Sender address, e.g. `"dailybrew <noreply@dailybrew.example>"`.
    pub from: String,
}

/// Mailer that posts messages to an HTTP delivery endpoint.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    config: HttpMailerConfig,
    http: Client,
}

impl HttpMailer {
    #[must_use]
    pub fn new(config: HttpMailerConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailerError> {
        let body = serde_json::json!({
            "from": self.config.from,
            "to": to,
            "subject": subject,
            "html": html_body,
        });

        let response = self
            .http
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(MailerError::UnexpectedResponse(format!(
                "send request failed with status {status}: {text}"
            )));
        }

        Ok(())
    }
}

/// Mailer used when no delivery endpoint is configured; logs and drops
/// the message so dependent workflows still make progress.
#[derive(Debug, Clone, Default)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, to: &str, subject: &str, _html_body: &str) -> Result<(), MailerError> {
        warn!("mail delivery not configured, skipping email {subject:?} to {to}");

        Ok(())
    }
}
