//! SendGrid v3 mail transport.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use luxedrive_core::config::notifications::NotificationsConfig;
use luxedrive_core::error::AppError;
use luxedrive_core::result::AppResult;
use luxedrive_core::traits::{MailMessage, MailTransport};

use super::{http_client, status_error};

/// Sends HTML email through the SendGrid v3 `mail/send` API.
#[derive(Debug, Clone)]
pub struct SendGridMailTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    from_email: String,
}

impl SendGridMailTransport {
    /// Build a transport from notification settings.
    pub fn from_config(config: &NotificationsConfig) -> AppResult<Self> {
        Ok(Self {
            client: http_client(Duration::from_secs(config.transport_timeout_seconds))?,
            endpoint: config.mail.endpoint.clone(),
            api_key: config.mail.api_key.clone().filter(|k| !k.is_empty()),
            from_email: config.from_email.clone(),
        })
    }

    /// Whether an API key is configured.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn payload(&self, message: &MailMessage) -> Value {
        json!({
            "personalizations": [{ "to": [{ "email": message.to }] }],
            "from": { "email": self.from_email },
            "subject": message.subject,
            "content": [{ "type": "text/html", "value": message.html_body }],
        })
    }
}

#[async_trait]
impl MailTransport for SendGridMailTransport {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::configuration("Mail API key is not configured"))?;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&self.payload(message))
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Mail request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error("Mail", status, &body));
        }
        Ok(())
    }
}
