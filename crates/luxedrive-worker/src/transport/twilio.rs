//! Twilio messaging transport (WhatsApp or SMS).

use std::time::Duration;

use async_trait::async_trait;

use luxedrive_core::config::notifications::NotificationsConfig;
use luxedrive_core::error::AppError;
use luxedrive_core::result::AppResult;
use luxedrive_core::traits::{MessageTransport, TextMessage};

use super::{http_client, status_error};

/// Sends text messages through the Twilio Messages API.
#[derive(Debug, Clone)]
pub struct TwilioMessageTransport {
    client: reqwest::Client,
    endpoint: String,
    account_sid: Option<String>,
    auth_token: Option<String>,
    from: Option<String>,
}

impl TwilioMessageTransport {
    /// Build a transport from notification settings.
    pub fn from_config(config: &NotificationsConfig) -> AppResult<Self> {
        let messaging = &config.messaging;
        Ok(Self {
            client: http_client(Duration::from_secs(config.transport_timeout_seconds))?,
            endpoint: messaging.endpoint.trim_end_matches('/').to_string(),
            account_sid: messaging.account_sid.clone().filter(|s| !s.is_empty()),
            auth_token: messaging.auth_token.clone().filter(|s| !s.is_empty()),
            from: messaging.from.clone().filter(|s| !s.is_empty()),
        })
    }

    /// Whether credentials and a sender are configured.
    pub fn is_configured(&self) -> bool {
        self.account_sid.is_some() && self.auth_token.is_some() && self.from.is_some()
    }
}

/// Address `to` on the same network as `from`: a `whatsapp:` sender
/// needs a `whatsapp:` recipient.
fn recipient_address(from: &str, to: &str) -> String {
    const WHATSAPP: &str = "whatsapp:";
    if from.starts_with(WHATSAPP) && !to.starts_with(WHATSAPP) {
        format!("{WHATSAPP}{to}")
    } else {
        to.to_string()
    }
}

#[async_trait]
impl MessageTransport for TwilioMessageTransport {
    async fn send(&self, message: &TextMessage) -> AppResult<()> {
        let (Some(sid), Some(token), Some(from)) = (
            self.account_sid.as_deref(),
            self.auth_token.as_deref(),
            self.from.as_deref(),
        ) else {
            return Err(AppError::configuration("Messaging credentials are not configured"));
        };

        let url = format!("{}/Accounts/{sid}/Messages.json", self.endpoint);
        let to = recipient_address(from, &message.to);

        let response = self
            .client
            .post(url)
            .basic_auth(sid, Some(token))
            .form(&[("From", from), ("To", to.as_str()), ("Body", message.body.as_str())])
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Messaging request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error("Messaging", status, &body));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luxedrive_core::error::ErrorKind;

    #[test]
    fn test_whatsapp_prefix_follows_sender() {
        assert_eq!(
            recipient_address("whatsapp:+14155238886", "+15550100"),
            "whatsapp:+15550100"
        );
        assert_eq!(
            recipient_address("whatsapp:+14155238886", "whatsapp:+15550100"),
            "whatsapp:+15550100"
        );
        assert_eq!(recipient_address("+14155238886", "+15550100"), "+15550100");
    }

    #[tokio::test]
    async fn test_unconfigured_transport_refuses() {
        let transport = TwilioMessageTransport::from_config(&NotificationsConfig::default()).unwrap();
        assert!(!transport.is_configured());
        let err = transport
            .send(&TextMessage {
                to: "+15550100".to_string(),
                body: "hi".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
