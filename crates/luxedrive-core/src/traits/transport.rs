//! Outbound notification transports.
//!
//! The dispatcher renders content and hands it to these collaborators; the
//! worker crate provides HTTP implementations.

use async_trait::async_trait;

use crate::result::AppResult;

/// A rendered email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
}

/// A rendered short text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessage {
    /// Recipient phone number.
    pub to: String,
    /// Message body.
    pub body: String,
}

/// Sends email.
#[async_trait]
pub trait MailTransport: Send + Sync + 'static {
    /// Deliver a single message.
    async fn send(&self, message: &MailMessage) -> AppResult<()>;
}

/// Sends text messages (WhatsApp or SMS).
#[async_trait]
pub trait MessageTransport: Send + Sync + 'static {
    /// Deliver a single message.
    async fn send(&self, message: &TextMessage) -> AppResult<()>;
}
