//! Hand-off point between request handling and background delivery.

use super::transport::{MailMessage, TextMessage};

/// A rendered outbound message waiting for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// An email for the mail transport.
    Mail(MailMessage),
    /// A text message for the messaging transport.
    Text(TextMessage),
}

impl Delivery {
    /// Short channel name for logs.
    pub fn channel(&self) -> &'static str {
        match self {
            Self::Mail(_) => "email",
            Self::Text(_) => "messaging",
        }
    }
}

/// Accepts deliveries without waiting for them to be sent.
pub trait DeliveryQueue: Send + Sync + 'static {
    /// Enqueue a delivery. Returns `false` when it was dropped because the
    /// queue is full or closed.
    fn submit(&self, delivery: Delivery) -> bool;
}
