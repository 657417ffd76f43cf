//! Email delivery handler.

use std::sync::Arc;

use async_trait::async_trait;
use tracing;

use luxedrive_core::traits::{Delivery, MailTransport};

use super::classify;
use crate::executor::{DeliveryError, DeliveryHandler};

/// Sends `Delivery::Mail` through a mail transport
pub struct MailHandler {
    transport: Arc<dyn MailTransport>,
}

impl MailHandler {
    /// Create a handler for `transport`
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl DeliveryHandler for MailHandler {
    fn channel(&self) -> &'static str {
        "email"
    }

    async fn deliver(&self, delivery: &Delivery) -> Result<(), DeliveryError> {
        let Delivery::Mail(message) = delivery else {
            return Err(DeliveryError::Permanent(format!(
                "Mail handler received a {} delivery",
                delivery.channel()
            )));
        };

        self.transport.send(message).await.map_err(classify)?;
        tracing::info!("Email sent to: {}", message.to);
        Ok(())
    }
}
