//! Text message delivery handler.

use std::sync::Arc;

use async_trait::async_trait;
use tracing;

use luxedrive_core::traits::{Delivery, MessageTransport};

use super::classify;
use crate::executor::{DeliveryError, DeliveryHandler};

/// Sends `Delivery::Text` through a messaging transport
pub struct MessagingHandler {
    transport: Arc<dyn MessageTransport>,
}

impl MessagingHandler {
    /// Create a handler for `transport`
    pub fn new(transport: Arc<dyn MessageTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl DeliveryHandler for MessagingHandler {
    fn channel(&self) -> &'static str {
        "messaging"
    }

    async fn deliver(&self, delivery: &Delivery) -> Result<(), DeliveryError> {
        let Delivery::Text(message) = delivery else {
            return Err(DeliveryError::Permanent(format!(
                "Messaging handler received a {} delivery",
                delivery.channel()
            )));
        };

        self.transport.send(message).await.map_err(classify)?;
        tracing::info!("Text message sent to: {}", message.to);
        Ok(())
    }
}
