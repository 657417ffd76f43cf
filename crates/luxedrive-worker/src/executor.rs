//! Delivery executor: routes deliveries to registered channel handlers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing;

use luxedrive_core::error::AppError;
use luxedrive_core::traits::Delivery;

/// Trait for channel handler implementations
#[async_trait]
pub trait DeliveryHandler: Send + Sync {
    /// The channel this handler serves ("email", "messaging")
    fn channel(&self) -> &'static str;

    /// Perform the delivery once
    async fn deliver(&self, delivery: &Delivery) -> Result<(), DeliveryError>;
}

/// Error from a delivery attempt
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// Permanent failure, do not retry
    #[error("Permanent delivery failure: {0}")]
    Permanent(String),

    /// Transient failure, may retry
    #[error("Transient delivery failure: {0}")]
    Transient(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] AppError),
}

impl DeliveryError {
    /// Whether another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Dispatches deliveries to the handler of their channel
pub struct DeliveryExecutor {
    /// Registered handlers by channel
    handlers: HashMap<&'static str, Arc<dyn DeliveryHandler>>,
    /// Upper bound on a single handler call
    timeout: Duration,
}

impl DeliveryExecutor {
    /// Create an executor whose handler calls are cut off after `timeout`
    pub fn new(timeout: Duration) -> Self {
        Self {
            handlers: HashMap::new(),
            timeout,
        }
    }

    /// Register a channel handler
    pub fn register(&mut self, handler: Arc<dyn DeliveryHandler>) {
        let channel = handler.channel();
        tracing::info!("Registered delivery handler for channel '{}'", channel);
        self.handlers.insert(channel, handler);
    }

    /// Perform one attempt of `delivery`
    pub async fn execute(&self, delivery: &Delivery) -> Result<(), DeliveryError> {
        let channel = delivery.channel();
        let handler = self.handlers.get(channel).ok_or_else(|| {
            DeliveryError::Permanent(format!("No handler registered for channel '{}'", channel))
        })?;

        match tokio::time::timeout(self.timeout, handler.deliver(delivery)).await {
            Ok(result) => result,
            Err(_) => Err(DeliveryError::Transient(format!(
                "{} delivery timed out after {}s",
                channel,
                self.timeout.as_secs_f32()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luxedrive_core::traits::{MailMessage, TextMessage};

    struct SlowHandler;

    #[async_trait]
    impl DeliveryHandler for SlowHandler {
        fn channel(&self) -> &'static str {
            "email"
        }

        async fn deliver(&self, _delivery: &Delivery) -> Result<(), DeliveryError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }

    fn mail() -> Delivery {
        Delivery::Mail(MailMessage {
            to: "admin@luxedrive.com".to_string(),
            subject: "s".to_string(),
            html_body: "b".to_string(),
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_handler_times_out_as_transient() {
        let mut executor = DeliveryExecutor::new(Duration::from_secs(5));
        executor.register(Arc::new(SlowHandler));

        let err = executor.execute(&mail()).await.unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_unknown_channel_is_permanent() {
        let executor = DeliveryExecutor::new(Duration::from_secs(5));
        let text = Delivery::Text(TextMessage {
            to: "+15550000".to_string(),
            body: "hi".to_string(),
        });
        let err = executor.execute(&text).await.unwrap_err();
        assert!(matches!(err, DeliveryError::Permanent(_)));
        assert!(!err.is_retryable());
    }
}
