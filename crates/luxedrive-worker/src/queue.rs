//! Bounded hand-off queue between request handlers and the delivery runner.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use luxedrive_core::config::worker::WorkerConfig;
use luxedrive_core::traits::{Delivery, DeliveryQueue};

use crate::executor::DeliveryExecutor;
use crate::runner::DeliveryRunner;

/// Front of the delivery pool. Cloning shares the same queue.
#[derive(Debug, Clone)]
pub struct DeliveryPool {
    /// `None` when deliveries are disabled
    sender: Option<mpsc::Sender<Delivery>>,
}

impl DeliveryPool {
    /// A pool that drops every delivery
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    /// Spawn the runner and return the pool feeding it. The runner stops
    /// when `cancel` turns `true` or every pool clone is dropped, then
    /// drains for `shutdown_grace_seconds`.
    pub fn start(
        executor: Arc<DeliveryExecutor>,
        config: &WorkerConfig,
        cancel: watch::Receiver<bool>,
    ) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));
        let runner = DeliveryRunner::new(receiver, executor, config.clone());
        let handle = tokio::spawn(runner.run(cancel));

        tracing::info!(
            "Delivery pool started: concurrency={}, queue_capacity={}",
            config.concurrency,
            config.queue_capacity
        );

        (
            Self {
                sender: Some(sender),
            },
            handle,
        )
    }
}

impl DeliveryQueue for DeliveryPool {
    fn submit(&self, delivery: Delivery) -> bool {
        let Some(sender) = &self.sender else {
            tracing::debug!("Delivery pool disabled, dropping {} delivery", delivery.channel());
            return false;
        };

        match sender.try_send(delivery) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(delivery)) => {
                tracing::warn!("Delivery queue full, dropping {} delivery", delivery.channel());
                false
            }
            Err(mpsc::error::TrySendError::Closed(delivery)) => {
                tracing::warn!("Delivery pool stopped, dropping {} delivery", delivery.channel());
                false
            }
        }
    }
}
