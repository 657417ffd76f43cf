//! Delivery runner: consumes the pool's queue and performs deliveries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{OwnedSemaphorePermit, Semaphore, mpsc, watch};
use tokio::time;
use tracing;

use luxedrive_core::config::worker::WorkerConfig;
use luxedrive_core::traits::Delivery;

use crate::executor::{DeliveryError, DeliveryExecutor};

/// Performs queued deliveries with bounded concurrency
pub struct DeliveryRunner {
    /// Receiving end of the pool's queue
    receiver: mpsc::Receiver<Delivery>,
    /// Channel router
    executor: Arc<DeliveryExecutor>,
    /// Pool configuration
    config: WorkerConfig,
}

impl DeliveryRunner {
    /// Create a new runner
    pub fn new(
        receiver: mpsc::Receiver<Delivery>,
        executor: Arc<DeliveryExecutor>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            receiver,
            executor,
            config,
        }
    }

    /// Run until cancelled or the queue closes, then drain.
    ///
    /// A slot is claimed before the next delivery is taken off the queue,
    /// so shutdown stays observable while every slot is busy.
    pub async fn run(mut self, mut cancel: watch::Receiver<bool>) {
        let slots = self.config.concurrency.max(1);
        let semaphore = Arc::new(Semaphore::new(slots));
        let mut cancel_closed = false;

        loop {
            let permit = tokio::select! {
                changed = cancel.changed(), if !cancel_closed => {
                    if shutdown_requested(changed, &cancel, &mut cancel_closed) {
                        break;
                    }
                    continue;
                }
                permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let delivery = tokio::select! {
                changed = cancel.changed(), if !cancel_closed => {
                    if shutdown_requested(changed, &cancel, &mut cancel_closed) {
                        break;
                    }
                    continue;
                }
                next = self.receiver.recv() => match next {
                    Some(delivery) => delivery,
                    None => break,
                },
            };

            self.spawn(permit, delivery);
        }

        self.receiver.close();
        let grace = Duration::from_secs(self.config.shutdown_grace_seconds);
        tracing::info!(
            "Delivery runner draining queued and in-flight deliveries (grace {}s)",
            grace.as_secs()
        );

        let drain = async {
            while let Some(delivery) = self.receiver.recv().await {
                match Arc::clone(&semaphore).acquire_owned().await {
                    Ok(permit) => self.spawn(permit, delivery),
                    Err(_) => {
                        tracing::error!(
                            "Delivery semaphore closed, dropping {} delivery",
                            delivery.channel()
                        );
                        break;
                    }
                }
            }
            // Every permit back means every spawned delivery finished.
            let _ = semaphore.acquire_many(slots as u32).await;
        };

        if time::timeout(grace, drain).await.is_err() {
            tracing::warn!("Delivery runner grace period elapsed with deliveries still pending");
        }

        tracing::info!("Delivery runner shut down complete");
    }

    fn spawn(&self, permit: OwnedSemaphorePermit, delivery: Delivery) {
        let executor = Arc::clone(&self.executor);
        let max_attempts = self.config.max_attempts.max(1);
        let backoff = Duration::from_millis(self.config.retry_backoff_ms);

        tokio::spawn(async move {
            let _permit = permit;
            deliver_with_retry(&executor, &delivery, max_attempts, backoff).await;
        });
    }
}

fn shutdown_requested(
    changed: Result<(), watch::error::RecvError>,
    cancel: &watch::Receiver<bool>,
    cancel_closed: &mut bool,
) -> bool {
    match changed {
        Ok(()) if *cancel.borrow() => {
            tracing::info!("Delivery runner received shutdown signal");
            true
        }
        Ok(()) => false,
        Err(_) => {
            *cancel_closed = true;
            false
        }
    }
}

/// Attempt `delivery` until it succeeds, fails permanently, or runs out
/// of attempts. Failures are logged, never returned.
pub(crate) async fn deliver_with_retry(
    executor: &DeliveryExecutor,
    delivery: &Delivery,
    max_attempts: u32,
    backoff: Duration,
) {
    let channel = delivery.channel();

    for attempt in 1..=max_attempts {
        match executor.execute(delivery).await {
            Ok(()) => {
                tracing::debug!("{} delivery succeeded on attempt {}", channel, attempt);
                return;
            }
            Err(err) if err.is_retryable() && attempt < max_attempts => {
                tracing::warn!(
                    "{} delivery failed, attempt {}/{}: {}",
                    channel,
                    attempt,
                    max_attempts,
                    err
                );
                time::sleep(backoff).await;
            }
            Err(err) if err.is_retryable() => {
                tracing::error!(
                    "{} delivery failed after {} attempts: {}",
                    channel,
                    max_attempts,
                    err
                );
                return;
            }
            Err(DeliveryError::Internal(err)) => {
                tracing::error!("{} delivery internal error: {}", channel, err);
                return;
            }
            Err(err) => {
                tracing::error!("{} delivery failed permanently: {}", channel, err);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use luxedrive_core::error::AppError;
    use luxedrive_core::result::AppResult;
    use luxedrive_core::traits::{DeliveryQueue, MailMessage, MailTransport};

    use crate::handlers::MailHandler;
    use crate::queue::DeliveryPool;

    /// Mail transport failing the first `failures` calls with `error`.
    struct FlakyTransport {
        calls: AtomicU32,
        failures: u32,
        error: fn() -> AppError,
    }

    impl FlakyTransport {
        fn new(failures: u32, error: fn() -> AppError) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                failures,
                error,
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MailTransport for FlakyTransport {
        async fn send(&self, _message: &MailMessage) -> AppResult<()> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err((self.error)())
            } else {
                Ok(())
            }
        }
    }

    fn executor(transport: Arc<FlakyTransport>) -> Arc<DeliveryExecutor> {
        let mut executor = DeliveryExecutor::new(Duration::from_secs(5));
        executor.register(Arc::new(MailHandler::new(transport)));
        Arc::new(executor)
    }

    fn mail() -> Delivery {
        Delivery::Mail(MailMessage {
            to: "admin@luxedrive.com".to_string(),
            subject: "New booking".to_string(),
            html_body: "<p>hi</p>".to_string(),
        })
    }

    fn config() -> WorkerConfig {
        WorkerConfig {
            concurrency: 2,
            queue_capacity: 8,
            shutdown_grace_seconds: 5,
            max_attempts: 3,
            retry_backoff_ms: 1,
            ..WorkerConfig::default()
        }
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried() {
        let transport = FlakyTransport::new(2, || AppError::external_service("503"));
        deliver_with_retry(&executor(transport.clone()), &mail(), 3, Duration::from_millis(1)).await;
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn test_permanent_failure_is_not_retried() {
        let transport = FlakyTransport::new(5, || AppError::configuration("no key"));
        deliver_with_retry(&executor(transport.clone()), &mail(), 3, Duration::from_millis(1)).await;
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_pool_delivers_and_drains_on_shutdown() {
        let transport = FlakyTransport::new(0, || AppError::internal("unused"));
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (pool, handle) = DeliveryPool::start(executor(transport.clone()), &config(), cancel_rx);

        for _ in 0..3 {
            assert!(pool.submit(mail()));
        }
        cancel_tx.send(true).unwrap();
        handle.await.unwrap();

        assert_eq!(transport.calls(), 3);
        assert!(!pool.submit(mail()));
    }

    #[tokio::test]
    async fn test_runner_stops_when_pool_dropped() {
        let transport = FlakyTransport::new(0, || AppError::internal("unused"));
        let (_cancel_tx, cancel_rx) = watch::channel(false);
        let (pool, handle) = DeliveryPool::start(executor(transport.clone()), &config(), cancel_rx);

        assert!(pool.submit(mail()));
        drop(pool);
        handle.await.unwrap();

        assert_eq!(transport.calls(), 1);
    }

    /// Mail transport whose sends never complete.
    struct StuckTransport;

    #[async_trait]
    impl MailTransport for StuckTransport {
        async fn send(&self, _message: &MailMessage) -> AppResult<()> {
            std::future::pending::<()>().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_shutdown_observed_while_all_slots_busy() {
        let mut executor = DeliveryExecutor::new(Duration::from_secs(60));
        executor.register(Arc::new(MailHandler::new(Arc::new(StuckTransport))));
        let config = WorkerConfig {
            concurrency: 1,
            shutdown_grace_seconds: 0,
            ..config()
        };
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (pool, handle) = DeliveryPool::start(Arc::new(executor), &config, cancel_rx);

        assert!(pool.submit(mail()));
        assert!(pool.submit(mail()));
        time::sleep(Duration::from_millis(50)).await;
        cancel_tx.send(true).unwrap();

        let stopped = time::timeout(Duration::from_secs(2), handle).await;
        assert!(stopped.is_ok(), "runner did not stop while its only slot was busy");
    }
}
