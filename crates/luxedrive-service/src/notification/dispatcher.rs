//! Fan-out of the new-booking event to in-app, email and messaging
//! channels.
//!
//! The in-app notification is written inline. Email and messaging are
//! rendered here and handed to a [`DeliveryQueue`]; the caller never waits
//! on a transport. Every failure is logged and swallowed so booking
//! creation cannot fail because of a notification.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use luxedrive_core::config::notifications::NotificationsConfig;
use luxedrive_core::error::ErrorKind;
use luxedrive_core::traits::{Delivery, DeliveryQueue};
use luxedrive_database::stores::{NotificationStore, UserStore};
use luxedrive_entity::booking::Booking;
use luxedrive_entity::notification::{NewNotification, NotificationPriority, NotificationType};

use super::recipient::AdminResolver;
use super::template;

/// What a single dispatch did, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The event had already been handled; nothing was done.
    pub duplicate: bool,
    /// An in-app notification was written.
    pub in_app: bool,
    /// The admin email was accepted by the delivery queue.
    pub email_queued: bool,
    /// The admin text message was accepted by the delivery queue.
    pub text_queued: bool,
}

/// Sends the new-booking notification on every configured channel.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifications: Arc<dyn NotificationStore>,
    admins: AdminResolver,
    deliveries: Arc<dyn DeliveryQueue>,
    config: NotificationsConfig,
}

impl NotificationDispatcher {
    /// Creates a dispatcher.
    pub fn new(
        users: Arc<dyn UserStore>,
        notifications: Arc<dyn NotificationStore>,
        deliveries: Arc<dyn DeliveryQueue>,
        config: NotificationsConfig,
    ) -> Self {
        Self {
            notifications,
            admins: AdminResolver::new(users, config.inapp_admin_email.clone()),
            deliveries,
            config,
        }
    }

    /// Notify the admins about a newly created booking.
    ///
    /// Runs at most once per booking reference. Never returns an error.
    pub async fn dispatch(&self, booking: &Booking) -> DispatchOutcome {
        let reference = booking.booking_reference.as_str();
        let mut outcome = DispatchOutcome::default();

        match self
            .notifications
            .exists_by_dedup_key(NotificationType::BookingNew, reference)
            .await
        {
            Ok(true) => {
                info!(reference = %reference, "Notification already exists for booking, skipping");
                outcome.duplicate = true;
                return outcome;
            }
            Ok(false) => {}
            // The unique dedup index still rejects a second in-app row.
            Err(e) => warn!(reference = %reference, error = %e, "Dedup lookup failed"),
        }

        let link = self.config.admin_bookings_url();

        match self.write_in_app(booking, &link).await {
            InApp::Written => outcome.in_app = true,
            InApp::Duplicate => {
                outcome.duplicate = true;
                return outcome;
            }
            InApp::Skipped => {}
        }

        let mail = template::booking_email(booking, &self.config.admin_email, &link);
        outcome.email_queued = self.enqueue(reference, Delivery::Mail(mail));

        if let Some(phone) = self.config.admin_phone.as_deref().filter(|p| !p.is_empty()) {
            let text = template::booking_text(booking, phone);
            outcome.text_queued = self.enqueue(reference, Delivery::Text(text));
        }

        info!(
            reference = %reference,
            in_app = outcome.in_app,
            email_queued = outcome.email_queued,
            text_queued = outcome.text_queued,
            "Booking notification dispatched"
        );
        outcome
    }

    async fn write_in_app(&self, booking: &Booking, link: &str) -> InApp {
        let admin = match self.admins.resolve().await {
            Ok(Some(admin)) => admin,
            Ok(None) => {
                warn!(
                    configured = ?self.config.inapp_admin_email,
                    "No active admin found, skipping in-app notification"
                );
                return InApp::Skipped;
            }
            Err(e) => {
                error!(error = %e, "Admin lookup failed, skipping in-app notification");
                return InApp::Skipped;
            }
        };

        let new = NewNotification {
            user_id: Some(admin.id),
            title: template::IN_APP_TITLE.to_string(),
            message: template::in_app_message(booking),
            notification_type: NotificationType::BookingNew,
            priority: NotificationPriority::High,
            link: link.to_string(),
            dedup_key: Some(booking.booking_reference.clone()),
        };

        match self.notifications.create(&new).await {
            Ok(created) => {
                debug!(notification_id = %created.id, admin = %admin.email, "In-app notification created");
                InApp::Written
            }
            Err(e) if e.kind == ErrorKind::Conflict => {
                info!(reference = %booking.booking_reference, "Concurrent dispatch already notified, skipping");
                InApp::Duplicate
            }
            Err(e) => {
                error!(reference = %booking.booking_reference, error = %e, "Failed to create in-app notification");
                InApp::Skipped
            }
        }
    }

    fn enqueue(&self, reference: &str, delivery: Delivery) -> bool {
        let channel = delivery.channel();
        let accepted = self.deliveries.submit(delivery);
        if !accepted {
            warn!(reference = %reference, channel, "Delivery dropped, queue unavailable");
        }
        accepted
    }
}

enum InApp {
    Written,
    Duplicate,
    Skipped,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use uuid::Uuid;

    use luxedrive_core::error::AppError;
    use luxedrive_core::result::AppResult;
    use luxedrive_database::memory::{MemoryNotificationStore, MemoryUserStore};
    use luxedrive_entity::notification::Notification;
    use luxedrive_entity::user::NewUser;

    use crate::notification::template::tests::sample_booking;

    /// Delivery queue that records or refuses submissions.
    pub(crate) struct RecordingQueue {
        accept: bool,
        seen: Mutex<Vec<Delivery>>,
    }

    impl RecordingQueue {
        pub(crate) fn accepting() -> Self {
            Self { accept: true, seen: Mutex::new(Vec::new()) }
        }

        pub(crate) fn rejecting() -> Self {
            Self { accept: false, seen: Mutex::new(Vec::new()) }
        }

        pub(crate) fn recorded(&self) -> Vec<Delivery> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl DeliveryQueue for RecordingQueue {
        fn submit(&self, delivery: Delivery) -> bool {
            if self.accept {
                self.seen.lock().unwrap().push(delivery);
            }
            self.accept
        }
    }

    pub(crate) fn dispatcher_with(
        users: Arc<dyn UserStore>,
        notifications: Arc<dyn NotificationStore>,
        queue: Arc<dyn DeliveryQueue>,
        admin_phone: Option<&str>,
    ) -> NotificationDispatcher {
        let config = NotificationsConfig {
            admin_phone: admin_phone.map(str::to_string),
            ..NotificationsConfig::default()
        };
        NotificationDispatcher::new(users, notifications, queue, config)
    }

    async fn users_with_superuser() -> Arc<MemoryUserStore> {
        let users = Arc::new(MemoryUserStore::new());
        users
            .create(&NewUser {
                email: "root@luxedrive.com".to_string(),
                password_hash: "x".to_string(),
                first_name: "Root".to_string(),
                last_name: String::new(),
                is_staff: true,
                is_superuser: true,
            })
            .await
            .unwrap();
        users
    }

    #[tokio::test]
    async fn test_dispatch_writes_in_app_and_queues_email() {
        let users = users_with_superuser().await;
        let store = Arc::new(MemoryNotificationStore::new());
        let queue = Arc::new(RecordingQueue::accepting());
        let dispatcher = dispatcher_with(users, store.clone(), queue.clone(), None);

        let outcome = dispatcher.dispatch(&sample_booking("LX-AAAAAA")).await;
        assert!(outcome.in_app && outcome.email_queued && !outcome.text_queued);

        let listed = store.list(None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "New Booking Received");
        assert_eq!(listed[0].priority, NotificationPriority::High);
        assert_eq!(listed[0].link, "http://localhost:5173/#/admin/bookings");

        let recorded = queue.recorded();
        assert_eq!(recorded.len(), 1);
        match &recorded[0] {
            Delivery::Mail(mail) => assert_eq!(mail.to, "admin@luxedrive.com"),
            other => panic!("unexpected delivery {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_second_dispatch_is_a_no_op() {
        let users = users_with_superuser().await;
        let store = Arc::new(MemoryNotificationStore::new());
        let queue = Arc::new(RecordingQueue::accepting());
        let dispatcher = dispatcher_with(users, store.clone(), queue.clone(), Some("+15550000"));
        let booking = sample_booking("LX-BBBBBB");

        dispatcher.dispatch(&booking).await;
        let again = dispatcher.dispatch(&booking).await;

        assert!(again.duplicate);
        assert_eq!(store.count(None).await.unwrap(), 1);
        assert_eq!(queue.recorded().len(), 2);
    }

    #[tokio::test]
    async fn test_messaging_only_with_phone() {
        let users = users_with_superuser().await;
        let store = Arc::new(MemoryNotificationStore::new());
        let queue = Arc::new(RecordingQueue::accepting());
        let dispatcher = dispatcher_with(users, store, queue.clone(), Some("+15550000"));

        let outcome = dispatcher.dispatch(&sample_booking("LX-CCCCCC")).await;
        assert!(outcome.text_queued);
        assert!(matches!(&queue.recorded()[1], Delivery::Text(t) if t.to == "+15550000"));
    }

    #[tokio::test]
    async fn test_full_queue_does_not_block_in_app() {
        let users = users_with_superuser().await;
        let store = Arc::new(MemoryNotificationStore::new());
        let dispatcher = dispatcher_with(
            users,
            store.clone(),
            Arc::new(RecordingQueue::rejecting()),
            None,
        );

        let outcome = dispatcher.dispatch(&sample_booking("LX-DDDDDD")).await;
        assert!(outcome.in_app);
        assert!(!outcome.email_queued);
        assert_eq!(store.count(None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_no_admin_still_sends_email() {
        let users = Arc::new(MemoryUserStore::new());
        let store = Arc::new(MemoryNotificationStore::new());
        let queue = Arc::new(RecordingQueue::accepting());
        let dispatcher = dispatcher_with(users, store.clone(), queue.clone(), None);

        let outcome = dispatcher.dispatch(&sample_booking("LX-EEEEEE")).await;
        assert!(!outcome.in_app);
        assert!(outcome.email_queued);
        assert_eq!(store.count(None).await.unwrap(), 0);
    }

    /// Notification store whose writes always fail.
    struct BrokenNotifications;

    #[async_trait]
    impl NotificationStore for BrokenNotifications {
        async fn create(&self, _n: &NewNotification) -> AppResult<Notification> {
            Err(AppError::database("connection reset"))
        }
        async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<Notification>> {
            Ok(None)
        }
        async fn exists_by_dedup_key(&self, _k: NotificationType, _key: &str) -> AppResult<bool> {
            Err(AppError::database("connection reset"))
        }
        async fn list(&self, _r: Option<Uuid>) -> AppResult<Vec<Notification>> {
            Ok(Vec::new())
        }
        async fn count(&self, _r: Option<Uuid>) -> AppResult<i64> {
            Ok(0)
        }
        async fn count_unread(&self, _r: Option<Uuid>) -> AppResult<i64> {
            Ok(0)
        }
        async fn mark_read(&self, _id: Uuid) -> AppResult<()> {
            Ok(())
        }
        async fn mark_many_read(&self, _r: Option<Uuid>, _ids: &[Uuid]) -> AppResult<u64> {
            Ok(0)
        }
        async fn mark_all_read(&self, _r: Option<Uuid>) -> AppResult<u64> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_broken_store_still_queues_email() {
        let users = users_with_superuser().await;
        let queue = Arc::new(RecordingQueue::accepting());
        let dispatcher = dispatcher_with(users, Arc::new(BrokenNotifications), queue.clone(), None);

        let outcome = dispatcher.dispatch(&sample_booking("LX-FFFFFF")).await;
        assert!(!outcome.in_app);
        assert!(outcome.email_queued);
        assert_eq!(queue.recorded().len(), 1);
    }
}
