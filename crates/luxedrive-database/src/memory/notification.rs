//! In-memory notification store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use luxedrive_core::error::AppError;
use luxedrive_core::result::AppResult;
use luxedrive_entity::notification::{NewNotification, Notification, NotificationType};

use crate::stores::NotificationStore;

/// Notification store backed by a vector under a Tokio read-write lock.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotificationStore {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl MemoryNotificationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn addressed_to(n: &Notification, recipient: Option<Uuid>) -> bool {
    recipient.is_none_or(|uid| n.user_id == Some(uid))
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn create(&self, notification: &NewNotification) -> AppResult<Notification> {
        let mut rows = self.notifications.write().await;
        if let Some(key) = &notification.dedup_key {
            let taken = rows.iter().any(|n| {
                n.notification_type == notification.notification_type
                    && n.dedup_key.as_ref() == Some(key)
            });
            if taken {
                return Err(AppError::conflict("Notification already exists for this event"));
            }
        }
        let created = Notification {
            id: Uuid::new_v4(),
            user_id: notification.user_id,
            title: notification.title.clone(),
            message: notification.message.clone(),
            notification_type: notification.notification_type,
            priority: notification.priority,
            link: notification.link.clone(),
            dedup_key: notification.dedup_key.clone(),
            is_read: false,
            created_at: Utc::now(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        let rows = self.notifications.read().await;
        Ok(rows.iter().find(|n| n.id == id).cloned())
    }

    async fn exists_by_dedup_key(&self, kind: NotificationType, dedup_key: &str) -> AppResult<bool> {
        let rows = self.notifications.read().await;
        Ok(rows
            .iter()
            .any(|n| n.notification_type == kind && n.dedup_key.as_deref() == Some(dedup_key)))
    }

    async fn list(&self, recipient: Option<Uuid>) -> AppResult<Vec<Notification>> {
        let rows = self.notifications.read().await;
        let mut listed: Vec<Notification> = rows
            .iter()
            .filter(|n| addressed_to(n, recipient))
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    async fn count(&self, recipient: Option<Uuid>) -> AppResult<i64> {
        let rows = self.notifications.read().await;
        Ok(rows.iter().filter(|n| addressed_to(n, recipient)).count() as i64)
    }

    async fn count_unread(&self, recipient: Option<Uuid>) -> AppResult<i64> {
        let rows = self.notifications.read().await;
        Ok(rows
            .iter()
            .filter(|n| addressed_to(n, recipient) && !n.is_read)
            .count() as i64)
    }

    async fn mark_read(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.notifications.write().await;
        if let Some(n) = rows.iter_mut().find(|n| n.id == id) {
            n.is_read = true;
        }
        Ok(())
    }

    async fn mark_many_read(&self, recipient: Option<Uuid>, ids: &[Uuid]) -> AppResult<u64> {
        let mut rows = self.notifications.write().await;
        let mut changed = 0;
        for n in rows.iter_mut() {
            if !n.is_read && addressed_to(n, recipient) && ids.contains(&n.id) {
                n.is_read = true;
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn mark_all_read(&self, recipient: Option<Uuid>) -> AppResult<u64> {
        let mut rows = self.notifications.write().await;
        let mut changed = 0;
        for n in rows.iter_mut() {
            if !n.is_read && addressed_to(n, recipient) {
                n.is_read = true;
                changed += 1;
            }
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luxedrive_entity::notification::NotificationPriority;

    fn note(user_id: Option<Uuid>, key: Option<&str>) -> NewNotification {
        NewNotification {
            user_id,
            title: "New Booking Received".to_string(),
            message: "m".to_string(),
            notification_type: NotificationType::BookingNew,
            priority: NotificationPriority::High,
            link: String::new(),
            dedup_key: key.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_recipient_scoping() {
        let store = MemoryNotificationStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        store.create(&note(Some(alice), None)).await.unwrap();
        store.create(&note(Some(alice), None)).await.unwrap();
        store.create(&note(Some(bob), None)).await.unwrap();

        assert_eq!(store.count(Some(alice)).await.unwrap(), 2);
        assert_eq!(store.count(None).await.unwrap(), 3);
        assert_eq!(store.mark_all_read(Some(alice)).await.unwrap(), 2);
        assert_eq!(store.count_unread(None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_dedup_key_is_unique_per_type() {
        let store = MemoryNotificationStore::new();
        store.create(&note(None, Some("LX-ABC123"))).await.unwrap();
        assert!(
            store
                .exists_by_dedup_key(NotificationType::BookingNew, "LX-ABC123")
                .await
                .unwrap()
        );
        assert!(store.create(&note(None, Some("LX-ABC123"))).await.is_err());
    }
}
