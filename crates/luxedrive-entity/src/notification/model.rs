//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::{NotificationPriority, NotificationType};

/// An in-app notification shown in the admin dashboard or to a customer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient; `None` for broadcast notifications.
    pub user_id: Option<Uuid>,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub priority: NotificationPriority,
    /// Optional frontend link.
    pub link: String,
    /// Identifies the event that produced the notification, so the same
    /// event never yields two notifications. Booking notifications use the
    /// booking reference.
    #[serde(skip_serializing)]
    pub dedup_key: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Whether `user_id` may read and update this notification.
    pub fn is_visible_to(&self, user_id: Uuid, is_staff: bool) -> bool {
        is_staff || self.user_id == Some(user_id)
    }

    /// Relative age such as "3 hours ago", measured against `now`.
    pub fn time_ago_at(&self, now: DateTime<Utc>) -> String {
        let diff = now.signed_duration_since(self.created_at);
        let days = diff.num_days();
        let seconds = diff.num_seconds() - days * 86_400;

        if days > 0 {
            plural(days, "day")
        } else if seconds > 3600 {
            plural(seconds / 3600, "hour")
        } else if seconds > 60 {
            plural(seconds / 60, "minute")
        } else {
            "Just now".to_string()
        }
    }

    /// Relative age measured against the current time.
    pub fn time_ago(&self) -> String {
        self.time_ago_at(Utc::now())
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count > 1 {
        format!("{count} {unit}s ago")
    } else {
        format!("{count} {unit} ago")
    }
}

/// Data required to create a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    pub user_id: Option<Uuid>,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub priority: NotificationPriority,
    pub link: String,
    pub dedup_key: Option<String>,
}
