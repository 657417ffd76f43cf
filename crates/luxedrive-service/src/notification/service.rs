//! In-app notification listing and read-state management.
//!
//! Staff see and update every notification; other users only their own.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use luxedrive_core::error::AppError;
use luxedrive_core::result::AppResult;
use luxedrive_database::stores::NotificationStore;
use luxedrive_entity::notification::Notification;

use crate::context::RequestContext;

/// A listing with its counters.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
    pub unread_count: i64,
    pub total_count: i64,
}

/// Manages in-app notifications.
#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationStore>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notifications: Arc<dyn NotificationStore>) -> Self {
        Self { notifications }
    }

    /// Notifications visible to the caller, newest first.
    pub async fn list_notifications(&self, ctx: &RequestContext) -> AppResult<NotificationList> {
        let scope = ctx.owner_filter();
        let notifications = self.notifications.list(scope).await?;
        let unread_count = self.notifications.count_unread(scope).await?;
        let total_count = self.notifications.count(scope).await?;

        Ok(NotificationList {
            notifications,
            unread_count,
            total_count,
        })
    }

    /// Unread notifications visible to the caller.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<i64> {
        self.notifications.count_unread(ctx.owner_filter()).await
    }

    /// Mark either every visible notification or the listed ones as read.
    /// Returns the confirmation message.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_ids: &[Uuid],
        mark_all: bool,
    ) -> AppResult<String> {
        if mark_all {
            self.mark_all_read(ctx).await?;
            return Ok("All notifications marked as read".to_string());
        }

        if notification_ids.is_empty() {
            return Err(AppError::validation(
                "Please provide notification_ids or mark_all=true",
            ));
        }

        let updated = self
            .notifications
            .mark_many_read(ctx.owner_filter(), notification_ids)
            .await?;
        info!(user_id = %ctx.user_id, updated, "Notifications marked read");
        Ok(format!("{updated} notifications marked as read"))
    }

    /// Mark every visible notification as read. Returns how many changed.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        let updated = self.notifications.mark_all_read(ctx.owner_filter()).await?;
        info!(user_id = %ctx.user_id, updated, "All notifications marked read");
        Ok(updated)
    }

    /// Mark one notification as read.
    pub async fn mark_one_read(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let notification = self
            .notifications
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;

        if !notification.is_visible_to(ctx.user_id, ctx.is_staff) {
            return Err(AppError::authorization("Permission denied"));
        }

        self.notifications.mark_read(id).await
    }
}
