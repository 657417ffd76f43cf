//! Notification repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use luxedrive_core::error::{AppError, ErrorKind};
use luxedrive_core::result::AppResult;
use luxedrive_entity::notification::{NewNotification, Notification, NotificationType};

use crate::stores::NotificationStore;

/// Repository for in-app notifications.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn create(&self, notification: &NewNotification) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (id, user_id, title, message, notification_type, priority, link, dedup_key) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(notification.user_id)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.notification_type)
        .bind(notification.priority)
        .bind(&notification.link)
        .bind(&notification.dedup_key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false);
            if duplicate {
                AppError::conflict("Notification already exists for this event")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
            }
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find notification", e)
            })
    }

    async fn exists_by_dedup_key(&self, kind: NotificationType, dedup_key: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM notifications WHERE notification_type = $1 AND dedup_key = $2)",
        )
        .bind(kind)
        .bind(dedup_key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check notification dedup", e)
        })
    }

    async fn list(&self, recipient: Option<Uuid>) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE ($1::uuid IS NULL OR user_id = $1) \
             ORDER BY created_at DESC",
        )
        .bind(recipient)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))
    }

    async fn count(&self, recipient: Option<Uuid>) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE ($1::uuid IS NULL OR user_id = $1)",
        )
        .bind(recipient)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count notifications", e))
    }

    async fn count_unread(&self, recipient: Option<Uuid>) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications \
             WHERE ($1::uuid IS NULL OR user_id = $1) AND is_read = FALSE",
        )
        .bind(recipient)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }

    async fn mark_read(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;
        Ok(())
    }

    async fn mark_many_read(&self, recipient: Option<Uuid>, ids: &[Uuid]) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE \
             WHERE ($1::uuid IS NULL OR user_id = $1) AND id = ANY($2) AND is_read = FALSE",
        )
        .bind(recipient)
        .bind(ids)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;
        Ok(result.rows_affected())
    }

    async fn mark_all_read(&self, recipient: Option<Uuid>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE \
             WHERE ($1::uuid IS NULL OR user_id = $1) AND is_read = FALSE",
        )
        .bind(recipient)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;
        Ok(result.rows_affected())
    }
}
