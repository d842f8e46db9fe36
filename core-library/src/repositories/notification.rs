//! Notification repository trait and implementation

use crate::error::Result;
use crate::models::Notification;
use async_trait::async_trait;
use sqlx::{query_as, SqlitePool};

/// Notification repository interface
///
/// Notifications are inserted by the sync reconciler as part of its
/// transaction; this repository serves the per-user read and mark-read paths.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// List notifications for one user, newest first
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Notification>>;

    /// Count unread notifications for one user
    async fn count_unread(&self, user_id: i64) -> Result<i64>;

    /// Mark one notification as read
    ///
    /// Returns `true` if a row was updated.
    async fn mark_read(&self, id: i64) -> Result<bool>;
}

/// SQLite implementation of NotificationRepository
pub struct SqliteNotificationRepository {
    pool: SqlitePool,
}

impl SqliteNotificationRepository {
    /// Create a new SQLite notification repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for SqliteNotificationRepository {
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Notification>> {
        let notifications = query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    async fn count_unread(&self, user_id: i64) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM notifications WHERE user_id = ? AND is_read = 0")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }

    async fn mark_read(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
