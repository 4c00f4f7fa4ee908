use sqlx::{any::AnyRow, Row};
use uuid::Uuid;

use crate::domain::entities::notification::non_empty;
use crate::domain::entities::Notification;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::notification_repository::NotificationRepository;
use crate::infrastructure::persistence::Database;

const NOTIFICATION_COLUMNS: &str =
    "id, user_id, message, from_user, create_at, read, link, board_id, card_id";

/// Logs a storage failure with its context and hands it back unchanged.
fn storage_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |err| {
        tracing::error!("{}: {}", context, err);
        DomainError::Storage(err)
    }
}

// The Any driver cannot decode a NULL column into Option<String>
fn optional_text(row: &AnyRow, column: &str) -> Option<String> {
    non_empty(row.try_get::<String, _>(column).ok())
}

fn notification_from_row(row: &AnyRow) -> Result<Notification, sqlx::Error> {
    let read: i64 = row.try_get("read")?;

    Ok(Notification {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        message: row.try_get("message")?,
        from: row.try_get("from_user")?,
        create_at: row.try_get("create_at")?,
        read: read != 0,
        link: optional_text(row, "link"),
        board_id: optional_text(row, "board_id"),
        card_id: optional_text(row, "card_id"),
    })
}

#[async_trait::async_trait]
impl NotificationRepository for Database {
    async fn save_notification(&self, mut notification: Notification) -> DomainResult<Notification> {
        if notification.id.is_empty() {
            notification.id = Uuid::new_v4().to_string();
        }

        sqlx::query(
            "INSERT INTO notifications (id, user_id, message, from_user, create_at, read, link, board_id, card_id)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&notification.id)
        .bind(&notification.user_id)
        .bind(&notification.message)
        .bind(&notification.from)
        .bind(notification.create_at)
        .bind(if notification.read { 1 } else { 0 })
        .bind(&notification.link)
        .bind(&notification.board_id)
        .bind(&notification.card_id)
        .execute(&self.pool)
        .await
        .map_err(storage_error("Cannot insert notification"))?;

        tracing::debug!(
            "Notification saved: id={}, user_id={}",
            notification.id,
            notification.user_id
        );
        Ok(notification)
    }

    async fn list_notifications_for_user(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> DomainResult<Vec<Notification>> {
        // LIMIT is always present so OFFSET stays valid on every backend.
        let limit = if limit > 0 { limit } else { i64::MAX };
        let offset = offset.max(0);

        let rows = sqlx::query(&format!(
            "SELECT {}
             FROM notifications
             WHERE user_id = ?
             ORDER BY create_at DESC
             LIMIT ? OFFSET ?",
            NOTIFICATION_COLUMNS
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("Cannot get notifications for user"))?;

        rows.iter()
            .map(notification_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(storage_error("Cannot scan notification"))
    }

    async fn count_unread_notifications(&self, user_id: &str) -> DomainResult<i64> {
        let row = sqlx::query(
            "SELECT COUNT(id) AS count
             FROM notifications
             WHERE user_id = ? AND read = 0",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error("Cannot get unread notifications count"))?;

        row.try_get::<i64, _>("count")
            .map_err(storage_error("Cannot get unread notifications count"))
    }

    async fn get_notification(&self, id: &str) -> DomainResult<Option<Notification>> {
        let row = sqlx::query(&format!(
            "SELECT {}
             FROM notifications
             WHERE id = ?",
            NOTIFICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error("Cannot get notification"))?;

        row.as_ref()
            .map(notification_from_row)
            .transpose()
            .map_err(storage_error("Cannot get notification"))
    }

    async fn set_notification_read_status(&self, id: &str, read: bool) -> DomainResult<()> {
        sqlx::query(
            "UPDATE notifications
             SET read = ?
             WHERE id = ?",
        )
        .bind(if read { 1 } else { 0 })
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage_error("Cannot update notification read status"))?;

        Ok(())
    }

    async fn delete_notification(&self, id: &str) -> DomainResult<()> {
        sqlx::query("DELETE FROM notifications WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error("Cannot delete notification"))?;

        Ok(())
    }

    async fn delete_notifications_for_user(&self, user_id: &str) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM notifications WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(storage_error("Cannot delete notifications for user"))?;

        tracing::info!(
            "Deleted {} notifications for user {}",
            result.rows_affected(),
            user_id
        );
        Ok(())
    }
}
