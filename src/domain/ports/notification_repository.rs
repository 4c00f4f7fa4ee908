use crate::domain::entities::Notification;
use crate::domain::errors::DomainResult;

/// Durable storage for notifications.
///
/// Writes are insert-only apart from the read flag. Absence is never an
/// error: lookups return `None` and updates or deletes of missing ids are
/// no-ops.
#[async_trait::async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Insert a new row, assigning an id when the notification has none.
    async fn save_notification(&self, notification: Notification) -> DomainResult<Notification>;

    /// Most recent first. `limit <= 0` is unbounded and `offset <= 0` starts at zero.
    async fn list_notifications_for_user(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> DomainResult<Vec<Notification>>;

    async fn count_unread_notifications(&self, user_id: &str) -> DomainResult<i64>;

    async fn get_notification(&self, id: &str) -> DomainResult<Option<Notification>>;

    async fn set_notification_read_status(&self, id: &str, read: bool) -> DomainResult<()>;

    async fn delete_notification(&self, id: &str) -> DomainResult<()>;

    async fn delete_notifications_for_user(&self, user_id: &str) -> DomainResult<()>;
}
