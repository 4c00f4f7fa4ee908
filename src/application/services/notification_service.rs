use serde::Serialize;
use std::sync::Arc;

use crate::domain::entities::notification::non_empty;
use crate::domain::entities::{board_link, Actor, Notification};
use crate::domain::errors::{require, DomainError, DomainResult};
use crate::domain::ports::board_lookup::BoardLookup;
use crate::domain::ports::clock::{Clock, IdGenerator};
use crate::domain::ports::notification_repository::NotificationRepository;
use crate::infrastructure::runtime::system::{SystemClock, UuidGenerator};

/// Upper bound of notifications examined by one mark-all-as-read call.
pub const MARK_ALL_LIMIT: i64 = 1000;

/// Result of a best-effort bulk read-flag update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MarkAllReadOutcome {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Domain events that produce a notification for someone other than the actor.
#[derive(Debug, Clone, Copy)]
enum NotificationEvent<'a> {
    BoardMembership {
        board_id: &'a str,
    },
    CardAssignment {
        board_id: &'a str,
        card_id: &'a str,
        card_title: &'a str,
    },
    CardComment {
        board_id: &'a str,
        card_id: &'a str,
        card_title: &'a str,
    },
}

impl NotificationEvent<'_> {
    fn check_required(&self, user_id: &str) -> DomainResult<()> {
        fn present(s: &str) -> bool {
            !s.is_empty()
        }

        let ok = present(user_id)
            && match *self {
                NotificationEvent::BoardMembership { board_id } => present(board_id),
                NotificationEvent::CardAssignment {
                    board_id, card_id, ..
                }
                | NotificationEvent::CardComment {
                    board_id, card_id, ..
                } => present(board_id) && present(card_id),
            };

        if ok {
            return Ok(());
        }
        Err(DomainError::validation(match self {
            NotificationEvent::BoardMembership { .. } => "userID, addedBy and boardID are required",
            NotificationEvent::CardAssignment { .. } => {
                "userID, assignedBy, boardID and cardID are required"
            }
            NotificationEvent::CardComment { .. } => {
                "userID, commentedBy, boardID and cardID are required"
            }
        }))
    }

    fn kind(&self) -> &'static str {
        match self {
            NotificationEvent::BoardMembership { .. } => "board_membership",
            NotificationEvent::CardAssignment { .. } => "card_assignment",
            NotificationEvent::CardComment { .. } => "card_comment",
        }
    }
}

/// Nobody is told about their own actions.
fn is_self_notification(actor: &Actor, recipient_id: &str) -> bool {
    actor.id == recipient_id
}

#[derive(Clone)]
pub struct NotificationService {
    notification_repo: Arc<dyn NotificationRepository>,
    board_lookup: Arc<dyn BoardLookup>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    mark_all_limit: i64,
}

impl NotificationService {
    pub fn new(
        notification_repo: Arc<dyn NotificationRepository>,
        board_lookup: Arc<dyn BoardLookup>,
    ) -> Self {
        Self {
            notification_repo,
            board_lookup,
            clock: Arc::new(SystemClock::new()),
            ids: Arc::new(UuidGenerator::new()),
            mark_all_limit: MARK_ALL_LIMIT,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_mark_all_limit(mut self, limit: i64) -> Self {
        self.mark_all_limit = limit;
        self
    }

    /// Create a notification from a caller-supplied entity.
    ///
    /// Fills in a missing id and a non-positive `create_at`, and derives the
    /// link from board context when none was given. An unknown board leaves
    /// the link empty; a failed board lookup fails the whole call.
    pub async fn create_notification(
        &self,
        mut notification: Notification,
    ) -> DomainResult<Notification> {
        notification.validate()?;

        if notification.id.is_empty() {
            notification.id = self.ids.new_id();
        }
        if notification.create_at <= 0 {
            notification.create_at = self.clock.now_millis();
        }
        notification.link = non_empty(notification.link.take());
        notification.board_id = non_empty(notification.board_id.take());
        notification.card_id = non_empty(notification.card_id.take());

        if notification.link.is_none() {
            if let Some(board_id) = notification.board_id.as_deref() {
                notification.link = self
                    .resolve_link(board_id, notification.card_id.as_deref())
                    .await?;
            }
        }

        self.persist(notification).await
    }

    /// Create an unread notification from its parts.
    pub async fn create_notification_with_params(
        &self,
        user_id: &str,
        message: &str,
        from: &str,
        board_id: Option<&str>,
        card_id: Option<&str>,
    ) -> DomainResult<Notification> {
        require(user_id, "userID")?;
        require(message, "message")?;
        require(from, "from")?;

        let mut notification = Notification::new(user_id, message, from);
        notification.id = self.ids.new_id();
        notification.create_at = self.clock.now_millis();

        notification.card_id = non_empty(card_id.map(str::to_string));
        if let Some(board_id) = board_id.filter(|b| !b.is_empty()) {
            notification.board_id = Some(board_id.to_string());
            notification.link = self
                .resolve_link(board_id, notification.card_id.as_deref())
                .await?;
        }

        self.persist(notification).await
    }

    pub async fn list_for_user(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> DomainResult<Vec<Notification>> {
        require(user_id, "userID")?;
        self.notification_repo
            .list_notifications_for_user(user_id, limit, offset)
            .await
    }

    pub async fn count_unread(&self, user_id: &str) -> DomainResult<i64> {
        require(user_id, "userID")?;
        self.notification_repo
            .count_unread_notifications(user_id)
            .await
    }

    /// `None` when no notification has this id.
    pub async fn get_by_id(&self, notification_id: &str) -> DomainResult<Option<Notification>> {
        require(notification_id, "notificationID")?;
        self.notification_repo.get_notification(notification_id).await
    }

    pub async fn mark_as_read(&self, notification_id: &str) -> DomainResult<()> {
        require(notification_id, "notificationID")?;
        self.notification_repo
            .set_notification_read_status(notification_id, true)
            .await
    }

    /// Mark every unread notification of a user as read, one update each.
    ///
    /// Only the newest `mark_all_limit` notifications are examined. Failing
    /// updates are logged and counted but do not fail the call; only the
    /// initial listing can.
    pub async fn mark_all_as_read(&self, user_id: &str) -> DomainResult<MarkAllReadOutcome> {
        require(user_id, "userID")?;

        let notifications = self
            .notification_repo
            .list_notifications_for_user(user_id, self.mark_all_limit, 0)
            .await?;

        let mut outcome = MarkAllReadOutcome::default();
        for notification in notifications.iter().filter(|n| !n.read) {
            outcome.attempted += 1;
            match self
                .notification_repo
                .set_notification_read_status(&notification.id, true)
                .await
            {
                Ok(()) => outcome.succeeded += 1,
                Err(e) => {
                    outcome.failed += 1;
                    metrics::counter!("notifications_mark_all_failures_total").increment(1);
                    tracing::error!(
                        "Error marking notification as read: notification_id={}, error={}",
                        notification.id,
                        e
                    );
                }
            }
        }

        tracing::info!(
            "Marked notifications as read for user {}: attempted={}, succeeded={}, failed={}",
            user_id,
            outcome.attempted,
            outcome.succeeded,
            outcome.failed
        );
        Ok(outcome)
    }

    pub async fn delete_notification(&self, notification_id: &str) -> DomainResult<()> {
        require(notification_id, "notificationID")?;
        self.notification_repo
            .delete_notification(notification_id)
            .await
    }

    pub async fn delete_notifications_for_user(&self, user_id: &str) -> DomainResult<()> {
        require(user_id, "userID")?;
        self.notification_repo
            .delete_notifications_for_user(user_id)
            .await
    }

    /// Tell `user_id` that `added_by` added them to a board.
    pub async fn create_board_membership_notification(
        &self,
        added_by: &Actor,
        user_id: &str,
        board_id: &str,
    ) -> DomainResult<()> {
        self.notify(
            added_by,
            user_id,
            NotificationEvent::BoardMembership { board_id },
        )
        .await
    }

    /// Tell `user_id` that `assigned_by` assigned them to a card.
    pub async fn create_card_assignment_notification(
        &self,
        assigned_by: &Actor,
        user_id: &str,
        board_id: &str,
        card_id: &str,
        card_title: &str,
    ) -> DomainResult<()> {
        self.notify(
            assigned_by,
            user_id,
            NotificationEvent::CardAssignment {
                board_id,
                card_id,
                card_title,
            },
        )
        .await
    }

    /// Tell `user_id` that `commented_by` commented on a card.
    pub async fn create_card_comment_notification(
        &self,
        commented_by: &Actor,
        user_id: &str,
        board_id: &str,
        card_id: &str,
        card_title: &str,
    ) -> DomainResult<()> {
        self.notify(
            commented_by,
            user_id,
            NotificationEvent::CardComment {
                board_id,
                card_id,
                card_title,
            },
        )
        .await
    }

    async fn notify(
        &self,
        actor: &Actor,
        user_id: &str,
        event: NotificationEvent<'_>,
    ) -> DomainResult<()> {
        event.check_required(user_id)?;

        if is_self_notification(actor, user_id) {
            metrics::counter!("notifications_suppressed_total", "event" => event.kind())
                .increment(1);
            tracing::debug!(
                "Skipping {} notification: user {} is the actor",
                event.kind(),
                user_id
            );
            return Ok(());
        }

        let (message, board_id, card_id) = match event {
            NotificationEvent::BoardMembership { board_id } => {
                let board = self
                    .board_lookup
                    .get_board(board_id)
                    .await?
                    .ok_or_else(|| {
                        DomainError::NotFound(format!("board not found: {}", board_id))
                    })?;
                (
                    format!("{} added you to the board \"{}\"", actor.username, board.title),
                    board_id,
                    None,
                )
            }
            NotificationEvent::CardAssignment {
                board_id,
                card_id,
                card_title,
            } => (
                format!("{} assigned you to the card \"{}\"", actor.username, card_title),
                board_id,
                Some(card_id),
            ),
            NotificationEvent::CardComment {
                board_id,
                card_id,
                card_title,
            } => (
                format!("{} commented on the card \"{}\"", actor.username, card_title),
                board_id,
                Some(card_id),
            ),
        };

        self.create_notification_with_params(
            user_id,
            &message,
            &actor.username,
            Some(board_id),
            card_id,
        )
        .await?;
        Ok(())
    }

    async fn resolve_link(
        &self,
        board_id: &str,
        card_id: Option<&str>,
    ) -> DomainResult<Option<String>> {
        let board = self.board_lookup.get_board(board_id).await?;
        if board.is_none() {
            tracing::debug!("Board {} not found, leaving notification link empty", board_id);
        }
        Ok(board.map(|_| board_link(board_id, card_id)))
    }

    async fn persist(&self, notification: Notification) -> DomainResult<Notification> {
        let saved = self
            .notification_repo
            .save_notification(notification)
            .await?;
        metrics::counter!("notifications_created_total").increment(1);
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Board;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory repository that counts every call and can fail chosen updates.
    #[derive(Default)]
    struct MockNotificationRepository {
        rows: Mutex<Vec<Notification>>,
        calls: AtomicUsize,
        fail_updates_for: Mutex<HashSet<String>>,
        fail_listing: Mutex<bool>,
    }

    impl MockNotificationRepository {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn rows(&self) -> Vec<Notification> {
            self.rows.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl NotificationRepository for MockNotificationRepository {
        async fn save_notification(
            &self,
            notification: Notification,
        ) -> DomainResult<Notification> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.rows.lock().unwrap().push(notification.clone());
            Ok(notification)
        }

        async fn list_notifications_for_user(
            &self,
            user_id: &str,
            limit: i64,
            offset: i64,
        ) -> DomainResult<Vec<Notification>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if *self.fail_listing.lock().unwrap() {
                return Err(DomainError::Storage(sqlx::Error::PoolTimedOut));
            }
            let mut rows: Vec<_> = self
                .rows()
                .into_iter()
                .filter(|n| n.user_id == user_id)
                .collect();
            rows.sort_by(|a, b| b.create_at.cmp(&a.create_at));
            let rows = rows.into_iter().skip(offset.max(0) as usize);
            Ok(if limit > 0 {
                rows.take(limit as usize).collect()
            } else {
                rows.collect()
            })
        }

        async fn count_unread_notifications(&self, user_id: &str) -> DomainResult<i64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .rows()
                .iter()
                .filter(|n| n.user_id == user_id && !n.read)
                .count() as i64)
        }

        async fn get_notification(&self, id: &str) -> DomainResult<Option<Notification>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.rows().into_iter().find(|n| n.id == id))
        }

        async fn set_notification_read_status(&self, id: &str, read: bool) -> DomainResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_updates_for.lock().unwrap().contains(id) {
                return Err(DomainError::Storage(sqlx::Error::Protocol(
                    "update failed".to_string(),
                )));
            }
            for n in self.rows.lock().unwrap().iter_mut().filter(|n| n.id == id) {
                n.read = read;
            }
            Ok(())
        }

        async fn delete_notification(&self, id: &str) -> DomainResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.rows.lock().unwrap().retain(|n| n.id != id);
            Ok(())
        }

        async fn delete_notifications_for_user(&self, user_id: &str) -> DomainResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.rows.lock().unwrap().retain(|n| n.user_id != user_id);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockBoardLookup {
        boards: HashMap<String, Board>,
        fail: bool,
    }

    impl MockBoardLookup {
        fn with_board(id: &str, title: &str) -> Self {
            let mut boards = HashMap::new();
            boards.insert(id.to_string(), Board::new(id, title));
            Self { boards, fail: false }
        }
    }

    #[async_trait::async_trait]
    impl BoardLookup for MockBoardLookup {
        async fn get_board(&self, board_id: &str) -> DomainResult<Option<Board>> {
            if self.fail {
                return Err(DomainError::Storage(sqlx::Error::PoolClosed));
            }
            Ok(self.boards.get(board_id).cloned())
        }
    }

    struct FixedClock(AtomicI64);

    impl Clock for FixedClock {
        fn now_millis(&self) -> i64 {
            self.0.fetch_add(1, Ordering::SeqCst)
        }
    }

    struct SequentialIds(AtomicUsize);

    impl IdGenerator for SequentialIds {
        fn new_id(&self) -> String {
            format!("n{}", self.0.fetch_add(1, Ordering::SeqCst))
        }
    }

    fn service_with(
        boards: MockBoardLookup,
    ) -> (NotificationService, Arc<MockNotificationRepository>) {
        let repo = Arc::new(MockNotificationRepository::default());
        let service = NotificationService::new(repo.clone(), Arc::new(boards))
            .with_clock(Arc::new(FixedClock(AtomicI64::new(1_000))))
            .with_id_generator(Arc::new(SequentialIds(AtomicUsize::new(1))));
        (service, repo)
    }

    fn service() -> (NotificationService, Arc<MockNotificationRepository>) {
        service_with(MockBoardLookup::with_board("B1", "Roadmap"))
    }

    #[tokio::test]
    async fn test_create_fills_id_and_timestamp() {
        let (service, _repo) = service();

        let created = service
            .create_notification(Notification::new("user_1", "hello", "alice"))
            .await
            .unwrap();

        assert_eq!(created.id, "n1");
        assert_eq!(created.create_at, 1_000);
        assert!(!created.read);
        assert!(created.link.is_none());
    }

    #[tokio::test]
    async fn test_create_keeps_supplied_id_and_timestamp() {
        let (service, _repo) = service();
        let mut n = Notification::new("user_1", "hello", "alice");
        n.id = "custom".to_string();
        n.create_at = 42;

        let created = service.create_notification(n).await.unwrap();
        assert_eq!(created.id, "custom");
        assert_eq!(created.create_at, 42);
    }

    #[tokio::test]
    async fn test_create_replaces_negative_timestamp() {
        let (service, _repo) = service();
        let mut n = Notification::new("user_1", "hello", "alice");
        n.create_at = -5;

        let created = service.create_notification(n).await.unwrap();
        assert_eq!(created.create_at, 1_000);
    }

    #[tokio::test]
    async fn test_create_derives_card_link() {
        let (service, _repo) = service();
        let n = Notification::new("user_1", "hello", "alice")
            .with_board("B1", Some("C1".to_string()));

        let created = service.create_notification(n).await.unwrap();
        assert_eq!(created.link.as_deref(), Some("/boards/B1/C1"));
    }

    #[tokio::test]
    async fn test_create_derives_board_link() {
        let (service, _repo) = service();
        let n = Notification::new("user_1", "hello", "alice").with_board("B1", None);

        let created = service.create_notification(n).await.unwrap();
        assert_eq!(created.link.as_deref(), Some("/boards/B1"));
    }

    #[tokio::test]
    async fn test_create_keeps_explicit_link() {
        let (service, _repo) = service();
        let mut n = Notification::new("user_1", "hello", "alice").with_board("B1", None);
        n.link = Some("/custom".to_string());

        let created = service.create_notification(n).await.unwrap();
        assert_eq!(created.link.as_deref(), Some("/custom"));
    }

    #[tokio::test]
    async fn test_create_with_unknown_board_skips_link() {
        let (service, repo) = service();
        let n = Notification::new("user_1", "hello", "alice").with_board("missing", None);

        let created = service.create_notification(n).await.unwrap();
        assert!(created.link.is_none());
        assert_eq!(created.board_id.as_deref(), Some("missing"));
        assert_eq!(repo.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_create_fails_when_board_lookup_fails() {
        let (service, repo) = service_with(MockBoardLookup {
            fail: true,
            ..Default::default()
        });
        let n = Notification::new("user_1", "hello", "alice").with_board("B1", None);

        let err = service.create_notification(n).await.unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
        assert!(repo.rows().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_storage() {
        let (service, repo) = service();

        for n in [
            Notification::new("", "hello", "alice"),
            Notification::new("user_1", "", "alice"),
            Notification::new("user_1", "hello", ""),
        ] {
            let err = service.create_notification(n).await.unwrap_err();
            assert!(matches!(err, DomainError::ValidationError(_)));
        }

        assert!(service
            .create_notification_with_params("user_1", "", "alice", None, None)
            .await
            .is_err());
        assert!(service.list_for_user("", 10, 0).await.is_err());
        assert!(service.count_unread("").await.is_err());
        assert!(service.get_by_id("").await.is_err());
        assert!(service.mark_as_read("").await.is_err());
        assert!(service.mark_all_as_read("").await.is_err());
        assert!(service.delete_notification("").await.is_err());
        assert!(service.delete_notifications_for_user("").await.is_err());

        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_with_params_builds_unread_notification() {
        let (service, _repo) = service();

        let created = service
            .create_notification_with_params("user_1", "msg", "bob", Some("B1"), Some("C9"))
            .await
            .unwrap();

        assert!(!created.read);
        assert_eq!(created.from, "bob");
        assert_eq!(created.card_id.as_deref(), Some("C9"));
        assert_eq!(created.link.as_deref(), Some("/boards/B1/C9"));
    }

    #[tokio::test]
    async fn test_create_with_params_without_board() {
        let (service, _repo) = service();

        let created = service
            .create_notification_with_params("user_1", "msg", "bob", Some(""), None)
            .await
            .unwrap();

        assert!(created.board_id.is_none());
        assert!(created.link.is_none());
    }

    #[tokio::test]
    async fn test_create_with_params_keeps_card_without_board() {
        let (service, repo) = service();

        let created = service
            .create_notification_with_params("user_1", "msg", "bob", None, Some("C1"))
            .await
            .unwrap();

        assert_eq!(created.card_id.as_deref(), Some("C1"));
        assert!(created.board_id.is_none());
        assert!(created.link.is_none());
        assert_eq!(repo.rows()[0].card_id.as_deref(), Some("C1"));
    }

    #[tokio::test]
    async fn test_mark_all_as_read_is_idempotent() {
        let (service, _repo) = service();
        for i in 0..3 {
            service
                .create_notification_with_params("user_1", &format!("m{}", i), "bob", None, None)
                .await
                .unwrap();
        }
        let first = service.list_for_user("user_1", 0, 0).await.unwrap()[0].id.clone();
        service.mark_as_read(&first).await.unwrap();

        let outcome = service.mark_all_as_read("user_1").await.unwrap();
        assert_eq!(
            outcome,
            MarkAllReadOutcome {
                attempted: 2,
                succeeded: 2,
                failed: 0
            }
        );
        assert_eq!(service.count_unread("user_1").await.unwrap(), 0);

        let again = service.mark_all_as_read("user_1").await.unwrap();
        assert_eq!(again, MarkAllReadOutcome::default());
    }

    #[tokio::test]
    async fn test_mark_all_as_read_tolerates_partial_failure() {
        let (service, repo) = service();
        let mut ids = Vec::new();
        for i in 0..3 {
            let n = service
                .create_notification_with_params("user_1", &format!("m{}", i), "bob", None, None)
                .await
                .unwrap();
            ids.push(n.id);
        }
        repo.fail_updates_for.lock().unwrap().insert(ids[1].clone());

        let outcome = service.mark_all_as_read("user_1").await.unwrap();
        assert_eq!(outcome.attempted, 3);
        assert_eq!(outcome.succeeded, 2);
        assert_eq!(outcome.failed, 1);
        assert_eq!(service.count_unread("user_1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_mark_all_as_read_fails_when_listing_fails() {
        let (service, repo) = service();
        *repo.fail_listing.lock().unwrap() = true;

        let err = service.mark_all_as_read("user_1").await.unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
    }

    #[tokio::test]
    async fn test_mark_all_as_read_respects_limit() {
        let (service, _repo) = service();
        let service = service.with_mark_all_limit(2);
        for i in 0..3 {
            service
                .create_notification_with_params("user_1", &format!("m{}", i), "bob", None, None)
                .await
                .unwrap();
        }

        let outcome = service.mark_all_as_read("user_1").await.unwrap();
        assert_eq!(outcome.attempted, 2);
        assert_eq!(service.count_unread("user_1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_card_assignment_suppresses_self_notification() {
        let (service, repo) = service();
        let actor = Actor::new("user_1", "alice");

        service
            .create_card_assignment_notification(&actor, "user_1", "B1", "C1", "Fix bug")
            .await
            .unwrap();

        assert!(repo.rows().is_empty());
    }

    #[tokio::test]
    async fn test_self_suppression_applies_to_every_event() {
        let (service, repo) = service();
        let actor = Actor::new("user_1", "alice");

        service
            .create_board_membership_notification(&actor, "user_1", "B1")
            .await
            .unwrap();
        service
            .create_card_comment_notification(&actor, "user_1", "B1", "C1", "Fix bug")
            .await
            .unwrap();

        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_card_assignment_notification() {
        let (service, repo) = service();
        let actor = Actor::new("user_2", "bob");

        service
            .create_card_assignment_notification(&actor, "user_1", "B1", "C1", "Fix bug")
            .await
            .unwrap();

        let rows = repo.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_id, "user_1");
        assert_eq!(rows[0].from, "bob");
        assert_eq!(rows[0].message, "bob assigned you to the card \"Fix bug\"");
        assert_eq!(rows[0].link.as_deref(), Some("/boards/B1/C1"));
    }

    #[tokio::test]
    async fn test_card_comment_notification() {
        let (service, repo) = service();
        let actor = Actor::new("user_2", "bob");

        service
            .create_card_comment_notification(&actor, "user_1", "B1", "C1", "Fix bug")
            .await
            .unwrap();

        assert_eq!(
            repo.rows()[0].message,
            "bob commented on the card \"Fix bug\""
        );
    }

    #[tokio::test]
    async fn test_board_membership_uses_board_title() {
        let (service, repo) = service();
        let actor = Actor::new("user_2", "bob");

        service
            .create_board_membership_notification(&actor, "user_1", "B1")
            .await
            .unwrap();

        let rows = repo.rows();
        assert_eq!(rows[0].message, "bob added you to the board \"Roadmap\"");
        assert_eq!(rows[0].link.as_deref(), Some("/boards/B1"));
        assert!(rows[0].card_id.is_none());
    }

    #[tokio::test]
    async fn test_board_membership_for_missing_board() {
        let (service, repo) = service();
        let actor = Actor::new("user_2", "bob");

        let err = service
            .create_board_membership_notification(&actor, "user_1", "nope")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound(ref m) if m == "board not found: nope"));
        assert!(repo.rows().is_empty());
    }

    #[tokio::test]
    async fn test_event_helpers_require_fields() {
        let (service, repo) = service();
        let actor = Actor::new("user_2", "bob");

        let err = service
            .create_card_assignment_notification(&actor, "user_1", "B1", "", "t")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: userID, assignedBy, boardID and cardID are required"
        );

        assert!(service
            .create_board_membership_notification(&actor, "", "B1")
            .await
            .is_err());

        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_system_actor_without_id_still_notifies() {
        let (service, repo) = service();
        let system = Actor::new("", "system");

        service
            .create_card_comment_notification(&system, "user_1", "B1", "C1", "Launch")
            .await
            .unwrap();

        let rows = repo.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].message, "system commented on the card \"Launch\"");
    }

    #[tokio::test]
    async fn test_delete_for_user_keeps_other_users() {
        let (service, _repo) = service();
        service
            .create_notification_with_params("user_1", "a", "bob", None, None)
            .await
            .unwrap();
        service
            .create_notification_with_params("user_2", "b", "bob", None, None)
            .await
            .unwrap();

        service.delete_notifications_for_user("user_1").await.unwrap();

        assert!(service.list_for_user("user_1", 0, 0).await.unwrap().is_empty());
        assert_eq!(service.list_for_user("user_2", 0, 0).await.unwrap().len(), 1);
    }
}
