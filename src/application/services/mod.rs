pub mod notification_service;

pub use notification_service::{MarkAllReadOutcome, NotificationService, MARK_ALL_LIMIT};
