use crate::application::services::NotificationService;
use crate::config::Config;
use crate::domain::ports::board_lookup::BoardLookup;
use crate::domain::ports::notification_repository::NotificationRepository;
use crate::infrastructure::http::middleware::AppState;
use crate::infrastructure::persistence::Database;
use std::sync::Arc;

pub fn build_app_state(db: Database, config: &Config) -> AppState {
    let notification_repo: Arc<dyn NotificationRepository> = Arc::new(db.clone());
    let board_lookup: Arc<dyn BoardLookup> = Arc::new(db);

    let notification_service = NotificationService::new(notification_repo, board_lookup)
        .with_mark_all_limit(config.mark_all_limit);
    tracing::info!(
        "Notification service initialized (mark-all limit {})",
        config.mark_all_limit
    );

    AppState {
        notification_service,
    }
}
