use crate::infrastructure::http::controllers::notifications;
use crate::infrastructure::http::middleware::{require_user, AppState};
use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/api/notifications",
            get(notifications::list_notifications).post(notifications::create_notification),
        )
        .route(
            "/api/notifications/unread_count",
            get(notifications::get_unread_count),
        )
        .route(
            "/api/notifications/mark_all_as_read",
            put(notifications::mark_all_notifications_as_read),
        )
        .route(
            "/api/notifications/:id",
            get(notifications::get_notification).delete(notifications::delete_notification),
        )
        .route(
            "/api/notifications/:id/read",
            put(notifications::mark_notification_as_read),
        )
        .layer(middleware::from_fn(require_user));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
