use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    application::services::MarkAllReadOutcome,
    domain::entities::{Notification, Pagination},
    infrastructure::http::middleware::{ApiError, ApiResult, AppState, AuthenticatedUser},
};

/// Raw query values; parsed by [`Pagination::from_query`] so that bad
/// integers come back as validation errors rather than extractor rejections.
#[derive(Debug, Deserialize)]
pub struct ListNotificationsQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

/// List notifications for the authenticated user, newest first
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ListNotificationsQuery>,
) -> ApiResult<Json<Vec<Notification>>> {
    let page = Pagination::from_query(query.limit.as_deref(), query.offset.as_deref())?;

    let notifications = state
        .notification_service
        .list_for_user(&user.user_id, page.limit, page.offset)
        .await?;

    Ok(Json(notifications))
}

/// Create a notification addressed to the authenticated user
pub async fn create_notification(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Notification>)> {
    let request = Notification::from_json(&body)
        .map_err(|_| ApiError::BadRequest("cannot parse request body".to_string()))?;

    if request.message.is_empty() {
        return Err(ApiError::BadRequest("message is required".to_string()));
    }
    if request.from.is_empty() {
        return Err(ApiError::BadRequest("from is required".to_string()));
    }

    // Id and timestamp are always server-assigned for API callers.
    let notification = Notification {
        id: String::new(),
        user_id: user.user_id.clone(),
        create_at: 0,
        ..request
    };

    let created = state
        .notification_service
        .create_notification(notification)
        .await?;

    tracing::info!(
        "Notification {} created by user {}",
        created.id,
        user.user_id
    );
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_unread_count(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<UnreadCountResponse>> {
    let count = state
        .notification_service
        .count_unread(&user.user_id)
        .await?;

    Ok(Json(UnreadCountResponse { count }))
}

pub async fn get_notification(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Notification>> {
    let notification = find_owned(&state, &user, &id).await?;
    Ok(Json(notification))
}

pub async fn mark_notification_as_read(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    find_owned(&state, &user, &id).await?;
    state.notification_service.mark_as_read(&id).await?;
    Ok(Json(json!({})))
}

pub async fn mark_all_notifications_as_read(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<MarkAllReadOutcome>> {
    let outcome = state
        .notification_service
        .mark_all_as_read(&user.user_id)
        .await?;
    Ok(Json(outcome))
}

pub async fn delete_notification(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    find_owned(&state, &user, &id).await?;
    state.notification_service.delete_notification(&id).await?;

    tracing::info!("Notification {} deleted by user {}", id, user.user_id);
    Ok(Json(json!({})))
}

/// Load a notification and make sure it belongs to the caller.
async fn find_owned(
    state: &AppState,
    user: &AuthenticatedUser,
    id: &str,
) -> ApiResult<Notification> {
    let notification = state
        .notification_service
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("notification not found".to_string()))?;

    user.ensure_owner(&notification.user_id)?;
    Ok(notification)
}
