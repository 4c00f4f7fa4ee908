use axum::{extract::Request, middleware::Next, response::Response};

use crate::application::services::NotificationService;
use crate::infrastructure::http::middleware::error::ApiError;

/// Header carrying the user id established by the upstream authenticator.
pub const USER_ID_HEADER: &str = "X-User-Id";

#[derive(Clone)]
pub struct AppState {
    pub notification_service: NotificationService,
}

/// Identity of the caller, inserted into request extensions by [`require_user`].
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

impl AuthenticatedUser {
    /// Callers may only touch their own notifications.
    pub fn ensure_owner(&self, owner_id: &str) -> Result<(), ApiError> {
        if owner_id != self.user_id {
            return Err(ApiError::Forbidden(
                "user doesn't have permission to this notification".to_string(),
            ));
        }
        Ok(())
    }
}

/// Session validation happens upstream; this only rejects requests that
/// arrive without an identity.
pub async fn require_user(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let user_id = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::Unauthorized)?
        .to_string();

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}
