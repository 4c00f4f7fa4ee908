pub mod auth;
pub mod error;

pub use auth::{require_user, AppState, AuthenticatedUser, USER_ID_HEADER};
pub use error::{ApiError, ApiResult};
