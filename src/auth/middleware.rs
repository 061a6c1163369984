use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::error::AppError;

pub const SESSION_USER_ID: &str = "user_id";
pub const SESSION_AUTH_TIMESTAMP: &str = "auth_timestamp";

/// Rejects requests without a logged-in session with 401.
pub async fn require_auth(session: Session, request: Request, next: Next) -> Response {
    match session.get::<i64>(SESSION_USER_ID).await {
        Ok(Some(_user_id)) => next.run(request).await,
        Ok(None) => AppError::Unauthenticated.into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
