use crate::services::account_service::AccountServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Body marker the client looks for to recognise a duplicate signup.
pub const DUPLICATE_USER_MESSAGE: &str = "user already exists";

// Type alias for Result with our AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("User already exists")]
    DuplicateUser,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Session error: {0}")]
    Session(String),

    #[error("Internal server error")]
    InternalError,

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<AccountServiceError> for AppError {
    fn from(err: AccountServiceError) -> Self {
        match err {
            AccountServiceError::Validation(msg) => AppError::Validation(msg),
            AccountServiceError::InvalidCredentials => AppError::InvalidCredentials,
            AccountServiceError::RepositoryError(e) => {
                tracing::error!("Account repository failure: {}", e);
                AppError::InternalError
            }
        }
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        AppError::Session(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DuplicateUser => (StatusCode::BAD_REQUEST, DUPLICATE_USER_MESSAGE.to_string()),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            AppError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Not authenticated".to_string())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Session(e) => {
                tracing::error!("Session error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::InternalError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::RepositoryError;

    #[test]
    fn test_duplicate_user_is_bad_request() {
        let response = AppError::DuplicateUser.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_service_errors_map_to_status() {
        let invalid = AppError::from(AccountServiceError::InvalidCredentials).into_response();
        assert_eq!(invalid.status(), StatusCode::UNAUTHORIZED);

        let validation =
            AppError::from(AccountServiceError::Validation("bad".to_string())).into_response();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let repo = AppError::from(AccountServiceError::RepositoryError(
            RepositoryError::NotFound,
        ))
        .into_response();
        assert_eq!(repo.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
