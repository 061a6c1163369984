use crate::error::{AppError, Result};
use crate::models::user::{AccountSummary, AccountView, EmailQuery, NewUser};
use crate::services::account_service::AddUserOutcome;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

/// `GET /api/account?email=`: 200 with email and stored hash, 204 when unknown.
pub async fn get_account_handler(
    State(app_state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Response> {
    match app_state.account_service.get_user(&query.email).await? {
        Some(user) => Ok(Json(AccountView::from(user)).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// `POST /api/account`: creates an account from a client-hashed password.
pub async fn create_account_handler(
    State(app_state): State<AppState>,
    Json(request): Json<NewUser>,
) -> Result<Json<AccountSummary>> {
    let id = match app_state.account_service.add_user(request).await? {
        AddUserOutcome::Created(id) => id,
        AddUserOutcome::DuplicateEmail => return Err(AppError::DuplicateUser),
    };

    let user = app_state
        .account_service
        .get_user_by_id(id)
        .await?
        .ok_or(AppError::InternalError)?;

    Ok(Json(AccountSummary::from(user)))
}

pub async fn health_handler() -> &'static str {
    "ok"
}
