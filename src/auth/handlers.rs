use crate::auth::middleware::{SESSION_AUTH_TIMESTAMP, SESSION_USER_ID};
use crate::config::session::REMEMBER_ME_EXPIRY;
use crate::error::{AppError, Result};
use crate::models::user::{AccountSummary, LoginRequest};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tower_sessions::{Expiry, Session};

/// Verifies credentials server side and opens a session.
pub async fn login_handler(
    State(app_state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AccountSummary>> {
    let user = match app_state
        .account_service
        .authenticate(&request.email, &request.password)
        .await
    {
        Ok(user) => user,
        Err(err) => {
            tracing::info!("Failed login attempt for {}", request.email);
            return Err(err.into());
        }
    };

    session.cycle_id().await?;
    session.insert(SESSION_USER_ID, user.id).await?;
    session
        .insert(SESSION_AUTH_TIMESTAMP, chrono::Utc::now().timestamp())
        .await?;

    if request.remember_me {
        session.set_expiry(Some(Expiry::OnInactivity(REMEMBER_ME_EXPIRY)));
    }

    tracing::info!("User {} logged in", user.id);
    Ok(Json(AccountSummary::from(user)))
}

pub async fn logout_handler(session: Session) -> Result<StatusCode> {
    session.flush().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Account of the logged-in session. Only reachable behind `require_auth`.
pub async fn current_account_handler(
    State(app_state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse> {
    let user_id = session
        .get::<i64>(SESSION_USER_ID)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    let user = app_state
        .account_service
        .get_user_by_id(user_id)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    Ok(Json(AccountSummary::from(user)))
}
