//! HTTP client for the account endpoints.
//!
//! Each call maps the response status onto a small outcome enum so the form
//! state machines never have to look at raw status codes.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::DUPLICATE_USER_MESSAGE;
use crate::models::user::{AccountSummary, LoginRequest, NewUser};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected status {0}")]
    UnexpectedStatus(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(AccountSummary),
    AlreadyExists,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(AccountSummary),
    Rejected,
}

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait AccountApi: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<CreateOutcome, ApiError>;
    async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, ApiError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct HttpAccountApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAccountApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn account_url(&self, suffix: &str) -> String {
        format!("{}/account{}", self.base_url, suffix)
    }
}

#[async_trait]
impl AccountApi for HttpAccountApi {
    async fn create(&self, user: &NewUser) -> Result<CreateOutcome, ApiError> {
        let response = self
            .client
            .post(self.account_url(""))
            .json(user)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => {
                Ok(CreateOutcome::Created(response.json().await?))
            }
            StatusCode::BAD_REQUEST => {
                let text = response.text().await?;
                let message = serde_json::from_str::<ErrorBody>(&text)
                    .map(|body| body.error)
                    .unwrap_or(text);
                if message.to_ascii_lowercase().contains(DUPLICATE_USER_MESSAGE) {
                    Ok(CreateOutcome::AlreadyExists)
                } else {
                    tracing::debug!("Account creation rejected: {}", message);
                    Err(ApiError::UnexpectedStatus(StatusCode::BAD_REQUEST.as_u16()))
                }
            }
            other => Err(ApiError::UnexpectedStatus(other.as_u16())),
        }
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, ApiError> {
        let response = self
            .client
            .post(self.account_url("/login"))
            .json(request)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(LoginOutcome::Authenticated(response.json().await?)),
            StatusCode::UNAUTHORIZED => Ok(LoginOutcome::Rejected),
            other => Err(ApiError::UnexpectedStatus(other.as_u16())),
        }
    }
}
