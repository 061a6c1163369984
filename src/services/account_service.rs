use crate::auth::hashing::PasswordHashing;
use crate::models::user::{NewUser, User, UserId, COMPANY_NAME_MAX_LEN, EMAIL_MAX_LEN};
use crate::repositories::user_repository::{RepositoryError, UserRepository};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum AccountServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

/// Result of [`AccountService::add_user`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddUserOutcome {
    Created(UserId),
    DuplicateEmail,
}

pub struct AccountService {
    repository: Arc<dyn UserRepository>,
    hashing: Arc<dyn PasswordHashing>,
}

impl AccountService {
    pub fn new(repository: Arc<dyn UserRepository>, hashing: Arc<dyn PasswordHashing>) -> Self {
        Self {
            repository,
            hashing,
        }
    }

    /// Creates an account unless the email is already registered under any
    /// casing. The lookup is only an early exit; the store's unique constraint
    /// decides when two creations race.
    pub async fn add_user(&self, user: NewUser) -> Result<AddUserOutcome, AccountServiceError> {
        let user = NewUser {
            company_name: user.company_name.trim().to_string(),
            email: user.email.trim().to_string(),
            password: user.password,
        };
        self.validate_new_user(&user)?;

        if self.repository.find_by_email(&user.email).await?.is_some() {
            tracing::debug!("Rejected duplicate account for {}", user.email);
            return Ok(AddUserOutcome::DuplicateEmail);
        }

        match self.repository.create_user(&user).await {
            Ok(created) => {
                tracing::info!("Created account {} for {}", created.id, created.email);
                Ok(AddUserOutcome::Created(created.id))
            }
            Err(RepositoryError::AlreadyExists) => {
                tracing::debug!("Concurrent duplicate account for {}", user.email);
                Ok(AddUserOutcome::DuplicateEmail)
            }
            Err(e) => Err(AccountServiceError::RepositoryError(e)),
        }
    }

    pub async fn get_user(&self, email: &str) -> Result<Option<User>, AccountServiceError> {
        Ok(self.repository.find_by_email(email.trim()).await?)
    }

    pub async fn get_user_by_id(&self, id: UserId) -> Result<Option<User>, AccountServiceError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User, AccountServiceError> {
        let user = self
            .repository
            .find_by_email(email.trim())
            .await?
            .ok_or(AccountServiceError::InvalidCredentials)?;

        if !self.hashing.compare(password, &user.password) {
            return Err(AccountServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    fn validate_new_user(&self, user: &NewUser) -> Result<(), AccountServiceError> {
        let company_len = user.company_name.chars().count();
        if company_len == 0 {
            return Err(AccountServiceError::Validation(
                "Company name is required".to_string(),
            ));
        }
        if company_len > COMPANY_NAME_MAX_LEN {
            return Err(AccountServiceError::Validation(format!(
                "Company name must be at most {} characters",
                COMPANY_NAME_MAX_LEN
            )));
        }

        if user.email.is_empty() || !user.email.contains('@') {
            return Err(AccountServiceError::Validation(
                "Invalid email address".to_string(),
            ));
        }
        if user.email.chars().count() > EMAIL_MAX_LEN {
            return Err(AccountServiceError::Validation(format!(
                "Email must be at most {} characters",
                EMAIL_MAX_LEN
            )));
        }

        if !self.hashing.recognizes(&user.password) {
            return Err(AccountServiceError::Validation(
                "Password must be sent as a salted hash".to_string(),
            ));
        }

        Ok(())
    }
}
