//! Login and signup form state machines.
//!
//! A form starts `Idle`. `submit` validates the input; invalid input ends in
//! `Invalid` without touching the network. Valid input moves to `Submitting`
//! for the duration of the single API call, then to `Success` (with a
//! navigation target) or `Failed` (with a fixed user-facing message). Every
//! end state accepts another submit, so a failed form stays editable.

use std::sync::Arc;

use crate::auth::hashing::PasswordHashing;
use crate::client::api::{AccountApi, ApiError, CreateOutcome, LoginOutcome};
use crate::client::storage::{ClientStorage, StorageError, IS_LOGIN, REMEMBER_ME};
use crate::client::store::{Action, AppStore};
use crate::client::validation::{
    validate_login, validate_signup, FieldError, LoginInput, SignupInput,
};
use crate::models::user::{LoginRequest, NewUser};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password!";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "User already exists with this email!";
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";
pub const SIGNUP_SUCCESS_MESSAGE: &str = "Signed up successfully!";

/// Where the client should go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub path: &'static str,
}

impl Navigation {
    pub const HOME: Navigation = Navigation { path: "/" };
    pub const LOGIN: Navigation = Navigation { path: "/login" };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    InvalidCredentials,
    DuplicateEmail,
    Generic,
}

impl FailureReason {
    pub fn message(&self) -> &'static str {
        match self {
            FailureReason::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE,
            FailureReason::DuplicateEmail => DUPLICATE_EMAIL_MESSAGE,
            FailureReason::Generic => GENERIC_ERROR_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Invalid(Vec<FieldError>),
    Submitting,
    Success {
        navigation: Navigation,
        message: Option<&'static str>,
    },
    Failed(FailureReason),
}

impl FormState {
    /// The single status line a form displays, if any.
    pub fn status_message(&self) -> Option<&'static str> {
        match self {
            FormState::Success { message, .. } => *message,
            FormState::Failed(reason) => Some(reason.message()),
            _ => None,
        }
    }
}

pub struct LoginForm {
    api: Arc<dyn AccountApi>,
    storage: Arc<dyn ClientStorage>,
    store: AppStore,
    state: FormState,
}

impl LoginForm {
    pub fn new(api: Arc<dyn AccountApi>, storage: Arc<dyn ClientStorage>, store: AppStore) -> Self {
        Self {
            api,
            storage,
            store,
            state: FormState::Idle,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Submit buttons are disabled while this is true.
    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    pub async fn submit(&mut self, input: LoginInput) -> &FormState {
        if let Err(errors) = validate_login(&input) {
            self.state = FormState::Invalid(errors);
            return &self.state;
        }

        self.state = FormState::Submitting;

        let request = LoginRequest {
            email: input.email.trim().to_string(),
            password: input.password,
            remember_me: input.remember_me,
        };

        self.state = match self.api.login(&request).await {
            Ok(LoginOutcome::Authenticated(account)) => {
                match self.record_login(request.remember_me) {
                    Ok(()) => {
                        tracing::info!("User {} authenticated", account.id);
                        FormState::Success {
                            navigation: Navigation::HOME,
                            message: None,
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to persist login flags: {}", e);
                        FormState::Failed(FailureReason::Generic)
                    }
                }
            }
            Ok(LoginOutcome::Rejected) => FormState::Failed(FailureReason::InvalidCredentials),
            Err(e) => FormState::Failed(failure_from_api(e)),
        };

        &self.state
    }

    fn record_login(&self, remember_me: bool) -> Result<(), StorageError> {
        self.storage.set_flag(IS_LOGIN, true)?;
        self.storage.set_flag(REMEMBER_ME, remember_me)?;
        self.store.dispatch(Action::SetLogin { is_login: true });
        Ok(())
    }
}

pub struct SignupForm {
    api: Arc<dyn AccountApi>,
    hashing: Arc<dyn PasswordHashing>,
    state: FormState,
}

impl SignupForm {
    pub fn new(api: Arc<dyn AccountApi>, hashing: Arc<dyn PasswordHashing>) -> Self {
        Self {
            api,
            hashing,
            state: FormState::Idle,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    pub async fn submit(&mut self, input: SignupInput) -> &FormState {
        if let Err(errors) = validate_signup(&input) {
            self.state = FormState::Invalid(errors);
            return &self.state;
        }

        self.state = FormState::Submitting;

        let password = match self.hashing.hash_with_new_salt(&input.password) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!("Password hashing failed: {}", e);
                self.state = FormState::Failed(FailureReason::Generic);
                return &self.state;
            }
        };

        let user = NewUser {
            company_name: input.company_name.trim().to_string(),
            email: input.email.trim().to_string(),
            password,
        };

        self.state = match self.api.create(&user).await {
            Ok(CreateOutcome::Created(_)) => FormState::Success {
                navigation: Navigation::LOGIN,
                message: Some(SIGNUP_SUCCESS_MESSAGE),
            },
            Ok(CreateOutcome::AlreadyExists) => FormState::Failed(FailureReason::DuplicateEmail),
            Err(e) => FormState::Failed(failure_from_api(e)),
        };

        &self.state
    }
}

fn failure_from_api(err: ApiError) -> FailureReason {
    tracing::warn!("Account request failed: {}", err);
    FailureReason::Generic
}
