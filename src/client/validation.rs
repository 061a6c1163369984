//! Form validation run before any network call.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::user::{COMPANY_NAME_MAX_LEN, EMAIL_MAX_LEN};

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 20;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
        .expect("email pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CompanyName,
    Email,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SignupInput {
    pub company_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Complexity rule for new passwords: 8 to 20 characters, no whitespace, and
/// at least one uppercase, lowercase, digit and special character.
pub fn is_strong_password(password: &str) -> bool {
    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return false;
    }
    if password.chars().any(char::is_whitespace) {
        return false;
    }

    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_alphanumeric());

    has_upper && has_lower && has_digit && has_special
}

fn check_email(email: &str, errors: &mut Vec<FieldError>) {
    let email = email.trim();
    if email.is_empty() {
        errors.push(FieldError::new(Field::Email, "Email is required!"));
    } else if !is_valid_email(email) {
        errors.push(FieldError::new(Field::Email, "Enter a valid email-id"));
    }
}

pub fn validate_login(input: &LoginInput) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    check_email(&input.email, &mut errors);
    if input.password.is_empty() {
        errors.push(FieldError::new(Field::Password, "Password is required!"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_signup(input: &SignupInput) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    let company_name = input.company_name.trim();
    if company_name.is_empty() {
        errors.push(FieldError::new(
            Field::CompanyName,
            "Company name is required!",
        ));
    } else if company_name.chars().count() > COMPANY_NAME_MAX_LEN {
        errors.push(FieldError::new(
            Field::CompanyName,
            "Company name must be at most 50 characters",
        ));
    }

    check_email(&input.email, &mut errors);
    if input.email.trim().chars().count() > EMAIL_MAX_LEN {
        errors.push(FieldError::new(
            Field::Email,
            "Email must be at most 30 characters",
        ));
    }

    if input.password.is_empty() {
        errors.push(FieldError::new(Field::Password, "Password is required!"));
    } else if !is_strong_password(&input.password) {
        errors.push(FieldError::new(
            Field::Password,
            "Password must be 8-20 characters with an uppercase letter, a lowercase letter, a number and a special character, and no spaces",
        ));
    }

    if input.confirm_password.is_empty() {
        errors.push(FieldError::new(
            Field::ConfirmPassword,
            "Please confirm your password",
        ));
    } else if input.confirm_password != input.password {
        errors.push(FieldError::new(
            Field::ConfirmPassword,
            "Passwords do not match",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
