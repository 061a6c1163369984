use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Store-assigned surrogate key of a user record.
pub type UserId = i64;

pub const COMPANY_NAME_MAX_LEN: usize = 50;
pub const EMAIL_MAX_LEN: usize = 30;

/// A row of the `user` table. `password` always holds a salted hash.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub company_name: String,
    pub email: String,
    pub password: String,
}

/// Input for account creation. The password is already hashed by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub company_name: String,
    pub email: String,
    pub password: String,
}

/// Body of a successful lookup: the email and its stored hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    pub email: String,
    pub password: String,
}

impl From<User> for AccountView {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            password: user.password,
        }
    }
}

/// Public projection of a user, returned after creation and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: UserId,
    pub company_name: String,
    pub email: String,
}

impl From<User> for AccountSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            company_name: user.company_name,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_user_uses_camel_case_keys() {
        let parsed: NewUser = serde_json::from_value(json!({
            "companyName": "Acme",
            "email": "a@acme.io",
            "password": "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"
        }))
        .unwrap();
        assert_eq!(parsed.company_name, "Acme");
    }

    #[test]
    fn account_view_exposes_only_email_and_password() {
        let user = User {
            id: 7,
            company_name: "Acme".to_string(),
            email: "a@acme.io".to_string(),
            password: "hash".to_string(),
        };
        let value = serde_json::to_value(AccountView::from(user)).unwrap();
        assert_eq!(value, json!({ "email": "a@acme.io", "password": "hash" }));
    }

    #[test]
    fn login_request_defaults_remember_me() {
        let parsed: LoginRequest =
            serde_json::from_value(json!({ "email": "a@acme.io", "password": "x" })).unwrap();
        assert!(!parsed.remember_me);
    }
}
