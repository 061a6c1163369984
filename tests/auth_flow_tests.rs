//! Client forms driven against a running server.

use accounting_system::{
    auth::Argon2Hashing,
    client::{
        logout, storage::IS_LOGIN, storage::REMEMBER_ME, AppStore, ClientStorage, FailureReason,
        FormState, HttpAccountApi, LoginForm, LoginInput, MemoryStorage, Navigation, SignupForm,
        SignupInput,
    },
    config::ClientConfig,
    test_utils::test_helpers,
};
use std::{sync::Arc, time::Duration};

async fn spawn_server() -> String {
    let pool = test_helpers::create_test_db().await.unwrap();
    let app = test_helpers::create_test_app(pool).await.unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/api", addr)
}

fn api(base_url: String) -> Arc<HttpAccountApi> {
    let config = ClientConfig {
        api_base_url: base_url,
        request_timeout: Duration::from_secs(10),
        storage_path: "unused.json".into(),
    };
    Arc::new(HttpAccountApi::new(&config).unwrap())
}

fn signup_input(email: &str) -> SignupInput {
    SignupInput {
        company_name: "Acme Ltd".to_string(),
        email: email.to_string(),
        password: "Abcdef1!".to_string(),
        confirm_password: "Abcdef1!".to_string(),
    }
}

#[tokio::test]
async fn test_signup_login_logout() {
    let api = api(spawn_server().await);
    let storage = Arc::new(MemoryStorage::new());
    let store = AppStore::default();

    let mut signup = SignupForm::new(api.clone(), Arc::new(Argon2Hashing));
    let state = signup.submit(signup_input("flow@acme.io")).await;
    assert!(matches!(
        state,
        FormState::Success { navigation, .. } if *navigation == Navigation::LOGIN
    ));

    let mut duplicate = SignupForm::new(api.clone(), Arc::new(Argon2Hashing));
    let state = duplicate.submit(signup_input("FLOW@acme.io")).await;
    assert_eq!(state, &FormState::Failed(FailureReason::DuplicateEmail));

    let mut login = LoginForm::new(api.clone(), storage.clone(), store.clone());
    let state = login
        .submit(LoginInput {
            email: "flow@acme.io".to_string(),
            password: "Abcdef1?".to_string(),
            remember_me: true,
        })
        .await;
    assert_eq!(state, &FormState::Failed(FailureReason::InvalidCredentials));
    assert!(!store.state().is_login);

    let state = login
        .submit(LoginInput {
            email: "flow@acme.io".to_string(),
            password: "Abcdef1!".to_string(),
            remember_me: true,
        })
        .await;
    assert!(matches!(
        state,
        FormState::Success { navigation, .. } if *navigation == Navigation::HOME
    ));
    assert!(store.state().is_login);
    assert!(storage.flag(IS_LOGIN).unwrap());
    assert!(storage.flag(REMEMBER_ME).unwrap());

    let navigation = logout(storage.as_ref(), &store);
    assert_eq!(navigation, Navigation::HOME);
    assert!(!store.state().is_login);
    assert!(!storage.flag(IS_LOGIN).unwrap());
    assert!(!storage.flag(REMEMBER_ME).unwrap());
}

#[tokio::test]
async fn test_login_unknown_email_is_invalid_credentials() {
    let api = api(spawn_server().await);
    let mut login = LoginForm::new(api, Arc::new(MemoryStorage::new()), AppStore::default());

    let state = login
        .submit(LoginInput {
            email: "ghost@acme.io".to_string(),
            password: "Abcdef1!".to_string(),
            remember_me: false,
        })
        .await;
    assert_eq!(state, &FormState::Failed(FailureReason::InvalidCredentials));
}

#[tokio::test]
async fn test_unreachable_server_is_generic_error() {
    // Nothing listens on the discard port.
    let api = api("http://127.0.0.1:9/api".to_string());
    let mut login = LoginForm::new(api, Arc::new(MemoryStorage::new()), AppStore::default());

    let state = login
        .submit(LoginInput {
            email: "owner@acme.io".to_string(),
            password: "Abcdef1!".to_string(),
            remember_me: false,
        })
        .await;
    assert_eq!(state, &FormState::Failed(FailureReason::Generic));
}
