use accounting_system::{
    auth::{Argon2Hashing, PasswordHashing},
    models::NewUser,
    repositories::{user_repository::SqliteUserRepository, UserRepository},
    services::{AccountService, AccountServiceError, AddUserOutcome},
    test_utils::test_helpers,
};
use std::sync::Arc;

fn new_user(email: &str, password: &str) -> NewUser {
    NewUser {
        company_name: "Acme Ltd".to_string(),
        email: email.to_string(),
        password: Argon2Hashing.hash_with_new_salt(password).unwrap(),
    }
}

async fn setup() -> (AccountService, Arc<SqliteUserRepository>) {
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let service = AccountService::new(repository.clone(), Arc::new(Argon2Hashing));
    (service, repository)
}

#[tokio::test]
async fn test_add_user_distinct_emails() {
    let (service, _) = setup().await;

    let first = service
        .add_user(new_user("first@acme.io", "Abcdef1!"))
        .await
        .unwrap();
    let second = service
        .add_user(new_user("second@acme.io", "Abcdef1!"))
        .await
        .unwrap();

    match (first, second) {
        (AddUserOutcome::Created(a), AddUserOutcome::Created(b)) => {
            assert!(a > 0);
            assert!(b > 0);
            assert_ne!(a, b);
        }
        other => panic!("expected two creations, got {:?}", other),
    }
}

#[tokio::test]
async fn test_add_user_duplicate_ignores_case() {
    let (service, repository) = setup().await;

    let first = service
        .add_user(new_user("owner@acme.io", "Abcdef1!"))
        .await
        .unwrap();
    assert!(matches!(first, AddUserOutcome::Created(_)));

    let second = service
        .add_user(new_user("OWNER@ACME.IO", "Other1!x"))
        .await
        .unwrap();
    assert_eq!(second, AddUserOutcome::DuplicateEmail);

    assert_eq!(repository.count_users().await.unwrap(), 1);
}

#[tokio::test]
async fn test_add_user_duplicate_ignores_non_ascii_case() {
    let (service, repository) = setup().await;

    let first = service
        .add_user(new_user("JÖRG@acme.de", "Abcdef1!"))
        .await
        .unwrap();
    assert!(matches!(first, AddUserOutcome::Created(_)));

    let second = service
        .add_user(new_user("jörg@acme.de", "Abcdef1!"))
        .await
        .unwrap();
    assert_eq!(second, AddUserOutcome::DuplicateEmail);
    assert_eq!(repository.count_users().await.unwrap(), 1);

    let user = service.get_user("Jörg@ACME.de").await.unwrap().unwrap();
    assert_eq!(user.email, "JÖRG@acme.de");
}

#[tokio::test]
async fn test_get_user_returns_added_record() {
    let (service, _) = setup().await;
    let input = new_user("lookup@acme.io", "Abcdef1!");
    let stored_hash = input.password.clone();

    let id = match service.add_user(input).await.unwrap() {
        AddUserOutcome::Created(id) => id,
        AddUserOutcome::DuplicateEmail => panic!("unexpected duplicate"),
    };

    let user = service.get_user("lookup@acme.io").await.unwrap().unwrap();
    assert_eq!(user.id, id);
    assert_eq!(user.company_name, "Acme Ltd");
    assert_eq!(user.email, "lookup@acme.io");
    assert_eq!(user.password, stored_hash);
}

#[tokio::test]
async fn test_get_user_unregistered_is_none() {
    let (service, _) = setup().await;
    service
        .add_user(new_user("someone@acme.io", "Abcdef1!"))
        .await
        .unwrap();

    assert!(service.get_user("nobody@acme.io").await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_user_ignores_case() {
    let (service, _) = setup().await;
    service
        .add_user(new_user("Mixed@Acme.io", "Abcdef1!"))
        .await
        .unwrap();

    let user = service.get_user("mixed@acme.io").await.unwrap().unwrap();
    assert_eq!(user.email, "Mixed@Acme.io");
}

#[tokio::test]
async fn test_authenticate() {
    let (service, _) = setup().await;
    service
        .add_user(new_user("auth@acme.io", "Abcdef1!"))
        .await
        .unwrap();

    let user = service.authenticate("auth@acme.io", "Abcdef1!").await.unwrap();
    assert_eq!(user.email, "auth@acme.io");

    let result = service.authenticate("auth@acme.io", "Abcdef1?").await;
    assert!(matches!(result, Err(AccountServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn test_concurrent_duplicates_create_one_record() {
    let (pool, _file) = test_helpers::create_test_db_file().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let service = Arc::new(AccountService::new(
        repository.clone(),
        Arc::new(Argon2Hashing),
    ));

    let mut handles = Vec::new();
    for i in 0..4 {
        let service = service.clone();
        let email = if i % 2 == 0 { "race@acme.io" } else { "RACE@acme.io" };
        let input = new_user(email, "Abcdef1!");
        handles.push(tokio::spawn(async move { service.add_user(input).await }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(AddUserOutcome::Created(_)) => created += 1,
            Ok(AddUserOutcome::DuplicateEmail) => {}
            Err(err) => panic!("duplicate surfaced as an error: {}", err),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(repository.count_users().await.unwrap(), 1);
}
