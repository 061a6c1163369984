pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<services::account_service::AccountService>,
    pub pool: sqlx::SqlitePool,
}

impl AppState {
    /// Wires the SQLite repository and Argon2 hashing into the account service.
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        let repository = Arc::new(repositories::SqliteUserRepository::new(pool.clone()));
        let account_service = Arc::new(services::AccountService::new(
            repository,
            Arc::new(auth::Argon2Hashing),
        ));
        Self {
            account_service,
            pool,
        }
    }
}
