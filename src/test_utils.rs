pub mod test_helpers {
    use crate::auth::hashing::{Argon2Hashing, PasswordHashing};
    use crate::repositories::user_repository::email_key;
    use crate::config::session::{SessionConfig, SESSION_TABLE};
    use crate::routes;
    use crate::AppState;
    use axum::Router;
    use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
    use tempfile::NamedTempFile;
    use tower_sessions_sqlx_store::SqliteStore;

    /// Create a new in-memory SQLite database for testing
    pub async fn create_test_db() -> Result<SqlitePool, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await?;

        crate::db::run_migrations(&pool).await?;

        Ok(pool)
    }

    /// Create a temporary file-based SQLite database for testing
    /// Useful when several connections must see the same data
    pub async fn create_test_db_file() -> Result<(SqlitePool, NamedTempFile), sqlx::Error> {
        let temp_file = NamedTempFile::new().map_err(sqlx::Error::Io)?;
        let db_path = temp_file
            .path()
            .to_str()
            .ok_or_else(|| sqlx::Error::Configuration("Invalid database path".into()))?;
        let database_url = format!("sqlite://{}", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&database_url)
            .await?;

        crate::db::run_migrations(&pool).await?;

        Ok((pool, temp_file))
    }

    /// Insert a test user whose stored password is the Argon2 hash of `password`
    pub async fn insert_test_user(
        pool: &SqlitePool,
        company_name: &str,
        email: &str,
        password: &str,
    ) -> Result<i64, sqlx::Error> {
        let password_hash = Argon2Hashing.hash_with_new_salt(password).map_err(|e| {
            sqlx::Error::Configuration(format!("Password hashing failed: {}", e).into())
        })?;

        let result =
            sqlx::query(r#"INSERT INTO "user" (company_name, email, email_key, password) VALUES (?, ?, ?, ?)"#)
                .bind(company_name)
                .bind(email)
                .bind(email_key(email))
                .bind(password_hash)
                .execute(pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    /// Full application router over `pool`, with sessions and CORS as in production
    pub async fn create_test_app(pool: SqlitePool) -> Result<Router, sqlx::Error> {
        let session_store = SqliteStore::new(pool.clone())
            .with_table_name(SESSION_TABLE)
            .map_err(|e| sqlx::Error::Configuration(e.into()))?;
        session_store.migrate().await?;

        let session_layer = SessionConfig::from_env().create_layer(session_store);
        let cors = routes::cors_layer("http://localhost:3000");

        Ok(routes::build_app(AppState::new(pool), session_layer, cors))
    }
}

// Re-export commonly used test functions at module level for convenience
// Note: This is test-only code. Panic on error is acceptable in tests.
#[cfg(test)]
pub async fn create_test_pool() -> sqlx::SqlitePool {
    match test_helpers::create_test_db().await {
        Ok(pool) => pool,
        Err(e) => panic!("Failed to create test pool: {}", e),
    }
}
