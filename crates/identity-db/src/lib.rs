//! # Identity DB
//!
//! PostgreSQL pool and student persistence for the identity service.
//!
//! [`PgStudentsRepository`] is both the registration sink
//! ([`StudentsRepository`]) and the authenticator's
//! [`CredentialStore`](identity_auth::CredentialStore).
//!
//! # Example
//!
//! ```ignore
//! use identity_db::{PgStudentsRepository, init_db_pool};
//!
//! let pool = init_db_pool(&config.database).await?;
//! let students = PgStudentsRepository::new(pool);
//! ```

pub mod students;

use std::time::Duration;

use identity_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

pub use sqlx::PgPool;
pub use students::{PgStudentsRepository, RepositoryError, StudentsRepository};

/// Connects a pool using the configured URL and size.
///
/// # Errors
///
/// Fails if the database cannot be reached within the acquire timeout.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.url())
        .await
}
