use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use identity_auth::{CredentialStore, StoreError};
use identity_models::Student;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("student already exists")]
    StudentAlreadyExists,

    #[error("student not stored")]
    NotStored,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persists newly registered students.
#[async_trait]
pub trait StudentsRepository: Send + Sync {
    async fn create_student(&self, student: &Student) -> Result<(), RepositoryError>;
}

#[derive(Clone)]
pub struct PgStudentsRepository {
    pool: PgPool,
}

impl PgStudentsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentsRepository for PgStudentsRepository {
    #[instrument(skip_all, fields(student.id = %student.id))]
    async fn create_student(&self, student: &Student) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"INSERT INTO students (id, name, secret, birth_date, cpf, email)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(&student.id)
        .bind(&student.name)
        .bind(&student.secret)
        .bind(student.birth_date)
        .bind(&student.cpf)
        .bind(&student.email)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return RepositoryError::StudentAlreadyExists;
            }
            RepositoryError::from(e)
        })?;

        if result.rows_affected() != 1 {
            return Err(RepositoryError::NotStored);
        }

        Ok(())
    }
}

#[async_trait]
impl CredentialStore for PgStudentsRepository {
    #[instrument(skip(self))]
    async fn get_secret(&self, student_id: &str) -> Result<Option<String>, StoreError> {
        sqlx::query_scalar::<_, String>("SELECT secret FROM students WHERE id = $1")
            .bind(student_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::backend)
    }
}
