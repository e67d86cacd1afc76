use std::sync::Arc;

use tracing::{info, instrument, warn};

use identity_core::{PasswordError, hash_password};
use identity_db::{RepositoryError, StudentsRepository};
use identity_events::{EventError, StudentsProducer};
use identity_models::{NewStudent, RegisterStudentInput, StudentError};

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Invalid(#[from] StudentError),

    #[error("student already exists")]
    StudentAlreadyExists,

    #[error("unable to hash student secret: {0}")]
    Hashing(#[from] PasswordError),

    #[error("unable to store student: {0}")]
    Repository(#[source] RepositoryError),

    #[error("student stored but student_registered was not published: {0}")]
    Events(#[from] EventError),
}

impl From<RepositoryError> for RegistrationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::StudentAlreadyExists => Self::StudentAlreadyExists,
            other => Self::Repository(other),
        }
    }
}

#[derive(Clone)]
pub struct StudentService {
    repository: Arc<dyn StudentsRepository>,
    events: Arc<dyn StudentsProducer>,
}

impl StudentService {
    pub fn new(repository: Arc<dyn StudentsRepository>, events: Arc<dyn StudentsProducer>) -> Self {
        Self { repository, events }
    }

    /// Validates, stores and announces a new student, returning its id.
    ///
    /// The row is not rolled back when publishing fails.
    #[instrument(skip_all, fields(student.id = %input.id))]
    pub async fn register_student(
        &self,
        input: RegisterStudentInput,
    ) -> Result<String, RegistrationError> {
        let new_student = NewStudent::parse(input)?;
        let hashed_secret = hash_password(&new_student.secret).await?;
        let (student, course_id) = new_student.into_student(hashed_secret);

        self.repository.create_student(&student).await?;

        if let Err(e) = self
            .events
            .produce_student_registered(&student, course_id)
            .await
        {
            warn!(error = %e, "Student stored without registration event");
            return Err(e.into());
        }

        info!(course.id = %course_id, "Student registered");
        Ok(student.id)
    }
}
