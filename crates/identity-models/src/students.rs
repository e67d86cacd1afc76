//! Student domain models and DTOs.
//!
//! Registration input arrives as [`StudentRegisterRequest`], becomes a
//! [`RegisterStudentInput`], and is validated into a [`NewStudent`]. The
//! secret is hashed afterwards, producing the persisted [`Student`].

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::cpf;

/// Birth dates are exchanged as `YYYY-MM-DD`.
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, thiserror::Error)]
pub enum StudentError {
    #[error("invalid course id: {0}")]
    InvalidCourseId(#[source] uuid::Error),

    #[error("invalid student id: {0:?} is not a number")]
    InvalidStudentId(String),

    #[error("invalid cpf")]
    InvalidCpf,

    #[error("invalid email: {0:?}")]
    InvalidEmail(String),

    #[error("invalid birth date: {0}")]
    InvalidBirthDate(#[source] chrono::ParseError),
}

/// Registration request body.
///
/// Missing fields deserialize as empty strings and fail validation instead
/// of being rejected as invalid JSON.
#[derive(Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct StudentRegisterRequest {
    #[schema(example = "201210204310")]
    pub id: String,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "celacanto provoca maremoto")]
    pub secret: String,
    #[schema(example = "11111111030")]
    pub cpf: String,
    #[schema(example = "jdoe@ol.com", format = "email")]
    pub email: String,
    #[schema(example = "1990-10-18", format = "date")]
    pub birth_date: String,
    #[schema(example = "1f6a4d3a-38c7-43fe-9790-2408fe595c93", format = "uuid")]
    pub course_id: String,
}

impl fmt::Debug for StudentRegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudentRegisterRequest")
            .field("id", &self.id)
            .field("course_id", &self.course_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct StudentRegisterResponse {
    #[schema(example = "201210204310")]
    pub id: String,
}

/// Unvalidated registration data.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegisterStudentInput {
    pub id: String,
    pub name: String,
    pub secret: String,
    pub cpf: String,
    pub email: String,
    pub birth_date: String,
    pub course_id: String,
}

impl fmt::Debug for RegisterStudentInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterStudentInput")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("course_id", &self.course_id)
            .finish_non_exhaustive()
    }
}

impl From<StudentRegisterRequest> for RegisterStudentInput {
    fn from(req: StudentRegisterRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            secret: req.secret,
            cpf: req.cpf,
            email: req.email,
            birth_date: req.birth_date,
            course_id: req.course_id,
        }
    }
}

/// Registration data that passed every field check; the secret is still plain.
#[derive(Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub id: String,
    pub name: String,
    pub secret: String,
    pub cpf: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub course_id: Uuid,
}

impl NewStudent {
    /// Validates `input`, reporting the first failing field in this order:
    /// course id, student id, CPF, email, birth date.
    pub fn parse(input: RegisterStudentInput) -> Result<Self, StudentError> {
        let course_id = Uuid::parse_str(&input.course_id).map_err(StudentError::InvalidCourseId)?;

        if input.id.is_empty() || !input.id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(StudentError::InvalidStudentId(input.id));
        }

        if !cpf::is_valid(&input.cpf) {
            return Err(StudentError::InvalidCpf);
        }

        if !input.email.validate_email() {
            return Err(StudentError::InvalidEmail(input.email));
        }

        let birth_date = NaiveDate::parse_from_str(&input.birth_date, BIRTH_DATE_FORMAT)
            .map_err(StudentError::InvalidBirthDate)?;

        Ok(Self {
            id: input.id,
            name: input.name,
            secret: input.secret,
            cpf: input.cpf,
            email: input.email,
            birth_date,
            course_id,
        })
    }

    /// Swaps the plain secret for its hash, returning the entity and course.
    pub fn into_student(self, hashed_secret: String) -> (Student, Uuid) {
        let student = Student {
            id: self.id,
            name: self.name,
            secret: hashed_secret,
            cpf: self.cpf,
            email: self.email,
            birth_date: self.birth_date,
        };
        (student, self.course_id)
    }
}

impl fmt::Debug for NewStudent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewStudent")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("course_id", &self.course_id)
            .finish_non_exhaustive()
    }
}

/// A registered student as persisted. `secret` is a bcrypt hash.
#[derive(Clone, PartialEq, Eq)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub secret: String,
    pub cpf: String,
    pub email: String,
    pub birth_date: NaiveDate,
}

impl fmt::Debug for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Student")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("birth_date", &self.birth_date)
            .finish_non_exhaustive()
    }
}
