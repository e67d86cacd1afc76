//! # Identity Models
//!
//! Domain models and DTOs for the identity service.
//!
//! - [`students`]: registration input, validated student entity and its errors
//! - [`auth`]: login request and response bodies
//! - [`cpf`]: Brazilian CPF check-digit validation

pub mod auth;
pub mod cpf;
pub mod students;

pub use auth::{AuthenticateStudentRequest, AuthenticateStudentResponse};
pub use students::{
    NewStudent, RegisterStudentInput, Student, StudentError, StudentRegisterRequest,
    StudentRegisterResponse,
};
