use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use identity_core::{AppError, ErrorCode, ErrorResponse};
use identity_models::{StudentError, StudentRegisterRequest, StudentRegisterResponse};

use super::service::RegistrationError;
use crate::middleware::json::JsonBody;
use crate::state::AppState;

/// Maps a registration failure to its response. A duplicate id is reported
/// as an invalid id.
pub fn registration_error(err: RegistrationError) -> AppError {
    let code = match &err {
        RegistrationError::Invalid(invalid) => match invalid {
            StudentError::InvalidCourseId(_) => ErrorCode::InvalidCourseId,
            StudentError::InvalidStudentId(_) => ErrorCode::InvalidStudentId,
            StudentError::InvalidCpf => ErrorCode::InvalidCpf,
            StudentError::InvalidEmail(_) => ErrorCode::InvalidEmail,
            StudentError::InvalidBirthDate(_) => ErrorCode::InvalidBirthDate,
        },
        RegistrationError::StudentAlreadyExists => ErrorCode::InvalidStudentId,
        RegistrationError::Hashing(_)
        | RegistrationError::Repository(_)
        | RegistrationError::Events(_) => return AppError::internal(err),
    };
    AppError::bad_request(code, err)
}

/// Register a new student
#[utoipa::path(
    post,
    path = "/v1/identities/students",
    request_body = StudentRegisterRequest,
    responses(
        (status = 201, description = "Student registered", body = StudentRegisterResponse),
        (status = 400, description = "Invalid JSON or invalid student data", body = ErrorResponse),
        (status = 500, description = "Unexpected error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip_all, fields(student.id = %req.id))]
pub async fn register_student(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<StudentRegisterRequest>,
) -> Result<(StatusCode, Json<StudentRegisterResponse>), AppError> {
    let id = state
        .students
        .register_student(req.into())
        .await
        .map_err(registration_error)?;

    Ok((StatusCode::CREATED, Json(StudentRegisterResponse { id })))
}
