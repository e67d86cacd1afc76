//! HTTP-facing application error.
//!
//! Every handler returns `Result<_, AppError>`. The error carries the status
//! code, a stable machine-readable [`ErrorCode`] and the internal cause. Only
//! the code and its public message reach the wire; the cause is logged.

use anyhow::Error;
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

/// Realm advertised when a client must re-authenticate.
const BEARER_CHALLENGE: &str =
    r#"Bearer realm=".",error="invalid_token",uri="/v1/identities/students/login""#;

/// Stable error codes exposed to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidJson,
    Unexpected,
    InvalidStudentId,
    InvalidCpf,
    InvalidEmail,
    InvalidBirthDate,
    InvalidCourseId,
    InvalidCredentials,
    EmptyStudentId,
    EmptySecret,
    Forbidden,
    Unauthorized,
}

impl ErrorCode {
    /// Wire representation, e.g. `identity_service.error.invalid_json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidJson => "identity_service.error.invalid_json",
            Self::Unexpected => "identity_service.error.unexpected",
            Self::InvalidStudentId => "identity_service.error.invalid_student_id",
            Self::InvalidCpf => "identity_service.error.invalid_cpf",
            Self::InvalidEmail => "identity_service.error.invalid_email",
            Self::InvalidBirthDate => "identity_service.error.invalid_birth_date",
            Self::InvalidCourseId => "identity_service.error.invalid_course_id",
            Self::InvalidCredentials => "identity_service.error.invalid_credentials",
            Self::EmptyStudentId => "identity_service.error.empty_student_id",
            Self::EmptySecret => "identity_service.error.empty_secret",
            Self::Forbidden => "identity_service.error.forbidden",
            Self::Unauthorized => "identity_service.error.unauthorized",
        }
    }

    /// Human-readable message sent alongside the code.
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidJson => "invalid JSON was sent",
            Self::Unexpected => "Unexpected Error",
            Self::InvalidStudentId => "Invalid Student ID was sent",
            Self::InvalidCpf => "Invalid CPF was sent",
            Self::InvalidEmail => "Invalid email was sent",
            Self::InvalidBirthDate => "Invalid birth date was sent",
            Self::InvalidCourseId => "Invalid course id format was sent",
            Self::InvalidCredentials => "Invalid credentials were sent",
            Self::EmptyStudentId => "Empty student id was sent",
            Self::EmptySecret => "Empty secret was sent",
            Self::Forbidden => "Access forbidden, do not try again",
            Self::Unauthorized => "Access unauthorized",
        }
    }
}

/// JSON error body returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "identity_service.error.invalid_credentials")]
    pub err_code: String,
    #[schema(example = "Invalid credentials were sent")]
    pub message: String,
}

impl From<ErrorCode> for ErrorResponse {
    fn from(code: ErrorCode) -> Self {
        Self {
            err_code: code.as_str().to_string(),
            message: code.message().to_string(),
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub error: Error,
    challenge: Option<HeaderValue>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, code: ErrorCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            code,
            error: err.into(),
            challenge: None,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Unexpected, err)
    }

    pub fn bad_request<E>(code: ErrorCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, code, err)
    }

    pub fn invalid_json<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::bad_request(ErrorCode::InvalidJson, err)
    }

    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::FORBIDDEN, ErrorCode::Forbidden, err)
    }

    /// 401 carrying a `WWW-Authenticate` challenge pointing at the login route.
    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            challenge: Some(HeaderValue::from_static(BEARER_CHALLENGE)),
            ..Self::new(StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, err)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(err_code = self.code.as_str(), error = %self.error, "Request failed");
        } else {
            tracing::warn!(err_code = self.code.as_str(), error = %self.error, "Request rejected");
        }

        let body = Json(ErrorResponse::from(self.code));
        let mut response = (self.status, body).into_response();
        if let Some(challenge) = self.challenge {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, challenge);
        }
        response
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
