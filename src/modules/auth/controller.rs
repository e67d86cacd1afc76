use axum::{Json, extract::State, http::StatusCode};
use chrono::SecondsFormat;
use tracing::instrument;

use identity_auth::{AuthError, AuthErrorKind, AuthenticateStudentInput, ErrorClass};
use identity_core::{AppError, ErrorCode, ErrorResponse};
use identity_models::{AuthenticateStudentRequest, AuthenticateStudentResponse};

use crate::middleware::auth::BearerToken;
use crate::middleware::json::JsonBody;
use crate::state::AppState;

/// Maps a login failure to its response. Unknown student and wrong secret
/// are indistinguishable on the wire.
pub fn login_error(err: AuthError) -> AppError {
    let code = match err.kind() {
        AuthErrorKind::EmptyStudentId => ErrorCode::EmptyStudentId,
        AuthErrorKind::EmptySecret => ErrorCode::EmptySecret,
        kind if kind.class() == ErrorClass::InvalidCredentials => ErrorCode::InvalidCredentials,
        _ => return AppError::internal(err),
    };
    AppError::bad_request(code, err)
}

/// Maps a verification failure to its response. Only expiry invites the
/// client to log in again.
pub fn verify_error(err: AuthError) -> AppError {
    match err.class() {
        ErrorClass::Expired => AppError::unauthorized(err),
        ErrorClass::Forbidden | ErrorClass::Input => AppError::forbidden(err),
        ErrorClass::InvalidCredentials | ErrorClass::Unexpected => AppError::internal(err),
    }
}

/// Authenticate a student and issue a session token
#[utoipa::path(
    post,
    path = "/v1/identities/students/login",
    request_body = AuthenticateStudentRequest,
    responses(
        (status = 201, description = "Student authenticated", body = AuthenticateStudentResponse),
        (status = 400, description = "Invalid JSON, empty fields or invalid credentials", body = ErrorResponse),
        (status = 500, description = "Unexpected error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(student.id = %req.student_id))]
pub async fn authenticate_student(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AuthenticateStudentRequest>,
) -> Result<(StatusCode, Json<AuthenticateStudentResponse>), AppError> {
    let token = state
        .authenticator
        .authenticate_student(AuthenticateStudentInput::new(req.student_id, req.secret))
        .await
        .map_err(login_error)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthenticateStudentResponse {
            token_id: token.id.to_string(),
            expires_at: token
                .expiration_date
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            token: token.hash,
        }),
    ))
}

/// Verify a bearer token issued by this service
#[utoipa::path(
    post,
    path = "/v1/identities/students/verify-auth",
    responses(
        (status = 200, description = "Token is valid"),
        (status = 401, description = "Token expired, log in again", body = ErrorResponse),
        (status = 403, description = "Token not acceptable", body = ErrorResponse),
        (status = 500, description = "Unexpected error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn verify_auth(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<StatusCode, AppError> {
    state
        .authenticator
        .verify_auth(&token)
        .await
        .map_err(verify_error)?;

    Ok(StatusCode::OK)
}
