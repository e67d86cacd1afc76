use axum::{Router, routing::post};

use super::controller::{authenticate_student, verify_auth};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/v1/identities/students/login", post(authenticate_student))
        .route("/v1/identities/students/verify-auth", post(verify_auth))
}
