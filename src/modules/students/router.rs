use axum::{Router, routing::post};

use super::controller::register_student;
use crate::state::AppState;

pub fn init_students_router() -> Router<AppState> {
    Router::new().route("/v1/identities/students", post(register_student))
}
