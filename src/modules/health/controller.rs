use axum::http::StatusCode;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/healthcheck",
    responses((status = 200, description = "Service is up")),
    tag = "Health"
)]
pub async fn healthcheck() -> StatusCode {
    StatusCode::OK
}
