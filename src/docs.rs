use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use identity_core::ErrorResponse;
use identity_models::{
    AuthenticateStudentRequest, AuthenticateStudentResponse, StudentRegisterRequest,
    StudentRegisterResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::students::controller::register_student,
        crate::modules::auth::controller::authenticate_student,
        crate::modules::auth::controller::verify_auth,
        crate::modules::health::controller::healthcheck,
    ),
    components(
        schemas(
            StudentRegisterRequest,
            StudentRegisterResponse,
            AuthenticateStudentRequest,
            AuthenticateStudentResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Students", description = "Student registration"),
        (name = "Authentication", description = "Student login and token verification"),
        (name = "Health", description = "Liveness probe")
    ),
    info(
        title = "Identity Service API",
        version = "1.0",
        description = "Identity management for students: registration, login and session token verification.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/v1/identities/students",
            "/v1/identities/students/login",
            "/v1/identities/students/verify-auth",
            "/healthcheck",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path}");
        }
    }
}
