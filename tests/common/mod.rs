#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use chrono::TimeDelta;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use identity_auth::memory::InMemoryTokenStore;
use identity_auth::{CredentialStore, StoreError, StudentAuthenticator};
use identity_config::{ApiConfig, AuthConfig, CorsConfig};
use identity_db::{RepositoryError, StudentsRepository};
use identity_events::{EventError, StudentsProducer};
use identity_models::Student;
use identity_service::modules::students::service::StudentService;
use identity_service::router::init_router;
use identity_service::state::AppState;

pub const COURSE_ID: &str = "1f6a4d3a-38c7-43fe-9790-2408fe595c93";
pub const STUDENT_ID: &str = "201210204310";
pub const SECRET: &str = "celacanto provoca maremoto";
pub const CPF: &str = "11111111030";

/// Students table kept in memory, unique on id, CPF and email.
#[derive(Default)]
pub struct InMemoryStudents {
    rows: Mutex<HashMap<String, Student>>,
}

impl InMemoryStudents {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl StudentsRepository for InMemoryStudents {
    async fn create_student(&self, student: &Student) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let duplicate = rows.values().any(|row| {
            row.id == student.id || row.cpf == student.cpf || row.email == student.email
        });
        if duplicate {
            return Err(RepositoryError::StudentAlreadyExists);
        }
        rows.insert(student.id.clone(), student.clone());
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for InMemoryStudents {
    async fn get_secret(&self, student_id: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(student_id)
            .map(|row| row.secret.clone()))
    }
}

/// Records published registrations, or fails every publish when `failing`.
#[derive(Default)]
pub struct RecordingEvents {
    pub failing: bool,
    pub published: Mutex<Vec<(String, Uuid)>>,
}

#[async_trait]
impl StudentsProducer for RecordingEvents {
    async fn produce_student_registered(
        &self,
        student: &Student,
        course_id: Uuid,
    ) -> Result<(), EventError> {
        if self.failing {
            return Err(EventError::Publish(Box::new(std::io::Error::other(
                "broker unavailable",
            ))));
        }
        self.published
            .lock()
            .unwrap()
            .push((student.id.clone(), course_id));
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub students: Arc<InMemoryStudents>,
    pub events: Arc<RecordingEvents>,
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(RecordingEvents::default(), TimeDelta::hours(3))
}

pub fn setup_test_app_with(events: RecordingEvents, token_duration: TimeDelta) -> TestApp {
    let students = Arc::new(InMemoryStudents::default());
    let events = Arc::new(events);
    let auth_config = AuthConfig::new("secret_secret", "identity-service", token_duration);

    let state = AppState::new(
        StudentAuthenticator::new_jwt(
            students.clone(),
            Arc::new(InMemoryTokenStore::new()),
            &auth_config,
        ),
        StudentService::new(students.clone(), events.clone()),
        ApiConfig::default(),
        CorsConfig::default(),
    );

    TestApp {
        router: init_router(state),
        students,
        events,
    }
}

pub fn registration_body() -> Value {
    serde_json::json!({
        "id": STUDENT_ID,
        "name": "John Doe",
        "secret": SECRET,
        "cpf": CPF,
        "email": "jdoe@ol.com",
        "birth_date": "1990-10-18",
        "course_id": COURSE_ID,
    })
}

pub fn json_request(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn verify_request(authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/v1/identities/students/verify-auth");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers the default student and logs in, returning the login body.
pub async fn register_and_login(app: &TestApp) -> Value {
    let response = send(
        &app.router,
        json_request("/v1/identities/students", &registration_body()),
    )
    .await;
    assert_eq!(response.status(), 201);

    let response = send(
        &app.router,
        json_request(
            "/v1/identities/students/login",
            &serde_json::json!({ "student_id": STUDENT_ID, "secret": SECRET }),
        ),
    )
    .await;
    assert_eq!(response.status(), 201);
    json_body(response).await
}
