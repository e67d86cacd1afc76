use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope shared by every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event<P> {
    pub event_id: String,
    pub event_type: String,
    pub payload: P,
}

impl<P> Event<P> {
    /// Wraps `payload` under a fresh v4 event id.
    pub fn new(event_type: impl Into<String>, payload: P) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            event_type: event_type.into(),
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRegisteredPayload {
    pub student_id: String,
    pub name: String,
    pub cpf: String,
    pub email: String,
    /// `YYYY-MM-DD`
    pub birth_date: String,
    pub course_id: String,
}
