use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use identity_models::Student;
use identity_models::students::BIRTH_DATE_FORMAT;

use crate::event::{Event, StudentRegisteredPayload};
use crate::producer::{EventError, Producer, produce};

/// Change-data-capture topic for student records.
pub const STUDENTS_TOPIC: &str = "identity.cdc.students.0";

pub const STUDENT_REGISTERED: &str = "student_registered";

/// Student lifecycle events.
#[async_trait]
pub trait StudentsProducer: Send + Sync {
    async fn produce_student_registered(
        &self,
        student: &Student,
        course_id: Uuid,
    ) -> Result<(), EventError>;
}

/// Maps student events onto [`STUDENTS_TOPIC`].
#[derive(Clone)]
pub struct StudentsGateway {
    producer: Arc<dyn Producer>,
}

impl StudentsGateway {
    pub fn new(producer: Arc<dyn Producer>) -> Self {
        Self { producer }
    }
}

#[async_trait]
impl StudentsProducer for StudentsGateway {
    #[instrument(skip_all, fields(student.id = %student.id))]
    async fn produce_student_registered(
        &self,
        student: &Student,
        course_id: Uuid,
    ) -> Result<(), EventError> {
        let event = Event::new(
            STUDENT_REGISTERED,
            StudentRegisteredPayload {
                student_id: student.id.clone(),
                name: student.name.clone(),
                cpf: student.cpf.clone(),
                email: student.email.clone(),
                birth_date: student.birth_date.format(BIRTH_DATE_FORMAT).to_string(),
                course_id: course_id.to_string(),
            },
        );

        produce(self.producer.as_ref(), STUDENTS_TOPIC, &event).await
    }
}
