//! # Identity Events
//!
//! Domain events published after state changes in the identity service.
//!
//! - [`event`]: the JSON envelope and payloads
//! - [`producer`]: the transport ([`Producer`]) and its Redis Streams implementation
//! - [`students`]: [`StudentsProducer`] and the [`StudentsGateway`] that feeds a [`Producer`]
//!
//! Events are appended to a Redis stream named after the topic, e.g.
//! `XADD identity.cdc.students.0 * event_id <uuid> event_type student_registered event <json>`.

pub mod event;
pub mod producer;
pub mod students;

pub use event::{Event, StudentRegisteredPayload};
pub use producer::{EventError, Producer, RedisStreamProducer};
pub use students::{STUDENTS_TOPIC, StudentsGateway, StudentsProducer};
