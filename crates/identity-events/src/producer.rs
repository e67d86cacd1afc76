//! Event transport.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::event::Event;

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to publish event: {0}")]
    Publish(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Publishes an already encoded event body to a topic.
#[async_trait]
pub trait Producer: Send + Sync {
    async fn publish(
        &self,
        topic: &str,
        event_id: &str,
        event_type: &str,
        body: &[u8],
    ) -> Result<(), EventError>;
}

/// Serializes `event` and hands it to `producer`.
pub async fn produce<P>(
    producer: &dyn Producer,
    topic: &str,
    event: &Event<P>,
) -> Result<(), EventError>
where
    P: Serialize + Sync,
{
    let body = serde_json::to_vec(event)?;
    producer
        .publish(topic, &event.event_id, &event.event_type, &body)
        .await
}

/// [`Producer`] appending entries to a Redis stream named after the topic.
#[derive(Clone)]
pub struct RedisStreamProducer {
    conn: ConnectionManager,
}

impl std::fmt::Debug for RedisStreamProducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStreamProducer").finish_non_exhaustive()
    }
}

impl RedisStreamProducer {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Producer for RedisStreamProducer {
    #[instrument(skip(self, body), fields(stream.operation = "XADD"))]
    async fn publish(
        &self,
        topic: &str,
        event_id: &str,
        event_type: &str,
        body: &[u8],
    ) -> Result<(), EventError> {
        let mut conn = self.conn.clone();

        let entry_id: String = redis::cmd("XADD")
            .arg(topic)
            .arg("*")
            .arg("event_id")
            .arg(event_id)
            .arg("event_type")
            .arg(event_type)
            .arg("event")
            .arg(body)
            .query_async(&mut conn)
            .await
            .map_err(|e| EventError::Publish(Box::new(e)))?;

        debug!(stream.entry_id = %entry_id, "Event published");
        Ok(())
    }
}
