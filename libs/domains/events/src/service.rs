//! Event service layer

use crate::error::Result;
use crate::models::{EventDocument, EventFilter};
use crate::repository::EventRepository;
use crate::schema::EventSchema;
use std::sync::Arc;
use tracing::{info, instrument};

/// Validates and stores events, and answers filtered queries
pub struct EventService<R: EventRepository> {
    repository: R,
    schema: Arc<EventSchema>,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R, schema: Arc<EventSchema>) -> Self {
        Self { repository, schema }
    }

    pub fn schema(&self) -> &EventSchema {
        &self.schema
    }

    /// Validate a raw request body and store it.
    ///
    /// Nothing reaches the store unless the whole body passes the schema.
    #[instrument(skip(self, body), fields(bytes = body.len()))]
    pub async fn ingest(&self, body: &[u8]) -> Result<String> {
        let event = self.schema.validate(body)?;
        let id = self.repository.insert(event).await?;
        info!(event_id = %id, "Event stored");
        Ok(id)
    }

    #[instrument(skip(self, filter), fields(conditions = filter.len()))]
    pub async fn query(&self, filter: &EventFilter) -> Result<Vec<EventDocument>> {
        self.repository.find(filter).await
    }

    /// Store reachability, used by the readiness probe
    pub async fn health(&self) -> Result<()> {
        self.repository.ping().await
    }
}
