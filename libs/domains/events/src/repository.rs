//! Event repository trait

use crate::error::Result;
use crate::models::{EventDocument, EventFilter};
use async_trait::async_trait;

/// Storage for audit events. Events are never updated or deleted.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Store a validated event and return the identifier the store assigned
    async fn insert(&self, event: EventDocument) -> Result<String>;

    /// Every event matching `filter`; empty when nothing matches
    async fn find(&self, filter: &EventFilter) -> Result<Vec<EventDocument>>;

    /// Round-trip to the store
    async fn ping(&self) -> Result<()>;
}
