//! MongoDB implementation of EventRepository

use crate::error::{EventError, Result};
use crate::models::{EventDocument, EventFilter, ID_FIELD};
use crate::repository::EventRepository;
use async_trait::async_trait;
use database::mongodb::{Client, Collection, Database, MongoConfig};
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use std::future::IntoFuture;
use std::time::Duration;
use tracing::{debug, instrument};

/// Deadline for every individual store call
pub const STORE_DEADLINE: Duration = Duration::from_secs(10);

/// MongoDB-based event repository
#[derive(Clone)]
pub struct MongoEventRepository {
    database: Database,
    collection: Collection<Document>,
}

impl MongoEventRepository {
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            database: database.clone(),
            collection: database.collection(collection),
        }
    }

    /// Repository over the database and collection named in `config`
    pub fn from_config(client: &Client, config: &MongoConfig) -> Self {
        Self::new(&client.database(config.database()), config.collection())
    }
}

/// Run a store call, failing with [`EventError::Timeout`] past [`STORE_DEADLINE`]
async fn with_deadline<F, T>(operation: &'static str, call: F) -> Result<T>
where
    F: IntoFuture<Output = mongodb::error::Result<T>>,
{
    match tokio::time::timeout(STORE_DEADLINE, call).await {
        Ok(result) => result.map_err(EventError::from),
        Err(_) => Err(EventError::Timeout {
            operation,
            after: STORE_DEADLINE,
        }),
    }
}

/// Integers above `i64::MAX` have no BSON encoding; store them as doubles.
fn widen_unsigned(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Number(n) if n.is_u64() && n.as_i64().is_none() => {
            if let Some(wide) = n.as_f64().and_then(serde_json::Number::from_f64) {
                *n = wide;
            }
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(widen_unsigned),
        serde_json::Value::Object(map) => map.values_mut().for_each(widen_unsigned),
        _ => {}
    }
}

/// Convert a validated event to the BSON document that gets inserted
fn to_bson_document(mut event: EventDocument) -> Result<Document> {
    event.values_mut().for_each(widen_unsigned);
    Ok(mongodb::bson::to_document(&event)?)
}

/// Convert a stored document to plain JSON.
///
/// ObjectIds become their 24 character hex form so `_id` can be fed straight
/// back into a query; everything else uses relaxed extended JSON.
fn to_event_document(mut document: Document) -> EventDocument {
    let hex_id = match document.get(ID_FIELD) {
        Some(Bson::ObjectId(id)) => Some(id.to_hex()),
        _ => None,
    };
    if let Some(hex) = hex_id {
        document.insert(ID_FIELD, hex);
    }

    match Bson::Document(document).into_relaxed_extjson() {
        serde_json::Value::Object(map) => map,
        _ => EventDocument::new(),
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, event), fields(fields = event.len()))]
    async fn insert(&self, event: EventDocument) -> Result<String> {
        let document = to_bson_document(event)?;
        let result = with_deadline("insert", self.collection.insert_one(document)).await?;

        let id = match result.inserted_id {
            Bson::ObjectId(id) => id.to_hex(),
            other => other.to_string(),
        };
        debug!(event_id = %id, "Event inserted");

        Ok(id)
    }

    #[instrument(skip(self, filter), fields(conditions = filter.len()))]
    async fn find(&self, filter: &EventFilter) -> Result<Vec<EventDocument>> {
        let query = filter.to_document();

        let documents: Vec<Document> = with_deadline("find", async {
            let cursor = self.collection.find(query).await?;
            cursor.try_collect().await
        })
        .await?;

        debug!(count = documents.len(), "Events found");
        Ok(documents.into_iter().map(to_event_document).collect())
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> Result<()> {
        with_deadline("ping", self.database.run_command(doc! { "ping": 1 })).await?;
        Ok(())
    }
}
