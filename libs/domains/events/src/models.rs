//! Event documents and query filters

use mongodb::bson::{Bson, Document, oid::ObjectId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// A stored or incoming event as an untyped JSON object.
///
/// Only the schema decides what a valid event looks like, so the document
/// is kept as a JSON tree and written to the store as-is.
pub type EventDocument = Map<String, Value>;

/// Query parameter naming the store-assigned identifier
pub const ID_FIELD: &str = "_id";

/// Documented shape of an event.
///
/// Requests are validated against the JSON schema, not this struct, and
/// documents are stored untyped. This type describes the common case for
/// API docs and typed clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Store-assigned identifier, only present on events read back
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Nanoseconds since the Unix epoch
    #[schema(example = 1648857887000000000u64)]
    pub timestamp: f64,

    #[schema(example = "customer record updated")]
    pub summary: String,

    #[schema(value_type = Object, example = json!({"service_name": "customer-management"}))]
    pub source: Map<String, Value>,

    #[schema(value_type = Object, example = json!({"customer_id": "c-1024", "field": "email"}))]
    pub attributes: Map<String, Value>,
}

/// One equality condition value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Compared as a literal string, so non-string fields never match
    Text(String),
    /// Store-native identifier
    ObjectId(ObjectId),
}

impl From<&FilterValue> for Bson {
    fn from(value: &FilterValue) -> Self {
        match value {
            FilterValue::Text(text) => Bson::String(text.clone()),
            FilterValue::ObjectId(id) => Bson::ObjectId(*id),
        }
    }
}

/// Equality filter built from query parameters, ANDed across keys.
///
/// Keys are passed through untouched, so dotted paths such as
/// `source.service_name` reach into nested objects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    conditions: BTreeMap<String, FilterValue>,
}

impl EventFilter {
    /// A filter that matches every event
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Build a filter from `key=value` pairs in request order.
    ///
    /// Only the first value of a repeated key is used. `_id` is decoded as a
    /// 24 character hex ObjectId; anything else becomes the all-zero id,
    /// which matches nothing.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut conditions = BTreeMap::new();

        for (key, value) in pairs {
            let key = key.into();
            if conditions.contains_key(&key) {
                continue;
            }

            let value = if key == ID_FIELD {
                FilterValue::ObjectId(parse_object_id(value.as_ref()))
            } else {
                FilterValue::Text(value.as_ref().to_string())
            };
            conditions.insert(key, value);
        }

        Self { conditions }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.conditions.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.conditions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The store query document, `{}` for no conditions
    pub fn to_document(&self) -> Document {
        self.conditions
            .iter()
            .map(|(key, value)| (key.clone(), Bson::from(value)))
            .collect()
    }
}

fn parse_object_id(hex: &str) -> ObjectId {
    ObjectId::parse_str(hex).unwrap_or_else(|_| ObjectId::from_bytes([0; 12]))
}
