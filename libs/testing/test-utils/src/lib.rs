//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure for the domain crates:
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestDataBuilder`: Deterministic audit event generation (always available)
//! - `assertions`: Custom assertion helpers (always available)
//!
//! # Features
//!
//! - `mongo` (default): Enables MongoDB test infrastructure
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestMongo, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let event = builder.event("login");
//!     let service = builder.service_name("auth");
//! }
//! ```

use serde_json::{Value, json};

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by deriving every value from a seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// This is the recommended way to create a builder for consistent test data.
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_event");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A service name unique to this builder
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.service_name("billing"), "test-7-billing");
    /// ```
    pub fn service_name(&self, suffix: &str) -> String {
        format!("test-{}-{}", self.seed, suffix)
    }

    /// Nanosecond timestamp derived from the seed; always non-negative
    pub fn timestamp(&self) -> u64 {
        1_600_000_000_000_000_000 + self.seed % 1_000_000_000_000_000
    }

    /// A complete, schema-valid audit event
    pub fn event(&self, suffix: &str) -> Value {
        json!({
            "timestamp": self.timestamp(),
            "summary": format!("{} happened", suffix),
            "source": {
                "service_name": self.service_name(suffix),
                "host": "test-host"
            },
            "attributes": {
                "seed": self.seed.to_string(),
                "suffix": suffix
            }
        })
    }

    /// A valid event with one required field removed
    pub fn event_without(&self, suffix: &str, field: &str) -> Value {
        let mut event = self.event(suffix);
        if let Some(object) = event.as_object_mut() {
            object.remove(field);
        }
        event
    }
}

/// Test assertion helpers
pub mod assertions {
    use serde_json::Value;

    /// Assert that `actual` contains every field of `expected` with the same value
    pub fn assert_contains_fields(actual: &Value, expected: &Value, context: &str) {
        let expected = expected
            .as_object()
            .unwrap_or_else(|| panic!("{}: expected value is not an object", context));

        for (key, value) in expected {
            assert_eq!(
                actual.get(key),
                Some(value),
                "{}: field '{}' differs",
                context,
                key
            );
        }
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.event("login"), builder2.event("login"));
        assert_eq!(
            builder1.service_name("billing"),
            builder2.service_name("billing")
        );
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        // Different test names should generate different data
        assert_ne!(builder1.event("login"), builder2.event("login"));
    }

    #[test]
    fn test_event_has_required_fields() {
        let event = TestDataBuilder::new(1).event("login");
        for field in ["timestamp", "summary", "source", "attributes"] {
            assert!(event.get(field).is_some(), "missing {}", field);
        }
    }

    #[test]
    fn test_event_without_removes_field() {
        let event = TestDataBuilder::new(1).event_without("login", "summary");
        assert!(event.get("summary").is_none());
        assert!(event.get("timestamp").is_some());
    }

    #[test]
    fn test_assert_contains_fields() {
        let actual = serde_json::json!({"_id": "x", "summary": "s", "n": 1});
        assertions::assert_contains_fields(&actual, &serde_json::json!({"summary": "s"}), "ok");
    }
}
