//! Per-path method dispatch with a JSON 405 fallback.
//!
//! ```ignore
//! use axum_helpers::routing::MethodRoutes;
//!
//! let events = MethodRoutes::new()
//!     .handle("GET", list_events)
//!     .handle("POST", create_event)
//!     .into_method_router();
//!
//! let router = Router::new().route("/events", events);
//! ```

use crate::errors::handlers::method_not_allowed;
use axum::handler::Handler;
use axum::http::Method;
use axum::routing::{MethodFilter, MethodRouter, on};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Handlers keyed by HTTP method name, independent of any path.
pub struct MethodRoutes<S = ()> {
    routes: BTreeMap<String, MethodRouter<S>>,
}

impl<S> MethodRoutes<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            routes: BTreeMap::new(),
        }
    }

    /// Register `handler` for `method`.
    ///
    /// An empty name is ignored, as is a method axum has no filter for.
    /// Registering the same method again replaces the earlier handler.
    pub fn handle<H, T>(mut self, method: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        if method.is_empty() {
            debug!("Ignoring handler registered without a method");
            return self;
        }

        let filter = Method::from_bytes(method.as_bytes())
            .ok()
            .and_then(|m| MethodFilter::try_from(m).ok());

        match filter {
            Some(filter) => {
                self.routes.insert(method.to_string(), on(filter, handler));
            }
            None => warn!(method, "Ignoring handler for unroutable method"),
        }

        self
    }

    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Combine the registered handlers into one router for a single path.
    ///
    /// Methods without a handler answer with a 405 envelope. HEAD is one of
    /// them unless it was registered explicitly, so a GET handler never
    /// answers HEAD.
    pub fn into_method_router(mut self) -> MethodRouter<S> {
        let head = self
            .routes
            .remove(Method::HEAD.as_str())
            .unwrap_or_else(|| on(MethodFilter::HEAD, method_not_allowed));

        self.routes
            .into_values()
            .fold(head, MethodRouter::merge)
            .fallback(method_not_allowed)
    }
}

impl<S> Default for MethodRoutes<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
