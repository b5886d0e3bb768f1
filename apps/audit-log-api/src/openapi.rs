//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Service-level metadata; paths come from the domain crates
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Audit Log API",
        version = "0.1.0",
        description = "Stores schema-validated audit events and answers equality-filtered queries",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost", description = "Local development server")
    )
)]
struct ServiceDoc;

/// Combined OpenAPI documentation for all APIs
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ServiceDoc::openapi();
        doc.merge(domain_events::ApiDoc::openapi());
        doc
    }
}
