use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::security::security_headers;
use axum::{Router, middleware};
use axum_server::tls_rustls::RustlsConfig;
use core_config::server::{ServerConfig, TlsConfig};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Combine API routes with documentation and cross-cutting middleware.
///
/// This function sets up:
/// - Swagger UI at `/swagger-ui`, backed by `/api-docs/openapi.json`
/// - API routes at the root
/// - Request tracing and security headers
/// - 404 envelope fallback
///
/// Responses are not compressed so `Content-Length` stays exact.
///
/// # Type Parameters
/// * `T` - A type implementing `utoipa::OpenApi` for API documentation
///
/// # Example
/// ```ignore
/// #[derive(OpenApi)]
/// #[openapi(paths(/* your paths */))]
/// struct ApiDoc;
///
/// let api_routes = Router::new()
///     .route("/events", events)
///     .with_state(state);
///
/// let router = create_router::<ApiDoc>(api_routes);
/// ```
pub fn create_router<T>(apis: Router) -> Router
where
    T: OpenApi + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
}

/// Serve `router` over HTTP, or HTTPS when `server_config.tls` is set.
///
/// This provides:
/// - Graceful shutdown on SIGINT/SIGTERM
/// - Cleanup coordination bounded by `shutdown_timeout`
/// - TLS termination from PEM certificate and key files
///
/// # Arguments
/// * `router` - The configured Axum router
/// * `server_config` - Server configuration
/// * `shutdown_timeout` - Maximum time to wait for graceful shutdown (recommended: 30s)
/// * `cleanup` - Async cleanup function for database connections, etc.
///
/// # Example
/// ```ignore
/// let cleanup = async move {
///     client.shutdown().await;
/// };
///
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, mut shutdown_rx) = ShutdownCoordinator::new();

    let cleanup_handle = tokio::spawn(async move {
        let _ = shutdown_rx.recv().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(()) => info!("Cleanup completed successfully"),
            Err(_) => warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            ),
        }
    });

    let serve_result = match &server_config.tls {
        None => serve_plain(router, server_config, coordinator.clone()).await,
        Some(tls) => {
            serve_tls(
                router,
                server_config,
                tls,
                coordinator.clone(),
                shutdown_timeout,
            )
            .await
        }
    }
    .inspect_err(|e| {
        tracing::error!("Server encountered an error: {:?}", e);
    });

    // The server may have stopped on its own; cleanup still has to run.
    coordinator.shutdown();
    cleanup_handle.await.ok();

    serve_result
}

async fn serve_plain(
    router: Router,
    server_config: &ServerConfig,
    coordinator: ShutdownCoordinator,
) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on http://{}", listener.local_addr()?);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { coordinator.wait_for_signal().await })
        .await
}

async fn serve_tls(
    router: Router,
    server_config: &ServerConfig,
    tls: &TlsConfig,
    coordinator: ShutdownCoordinator,
    shutdown_timeout: Duration,
) -> io::Result<()> {
    let addr: SocketAddr = server_config
        .socket_addr()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let rustls = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await?;

    let handle = axum_server::Handle::new();
    let signal_handle = handle.clone();
    tokio::spawn(async move {
        coordinator.wait_for_signal().await;
        signal_handle.graceful_shutdown(Some(shutdown_timeout));
    });

    info!(
        cert = %tls.cert_path.display(),
        "Server starting on https://{}",
        addr
    );

    axum_server::bind_rustls(addr, rustls)
        .handle(handle)
        .serve(router.into_make_service())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "test"))]
    struct EmptyDoc;

    fn router() -> Router {
        create_router::<EmptyDoc>(Router::new().route("/events", get(|| async { "[]" })))
    }

    #[tokio::test]
    async fn test_routes_are_mounted_at_root() {
        let response = router()
            .oneshot(Request::get("/events").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_path_gets_404_envelope() {
        let response = router()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], br#"{"description":"Not Found"}"#);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let response = router()
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_tls_files_fail_startup() {
        let config = ServerConfig::resolve(
            "127.0.0.1".to_string(),
            Some(0),
            Some(TlsConfig::new("/nonexistent/cert.pem", "/nonexistent/key.pem")),
        );

        let result = create_production_app(
            Router::new(),
            &config,
            Duration::from_millis(10),
            async {},
        )
        .await;

        assert!(result.is_err());
    }
}
