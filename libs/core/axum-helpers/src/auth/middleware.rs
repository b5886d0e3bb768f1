use super::config::BearerAuth;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

const SCHEME: &str = "bearer";

/// Pull the token out of an `Authorization` value.
///
/// The scheme word matches in any letter case and must be followed by exactly
/// one space. Everything after it, untrimmed, is the candidate token.
pub fn extract_bearer_token(value: &str) -> Option<&str> {
    let scheme = value.get(..SCHEME.len())?;
    if !scheme.eq_ignore_ascii_case(SCHEME) {
        return None;
    }

    let token = value[SCHEME.len()..].strip_prefix(' ')?;
    (!token.is_empty()).then_some(token)
}

/// Bearer authentication middleware
///
/// Passes everything through when no token is configured. Otherwise the
/// request needs `Authorization: Bearer <token>` or it gets a 401 envelope.
///
/// # Example
///
/// ```ignore
/// let protected = routes.into_method_router().layer(
///     axum::middleware::from_fn_with_state(BearerAuth::new(token), bearer_auth_middleware),
/// );
/// ```
pub async fn bearer_auth_middleware(
    State(auth): State<BearerAuth>,
    request: Request,
    next: Next,
) -> Response {
    if !auth.is_enabled() {
        return next.run(request).await;
    }

    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(extract_bearer_token)
        .is_some_and(|token| auth.verify(token));

    if !authorized {
        tracing::debug!("Rejected request with missing or invalid bearer token");
        return AppError::Unauthorized.into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[test]
    fn test_extract_bearer_token_scheme_case() {
        assert_eq!(extract_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("BEARER abc"), Some("abc"));
    }

    #[test]
    fn test_extract_bearer_token_rejects_malformed() {
        assert_eq!(extract_bearer_token("Basic abc"), None);
        assert_eq!(extract_bearer_token("Bearer"), None);
        assert_eq!(extract_bearer_token("Bearer "), None);
        assert_eq!(extract_bearer_token("Bearerabc"), None);
        assert_eq!(extract_bearer_token(""), None);
        assert_eq!(extract_bearer_token("Béarer abc"), None);
    }

    #[test]
    fn test_extract_bearer_token_keeps_remainder_verbatim() {
        assert_eq!(extract_bearer_token("Bearer  abc"), Some(" abc"));
        assert_eq!(extract_bearer_token("Bearer abc def"), Some("abc def"));
    }

    fn app(auth: BearerAuth) -> Router {
        Router::new()
            .route("/events", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(auth, bearer_auth_middleware))
    }

    async fn call(router: Router, authorization: Option<&str>) -> (StatusCode, Vec<u8>) {
        let mut request = HttpRequest::builder().uri("/events");
        if let Some(value) = authorization {
            request = request.header(header::AUTHORIZATION, value);
        }

        let response = router
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_disabled_auth_passes_everything() {
        for header in [None, Some("Bearer anything"), Some("garbage")] {
            let (status, _) = call(app(BearerAuth::disabled()), header).await;
            assert_eq!(status, StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_correct_token_passes() {
        let (status, _) = call(app(BearerAuth::new("s3cret")), Some("Bearer s3cret")).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = call(app(BearerAuth::new("s3cret")), Some("bearer s3cret")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejections_use_standard_envelope() {
        let cases = [
            None,
            Some("Bearer wrong"),
            Some("Bearer s3cret trailing"),
            Some("Basic s3cret"),
            Some("s3cret"),
        ];

        for header in cases {
            let (status, body) = call(app(BearerAuth::new("s3cret")), header).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "header: {:?}", header);
            assert_eq!(body, br#"{"description":"Unauthorized"}"#);
        }
    }
}
