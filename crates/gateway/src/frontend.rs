//! Embedded chat page.
//!
//! The HTML, CSS, and JS files from `frontend/` are compiled into the binary
//! using `include_str!`, so the gateway ships as a single binary.

use axum::{
    Router,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
    routing::get,
};

const INDEX_HTML: &str = include_str!("../../../frontend/index.html");
const STYLE_CSS: &str = include_str!("../../../frontend/style.css");
const APP_JS: &str = include_str!("../../../frontend/app.js");

/// The page only loads its own script and stylesheet.
const CONTENT_SECURITY_POLICY: &str =
    "default-src 'self'; script-src 'self'; style-src 'self'; connect-src 'self'";

/// Build a router that serves the embedded chat page.
pub fn frontend_router() -> Router {
    Router::new()
        .route("/", get(|| async { asset("text/html; charset=utf-8", INDEX_HTML) }))
        .route(
            "/static/style.css",
            get(|| async { asset("text/css; charset=utf-8", STYLE_CSS) }),
        )
        .route(
            "/static/app.js",
            get(|| async { asset("application/javascript; charset=utf-8", APP_JS) }),
        )
}

fn asset(content_type: &'static str, body: &'static str) -> Response {
    let mut response = body.into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CONTENT_SECURITY_POLICY),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn fetch(uri: &str) -> (StatusCode, String, String) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = frontend_router().oneshot(req).await.unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string())
            .unwrap_or_default();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, String::from_utf8_lossy(&body).into_owned())
    }

    #[tokio::test]
    async fn serves_index_html() {
        let (status, content_type, text) = fetch("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("text/html"));
        assert!(text.contains("<title>Chatwise</title>"));
        assert!(text.contains("/static/app.js"));
    }

    #[tokio::test]
    async fn serves_css_and_js() {
        let (status, content_type, _) = fetch("/static/style.css").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.contains("text/css"));

        let (status, content_type, text) = fetch("/static/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.contains("javascript"));
        assert!(text.contains("fetch(\"/chat\""));
    }

    #[tokio::test]
    async fn index_carries_csp() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = frontend_router().oneshot(req).await.unwrap();
        let csp = response.headers().get(header::CONTENT_SECURITY_POLICY).unwrap();
        assert!(csp.to_str().unwrap().contains("default-src 'self'"));
    }

    #[tokio::test]
    async fn unknown_asset_is_404() {
        let (status, _, _) = fetch("/static/missing.js").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
