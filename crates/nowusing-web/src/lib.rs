//! NowUsing Web Surface
//!
//! Two read-only routes over the shared status: an HTML page and the JSON
//! endpoint the page polls.

pub mod browser;
pub mod render;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use nowusing_core::{ActivityStatus, StatusStore};
use render::PageContext;
use tower_http::trace::TraceLayer;
use tracing::error;

/// Template served at `/`
pub const INDEX_TEMPLATE: &str = include_str!("../static/index.html");

#[derive(Clone)]
pub struct AppState {
    store: StatusStore,
    refresh_interval_ms: u64,
    template: &'static str,
}

impl AppState {
    pub fn new(store: StatusStore, refresh_interval_ms: u64) -> Self {
        Self {
            store,
            refresh_interval_ms,
            template: INDEX_TEMPLATE,
        }
    }

    /// Serve a different page template
    pub fn with_template(mut self, template: &'static str) -> Self {
        self.template = template;
        self
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/status", get(status_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index_handler(State(state): State<AppState>) -> Response {
    let status = state.store.snapshot();
    let ctx = PageContext {
        username: &status.username,
        app: &status.app,
        refresh_interval_ms: state.refresh_interval_ms,
    };

    match render::render_page(state.template, &ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render status page");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn status_handler(State(state): State<AppState>) -> Json<ActivityStatus> {
    Json(state.store.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Request},
    };
    use chrono::{Local, TimeZone};
    use tower::ServiceExt;

    async fn send_get(app: Router, uri: &str) -> (StatusCode, String, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_status_matches_store() {
        let store = StatusStore::new("zz");
        let at = Local.with_ymd_and_hms(2024, 5, 1, 14, 30, 5).unwrap();
        store.update_at("Notes", at);

        let (status, content_type, body) =
            send_get(router(AppState::new(store.clone(), 1000)), "/api/status").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "application/json");
        assert_eq!(
            body,
            r#"{"username":"zz","app":"Notes","timestamp":"2024-05-01 14:30:05"}"#
        );
    }

    #[tokio::test]
    async fn test_status_with_quotes_is_valid_json() {
        let store = StatusStore::new("zz");
        store.update(r#"say "hi" \ bye"#);

        let (_, _, body) = send_get(router(AppState::new(store.clone(), 1000)), "/api/status").await;

        let parsed: ActivityStatus = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, store.snapshot());
    }

    #[tokio::test]
    async fn test_index_page() {
        let store = StatusStore::new("zz");
        store.update("Firefox");

        let (status, content_type, body) = send_get(router(AppState::new(store, 2500)), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("text/html"));
        assert!(body.contains("What's zz doing now?"));
        assert!(body.contains(r#"<span id="app">Firefox</span>"#));
        assert!(body.contains("setInterval(updateStatus, 2500);"));
        assert!(body.contains("fetch('/api/status')"));
    }

    #[tokio::test]
    async fn test_index_escapes_app_label() {
        let store = StatusStore::new("zz");
        store.update("<script>alert(1)</script>");

        let (status, _, body) = send_get(router(AppState::new(store, 1000)), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("<script>alert(1)</script>"));
        assert!(body.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[tokio::test]
    async fn test_render_failure_is_500() {
        let store = StatusStore::new("zz");
        let state = AppState::new(store, 1000).with_template("<p>{{owner}}</p>");

        let (status, _, body) = send_get(router(state), "/").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "unknown placeholder {{owner}}");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _, _) = send_get(router(AppState::new(StatusStore::new("zz"), 1000)), "/api/other").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
