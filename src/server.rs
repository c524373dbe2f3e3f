//! HTTP read surface: the projected feed at `/data` and the static front end.

use std::future::Future;
use std::net::SocketAddr;

use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use camino::Utf8Path;
use chrono::Utc;
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;

use crate::feed::snapshot::SnapshotStore;
use crate::feed::view::{RepositoryView, project};
use crate::github::error::FetchError;

/// Path serving the projected feed.
pub const DATA_ENDPOINT: &str = "/data";

/// Error body returned for rejected requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// Human-readable reason.
    pub error: String,
}

/// Builds the application router.
///
/// `GET /data` reads the latest published snapshot; other methods on that path
/// are rejected with 405. When `web_root` is set, every other path is served
/// from that directory.
#[must_use]
pub fn build_router(store: SnapshotStore, web_root: Option<&Utf8Path>) -> Router {
    let router = Router::new()
        .route(DATA_ENDPOINT, get(handle_data).fallback(unsupported_method))
        .with_state(store);

    let Some(root) = web_root else {
        return router;
    };
    router.fallback_service(ServeDir::new(root))
}

async fn handle_data(State(store): State<SnapshotStore>) -> Json<Vec<RepositoryView>> {
    Json(project(&store.current(), Utc::now()))
}

async fn unsupported_method(method: Method) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: format!("unsupported HTTP action \"{method}\": use \"GET\""),
        }),
    )
}

/// Binds the HTTP listener.
///
/// # Errors
///
/// Returns [`FetchError::Io`] when the address cannot be bound.
pub async fn bind(address: SocketAddr) -> Result<TcpListener, FetchError> {
    TcpListener::bind(address)
        .await
        .map_err(|error| FetchError::Io {
            message: format!("failed to bind {address}: {error}"),
        })
}

/// Serves `router` on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`FetchError::Io`] when the server fails.
pub async fn serve<Shutdown>(
    listener: TcpListener,
    router: Router,
    shutdown: Shutdown,
) -> Result<(), FetchError>
where
    Shutdown: Future<Output = ()> + Send + 'static,
{
    if let Ok(address) = listener.local_addr() {
        info!(%address, "serving issue feed");
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|error| FetchError::Io {
            message: format!("HTTP server failed: {error}"),
        })
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use camino::Utf8PathBuf;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::{DATA_ENDPOINT, build_router};
    use crate::feed::enrich::IssueEnrichment;
    use crate::feed::snapshot::{EnrichedIssue, FeedSnapshot, RepositorySnapshot, SnapshotStore};
    use crate::github::locator::RepositoryName;
    use crate::github::models::test_support::{at_minute, issue};

    async fn send(router: axum::Router, method: &str, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request should build"),
            )
            .await
            .expect("router should respond");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        (status, body.to_vec())
    }

    fn json_body(body: &[u8]) -> Value {
        serde_json::from_slice(body).expect("body should be JSON")
    }

    #[tokio::test]
    async fn data_is_an_empty_array_before_the_first_refresh() {
        let (status, body) =
            send(build_router(SnapshotStore::new(), None), "GET", DATA_ENDPOINT).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body), json!([]));
    }

    #[tokio::test]
    async fn data_reflects_the_latest_published_snapshot() {
        let store = SnapshotStore::new();
        let router = build_router(store.clone(), None);
        store.publish(FeedSnapshot::new(
            vec![RepositorySnapshot::new(
                RepositoryName::new("pack").expect("name should be valid"),
                vec![EnrichedIssue {
                    issue: issue(12, "Crash on build"),
                    enrichment: IssueEnrichment::default(),
                }],
            )],
            at_minute(0),
        ));

        let (status, body) = send(router, "GET", DATA_ENDPOINT).await;

        assert_eq!(status, StatusCode::OK);
        let value = json_body(&body);
        assert_eq!(value[0]["repo"], "pack");
        assert_eq!(value[0]["issues"][0]["number"], 12);
        assert_eq!(value[0]["issues"][0]["title"], "Crash on build");
    }

    #[tokio::test]
    async fn other_methods_on_data_are_rejected() {
        let (status, body) =
            send(build_router(SnapshotStore::new(), None), "POST", DATA_ENDPOINT).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            json_body(&body),
            json!({"error": "unsupported HTTP action \"POST\": use \"GET\""})
        );
    }

    #[tokio::test]
    async fn static_files_are_served_from_web_root() {
        let dir = tempfile::TempDir::new().expect("temp dir should be created");
        std::fs::write(dir.path().join("index.html"), "<h1>feed</h1>")
            .expect("index should be written");
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("path should be UTF-8");

        let router = build_router(SnapshotStore::new(), Some(&root));
        let (status, body) = send(router.clone(), "GET", "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"<h1>feed</h1>");

        let (missing, _) = send(router, "GET", "/missing.js").await;
        assert_eq!(missing, StatusCode::NOT_FOUND);
    }
}
