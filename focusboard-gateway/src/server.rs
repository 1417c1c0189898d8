//! Gateway HTTP server: the task-feed endpoint, the session-annotation
//! endpoint, and the permissive CORS wrapping the dashboard expects.
//!
//! The same feed assembly backs live responses and `--snapshot` files, so
//! offline snapshots are byte-compatible with what the server returns.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use focusboard_core::feed::{self, TaskFeed};
use focusboard_core::task::{TaskId, TaskRecord};

use crate::store::{DocumentStore, StoreError};

/// Shared server state.
pub struct GatewayState {
    /// Client for the external document store.
    pub store: DocumentStore,
}

impl GatewayState {
    /// Wraps a store client as server state.
    #[must_use]
    pub const fn new(store: DocumentStore) -> Self {
        Self { store }
    }
}

/// Errors from one-shot snapshot writes.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Fetching today's tasks from the store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The feed could not be encoded as JSON.
    #[error(transparent)]
    Encode(#[from] feed::FeedError),

    /// The snapshot file could not be written.
    #[error("failed to write snapshot {path}: {source}")]
    Write {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Fetches today's feed once and writes it to `path` as pretty JSON,
/// returning the number of tasks written.
///
/// # Errors
///
/// Returns [`SnapshotError`] if the fetch, encoding, or file write fails.
pub async fn write_snapshot(store: &DocumentStore, path: &Path) -> Result<usize, SnapshotError> {
    let tasks = store.fetch_today_tasks().await?;
    let count = tasks.len();
    let json = feed::to_json_pretty(&fresh_feed(tasks))?;
    std::fs::write(path, json).map_err(|source| SnapshotError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(count)
}

/// Starts the gateway server on the given address and returns the bound
/// address and a join handle.
///
/// This is the entry point used by both `main.rs` and test code.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
    state: Arc<GatewayState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "gateway server error");
        }
    });

    Ok((bound_addr, handle))
}

/// Builds the gateway router with the CORS layer applied.
fn router(state: Arc<GatewayState>) -> axum::Router {
    axum::Router::new()
        .route("/api/tasks", axum::routing::get(get_tasks))
        .route("/api/sessions", axum::routing::post(post_session))
        .layer(axum::middleware::from_fn(cors))
        .with_state(state)
}

/// `GET /api/tasks`: today's feed, stamped with the fetch time.
async fn get_tasks(State(state): State<Arc<GatewayState>>) -> Response {
    match state.store.fetch_today_tasks().await {
        Ok(tasks) => {
            tracing::debug!(count = tasks.len(), "serving task feed");
            (StatusCode::OK, Json(fresh_feed(tasks))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "task fetch failed");
            error_with_details(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch tasks", &e)
        }
    }
}

/// Body of `POST /api/sessions`.
#[derive(Debug, serde::Deserialize)]
struct SessionRequest {
    #[serde(default, rename = "taskId")]
    task_id: Option<String>,
}

/// `POST /api/sessions`: appends a session annotation to the given task
/// page. Missing, empty, or unparseable `taskId` is a client error.
async fn post_session(
    State(state): State<Arc<GatewayState>>,
    body: Option<Json<SessionRequest>>,
) -> Response {
    let task_id = body
        .and_then(|Json(request)| request.task_id)
        .filter(|id| !id.is_empty());
    let Some(task_id) = task_id else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Missing taskId" })),
        )
            .into_response();
    };

    let task_id = TaskId::new(task_id);
    match state.store.append_session_note(&task_id).await {
        Ok(()) => {
            tracing::info!(task_id = %task_id, "session recorded");
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "success": true,
                    "message": "Session recorded",
                })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(task_id = %task_id, error = %e, "session record failed");
            error_with_details(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to record session",
                &e,
            )
        }
    }
}

/// CORS middleware: answers every `OPTIONS` with 200 and stamps the
/// dashboard's expected headers on all responses.
async fn cors(request: axum::extract::Request, next: axum::middleware::Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(
        "Access-Control-Allow-Credentials",
        HeaderValue::from_static("true"),
    );
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET,OPTIONS,PATCH,DELETE,POST,PUT"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static(
            "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, Content-Length, \
             Content-MD5, Content-Type, Date, X-Api-Version",
        ),
    );
    response
}

/// JSON error body in the `{error, details}` shape the dashboard logs.
fn error_with_details(
    status: StatusCode,
    message: &str,
    source: &impl std::fmt::Display,
) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": message,
            "details": source.to_string(),
        })),
    )
        .into_response()
}

/// Stamps a task list with the current fetch time.
fn fresh_feed(tasks: Vec<TaskRecord>) -> TaskFeed {
    TaskFeed {
        last_updated: Some(now_iso()),
        tasks,
    }
}

/// Current instant as a UTC ISO-8601 string with millisecond precision.
fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Starts the gateway in-process for testing, backed by the given store.
///
/// Binds to `127.0.0.1:0` (OS-assigned port) and returns the bound address
/// and a [`tokio::task::JoinHandle`] for cleanup.
#[cfg(test)]
async fn start_test_server(store: DocumentStore) -> (std::net::SocketAddr, tokio::task::JoinHandle<()>) {
    start_server("127.0.0.1:0", Arc::new(GatewayState::new(store)))
        .await
        .expect("failed to start test server")
}
