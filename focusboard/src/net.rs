//! Networking coordinator for wiring the TUI to the gateway.
//!
//! This module bridges the synchronous TUI event loop (crossterm
//! poll-based) with the async HTTP client talking to the gateway. It
//! spawns a background tokio task and communicates with the main thread
//! via [`NetCommand`] / [`NetEvent`] channels.
//!
//! # Architecture
//!
//! ```text
//! TUI (main thread)  ←── NetEvent ───  tokio background task
//!                     ─── NetCommand →
//! ```
//!
//! The main thread sends [`NetCommand`]s (refresh the feed, record a
//! session) and drains [`NetEvent`]s (feed loaded, session recorded) on
//! each tick of the poll-based event loop. A failed feed fetch never
//! surfaces as an error event: the handler substitutes the built-in
//! sample feed and flags it so the status bar can say so.

use std::time::Duration;

use tokio::sync::mpsc;

use focusboard_core::feed::TaskFeed;
use focusboard_core::task::TaskId;

/// Commands sent from the TUI main loop to the networking task.
#[derive(Debug)]
pub enum NetCommand {
    /// Re-fetch today's task feed from the gateway.
    RefreshFeed,
    /// Record a finished focus session against a task page.
    RecordSession {
        /// The task the session was focused on.
        task_id: TaskId,
    },
    /// Gracefully shut down the networking task.
    Shutdown,
}

/// Events sent from the networking task to the TUI main loop.
#[derive(Debug)]
pub enum NetEvent {
    /// A fresh feed arrived from the gateway.
    FeedLoaded {
        /// The decoded feed.
        feed: TaskFeed,
    },
    /// The fetch failed; this is the built-in sample feed instead.
    FeedFallback {
        /// The substitute feed.
        feed: TaskFeed,
        /// Why the real fetch failed.
        reason: String,
    },
    /// A session annotation was accepted by the gateway.
    SessionRecorded {
        /// The annotated task.
        task_id: TaskId,
    },
    /// An error occurred in the networking layer.
    Error(String),
}

/// Configuration for the networking layer.
#[derive(Debug, Clone)]
pub struct NetConfig {
    /// Base URL of the gateway (e.g., `http://127.0.0.1:8787`).
    pub gateway_url: String,
    /// Channel capacity for command/event mpsc channels.
    pub channel_capacity: usize,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

/// Default channel capacity for commands and events.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Default per-request timeout.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

impl NetConfig {
    /// Creates a `NetConfig` with default capacity and timeout.
    #[must_use]
    pub const fn new(gateway_url: String) -> Self {
        Self {
            gateway_url,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Spawn the networking task and return channel handles.
///
/// Validates the gateway URL, builds the HTTP client, and spawns a
/// command handler that immediately fetches the feed once so the first
/// [`NetEvent`] is the initial board state.
///
/// # Errors
///
/// Returns an error string if the gateway URL is invalid or the HTTP
/// client cannot be built. The caller should fall back to the sample
/// feed on error.
pub async fn spawn_net(
    config: NetConfig,
) -> Result<(mpsc::Sender<NetCommand>, mpsc::Receiver<NetEvent>), String> {
    let base = url::Url::parse(&config.gateway_url)
        .map_err(|e| format!("invalid gateway URL {}: {e}", config.gateway_url))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(format!("gateway URL must be http(s): {base}"));
    }

    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| format!("failed to build http client: {e}"))?;

    let base = config.gateway_url.trim_end_matches('/').to_string();

    let (cmd_tx, cmd_rx) = mpsc::channel::<NetCommand>(config.channel_capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<NetEvent>(config.channel_capacity);

    tokio::spawn(async move {
        command_handler(client, base, cmd_rx, evt_tx).await;
    });

    Ok((cmd_tx, evt_rx))
}

/// Background task: fetch the feed once, then handle commands until
/// shutdown or until the TUI drops its channel ends.
async fn command_handler(
    client: reqwest::Client,
    base: String,
    mut cmd_rx: mpsc::Receiver<NetCommand>,
    evt_tx: mpsc::Sender<NetEvent>,
) {
    deliver_feed(&client, &base, &evt_tx).await;

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            NetCommand::RefreshFeed => deliver_feed(&client, &base, &evt_tx).await,
            NetCommand::RecordSession { task_id } => {
                match record_session(&client, &base, &task_id).await {
                    Ok(()) => {
                        tracing::info!(task_id = %task_id, "session annotation recorded");
                        let _ = evt_tx.send(NetEvent::SessionRecorded { task_id }).await;
                    }
                    Err(e) => {
                        tracing::warn!(task_id = %task_id, error = %e, "session annotation failed");
                        let _ = evt_tx
                            .send(NetEvent::Error(format!("Session write failed: {e}")))
                            .await;
                    }
                }
            }
            NetCommand::Shutdown => {
                tracing::info!("net command handler shutting down");
                break;
            }
        }
    }
}

/// Fetch the feed and emit it, substituting the sample feed on failure.
async fn deliver_feed(client: &reqwest::Client, base: &str, evt_tx: &mpsc::Sender<NetEvent>) {
    match fetch_feed(client, base).await {
        Ok(feed) => {
            tracing::debug!(count = feed.tasks.len(), "feed loaded from gateway");
            let _ = evt_tx.send(NetEvent::FeedLoaded { feed }).await;
        }
        Err(e) => {
            tracing::warn!(error = %e, "feed fetch failed; substituting sample data");
            let _ = evt_tx
                .send(NetEvent::FeedFallback {
                    feed: TaskFeed::fallback(),
                    reason: e.to_string(),
                })
                .await;
        }
    }
}

/// `GET {base}/api/tasks`, decoded as the feed envelope.
async fn fetch_feed(client: &reqwest::Client, base: &str) -> Result<TaskFeed, reqwest::Error> {
    client
        .get(format!("{base}/api/tasks"))
        .send()
        .await?
        .error_for_status()?
        .json::<TaskFeed>()
        .await
}

/// `POST {base}/api/sessions` with the task id.
async fn record_session(
    client: &reqwest::Client,
    base: &str,
    task_id: &TaskId,
) -> Result<(), reqwest::Error> {
    client
        .post(format!("{base}/api/sessions"))
        .json(&serde_json::json!({ "taskId": task_id.as_str() }))
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}
