// Test-specific lint overrides: integration tests use unwrap/expect freely,
// and some pedantic/nursery lints are not appropriate for test code.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_panics_doc,
    clippy::missing_docs_in_private_items
)]

//! Integration tests for the live dashboard flow: document store -> gateway
//! -> networking task -> application state.
//!
//! The store is a wiremock server speaking the document-store REST shapes;
//! the gateway is the real HTTP server bound to a loopback port; the app is
//! driven through its key handler and heartbeat hooks exactly as the TUI
//! main loop drives it.
//!
//! These tests validate:
//! - A store page set flows through the gateway feed into bucketed board state
//! - A finished 25-minute countdown produces exactly one session command,
//!   which lands in the store as an annotation PATCH
//! - A store outage degrades to the built-in sample feed, flagged as such
//! - The refresh key round-trips a second fetch through the whole chain

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use focusboard::app::App;
use focusboard::net::{self, NetCommand, NetConfig, NetEvent};
use focusboard::session::{MemoryLedger, SessionTracker};
use focusboard_core::timer::WORK_SECS;
use focusboard_gateway::config::GatewayConfig;
use focusboard_gateway::server::{self, GatewayState};
use focusboard_gateway::store::DocumentStore;

/// Start the real gateway in-process, backed by the given store URL, and
/// return an http:// base URL.
async fn start_gateway(store_uri: &str) -> (String, tokio::task::JoinHandle<()>) {
    let config = GatewayConfig {
        store_base_url: store_uri.to_string(),
        store_token: "test-token".to_string(),
        database_id: "db-main".to_string(),
        timezone: chrono_tz::UTC,
        ..GatewayConfig::default()
    };
    let store = DocumentStore::new(&config).expect("failed to build store client");
    let (addr, handle) = server::start_server("127.0.0.1:0", Arc::new(GatewayState::new(store)))
        .await
        .expect("failed to start gateway server");
    (format!("http://{addr}"), handle)
}

/// A store page with the three properties the gateway reads.
fn store_page(id: &str, name: &str, category: &str, completed: bool) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "url": format!("https://store.example/{id}"),
        "properties": {
            "名稱": { "title": [{ "plain_text": name }] },
            "分類": { "select": { "name": category } },
            "達成": { "checkbox": completed },
        },
    })
}

fn make_app() -> App {
    App::new(
        chrono_tz::Asia::Taipei,
        SessionTracker::new(Box::new(MemoryLedger::default())),
    )
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Wait for the next `NetEvent`, failing the test on timeout.
async fn next_event(rx: &mut mpsc::Receiver<NetEvent>) -> NetEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timeout waiting for net event")
        .expect("event channel closed unexpectedly")
}

// =============================================================================
// Store pages flow through the gateway into bucketed board state
// =============================================================================

#[tokio::test]
async fn feed_flows_from_store_through_gateway_to_the_app() {
    let store = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/databases/db-main/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                store_page("w-1", "寫週報", "工作", true),
                store_page("w-2", "Review PR", "Work", false),
                store_page("p-1", "跑步 30 分鐘", "個人", false),
                store_page("x-1", "雜項", "健康", false),
            ],
        })))
        .mount(&store)
        .await;

    let (gateway_url, _gateway) = start_gateway(&store.uri()).await;
    let (_cmd_tx, mut evt_rx) = net::spawn_net(NetConfig::new(gateway_url))
        .await
        .expect("spawn_net failed");

    let feed = match next_event(&mut evt_rx).await {
        NetEvent::FeedLoaded { feed } => feed,
        other => panic!("expected FeedLoaded, got {other:?}"),
    };
    assert_eq!(feed.tasks.len(), 4);
    assert!(feed.last_updated.is_some(), "gateway stamps lastUpdated");

    let mut app = make_app();
    app.apply_feed(feed, false);

    // The 健康 label matches neither bucket, so only three tasks land.
    assert_eq!(app.board.len(), 3);
    let work = app.board.work_summary();
    assert_eq!((work.total, work.completed, work.percent), (2, 1, 50));
    let personal = app.board.personal_summary();
    assert_eq!((personal.total, personal.completed, personal.percent), (1, 0, 0));
    assert!(!app.using_fallback);
    assert_eq!(app.board.work[0].name, "寫週報");
    assert_eq!(app.board.personal[0].name, "跑步 30 分鐘");
}

// =============================================================================
// A finished countdown becomes a store annotation
// =============================================================================

#[tokio::test]
async fn completed_focus_session_lands_as_a_store_annotation() {
    let store = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/databases/db-main/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [store_page("w-1", "寫週報", "工作", false)],
        })))
        .mount(&store)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/blocks/w-1/children"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{ "id": "blk-1" }],
        })))
        .expect(1)
        .mount(&store)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v1/blocks/w-1/children"))
        .and(body_partial_json(serde_json::json!({ "after": "blk-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&store)
        .await;

    let (gateway_url, _gateway) = start_gateway(&store.uri()).await;
    let (cmd_tx, mut evt_rx) = net::spawn_net(NetConfig::new(gateway_url))
        .await
        .expect("spawn_net failed");

    let mut app = make_app();
    match next_event(&mut evt_rx).await {
        NetEvent::FeedLoaded { feed } => app.apply_feed(feed, false),
        other => panic!("expected FeedLoaded, got {other:?}"),
    }

    // Enter starts a focus countdown on the selected work task.
    app.handle_key_event(key(KeyCode::Enter));
    assert!(app.timer.is_running());

    // Run the full 25-minute countdown; exactly one command comes out.
    let mut commands = Vec::new();
    for _ in 0..WORK_SECS {
        if let Some(cmd) = app.on_second() {
            commands.push(cmd);
        }
    }
    assert_eq!(commands.len(), 1);
    let cmd = commands.pop().unwrap();
    assert!(
        matches!(cmd, NetCommand::RecordSession { ref task_id } if task_id.as_str() == "w-1"),
        "expected RecordSession for w-1, got {cmd:?}"
    );

    // The local count advanced before the gateway confirmed anything.
    assert_eq!(app.active_session_count(), Some(1));

    cmd_tx.send(cmd).await.expect("send command failed");
    match next_event(&mut evt_rx).await {
        NetEvent::SessionRecorded { task_id } => assert_eq!(task_id.as_str(), "w-1"),
        other => panic!("expected SessionRecorded, got {other:?}"),
    }

    // The annotation reached the store with the expected text.
    let requests = store.received_requests().await.unwrap();
    let patch = requests
        .iter()
        .find(|r| r.method.as_str() == "PATCH")
        .expect("no PATCH request reached the store");
    let body: serde_json::Value = patch.body_json().unwrap();
    let content = body["children"][0]["bulleted_list_item"]["rich_text"][0]["text"]["content"]
        .as_str()
        .unwrap();
    assert!(content.starts_with("🍅 "));
    assert!(content.ends_with("成功完成 1 個番茄鐘"));
}

// =============================================================================
// Store outage degrades to the sample feed
// =============================================================================

#[tokio::test]
async fn store_outage_degrades_to_sample_data() {
    let store = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("store down"))
        .mount(&store)
        .await;

    let (gateway_url, _gateway) = start_gateway(&store.uri()).await;
    let (_cmd_tx, mut evt_rx) = net::spawn_net(NetConfig::new(gateway_url))
        .await
        .expect("spawn_net failed");

    let mut app = make_app();
    match next_event(&mut evt_rx).await {
        NetEvent::FeedFallback { feed, reason } => {
            assert!(!reason.is_empty());
            app.apply_feed(feed, true);
        }
        other => panic!("expected FeedFallback, got {other:?}"),
    }

    assert!(app.using_fallback);
    assert!(app.last_updated.is_none(), "sample feed has no sync stamp");
    assert_eq!(app.board.len(), 4);
    assert_eq!(app.board.work_summary().percent, 50);
    assert_eq!(app.board.personal_summary().percent, 0);
}

// =============================================================================
// Refresh key round-trips through the chain
// =============================================================================

#[tokio::test]
async fn refresh_key_round_trips_through_the_chain() {
    let store = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/databases/db-main/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [store_page("p-1", "閱讀", "個人", false)],
        })))
        .expect(2)
        .mount(&store)
        .await;

    let (gateway_url, _gateway) = start_gateway(&store.uri()).await;
    let (cmd_tx, mut evt_rx) = net::spawn_net(NetConfig::new(gateway_url))
        .await
        .expect("spawn_net failed");

    let mut app = make_app();
    match next_event(&mut evt_rx).await {
        NetEvent::FeedLoaded { feed } => app.apply_feed(feed, false),
        other => panic!("expected FeedLoaded, got {other:?}"),
    }

    let cmd = app
        .handle_key_event(key(KeyCode::Char('g')))
        .expect("refresh key should produce a command");
    assert!(matches!(cmd, NetCommand::RefreshFeed));
    cmd_tx.send(cmd).await.expect("send command failed");

    match next_event(&mut evt_rx).await {
        NetEvent::FeedLoaded { feed } => {
            assert_eq!(feed.tasks.len(), 1);
            assert_eq!(feed.tasks[0].name, "閱讀");
        }
        other => panic!("expected FeedLoaded after refresh, got {other:?}"),
    }
}
