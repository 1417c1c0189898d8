//! Focusboard — terminal daily-task dashboard with a focus timer.
//!
//! Launches the TUI and connects to the gateway for today's task feed.
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/focusboard/config.toml`).
//!
//! ```bash
//! # Default: gateway on 127.0.0.1:8787, timezone Asia/Taipei
//! cargo run --bin focusboard
//!
//! # Point at a remote gateway
//! cargo run --bin focusboard -- --gateway-url http://10.0.0.5:8787
//!
//! # Or via environment variables
//! FOCUSBOARD_GATEWAY_URL=http://10.0.0.5:8787 FOCUSBOARD_TZ=Asia/Tokyo cargo run
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use focusboard::app::App;
use focusboard::config::{CliArgs, ClientConfig};
use focusboard::net::{self, NetCommand, NetConfig, NetEvent};
use focusboard::session::{CompletionLedger, FileLedger, MemoryLedger, SessionTracker};
use focusboard::ui;
use focusboard_core::feed::TaskFeed;

/// Countdown heartbeat interval.
const SECOND: Duration = Duration::from_secs(1);

/// Wall-clock refresh interval.
const MINUTE: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > env > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("focusboard starting");

    let tracker = build_tracker(&config);
    let net_config = config.to_net_config();

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, net_config, &config, tracker).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("focusboard exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let log_path = file_path.map_or_else(default_log_path, Path::to_path_buf);

    let log_dir = log_path.parent()?;
    std::fs::create_dir_all(log_dir).ok()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Default log location: the user data dir, falling back to the temp dir.
fn default_log_path() -> PathBuf {
    dirs::data_dir().map_or_else(
        || std::env::temp_dir().join("focusboard.log"),
        |dir| dir.join("focusboard").join("focusboard.log"),
    )
}

/// Open the session ledger, falling back to an in-memory one.
fn build_tracker(config: &ClientConfig) -> SessionTracker {
    let ledger: Box<dyn CompletionLedger> = match config.resolved_ledger_path() {
        Some(path) => match FileLedger::load(&path) {
            Ok(ledger) => Box::new(ledger),
            Err(e) => {
                tracing::warn!(error = %e, "session ledger unavailable; counts reset on exit");
                Box::new(MemoryLedger::default())
            }
        },
        None => {
            tracing::warn!("no data directory; session counts reset on exit");
            Box::new(MemoryLedger::default())
        }
    };
    SessionTracker::new(ledger)
}

/// Main application loop.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    net_config: NetConfig,
    config: &ClientConfig,
    tracker: SessionTracker,
) -> io::Result<()> {
    let mut app = App::new(config.timezone, tracker);

    // Connect to the gateway; on failure run from the sample feed.
    let (cmd_tx, mut evt_rx) = match net::spawn_net(net_config).await {
        Ok((tx, rx)) => (Some(tx), Some(rx)),
        Err(e) => {
            tracing::warn!(error = %e, "networking unavailable; using sample data");
            app.apply_feed(TaskFeed::fallback(), true);
            app.notice = Some("Offline: showing sample data".to_string());
            (None, None)
        }
    };

    let mut last_second = Instant::now();
    let mut last_minute = Instant::now();

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Drain all pending NetEvents (non-blocking).
        if let Some(ref mut rx) = evt_rx {
            drain_net_events(&mut app, rx);
        }

        // Step 3: Advance the countdown and wall clock from elapsed time.
        while last_second.elapsed() >= SECOND {
            last_second += SECOND;
            if let Some(cmd) = app.on_second() {
                dispatch(&mut app, cmd_tx.as_ref(), cmd);
            }
        }
        if last_minute.elapsed() >= MINUTE {
            last_minute = Instant::now();
            app.on_minute();
        }

        // Step 4: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // handle_key_event returns Some(NetCommand) when the action
            // needs network dispatch (feed refresh).
            if let Some(cmd) = app.handle_key_event(key) {
                dispatch(&mut app, cmd_tx.as_ref(), cmd);
            }
        }

        if app.should_quit {
            // Send shutdown command to the networking task.
            if let Some(ref tx) = cmd_tx {
                let _ = tx.try_send(NetCommand::Shutdown);
            }
            return Ok(());
        }
    }
}

/// Send a command to the networking task, surfacing backpressure.
fn dispatch(app: &mut App, cmd_tx: Option<&mpsc::Sender<NetCommand>>, cmd: NetCommand) {
    let Some(tx) = cmd_tx else {
        app.notice = Some("Offline: command not sent".to_string());
        return;
    };
    match tx.try_send(cmd) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(_)) => {
            app.notice = Some("Network busy, command dropped".to_string());
        }
        Err(mpsc::error::TrySendError::Closed(_)) => {
            app.notice = Some("Network task stopped".to_string());
        }
    }
}

/// Drain all pending `NetEvent`s from the receiver and apply them to the app.
fn drain_net_events(app: &mut App, rx: &mut mpsc::Receiver<NetEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            NetEvent::FeedLoaded { feed } => {
                app.apply_feed(feed, false);
                app.notice = None;
            }
            NetEvent::FeedFallback { feed, reason } => {
                tracing::debug!(reason = %reason, "applying fallback feed");
                app.apply_feed(feed, true);
                app.notice = Some("Gateway unreachable, showing sample data".to_string());
            }
            NetEvent::SessionRecorded { task_id } => {
                tracing::debug!(task_id = %task_id, "session annotation confirmed");
            }
            NetEvent::Error(message) => {
                app.notice = Some(message);
            }
        }
    }
}
