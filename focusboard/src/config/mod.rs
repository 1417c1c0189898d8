//! Configuration system for the Focusboard dashboard.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/focusboard/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;

use crate::net::NetConfig;

/// Default gateway base URL.
const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8787";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// The configured timezone is not a known IANA name.
    #[error("unknown timezone {0:?}")]
    InvalidTimezone(String),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    gateway: GatewayFileConfig,
    ui: UiFileConfig,
    session: SessionFileConfig,
}

/// `[gateway]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct GatewayFileConfig {
    url: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    timezone: Option<String>,
    poll_timeout_ms: Option<u64>,
}

/// `[session]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct SessionFileConfig {
    ledger_path: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Gateway base URL.
    pub gateway_url: String,
    /// Per-request timeout for gateway calls.
    pub request_timeout: Duration,
    /// Display timezone.
    pub timezone: Tz,
    /// Poll timeout for the TUI event loop.
    pub poll_timeout: Duration,
    /// Explicit session-ledger path, overriding the data-dir default.
    pub ledger_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            timezone: chrono_tz::Asia::Taipei,
            poll_timeout: Duration::from_millis(50),
            ledger_path: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or parsed, or if the configured timezone is unknown.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Self::resolve(cli, &file)
    }

    /// Resolve a `ClientConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. This is separated from `load()` to
    /// enable unit testing without CLI parsing.
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let timezone = match cli.timezone.as_deref().or(file.ui.timezone.as_deref()) {
            Some(name) => {
                Tz::from_str(name).map_err(|_| ConfigError::InvalidTimezone(name.to_string()))?
            }
            None => defaults.timezone,
        };

        Ok(Self {
            gateway_url: cli
                .gateway_url
                .clone()
                .or_else(|| file.gateway.url.clone())
                .unwrap_or(defaults.gateway_url),
            request_timeout: file
                .gateway
                .request_timeout_secs
                .map_or(defaults.request_timeout, Duration::from_secs),
            timezone,
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            ledger_path: cli
                .ledger_path
                .clone()
                .or_else(|| file.session.ledger_path.clone()),
        })
    }

    /// Build the [`NetConfig`] for the networking layer.
    #[must_use]
    pub fn to_net_config(&self) -> NetConfig {
        let mut net = NetConfig::new(self.gateway_url.clone());
        net.request_timeout = self.request_timeout;
        net
    }

    /// Path for the session ledger: the explicit override, or
    /// `<data dir>/focusboard/sessions.json`.
    ///
    /// `None` when no override is set and the platform has no data dir.
    #[must_use]
    pub fn resolved_ledger_path(&self) -> Option<PathBuf> {
        self.ledger_path
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("focusboard").join("sessions.json")))
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal daily-task dashboard with a focus timer")]
pub struct CliArgs {
    /// Base URL of the focusboard gateway.
    #[arg(long, env = "FOCUSBOARD_GATEWAY_URL")]
    pub gateway_url: Option<String>,

    /// Display timezone (IANA name, e.g. `Asia/Taipei`).
    #[arg(long, env = "FOCUSBOARD_TZ")]
    pub timezone: Option<String>,

    /// Path to config file (default: `~/.config/focusboard/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the session-count ledger file.
    #[arg(long)]
    pub ledger_path: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "FOCUSBOARD_LOG")]
    pub log_level: String,

    /// Path to log file (default: under the user data dir).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            // No config dir available — use defaults.
            return Ok(ConfigFile::default());
        };
        config_dir.join("focusboard").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
