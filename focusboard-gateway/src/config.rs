//! Configuration system for the Focusboard gateway.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/focusboard-gateway/config.toml`)
//! 4. Compiled defaults

use std::path::PathBuf;
use std::str::FromStr;

use chrono_tz::Tz;

/// Database queried when none is configured.
pub const DEFAULT_DATABASE_ID: &str = "182b6925914d806396dfe3524e726136";

/// Display timezone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "Asia/Taipei";

/// Errors that can occur when loading gateway configuration.
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
    #[error("unknown timezone: {0}")]
    InvalidTimezone(String),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure for the gateway.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct GatewayConfigFile {
    server: ServerFileConfig,
    store: StoreFileConfig,
}

/// `[server]` section of the gateway config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerFileConfig {
    bind_addr: Option<String>,
}

/// `[store]` section of the gateway config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StoreFileConfig {
    base_url: Option<String>,
    token: Option<String>,
    database_id: Option<String>,
    timezone: Option<String>,
}

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

/// CLI arguments for the gateway server.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Focusboard gateway server")]
pub struct GatewayCliArgs {
    /// Address to bind the gateway to.
    #[arg(short, long, env = "FOCUSBOARD_GATEWAY_ADDR")]
    pub bind: Option<String>,

    /// Path to config file (default: `~/.config/focusboard-gateway/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the document store API.
    #[arg(long, env = "FOCUSBOARD_STORE_URL")]
    pub store_url: Option<String>,

    /// Bearer token for the document store API.
    #[arg(long, env = "FOCUSBOARD_STORE_TOKEN", hide_env_values = true)]
    pub store_token: Option<String>,

    /// Identifier of the task database to query.
    #[arg(long, env = "FOCUSBOARD_DATABASE_ID")]
    pub database_id: Option<String>,

    /// IANA timezone for "today" and annotation timestamps.
    #[arg(long, env = "FOCUSBOARD_TZ")]
    pub timezone: Option<String>,

    /// Fetch today's feed once, write it to this path as JSON, and exit.
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "FOCUSBOARD_GATEWAY_LOG")]
    pub log_level: String,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to bind the server to (e.g., `127.0.0.1:8787`).
    pub bind_addr: String,
    /// Base URL of the document store API.
    pub store_base_url: String,
    /// Bearer token for the document store API. Empty means unauthenticated;
    /// store calls will then fail and surface as fetch errors.
    pub store_token: String,
    /// Identifier of the task database to query.
    pub database_id: String,
    /// Timezone used to compute "today" and to stamp annotations.
    pub timezone: Tz,
    /// Log level filter string.
    pub log_level: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8787".to_string(),
            store_base_url: "https://api.notion.com".to_string(),
            store_token: String::new(),
            database_id: DEFAULT_DATABASE_ID.to_string(),
            timezone: chrono_tz::Asia::Taipei,
            log_level: "info".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an error.
    /// If no `--config` is given, the default path is tried and a missing
    /// file is treated as empty config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read or
    /// parsed, or if the configured timezone is unknown.
    pub fn load(cli: &GatewayCliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Self::resolve(cli, &file)
    }

    /// Resolve a `GatewayConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default.
    fn resolve(cli: &GatewayCliArgs, file: &GatewayConfigFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let tz_label = cli
            .timezone
            .clone()
            .or_else(|| file.store.timezone.clone())
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone =
            Tz::from_str(&tz_label).map_err(|_| ConfigError::InvalidTimezone(tz_label))?;

        Ok(Self {
            bind_addr: cli
                .bind
                .clone()
                .or_else(|| file.server.bind_addr.clone())
                .unwrap_or(defaults.bind_addr),
            store_base_url: cli
                .store_url
                .clone()
                .or_else(|| file.store.base_url.clone())
                .unwrap_or(defaults.store_base_url),
            store_token: cli
                .store_token
                .clone()
                .or_else(|| file.store.token.clone())
                .unwrap_or(defaults.store_token),
            database_id: cli
                .database_id
                .clone()
                .or_else(|| file.store.database_id.clone())
                .unwrap_or(defaults.database_id),
            timezone,
            log_level: cli.log_level.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file for the gateway.
fn load_config_file(
    explicit_path: Option<&std::path::Path>,
) -> Result<GatewayConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(GatewayConfigFile::default());
        };
        config_dir.join("focusboard-gateway").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(GatewayConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
