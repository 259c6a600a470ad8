//! Process configuration, read from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(name: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub items_path: PathBuf,
    pub suppliers_path: PathBuf,
    /// JSON-lines audit file; `None` keeps the ledger in memory.
    pub audit_log_path: Option<PathBuf>,
    /// Language code (`en` / `he`) for conversations that have not chosen one.
    pub default_language: String,
    /// Pending flows idle longer than this are dropped. `None` keeps them forever.
    pub flow_idle_timeout: Option<Duration>,
    pub pretty_logs: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map lookup).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_addr = match (var("BIND_ADDR"), var("PORT")) {
            (Some(addr), _) => addr
                .trim()
                .parse::<SocketAddr>()
                .map_err(|e| ConfigError::invalid("BIND_ADDR", &addr, e.to_string()))?,
            (None, Some(port)) => {
                let port = port
                    .trim()
                    .parse::<u16>()
                    .map_err(|e| ConfigError::invalid("PORT", &port, e.to_string()))?;
                SocketAddr::from(([0, 0, 0, 0], port))
            }
            (None, None) => SocketAddr::from(([0, 0, 0, 0], 8000)),
        };

        let default_language = match var("DEFAULT_LANGUAGE") {
            Some(code) => {
                let code = code.trim().to_lowercase();
                if code != "en" && code != "he" {
                    return Err(ConfigError::invalid("DEFAULT_LANGUAGE", &code, "expected en or he"));
                }
                code
            }
            None => "he".to_string(),
        };

        let flow_idle_timeout = match var("FLOW_IDLE_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    ConfigError::invalid("FLOW_IDLE_TIMEOUT_SECS", &raw, e.to_string())
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => None,
        };

        let pretty_logs = match var("LOG_FORMAT").map(|f| f.trim().to_lowercase()) {
            None => false,
            Some(f) if f == "json" => false,
            Some(f) if f == "pretty" => true,
            Some(f) => return Err(ConfigError::invalid("LOG_FORMAT", &f, "expected json or pretty")),
        };

        Ok(Self {
            bind_addr,
            items_path: var("ITEMS_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/items.json")),
            suppliers_path: var("SUPPLIERS_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/suppliers.json")),
            audit_log_path: var("AUDIT_LOG_PATH").map(PathBuf::from),
            default_language,
            flow_idle_timeout,
            pretty_logs,
        })
    }
}
