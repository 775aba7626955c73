//! Global client configuration manager.
//!
//! `AppConfig` holds the display client's settings, read once from `.env` and
//! the process environment and then adjusted by command-line overrides.
//! Only the binary reads it; library components receive the values they need
//! at construction time.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock, RwLockReadGuard};

/// How a running view learns that the backend state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifierMode {
    /// Re-fetch on a fixed timer.
    Poll,
    /// Re-fetch whenever the WebSocket delivers a change event.
    Push,
}

impl FromStr for NotifierMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "poll" | "polling" => Ok(NotifierMode::Poll),
            "push" | "ws" | "websocket" => Ok(NotifierMode::Push),
            other => Err(format!("unknown notifier mode '{other}' (expected 'poll' or 'push')")),
        }
    }
}

impl fmt::Display for NotifierMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifierMode::Poll => f.write_str("poll"),
            NotifierMode::Push => f.write_str("push"),
        }
    }
}

/// Represents the complete client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub api_base_url: String,
    pub ws_url: String,
    pub queue_id: Option<String>,
    pub notifier_mode: NotifierMode,
    pub poll_interval_ms: u64,
    pub reconnect_delay_ms: u64,
    pub request_timeout_secs: u64,
}

/// Process-wide config, loaded on first access.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.into())
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Nothing is required. Missing or malformed values fall back to defaults
    /// that point at a backend on `localhost:8080`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let notifier_mode = match env::var("NOTIFIER_MODE") {
            Ok(raw) => raw.parse().unwrap_or_else(|err: String| {
                tracing::warn!("{err}; falling back to push");
                NotifierMode::Push
            }),
            Err(_) => NotifierMode::Push,
        };

        Self {
            env: var_or("APP_ENV", "development"),
            project_name: var_or("PROJECT_NAME", "smartq-display"),
            log_level: var_or("LOG_LEVEL", "display=info,client=info"),
            log_file: var_or("LOG_FILE", "display.log"),
            log_to_stdout: var_or("LOG_TO_STDOUT", "false") == "true",
            api_base_url: var_or("API_BASE_URL", "http://localhost:8080/api/v1"),
            ws_url: var_or("WS_URL", "ws://localhost:8080/ws"),
            queue_id: env::var("QUEUE_ID").ok().filter(|v| !v.trim().is_empty()),
            notifier_mode,
            poll_interval_ms: parsed_or("POLL_INTERVAL_MS", 5000),
            reconnect_delay_ms: parsed_or("RECONNECT_DELAY_MS", 3000),
            request_timeout_secs: parsed_or("REQUEST_TIMEOUT_SECS", 10),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn global() -> RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock
                .write()
                .expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    /// Applies `setter` under the write lock, loading the config first if needed.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    pub fn set_api_base_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.api_base_url = value.into());
    }

    pub fn set_ws_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.ws_url = value.into());
    }

    pub fn set_queue_id(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.queue_id = Some(value.into()));
    }

    pub fn set_notifier_mode(value: NotifierMode) {
        AppConfig::set_field(|cfg| cfg.notifier_mode = value);
    }

    pub fn set_poll_interval_ms(value: u64) {
        AppConfig::set_field(|cfg| cfg.poll_interval_ms = value);
    }

    pub fn set_reconnect_delay_ms(value: u64) {
        AppConfig::set_field(|cfg| cfg.reconnect_delay_ms = value);
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }
}
