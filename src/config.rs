//! Run mode configuration.
//!
//! The run mode decides whether diagnostics (captured backtraces, `stack` and `name` fields in
//! error bodies) are produced. Components take the mode explicitly; [`RunMode::current`] is only
//! the default used when no mode was given.
use serde::Deserialize;
use std::sync::OnceLock;

/// Environment variable inspected by [`RunMode::from_env`].
pub const RUN_MODE_ENV: &str = "APP_ENV";

const PRODUCTION: &str = "production";

/// Whether the process runs in production or not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Development,
    Production,
}

impl RunMode {
    /// Reads the mode from [`RUN_MODE_ENV`]. Only the exact value `production` selects
    /// [`RunMode::Production`].
    pub fn from_env() -> Self {
        Self::from_env_var(RUN_MODE_ENV)
    }

    /// Reads the mode from an arbitrary environment variable.
    pub fn from_env_var(name: impl AsRef<str>) -> Self {
        match std::env::var(name.as_ref()) {
            Ok(value) => Self::from_value(&value),
            Err(_) => Self::Development,
        }
    }

    /// Process-wide mode. Read from the environment once, on first use.
    pub fn current() -> Self {
        static CURRENT: OnceLock<RunMode> = OnceLock::new();
        *CURRENT.get_or_init(|| {
            let mode = Self::from_env();
            tracing::debug!(?mode, "resolved run mode");
            mode
        })
    }

    /// `true` unless running in production.
    pub const fn includes_diagnostics(self) -> bool {
        matches!(self, Self::Development)
    }

    fn from_value(value: &str) -> Self {
        if value == PRODUCTION {
            Self::Production
        } else {
            Self::Development
        }
    }
}

/// Configuration section that applications can embed in their own config files.
///
/// ```rust
/// use http_error_guard::{ErrorConfig, RunMode};
///
/// let config: ErrorConfig = serde_json::from_str(r#"{ "run_mode": "production" }"#).unwrap();
/// assert_eq!(config.run_mode, RunMode::Production);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ErrorConfig {
    pub run_mode: RunMode,
}

impl ErrorConfig {
    /// Builds the configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            run_mode: RunMode::from_env(),
        }
    }
}
