//! Runtime configuration
//!
//! Loaded from JSON. Every field is optional:
//!
//! ```json
//! {
//!   "window_period": "2s",
//!   "buckets": [40, 80, 120, 160],
//!   "log_format": "text",
//!   "bridge": { "server": "chat.example.org", "username": "totem", "password": "secret" }
//! }
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use armturn_core::{ArmturnError, ArmturnResult};
use armturn_gesture::{BucketBounds, BUCKET_COUNT};
use serde::Deserialize;

use crate::LogFormat;

/// Default window period
pub const DEFAULT_WINDOW_PERIOD: Duration = Duration::from_millis(2000);

pub const ENV_WINDOW_PERIOD: &str = "ARMTURN_WINDOW_PERIOD";
pub const ENV_SERVER: &str = "ARMTURN_SERVER";
pub const ENV_USERNAME: &str = "ARMTURN_USERNAME";
pub const ENV_PASSWORD: &str = "ARMTURN_PASSWORD";

/// Pipeline configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Length of one detection window
    pub window_period: Duration,
    /// Right-elbow bucket edges
    pub buckets: BucketBounds,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            window_period: DEFAULT_WINDOW_PERIOD,
            buckets: BucketBounds::default(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> ArmturnResult<()> {
        if self.window_period.is_zero() {
            return Err(ArmturnError::InvalidWindowPeriod(
                "window period must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Session settings for the messaging bridge. Not read by the pipeline.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BridgeConfig {
    pub server: String,
    pub username: String,
    pub password: String,
}

impl BridgeConfig {
    /// All three session fields present
    pub fn is_complete(&self) -> bool {
        !self.server.is_empty() && !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Complete runtime configuration
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub pipeline: PipelineConfig,
    pub bridge: BridgeConfig,
    pub log_format: LogFormat,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    window_period: Option<String>,
    buckets: Option<[u8; BUCKET_COUNT]>,
    log_format: Option<LogFormat>,
    bridge: Option<RawBridge>,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct RawBridge {
    server: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

fn parse_period(text: &str) -> ArmturnResult<Duration> {
    humantime::parse_duration(text.trim())
        .map_err(|e| ArmturnError::InvalidWindowPeriod(format!("{}: {}", text, e)))
}

impl RuntimeConfig {
    /// Parse a JSON document
    pub fn from_json_str(text: &str) -> ArmturnResult<Self> {
        let raw: RawConfig =
            serde_json::from_str(text).map_err(|e| ArmturnError::Config(e.to_string()))?;

        let mut config = RuntimeConfig::default();
        if let Some(period) = raw.window_period {
            config.pipeline.window_period = parse_period(&period)?;
        }
        if let Some(edges) = raw.buckets {
            config.pipeline.buckets = BucketBounds::new(edges)?;
        }
        if let Some(format) = raw.log_format {
            config.log_format = format;
        }
        if let Some(bridge) = raw.bridge {
            config.bridge = BridgeConfig {
                server: bridge.server.unwrap_or_default(),
                username: bridge.username.unwrap_or_default(),
                password: bridge.password.unwrap_or_default(),
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> ArmturnResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Apply overrides from a key lookup (environment, test map, ...)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ArmturnResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(period) = lookup(ENV_WINDOW_PERIOD) {
            self.pipeline.window_period = parse_period(&period)?;
        }
        if let Some(server) = lookup(ENV_SERVER) {
            self.bridge.server = server;
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            self.bridge.username = username;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.bridge.password = password;
        }
        self.validate()
    }

    /// Apply `ARMTURN_*` environment overrides
    pub fn apply_env(&mut self) -> ArmturnResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn validate(&self) -> ArmturnResult<()> {
        self.pipeline.validate()
    }
}
