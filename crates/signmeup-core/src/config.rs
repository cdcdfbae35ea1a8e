//! Configuration — YAML config + env var overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::Rng;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "signmeup.yaml";

pub const DEFAULT_GREETING: &str = "Hello! I'm the SignMeUp assistant. I can help you manage identities and automate account creation. Try asking me to 'sign me up for GitHub' or about 'creating identities'.";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("reply delay range is empty: min {min_ms}ms > max {max_ms}ms")]
    InvalidDelayRange { min_ms: u64, max_ms: u64 },

    #[error("event_capacity must be greater than zero")]
    ZeroEventCapacity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Lower bound of the simulated thinking delay (inclusive)
    #[serde(default = "default_reply_delay_min_ms")]
    pub reply_delay_min_ms: u64,

    /// Upper bound of the simulated thinking delay (exclusive)
    #[serde(default = "default_reply_delay_max_ms")]
    pub reply_delay_max_ms: u64,

    /// Seeded assistant message at session start
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Broadcast buffer size for session events
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,

    /// Where the TUI writes its tracing output
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_reply_delay_min_ms() -> u64 {
    1000
}
fn default_reply_delay_max_ms() -> u64 {
    2000
}
fn default_greeting() -> String {
    DEFAULT_GREETING.into()
}
fn default_event_capacity() -> usize {
    256
}
fn default_log_file() -> PathBuf {
    PathBuf::from("signmeup-tui.log")
}

impl Config {
    /// Load config from a YAML file with env var overrides.
    pub fn load(config_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        let mut config: Config =
            serde_yaml::from_str(&content).context("Failed to parse signmeup.yaml")?;

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `signmeup.yaml` from a directory, or fall back to defaults (still
    /// honoring env overrides) when the file does not exist.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            return Self::load(&config_path);
        }
        let mut config = Config::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(v) = std::env::var("SIGNMEUP_REPLY_DELAY_MIN_MS") {
            self.reply_delay_min_ms = v
                .trim()
                .parse()
                .with_context(|| format!("SIGNMEUP_REPLY_DELAY_MIN_MS is not a number: {v}"))?;
        }
        if let Ok(v) = std::env::var("SIGNMEUP_REPLY_DELAY_MAX_MS") {
            self.reply_delay_max_ms = v
                .trim()
                .parse()
                .with_context(|| format!("SIGNMEUP_REPLY_DELAY_MAX_MS is not a number: {v}"))?;
        }
        if let Ok(path) = std::env::var("SIGNMEUP_LOG_FILE") {
            self.log_file = PathBuf::from(path);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reply_delay_min_ms > self.reply_delay_max_ms {
            return Err(ConfigError::InvalidDelayRange {
                min_ms: self.reply_delay_min_ms,
                max_ms: self.reply_delay_max_ms,
            });
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::ZeroEventCapacity);
        }
        Ok(())
    }

    pub fn reply_delay(&self) -> ReplyDelay {
        ReplyDelay {
            min_ms: self.reply_delay_min_ms,
            max_ms: self.reply_delay_max_ms,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reply_delay_min_ms: default_reply_delay_min_ms(),
            reply_delay_max_ms: default_reply_delay_max_ms(),
            greeting: default_greeting(),
            event_capacity: default_event_capacity(),
            log_file: default_log_file(),
        }
    }
}

/// Half-open `[min_ms, max_ms)` range for the simulated reply latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyDelay {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl ReplyDelay {
    /// Draw a delay uniformly from the range. An empty range (`min == max`)
    /// yields exactly `min`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        let ms = if self.max_ms > self.min_ms {
            rng.gen_range(self.min_ms..self.max_ms)
        } else {
            self.min_ms
        };
        Duration::from_millis(ms)
    }
}
