//! Module containing logic related to spawning a logger from the
//! configuration, as well as run-time reloading of the log-level.
use core::fmt::Debug;

use merge::Merge;
use serde::{Deserialize, Serialize};

use crate::{Complete, CompleteResult, FromEnv, ParseEnvError, ReadEnv};

/// Log level of the global logger.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Level {
    /// Trace
    Trace,
    /// Debug
    Debug,
    /// Info (Default)
    #[default]
    Info,
    /// Warn
    Warn,
    /// Error
    Error,
}

/// Convert [`Level`] into [`tracing::Level`]
pub fn into_tracing_level(level: Level) -> tracing::Level {
    match level {
        Level::Trace => tracing::Level::TRACE,
        Level::Debug => tracing::Level::DEBUG,
        Level::Info => tracing::Level::INFO,
        Level::Warn => tracing::Level::WARN,
        Level::Error => tracing::Level::ERROR,
    }
}

/// 'Logger' configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default, Merge)]
#[serde(deny_unknown_fields)]
pub struct UserLayer {
    /// Level of logging verbosity
    pub level: Option<Level>,
    /// Output format
    pub format: Option<Format>,
}

/// Completed logger configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// Level of logging verbosity
    pub level: Level,
    /// Output format
    pub format: Format,
}

/// Reflects formatters in [`tracing_subscriber::fmt::format`]
#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Deserialize,
    Serialize,
    Default,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Format {
    /// See `tracing_subscriber::fmt::format::Full`
    #[default]
    Full,
    /// See `tracing_subscriber::fmt::format::Compact`
    Compact,
    /// See `tracing_subscriber::fmt::format::Pretty`
    Pretty,
    /// See `tracing_subscriber::fmt::format::Json`
    Json,
}

impl Complete for UserLayer {
    type Output = Config;

    fn complete(self) -> CompleteResult<Self::Output> {
        Ok(Config {
            level: self.level.unwrap_or_default(),
            format: self.format.unwrap_or_default(),
        })
    }
}

impl FromEnv for UserLayer {
    fn from_env(env: &impl ReadEnv) -> Result<Self, ParseEnvError> {
        Ok(Self {
            level: env.parse_env("LOG_LEVEL", "logger.level")?,
            format: env.parse_env("LOG_FORMAT", "logger.format")?,
        })
    }
}
