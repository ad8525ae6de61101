//! Event severity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity of a log event, ordered least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogEventLevel {
    #[serde(alias = "verbose", alias = "trace")]
    Verbose,
    #[serde(alias = "debug")]
    Debug,
    #[serde(alias = "information", alias = "info")]
    Information,
    #[serde(alias = "warning", alias = "warn")]
    Warning,
    #[serde(alias = "error")]
    Error,
    #[serde(alias = "fatal")]
    Fatal,
}

impl LogEventLevel {
    /// All levels in ascending severity.
    pub const ALL: [LogEventLevel; 6] = [
        LogEventLevel::Verbose,
        LogEventLevel::Debug,
        LogEventLevel::Information,
        LogEventLevel::Warning,
        LogEventLevel::Error,
        LogEventLevel::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogEventLevel::Verbose => "Verbose",
            LogEventLevel::Debug => "Debug",
            LogEventLevel::Information => "Information",
            LogEventLevel::Warning => "Warning",
            LogEventLevel::Error => "Error",
            LogEventLevel::Fatal => "Fatal",
        }
    }

    /// Zero-based position in [`LogEventLevel::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for LogEventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a level name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level '{0}'")]
pub struct ParseLevelError(String);

impl FromStr for LogEventLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "verbose" | "trace" | "vrb" => Ok(LogEventLevel::Verbose),
            "debug" | "dbg" => Ok(LogEventLevel::Debug),
            "information" | "info" | "inf" => Ok(LogEventLevel::Information),
            "warning" | "warn" | "wrn" => Ok(LogEventLevel::Warning),
            "error" | "err" => Ok(LogEventLevel::Error),
            "fatal" | "ftl" => Ok(LogEventLevel::Fatal),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
