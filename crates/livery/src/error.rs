//! Error types.
//!
//! Configuration problems surface as [`ConfigError`] when a renderer, theme or
//! sink is constructed, before any event is rendered. Failures while rendering
//! a particular event surface as [`RenderError`].

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::theme::ThemeError;

/// Raised while building renderers, themes or sinks.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A component that captures styled output in memory was paired with a
    /// theme that styles the terminal out of band.
    #[error("{component} requires a theme that supports buffered rendering")]
    BufferingUnsupported { component: &'static str },

    /// Theme definition could not be parsed.
    #[error(transparent)]
    Theme(#[from] ThemeError),

    /// A configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration document is not valid.
    #[error("invalid configuration: {message}")]
    Parse { message: String },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse {
            message: err.to_string(),
        }
    }
}

/// Raised by a single render call.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The destination refused the write.
    #[error("failed to write rendered output")]
    Write(#[from] fmt::Error),

    /// A token renderer could not produce its output.
    #[error("renderer for {token} failed: {message}")]
    Renderer { token: String, message: String },
}

impl RenderError {
    pub fn renderer(token: impl Into<String>, message: impl Into<String>) -> Self {
        RenderError::Renderer {
            token: token.into(),
            message: message.into(),
        }
    }
}
