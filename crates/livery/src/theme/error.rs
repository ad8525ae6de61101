//! Theme file errors.

use std::path::PathBuf;

use thiserror::Error;

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

/// Error type for theme parsing and loading failures.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// YAML parse error.
    #[error("failed to parse theme{}: {message}", location(.path))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    /// A key that is not a known style category.
    #[error("unknown style '{style}'{}", location(.path))]
    UnknownStyle {
        style: String,
        path: Option<PathBuf>,
    },

    /// Invalid color format.
    #[error("invalid color '{value}' for style '{style}'{}", location(.path))]
    InvalidColor {
        style: String,
        value: String,
        path: Option<PathBuf>,
    },

    /// Unknown attribute in style definition.
    #[error("unknown attribute '{attribute}' in style '{style}'{}", location(.path))]
    UnknownAttribute {
        style: String,
        attribute: String,
        path: Option<PathBuf>,
    },

    /// Invalid shorthand syntax.
    #[error("invalid shorthand '{value}' for style '{style}'{}", location(.path))]
    InvalidShorthand {
        style: String,
        value: String,
        path: Option<PathBuf>,
    },

    /// Invalid style definition structure.
    #[error("invalid definition for style '{style}'{}: {message}", location(.path))]
    InvalidDefinition {
        style: String,
        message: String,
        path: Option<PathBuf>,
    },

    /// The theme file could not be read.
    #[error("failed to load theme {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ThemeError {
    /// Attaches the file a definition error came from.
    pub(crate) fn with_path(mut self, source_path: PathBuf) -> Self {
        match &mut self {
            ThemeError::Parse { path, .. }
            | ThemeError::UnknownStyle { path, .. }
            | ThemeError::InvalidColor { path, .. }
            | ThemeError::UnknownAttribute { path, .. }
            | ThemeError::InvalidShorthand { path, .. }
            | ThemeError::InvalidDefinition { path, .. } => *path = Some(source_path),
            ThemeError::Load { .. } => {}
        }
        self
    }
}
