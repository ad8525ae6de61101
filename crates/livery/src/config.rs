//! Declarative sink configuration.
//!
//! ```yaml
//! output_template: "{Timestamp:HH:mm:ss.fff} [{Level,-11}] {Message:lj}{NewLine}{Exception}"
//! theme: themes/ocean.yaml
//! standard_error_from_level: Warning
//! format_provider:
//!   decimal_separator: ","
//!   group_separator: "."
//! ```
//!
//! `theme` is one of `auto`, `none`, `code`, `literate`, `grayscale`,
//! `sixteen`, `system`, or the path of a YAML theme file. Relative paths
//! are resolved against the directory of the configuration file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::event::LogEventLevel;
use crate::format::FormatProvider;
use crate::output::OutputTemplateRenderer;
use crate::sink::ConsoleSink;
use crate::theme::{AnsiTheme, ConsoleStream, NoTheme, SystemConsoleTheme, Theme};

pub const DEFAULT_OUTPUT_TEMPLATE: &str =
    "[{Timestamp:HH:mm:ss} {Level:u3}] {Message:lj}{NewLine}{Exception}";

const AUTO_THEME: &str = "auto";
const SYSTEM_THEME: &str = "system";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleSinkConfig {
    pub output_template: String,
    pub theme: String,
    pub standard_error_from_level: Option<LogEventLevel>,
    pub format_provider: FormatProvider,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Default for ConsoleSinkConfig {
    fn default() -> Self {
        Self {
            output_template: DEFAULT_OUTPUT_TEMPLATE.to_string(),
            theme: AUTO_THEME.to_string(),
            standard_error_from_level: None,
            format_provider: FormatProvider::invariant(),
            base_dir: None,
        }
    }
}

impl ConsoleSinkConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Resolves the configured theme.
    ///
    /// `auto` picks the literate ANSI theme when standard output supports
    /// colors and no theme otherwise.
    pub fn resolve_theme(&self) -> Result<Arc<dyn Theme>, ConfigError> {
        self.resolve_theme_for(ConsoleStream::Stdout)
    }

    /// Resolves the configured theme for text written to `stream`.
    ///
    /// Only `system` depends on the stream; it styles `stream` directly.
    pub fn resolve_theme_for(&self, stream: ConsoleStream) -> Result<Arc<dyn Theme>, ConfigError> {
        let theme: Arc<dyn Theme> = match self.theme.as_str() {
            AUTO_THEME if console::colors_enabled() => Arc::new(AnsiTheme::literate()),
            AUTO_THEME | "none" => Arc::new(NoTheme),
            SYSTEM_THEME => Arc::new(SystemConsoleTheme::literate().on_stream(stream)),
            name => match AnsiTheme::preset(name) {
                Some(preset) => Arc::new(preset),
                None => {
                    let path = match &self.base_dir {
                        Some(dir) => dir.join(name),
                        None => PathBuf::from(name),
                    };
                    Arc::new(AnsiTheme::from_file(path)?)
                }
            },
        };
        Ok(theme)
    }

    /// Builds the sink described by this configuration.
    pub fn build(&self) -> Result<ConsoleSink, ConfigError> {
        let theme = self.resolve_theme()?;
        tracing::debug!(
            theme = %self.theme,
            template = %self.output_template,
            "building console sink"
        );
        let format_provider = Arc::new(self.format_provider.clone());
        let renderer =
            OutputTemplateRenderer::new(theme.clone(), &self.output_template, format_provider.clone());
        let sink = ConsoleSink::new(renderer, theme);
        let Some(level) = self.standard_error_from_level else {
            return Ok(sink);
        };

        let sink = sink.standard_error_from_level(level);
        if self.theme != SYSTEM_THEME {
            return Ok(sink);
        }
        let theme = self.resolve_theme_for(ConsoleStream::Stderr)?;
        let renderer = OutputTemplateRenderer::new(theme.clone(), &self.output_template, format_provider);
        Ok(sink.standard_error_renderer(renderer, theme))
    }
}
