//! # Livery - Themed Output Templates for Structured Log Events
//!
//! `livery` turns structured log events into readable, optionally colored
//! console text. An output template decides the layout, a theme decides the
//! colors:
//!
//! ```rust
//! use std::sync::Arc;
//! use livery::event::{LogEvent, LogEventLevel};
//! use livery::format::FormatProvider;
//! use livery::output::OutputTemplateRenderer;
//! use livery::theme::NoTheme;
//!
//! let renderer = OutputTemplateRenderer::new(
//!     Arc::new(NoTheme),
//!     "[{Level:u3}] {Message}",
//!     Arc::new(FormatProvider::invariant()),
//! );
//!
//! let event = LogEvent::builder(LogEventLevel::Information, "Hello").build();
//! assert_eq!(renderer.render_to_string(&event).unwrap(), "[INF] Hello");
//! ```
//!
//! ## Core Concepts
//!
//! - [`event::LogEvent`]: timestamp, level, message template, properties and
//!   an optional exception
//! - [`output::OutputTemplateRenderer`]: an output template compiled into a
//!   chain of [`output::TokenRenderer`]s
//! - [`theme::Theme`]: maps style categories such as `Number` or
//!   `LevelWarning` to terminal styling
//! - [`format::FormatProvider`]: culture data for number and timestamp formats
//! - [`sink::ConsoleSink`] and [`config::ConsoleSinkConfig`]: writing to the
//!   console, configured in code or from YAML
//!
//! ## Output Templates
//!
//! Placeholders take the form `{Name[,alignment][:format]}`. The built-in
//! names are `Timestamp`, `Level`, `Message`, `Properties`, `NewLine` and
//! `Exception`; any other name is looked up among the event's properties.
//!
//! ```text
//! {Timestamp:yyyy-MM-dd HH:mm:ss.fff zzz} [{Level,-11}] {Message:lj}{NewLine}{Exception}
//! ```
//!
//! ## Themes
//!
//! ```rust
//! use std::sync::Arc;
//! use livery::event::{LogEvent, LogEventLevel};
//! use livery::format::FormatProvider;
//! use livery::output::OutputTemplateRenderer;
//! use livery::theme::AnsiTheme;
//!
//! let renderer = OutputTemplateRenderer::new(
//!     Arc::new(AnsiTheme::sixteen()),
//!     "{Message}",
//!     Arc::new(FormatProvider::invariant()),
//! );
//! let event = LogEvent::builder(LogEventLevel::Information, "{Count} items")
//!     .property("Count", 3)
//!     .build();
//! assert_eq!(renderer.render_to_string(&event).unwrap(), "\x1b[35m3\x1b[0m items");
//! ```
//!
//! See [`theme`] for the built-in themes and YAML theme files.

pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod output;
pub mod rendering;
pub mod self_log;
pub mod sink;
pub mod theme;

pub use config::ConsoleSinkConfig;
pub use error::{ConfigError, RenderError};
pub use livery_template::MessageTemplate;
pub use output::OutputTemplateRenderer;
pub use sink::ConsoleSink;
