//! The unit of work in a compiled output template.

use std::fmt;
use std::sync::Arc;

use crate::error::RenderError;
use crate::event::LogEvent;

/// Renders one output template token for one event.
///
/// Renderers are built once and then shared: the same instance may render
/// many events, concurrently, into different destinations. Anything a render
/// call needs beyond its construction-time configuration must live on the
/// stack of that call.
pub trait TokenRenderer: Send + Sync {
    fn render(&self, event: &LogEvent, output: &mut dyn fmt::Write) -> Result<(), RenderError>;
}

impl<R: TokenRenderer + ?Sized> TokenRenderer for Box<R> {
    fn render(&self, event: &LogEvent, output: &mut dyn fmt::Write) -> Result<(), RenderError> {
        (**self).render(event, output)
    }
}

impl<R: TokenRenderer + ?Sized> TokenRenderer for Arc<R> {
    fn render(&self, event: &LogEvent, output: &mut dyn fmt::Write) -> Result<(), RenderError> {
        (**self).render(event, output)
    }
}

/// A renderer backed by a closure. See [`renderer_fn`].
pub struct FnTokenRenderer<F>(F);

impl<F> TokenRenderer for FnTokenRenderer<F>
where
    F: Fn(&LogEvent, &mut dyn fmt::Write) -> Result<(), RenderError> + Send + Sync,
{
    fn render(&self, event: &LogEvent, output: &mut dyn fmt::Write) -> Result<(), RenderError> {
        (self.0)(event, output)
    }
}

/// Wraps a closure as a [`TokenRenderer`].
///
/// ```rust
/// use livery::output::{renderer_fn, TokenRenderer};
/// use livery::event::{LogEvent, LogEventLevel};
///
/// let marker = renderer_fn(|_event, output| {
///     output.write_str("<custom>")?;
///     Ok(())
/// });
///
/// let mut out = String::new();
/// marker.render(&LogEvent::builder(LogEventLevel::Debug, "x").build(), &mut out).unwrap();
/// assert_eq!(out, "<custom>");
/// ```
pub fn renderer_fn<F>(f: F) -> FnTokenRenderer<F>
where
    F: Fn(&LogEvent, &mut dyn fmt::Write) -> Result<(), RenderError> + Send + Sync,
{
    FnTokenRenderer(f)
}
