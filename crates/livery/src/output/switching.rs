use std::fmt;
use std::sync::Arc;

use crate::error::RenderError;
use crate::event::{LogEvent, LogEventLevel};

use super::TokenRenderer;

type Selector = Box<dyn Fn(&LogEvent) -> Option<Arc<dyn TokenRenderer>> + Send + Sync>;

/// Chooses a renderer for each event.
///
/// The selector runs on every call; when it returns `None` nothing is written.
pub struct EventSwitchingRenderer {
    selector: Selector,
}

impl EventSwitchingRenderer {
    pub fn new<F>(selector: F) -> Self
    where
        F: Fn(&LogEvent) -> Option<Arc<dyn TokenRenderer>> + Send + Sync + 'static,
    {
        Self {
            selector: Box::new(selector),
        }
    }

    /// Builds one renderer per level up front and picks by the event's level.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use livery::event::{LogEvent, LogEventLevel};
    /// use livery::output::{renderer_fn, EventSwitchingRenderer, TokenRenderer};
    ///
    /// let switch = EventSwitchingRenderer::per_level(|level| {
    ///     (level >= LogEventLevel::Error).then(|| {
    ///         Arc::new(renderer_fn(|_, out| Ok(out.write_str("!!")?))) as Arc<dyn TokenRenderer>
    ///     })
    /// });
    ///
    /// let mut out = String::new();
    /// switch.render(&LogEvent::builder(LogEventLevel::Fatal, "").build(), &mut out).unwrap();
    /// switch.render(&LogEvent::builder(LogEventLevel::Debug, "").build(), &mut out).unwrap();
    /// assert_eq!(out, "!!");
    /// ```
    pub fn per_level<F>(mut build: F) -> Self
    where
        F: FnMut(LogEventLevel) -> Option<Arc<dyn TokenRenderer>>,
    {
        let table: Vec<Option<Arc<dyn TokenRenderer>>> =
            LogEventLevel::ALL.into_iter().map(&mut build).collect();
        Self::new(move |event| table[event.level().index()].clone())
    }
}

impl TokenRenderer for EventSwitchingRenderer {
    fn render(&self, event: &LogEvent, output: &mut dyn fmt::Write) -> Result<(), RenderError> {
        match (self.selector)(event) {
            Some(renderer) => renderer.render(event, output),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for EventSwitchingRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSwitchingRenderer").finish_non_exhaustive()
    }
}
