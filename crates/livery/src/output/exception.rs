use std::fmt;
use std::sync::Arc;

use crate::error::RenderError;
use crate::event::LogEvent;
use crate::rendering::write_styled;
use crate::theme::{Theme, ThemeStyle};

use super::{TokenRenderer, NEWLINE};

const STACK_FRAME_LINE_PREFIX: &str = "   ";

/// Renders the event's exception as plain text lines.
///
/// Indented lines (stack frames) use [`ThemeStyle::SecondaryText`], the
/// rest [`ThemeStyle::Text`]. Alignment is never applied.
#[derive(Debug, Clone)]
pub struct ExceptionTokenRenderer {
    theme: Arc<dyn Theme>,
}

impl ExceptionTokenRenderer {
    pub fn new(theme: Arc<dyn Theme>) -> Self {
        Self { theme }
    }
}

impl TokenRenderer for ExceptionTokenRenderer {
    fn render(&self, event: &LogEvent, output: &mut dyn fmt::Write) -> Result<(), RenderError> {
        let Some(exception) = event.exception() else {
            return Ok(());
        };

        for line in exception.to_string().lines() {
            let style = if line.starts_with(STACK_FRAME_LINE_PREFIX) {
                ThemeStyle::SecondaryText
            } else {
                ThemeStyle::Text
            };
            write_styled(&*self.theme, output, style, line)?;
            output.write_str(NEWLINE)?;
        }
        Ok(())
    }
}
