use std::fmt;
use std::sync::Arc;

use crate::error::RenderError;
use crate::event::LogEvent;
use crate::rendering::write_styled;
use crate::theme::{Theme, ThemeStyle};

use super::TokenRenderer;

/// Writes a literal segment of the output template.
#[derive(Debug, Clone)]
pub struct TextTokenRenderer {
    theme: Arc<dyn Theme>,
    text: String,
}

impl TextTokenRenderer {
    pub fn new(theme: Arc<dyn Theme>, text: impl Into<String>) -> Self {
        Self {
            theme,
            text: text.into(),
        }
    }
}

impl TokenRenderer for TextTokenRenderer {
    fn render(&self, _event: &LogEvent, output: &mut dyn fmt::Write) -> Result<(), RenderError> {
        write_styled(&*self.theme, output, ThemeStyle::Text, &self.text)?;
        Ok(())
    }
}
