use std::fmt;
use std::sync::Arc;

use livery_template::PropertyToken;

use crate::error::RenderError;
use crate::event::LogEvent;
use crate::format::{format_timestamp, FormatProvider};
use crate::rendering::padding;
use crate::theme::{Theme, ThemeStyle};

use super::TokenRenderer;

/// Renders `{Timestamp}` through the format provider.
#[derive(Debug, Clone)]
pub struct TimestampTokenRenderer {
    theme: Arc<dyn Theme>,
    token: PropertyToken,
    provider: Arc<FormatProvider>,
}

impl TimestampTokenRenderer {
    pub fn new(theme: Arc<dyn Theme>, token: PropertyToken, provider: Arc<FormatProvider>) -> Self {
        Self {
            theme,
            token,
            provider,
        }
    }
}

impl TokenRenderer for TimestampTokenRenderer {
    fn render(&self, event: &LogEvent, output: &mut dyn fmt::Write) -> Result<(), RenderError> {
        let text = format_timestamp(&event.timestamp(), self.token.format(), &self.provider);
        let mut scope = self.theme.apply(output, ThemeStyle::SecondaryText)?;
        padding::apply(&mut scope, &text, self.token.alignment())?;
        scope.end()?;
        Ok(())
    }
}
