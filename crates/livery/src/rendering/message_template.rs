//! Themed rendering of an event's message template.

use std::fmt;
use std::sync::Arc;

use livery_template::{MessageTemplate, MessageTemplateToken, PropertyToken};

use crate::event::{LogEventPropertyValue, Properties};
use crate::theme::{Theme, ThemeStyle};

use super::{padding, write_styled, ThemedValueFormatter};

/// Re-renders a message template, styling each embedded value by kind.
///
/// Literal text is written in [`ThemeStyle::Text`]. Placeholders with no
/// matching property are written as-is in [`ThemeStyle::Invalid`].
#[derive(Debug, Clone)]
pub struct ThemedMessageTemplateRenderer {
    theme: Arc<dyn Theme>,
    value_formatter: ThemedValueFormatter,
    is_literal: bool,
}

impl ThemedMessageTemplateRenderer {
    /// `is_literal` writes top-level string values without quotes.
    pub fn new(theme: Arc<dyn Theme>, value_formatter: ThemedValueFormatter, is_literal: bool) -> Self {
        Self {
            theme,
            value_formatter,
            is_literal,
        }
    }

    pub fn render(
        &self,
        template: &MessageTemplate,
        properties: &Properties,
        output: &mut dyn fmt::Write,
    ) -> fmt::Result {
        for token in template.tokens() {
            match token {
                MessageTemplateToken::Text(text) => {
                    write_styled(&*self.theme, output, ThemeStyle::Text, text.text())?
                }
                MessageTemplateToken::Property(property) => {
                    self.render_property(property, properties, output)?
                }
            }
        }
        Ok(())
    }

    fn render_property(
        &self,
        token: &PropertyToken,
        properties: &Properties,
        output: &mut dyn fmt::Write,
    ) -> fmt::Result {
        let Some(value) = properties.get(token.property_name()) else {
            return write_styled(&*self.theme, output, ThemeStyle::Invalid, token.raw_text());
        };

        match token.alignment() {
            Some(alignment) if self.theme.can_buffer() => {
                let mut buffer = String::new();
                self.render_value(value, &mut buffer, token.format())?;
                padding::apply(output, &buffer, Some(alignment))
            }
            _ => self.render_value(value, output, token.format()),
        }
    }

    fn render_value(
        &self,
        value: &LogEventPropertyValue,
        output: &mut dyn fmt::Write,
        format: Option<&str>,
    ) -> fmt::Result {
        match value.as_str() {
            Some(text) if self.is_literal => {
                write_styled(&*self.theme, output, ThemeStyle::String, text)
            }
            _ => self
                .value_formatter
                .format(value, output, format, self.is_literal),
        }
    }
}
