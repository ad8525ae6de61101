use std::fmt;
use std::sync::Arc;

use livery_template::PropertyToken;

use crate::error::RenderError;
use crate::event::{LogEvent, LogEventPropertyValue};
use crate::format::{apply_casing, FormatProvider};
use crate::rendering::{padding, write_styled, ThemedValueFormatter};
use crate::theme::{NoTheme, Theme, ThemeStyle};

use super::TokenRenderer;

/// Renders any other placeholder as a direct reference to an event property.
///
/// A missing property renders as padding only. String values are written
/// unquoted, with `:u` / `:w` casing. Everything else goes through the
/// display formatter.
///
/// When the theme cannot buffer, aligned values are rendered unstyled so
/// they can be measured.
#[derive(Debug, Clone)]
pub struct EventPropertyTokenRenderer {
    token: PropertyToken,
    theme: Arc<dyn Theme>,
    formatter: ThemedValueFormatter,
    buffer_theme: Arc<dyn Theme>,
    buffer_formatter: ThemedValueFormatter,
}

impl EventPropertyTokenRenderer {
    pub fn new(theme: Arc<dyn Theme>, token: PropertyToken, provider: Arc<FormatProvider>) -> Self {
        let buffer_theme: Arc<dyn Theme> = if theme.can_buffer() {
            theme.clone()
        } else {
            Arc::new(NoTheme)
        };
        Self {
            formatter: ThemedValueFormatter::display(theme.clone(), provider.clone()),
            buffer_formatter: ThemedValueFormatter::display(buffer_theme.clone(), provider),
            token,
            theme,
            buffer_theme,
        }
    }

    fn render_value(
        &self,
        value: &LogEventPropertyValue,
        theme: &dyn Theme,
        formatter: &ThemedValueFormatter,
        output: &mut dyn fmt::Write,
    ) -> fmt::Result {
        match value.as_str() {
            Some(text) => {
                let cased = apply_casing(text, self.token.format());
                write_styled(theme, output, ThemeStyle::Text, &cased)
            }
            None => formatter.format(value, output, self.token.format(), false),
        }
    }
}

impl TokenRenderer for EventPropertyTokenRenderer {
    fn render(&self, event: &LogEvent, output: &mut dyn fmt::Write) -> Result<(), RenderError> {
        let Some(value) = event.property(self.token.property_name()) else {
            if let Some(alignment) = self.token.alignment() {
                padding::write_spaces(output, alignment.width())?;
            }
            return Ok(());
        };

        match self.token.alignment() {
            None => self.render_value(value, &*self.theme, &self.formatter, output)?,
            Some(alignment) => {
                let mut buffer = String::new();
                self.render_value(value, &*self.buffer_theme, &self.buffer_formatter, &mut buffer)?;
                padding::apply(output, &buffer, Some(alignment))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::LogEventLevel;
    use crate::theme::AnsiTheme;
    use livery_template::MessageTemplate;

    fn render(theme: Arc<dyn Theme>, token_text: &str) -> String {
        let token = MessageTemplate::parse(token_text)
            .property_tokens()
            .next()
            .cloned()
            .unwrap();
        let renderer =
            EventPropertyTokenRenderer::new(theme, token, Arc::new(FormatProvider::invariant()));
        let event = LogEvent::builder(LogEventLevel::Information, "x")
            .property("SourceContext", "App.Worker")
            .property("Attempts", vec![1, 2])
            .build();
        let mut out = String::new();
        renderer.render(&event, &mut out).unwrap();
        out
    }

    #[test]
    fn test_strings_are_unquoted_with_casing() {
        assert_eq!(render(Arc::new(NoTheme), "{SourceContext}"), "App.Worker");
        assert_eq!(render(Arc::new(NoTheme), "{SourceContext:u}"), "APP.WORKER");
    }

    #[test]
    fn test_missing_property_pads_only() {
        assert_eq!(render(Arc::new(NoTheme), "{Nope}"), "");
        assert_eq!(render(Arc::new(NoTheme), "{Nope,4}"), "    ");
    }

    #[test]
    fn test_structured_values_use_display_formatter() {
        assert_eq!(render(Arc::new(NoTheme), "{Attempts,-8}"), "[1, 2]  ");
        assert_eq!(
            render(Arc::new(AnsiTheme::sixteen()), "{Attempts}"),
            "[\x1b[35m1\x1b[0m, \x1b[35m2\x1b[0m]"
        );
    }
}
