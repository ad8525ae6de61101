use std::fmt;
use std::sync::Arc;

use livery_template::{MessageTemplate, PropertyToken};

use crate::error::RenderError;
use crate::event::{LogEvent, LogEventProperty, LogEventPropertyValue, StructureValue};
use crate::format::FormatProvider;
use crate::rendering::{padding, ThemedValueFormatter};
use crate::theme::Theme;

use super::TokenRenderer;

/// Renders `{Properties}`: every event property that neither the message
/// template nor the output template mentions, as one structure.
#[derive(Debug, Clone)]
pub struct PropertiesTokenRenderer {
    theme: Arc<dyn Theme>,
    token: PropertyToken,
    output_template: MessageTemplate,
    formatter: ThemedValueFormatter,
}

impl PropertiesTokenRenderer {
    pub fn new(
        theme: Arc<dyn Theme>,
        token: PropertyToken,
        output_template: MessageTemplate,
        provider: Arc<FormatProvider>,
    ) -> Self {
        let formatter = ThemedValueFormatter::for_format(theme.clone(), provider, token.format());
        Self {
            theme,
            token,
            output_template,
            formatter,
        }
    }

    fn remaining(&self, event: &LogEvent) -> LogEventPropertyValue {
        let included = event
            .properties()
            .iter()
            .filter(|(name, _)| {
                !event.message_template().contains_property(name)
                    && !self.output_template.contains_property(name)
            })
            .map(|(name, value)| LogEventProperty::new(name.clone(), value.clone()))
            .collect();
        LogEventPropertyValue::Structure(StructureValue::new(included))
    }
}

impl TokenRenderer for PropertiesTokenRenderer {
    fn render(&self, event: &LogEvent, output: &mut dyn fmt::Write) -> Result<(), RenderError> {
        let value = self.remaining(event);
        match self.token.alignment() {
            Some(alignment) if self.theme.can_buffer() => {
                let mut buffer = String::new();
                self.formatter.format(&value, &mut buffer, None, false)?;
                padding::apply(output, &buffer, Some(alignment))?;
            }
            _ => self.formatter.format(&value, output, None, false)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::LogEventLevel;
    use crate::theme::NoTheme;

    fn render(output_template: &str, token_text: &str) -> String {
        let output_template = MessageTemplate::parse(output_template);
        let token = MessageTemplate::parse(token_text)
            .property_tokens()
            .next()
            .cloned()
            .unwrap();
        let renderer = PropertiesTokenRenderer::new(
            Arc::new(NoTheme),
            token,
            output_template,
            Arc::new(FormatProvider::invariant()),
        );
        let event = LogEvent::builder(LogEventLevel::Information, "User {UserId} logged in")
            .property("UserId", 7)
            .property("SourceContext", "Auth")
            .property("RequestId", "r-1")
            .property("Elapsed", 12.5)
            .build();
        let mut out = String::new();
        renderer.render(&event, &mut out).unwrap();
        out
    }

    #[test]
    fn test_excludes_referenced_properties() {
        assert_eq!(
            render("{Message} <{SourceContext}> {Properties}", "{Properties}"),
            "{RequestId=\"r-1\", Elapsed=12.5}"
        );
    }

    #[test]
    fn test_json_format() {
        assert_eq!(
            render("{Message} {Properties:j}", "{Properties:j}"),
            "{\"SourceContext\": \"Auth\", \"RequestId\": \"r-1\", \"Elapsed\": 12.5}"
        );
    }
}
