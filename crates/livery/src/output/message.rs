use std::fmt;
use std::sync::Arc;

use livery_template::PropertyToken;

use crate::error::RenderError;
use crate::event::LogEvent;
use crate::format::FormatProvider;
use crate::rendering::{padding, ThemedMessageTemplateRenderer, ThemedValueFormatter};
use crate::theme::Theme;

use super::TokenRenderer;

/// Renders `{Message}`: the event's own message template with its
/// properties substituted and styled.
///
/// `:l` writes string values without quotes, `:j` writes structured values
/// as JSON. Alignment of the whole message needs a theme that can buffer
/// and is ignored otherwise.
#[derive(Debug, Clone)]
pub struct MessageTemplateOutputTokenRenderer {
    theme: Arc<dyn Theme>,
    token: PropertyToken,
    renderer: ThemedMessageTemplateRenderer,
}

impl MessageTemplateOutputTokenRenderer {
    pub fn new(theme: Arc<dyn Theme>, token: PropertyToken, provider: Arc<FormatProvider>) -> Self {
        let format = token.format();
        let is_literal = format.is_some_and(|f| f.contains('l'));
        let formatter = ThemedValueFormatter::for_format(theme.clone(), provider, format);
        let renderer = ThemedMessageTemplateRenderer::new(theme.clone(), formatter, is_literal);
        Self {
            theme,
            token,
            renderer,
        }
    }
}

impl TokenRenderer for MessageTemplateOutputTokenRenderer {
    fn render(&self, event: &LogEvent, output: &mut dyn fmt::Write) -> Result<(), RenderError> {
        match self.token.alignment() {
            Some(alignment) if self.theme.can_buffer() => {
                let mut buffer = String::new();
                self.renderer
                    .render(event.message_template(), event.properties(), &mut buffer)?;
                padding::apply(output, &buffer, Some(alignment))?;
            }
            _ => self
                .renderer
                .render(event.message_template(), event.properties(), output)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{LogEventLevel, LogEventProperty, StructureValue};
    use crate::theme::{NoTheme, SystemConsoleTheme};
    use livery_template::MessageTemplate;

    fn render(theme: Arc<dyn Theme>, token_text: &str) -> String {
        let token = MessageTemplate::parse(token_text)
            .property_tokens()
            .next()
            .cloned()
            .unwrap();
        let renderer =
            MessageTemplateOutputTokenRenderer::new(theme, token, Arc::new(FormatProvider::invariant()));
        let point = StructureValue::new(vec![
            LogEventProperty::new("X", 1),
            LogEventProperty::new("Y", 2),
        ])
        .with_type_tag("Point");
        let event = LogEvent::builder(LogEventLevel::Information, "{User} at {Where}")
            .property("User", "ada")
            .property("Where", point)
            .build();
        let mut out = String::new();
        renderer.render(&event, &mut out).unwrap();
        out
    }

    #[test]
    fn test_display_notation_quotes_strings() {
        assert_eq!(
            render(Arc::new(NoTheme), "{Message}"),
            "\"ada\" at Point {X=1, Y=2}"
        );
    }

    #[test]
    fn test_literal_json() {
        assert_eq!(
            render(Arc::new(NoTheme), "{Message:lj}"),
            "ada at {\"X\": 1, \"Y\": 2, \"$type\": \"Point\"}"
        );
    }

    #[test]
    fn test_whole_message_alignment() {
        assert_eq!(
            render(Arc::new(NoTheme), "{Message,30:l}"),
            "       ada at Point {X=1, Y=2}"
        );
    }

    #[test]
    fn test_alignment_ignored_without_buffering() {
        let theme = Arc::new(SystemConsoleTheme::literate());
        assert_eq!(render(theme, "{Message,30:l}"), "ada at Point {X=1, Y=2}");
    }
}
