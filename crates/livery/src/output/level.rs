use std::fmt;
use std::sync::Arc;

use livery_template::PropertyToken;

use crate::error::RenderError;
use crate::event::LogEvent;
use crate::rendering::{level_moniker, padding};
use crate::theme::{Theme, ThemeStyle};

use super::TokenRenderer;

/// Renders `{Level}` in the level's own style, padded inside the style.
#[derive(Debug, Clone)]
pub struct LevelTokenRenderer {
    theme: Arc<dyn Theme>,
    token: PropertyToken,
}

impl LevelTokenRenderer {
    pub fn new(theme: Arc<dyn Theme>, token: PropertyToken) -> Self {
        Self { theme, token }
    }
}

impl TokenRenderer for LevelTokenRenderer {
    fn render(&self, event: &LogEvent, output: &mut dyn fmt::Write) -> Result<(), RenderError> {
        let moniker = level_moniker(event.level(), self.token.format());
        let style = ThemeStyle::for_level(event.level());
        let mut scope = self.theme.apply(output, style)?;
        padding::apply(&mut scope, &moniker, self.token.alignment())?;
        scope.end()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::LogEventLevel;
    use crate::theme::{AnsiTheme, NoTheme};
    use livery_template::MessageTemplate;

    fn token(template: &str) -> PropertyToken {
        MessageTemplate::parse(template)
            .property_tokens()
            .next()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_padding_inside_style() {
        let renderer =
            LevelTokenRenderer::new(Arc::new(AnsiTheme::sixteen()), token("{Level,-6:u3}"));
        let event = LogEvent::builder(LogEventLevel::Warning, "x").build();
        let mut out = String::new();
        renderer.render(&event, &mut out).unwrap();
        assert_eq!(out, "\x1b[33;1mWRN   \x1b[0m");
    }

    #[test]
    fn test_full_name_without_format() {
        let renderer = LevelTokenRenderer::new(Arc::new(NoTheme), token("{Level}"));
        let event = LogEvent::builder(LogEventLevel::Information, "x").build();
        let mut out = String::new();
        renderer.render(&event, &mut out).unwrap();
        assert_eq!(out, "Information");
    }
}
