use std::borrow::Cow;
use std::fmt;

use regex::Regex;

use crate::error::{ConfigError, RenderError};
use crate::event::LogEvent;
use crate::theme::Theme;

use super::TokenRenderer;

type Scrubber = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Renders `inner` into a private buffer, passes the whole buffer through a
/// scrubber and writes the result.
///
/// The scrubber sees style escape sequences as well as text, so only themes
/// that can buffer are accepted.
pub struct BufferScrubbingRenderer {
    scrubber: Scrubber,
    inner: Box<dyn TokenRenderer>,
}

impl BufferScrubbingRenderer {
    pub fn new<F>(theme: &dyn Theme, scrubber: F, inner: impl TokenRenderer + 'static) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        if !theme.can_buffer() {
            return Err(ConfigError::BufferingUnsupported {
                component: "BufferScrubbingRenderer",
            });
        }
        Ok(Self {
            scrubber: Box::new(scrubber),
            inner: Box::new(inner),
        })
    }

    /// Replaces every match of `regex` with `replacement` (`$1`-style group
    /// references allowed).
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use livery::event::{LogEvent, LogEventLevel};
    /// use livery::output::{renderer_fn, BufferScrubbingRenderer, TokenRenderer};
    /// use livery::theme::NoTheme;
    /// use regex::Regex;
    ///
    /// let inner = renderer_fn(|_, out| Ok(out.write_str("card 4111-1111-1111-1111")?));
    /// let scrubbed = BufferScrubbingRenderer::regex(
    ///     &NoTheme,
    ///     Regex::new(r"\d{4}-\d{4}-\d{4}-(\d{4})").unwrap(),
    ///     "****-$1",
    ///     inner,
    /// )
    /// .unwrap();
    ///
    /// let mut out = String::new();
    /// scrubbed.render(&LogEvent::builder(LogEventLevel::Information, "").build(), &mut out).unwrap();
    /// assert_eq!(out, "card ****-1111");
    /// ```
    pub fn regex(
        theme: &dyn Theme,
        regex: Regex,
        replacement: impl Into<String>,
        inner: impl TokenRenderer + 'static,
    ) -> Result<Self, ConfigError> {
        let replacement = replacement.into();
        Self::new(
            theme,
            move |text| match regex.replace_all(text, replacement.as_str()) {
                Cow::Borrowed(unchanged) => unchanged.to_string(),
                Cow::Owned(replaced) => replaced,
            },
            inner,
        )
    }
}

impl TokenRenderer for BufferScrubbingRenderer {
    fn render(&self, event: &LogEvent, output: &mut dyn fmt::Write) -> Result<(), RenderError> {
        let mut buffer = String::new();
        self.inner.render(event, &mut buffer)?;
        output.write_str(&(self.scrubber)(&buffer))?;
        Ok(())
    }
}

impl fmt::Debug for BufferScrubbingRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferScrubbingRenderer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::LogEventLevel;
    use crate::output::renderer_fn;
    use crate::theme::{AnsiTheme, NoTheme, SystemConsoleTheme};

    fn styled_inner() -> impl TokenRenderer {
        renderer_fn(|_, out| {
            out.write_str("\x1b[36msecret\x1b[0m token")?;
            Ok(())
        })
    }

    fn event() -> LogEvent {
        LogEvent::builder(LogEventLevel::Information, "x").build()
    }

    #[test]
    fn test_scrubber_sees_whole_buffer_with_codes() {
        let renderer = BufferScrubbingRenderer::new(
            &AnsiTheme::sixteen(),
            |text| text.replace("\x1b[36msecret\x1b[0m", "***"),
            styled_inner(),
        )
        .unwrap();
        let mut out = String::from("> ");
        renderer.render(&event(), &mut out).unwrap();
        assert_eq!(out, "> *** token");
    }

    #[test]
    fn test_regex_without_match_is_unchanged() {
        let renderer =
            BufferScrubbingRenderer::regex(&NoTheme, Regex::new("password").unwrap(), "***", styled_inner())
                .unwrap();
        let mut out = String::new();
        renderer.render(&event(), &mut out).unwrap();
        assert_eq!(out, "\x1b[36msecret\x1b[0m token");
    }

    #[test]
    fn test_rejects_non_buffering_theme() {
        let theme = SystemConsoleTheme::literate();
        let err = BufferScrubbingRenderer::new(&theme, |t| t.to_string(), styled_inner()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::BufferingUnsupported {
                component: "BufferScrubbingRenderer"
            }
        ));
    }
}
