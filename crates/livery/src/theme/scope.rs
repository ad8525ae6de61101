//! The theme contract and scoped style application.

use std::fmt;

use super::ThemeStyle;

/// Maps style categories to concrete styling.
///
/// Implementations write a style's prologue in [`set`](Theme::set) and return
/// to the theme's baseline in [`reset`](Theme::reset). Nesting is shallow and
/// balanced, so reset never has to restore an outer style.
///
/// Renderers do not call `set`/`reset` directly; they go through `apply`
/// on `dyn Theme`, which guarantees the reset.
pub trait Theme: Send + Sync + fmt::Debug {
    /// Whether styled output can be captured in a string and replayed later.
    ///
    /// Themes that style the terminal out of band return `false`.
    fn can_buffer(&self) -> bool;

    /// Writes the prologue for `style`. Returns whether a reset is needed.
    fn set(&self, output: &mut dyn fmt::Write, style: ThemeStyle) -> Result<bool, fmt::Error>;

    /// Returns `output` to the baseline style.
    fn reset(&self, output: &mut dyn fmt::Write) -> fmt::Result;
}

impl dyn Theme + '_ {
    /// Applies `style` to everything written through the returned guard.
    ///
    /// ```rust
    /// use std::fmt::Write;
    /// use std::sync::Arc;
    /// use livery::theme::{AnsiTheme, Theme, ThemeStyle};
    ///
    /// let theme: Arc<dyn Theme> = Arc::new(AnsiTheme::sixteen());
    /// let mut out = String::new();
    /// {
    ///     let mut styled = theme.apply(&mut out, ThemeStyle::String).unwrap();
    ///     styled.write_str("\"hi\"").unwrap();
    /// }
    /// assert_eq!(out, "\x1b[36m\"hi\"\x1b[0m");
    /// ```
    pub fn apply<'a>(
        &'a self,
        output: &'a mut dyn fmt::Write,
        style: ThemeStyle,
    ) -> Result<StyleReset<'a>, fmt::Error> {
        let needs_reset = self.set(output, style)?;
        Ok(StyleReset {
            theme: self,
            output,
            needs_reset,
        })
    }
}

/// Guard returned by `apply`. Writes pass through to the destination; the
/// style is reset exactly once, by [`end`](StyleReset::end) or on drop.
pub struct StyleReset<'a> {
    theme: &'a dyn Theme,
    output: &'a mut dyn fmt::Write,
    needs_reset: bool,
}

impl StyleReset<'_> {
    /// Resets now, surfacing any write error. Dropping the guard does the same
    /// but has to discard the error.
    pub fn end(mut self) -> fmt::Result {
        self.finish()
    }

    fn finish(&mut self) -> fmt::Result {
        if std::mem::take(&mut self.needs_reset) {
            self.theme.reset(self.output)?;
        }
        Ok(())
    }
}

impl fmt::Write for StyleReset<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.output.write_str(s)
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.output.write_char(c)
    }
}

impl Drop for StyleReset<'_> {
    fn drop(&mut self) {
        let _ = self.finish();
    }
}

impl fmt::Debug for StyleReset<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleReset")
            .field("theme", &self.theme)
            .field("needs_reset", &self.needs_reset)
            .finish()
    }
}

/// A theme that applies no styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoTheme;

impl Theme for NoTheme {
    fn can_buffer(&self) -> bool {
        true
    }

    fn set(&self, _output: &mut dyn fmt::Write, _style: ThemeStyle) -> Result<bool, fmt::Error> {
        Ok(false)
    }

    fn reset(&self, _output: &mut dyn fmt::Write) -> fmt::Result {
        Ok(())
    }
}
