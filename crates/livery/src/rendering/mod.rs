//! Shared building blocks for the token renderers.

mod level_moniker;
mod message_template;
pub mod padding;
mod value_formatter;

use std::fmt::{self, Write};

use crate::theme::{Theme, ThemeStyle};

pub use level_moniker::level_moniker;
pub use message_template::ThemedMessageTemplateRenderer;
pub use value_formatter::{quote, ThemedValueFormatter};

/// Writes `text` inside a `style` scope.
pub fn write_styled(
    theme: &dyn Theme,
    output: &mut dyn fmt::Write,
    style: ThemeStyle,
    text: &str,
) -> fmt::Result {
    let mut scope = theme.apply(output, style)?;
    scope.write_str(text)?;
    scope.end()
}
