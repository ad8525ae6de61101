//! Themes: how abstract style categories become terminal styling.
//!
//! Every renderer asks for a [`ThemeStyle`] rather than a color. The active
//! [`Theme`] decides what that means:
//!
//! | Theme | Styling | Buffers |
//! |-------|---------|---------|
//! | [`NoTheme`] | none | yes |
//! | [`AnsiTheme`] | escape sequences written into the output | yes |
//! | [`SystemConsoleTheme`] | escape sequences sent to the terminal directly | no |
//!
//! Styles are applied in scopes: `theme.apply(output, style)` writes the
//! prologue and returns a [`StyleReset`] guard that resets when it ends or is
//! dropped.
//!
//! Custom ANSI themes can be loaded from YAML, see [`AnsiTheme::from_yaml`].

mod ansi;
mod attributes;
mod color;
mod error;
mod scope;
mod style;
mod system;

pub use ansi::AnsiTheme;
pub use attributes::{parse_shorthand, StyleAttributes};
pub use color::ColorDef;
pub use error::ThemeError;
pub use scope::{NoTheme, StyleReset, Theme};
pub use style::ThemeStyle;
pub use system::{ConsoleStream, SystemConsoleTheme};
