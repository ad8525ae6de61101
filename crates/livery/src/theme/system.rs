//! A theme that styles the terminal directly instead of the output text.

use std::collections::HashMap;
use std::fmt;

use console::Term;

use super::attributes::StyleAttributes;
use super::color::ColorDef;
use super::{Theme, ThemeStyle};

const RESET: &str = "\x1b[0m";

const BLACK: ColorDef = ColorDef::Named(0);
const GRAY: ColorDef = ColorDef::Named(7);
const DARK_GRAY: ColorDef = ColorDef::Bright(0);
const RED: ColorDef = ColorDef::Bright(1);
const GREEN: ColorDef = ColorDef::Bright(2);
const YELLOW: ColorDef = ColorDef::Bright(3);
const BLUE: ColorDef = ColorDef::Bright(4);
const MAGENTA: ColorDef = ColorDef::Bright(5);
const CYAN: ColorDef = ColorDef::Bright(6);
const WHITE: ColorDef = ColorDef::Bright(7);

/// The standard stream a [`SystemConsoleTheme`] styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleStream {
    #[default]
    Stdout,
    Stderr,
}

impl ConsoleStream {
    fn term(self) -> Term {
        match self {
            ConsoleStream::Stdout => Term::stdout(),
            ConsoleStream::Stderr => Term::stderr(),
        }
    }

    fn colors_enabled(self) -> bool {
        match self {
            ConsoleStream::Stdout => console::colors_enabled(),
            ConsoleStream::Stderr => console::colors_enabled_stderr(),
        }
    }
}

/// Sends style changes straight to one of the process's standard streams,
/// out of band from the text being rendered.
///
/// Because the styling never appears in the output, text rendered with this
/// theme cannot be buffered and replayed with its colors intact;
/// [`can_buffer`](Theme::can_buffer) is `false`. The text must go to the
/// same stream the theme styles; use [`on_stream`](Self::on_stream) to pick
/// it. Nothing is written when that stream does not support colors.
#[derive(Debug, Clone)]
pub struct SystemConsoleTheme {
    styles: HashMap<ThemeStyle, String>,
    stream: ConsoleStream,
    term: Term,
}

impl SystemConsoleTheme {
    /// Creates a theme that styles standard output.
    pub fn new(styles: HashMap<ThemeStyle, StyleAttributes>) -> Self {
        Self::with_stream(styles, ConsoleStream::Stdout)
    }

    /// Creates a theme that styles `stream`.
    pub fn with_stream(styles: HashMap<ThemeStyle, StyleAttributes>, stream: ConsoleStream) -> Self {
        let styles = styles
            .into_iter()
            .map(|(style, attrs)| (style, attrs.escape_sequence()))
            .filter(|(_, code)| !code.is_empty())
            .collect();
        Self {
            styles,
            stream,
            term: stream.term(),
        }
    }

    /// The same styles, applied to `stream` instead.
    pub fn on_stream(mut self, stream: ConsoleStream) -> Self {
        self.stream = stream;
        self.term = stream.term();
        self
    }

    pub fn stream(&self) -> ConsoleStream {
        self.stream
    }

    fn from_table(table: &[(ThemeStyle, ColorDef, Option<ColorDef>)]) -> Self {
        Self::new(
            table
                .iter()
                .map(|&(style, fg, bg)| {
                    let mut attrs = StyleAttributes::new().fg(fg);
                    attrs.bg = bg;
                    (style, attrs)
                })
                .collect(),
        )
    }

    /// Resolves a built-in theme by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "literate" => Some(Self::literate()),
            "grayscale" => Some(Self::grayscale()),
            "colored" => Some(Self::colored()),
            _ => None,
        }
    }

    pub fn literate() -> Self {
        use ThemeStyle::*;
        Self::from_table(&[
            (Text, WHITE, None),
            (SecondaryText, GRAY, None),
            (TertiaryText, DARK_GRAY, None),
            (Invalid, YELLOW, None),
            (Null, BLUE, None),
            (Name, GRAY, None),
            (String, CYAN, None),
            (Number, MAGENTA, None),
            (Boolean, BLUE, None),
            (Scalar, GREEN, None),
            (LevelVerbose, GRAY, None),
            (LevelDebug, GRAY, None),
            (LevelInformation, WHITE, None),
            (LevelWarning, YELLOW, None),
            (LevelError, WHITE, Some(RED)),
            (LevelFatal, WHITE, Some(RED)),
        ])
    }

    pub fn grayscale() -> Self {
        use ThemeStyle::*;
        Self::from_table(&[
            (Text, WHITE, None),
            (SecondaryText, GRAY, None),
            (TertiaryText, DARK_GRAY, None),
            (Invalid, WHITE, Some(DARK_GRAY)),
            (Null, WHITE, None),
            (Name, GRAY, None),
            (String, WHITE, None),
            (Number, WHITE, None),
            (Boolean, WHITE, None),
            (Scalar, WHITE, None),
            (LevelVerbose, DARK_GRAY, None),
            (LevelDebug, DARK_GRAY, None),
            (LevelInformation, WHITE, None),
            (LevelWarning, WHITE, Some(DARK_GRAY)),
            (LevelError, BLACK, Some(WHITE)),
            (LevelFatal, BLACK, Some(WHITE)),
        ])
    }

    /// Levels highlighted with background colors.
    pub fn colored() -> Self {
        use ThemeStyle::*;
        Self::from_table(&[
            (Text, GRAY, None),
            (SecondaryText, DARK_GRAY, None),
            (TertiaryText, DARK_GRAY, None),
            (Invalid, YELLOW, None),
            (Null, WHITE, None),
            (Name, WHITE, None),
            (String, WHITE, None),
            (Number, WHITE, None),
            (Boolean, WHITE, None),
            (Scalar, WHITE, None),
            (LevelVerbose, GRAY, Some(DARK_GRAY)),
            (LevelDebug, WHITE, Some(DARK_GRAY)),
            (LevelInformation, WHITE, Some(BLUE)),
            (LevelWarning, DARK_GRAY, Some(YELLOW)),
            (LevelError, WHITE, Some(RED)),
            (LevelFatal, WHITE, Some(RED)),
        ])
    }

    fn emit(&self, code: &str) -> fmt::Result {
        self.term.write_str(code).map_err(|_| fmt::Error)
    }
}

impl Theme for SystemConsoleTheme {
    fn can_buffer(&self) -> bool {
        false
    }

    fn set(&self, _output: &mut dyn fmt::Write, style: ThemeStyle) -> Result<bool, fmt::Error> {
        if !self.stream.colors_enabled() {
            return Ok(false);
        }
        match self.styles.get(&style) {
            Some(code) => {
                self.emit(code)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn reset(&self, _output: &mut dyn fmt::Write) -> fmt::Result {
        self.emit(RESET)
    }
}
