//! Themes that style output in-band with ANSI escape sequences.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use super::attributes::StyleAttributes;
use super::error::ThemeError;
use super::{Theme, ThemeStyle};

const RESET: &str = "\x1b[0m";

/// A theme that writes ANSI escape sequences into the output itself, so its
/// output can be buffered, transformed and replayed.
///
/// Styles without an entry render unstyled and need no reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnsiTheme {
    styles: HashMap<ThemeStyle, String>,
}

impl AnsiTheme {
    /// Creates a theme from raw escape sequences.
    pub fn new(styles: HashMap<ThemeStyle, String>) -> Self {
        Self { styles }
    }

    fn from_table(table: &[(ThemeStyle, &str)]) -> Self {
        Self::new(
            table
                .iter()
                .map(|(style, code)| (*style, code.to_string()))
                .collect(),
        )
    }

    /// Sets one style from parsed attributes.
    pub fn with_style(mut self, style: ThemeStyle, attributes: StyleAttributes) -> Self {
        let code = attributes.escape_sequence();
        if code.is_empty() {
            self.styles.remove(&style);
        } else {
            self.styles.insert(style, code);
        }
        self
    }

    /// The escape sequence for `style`, empty when unstyled.
    pub fn style(&self, style: ThemeStyle) -> &str {
        self.styles.get(&style).map(String::as_str).unwrap_or("")
    }

    /// Resolves a built-in theme by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "code" => Some(Self::code()),
            "literate" => Some(Self::literate()),
            "grayscale" => Some(Self::grayscale()),
            "sixteen" => Some(Self::sixteen()),
            _ => None,
        }
    }

    /// A theme in the style of popular code editors, using 256 colors.
    pub fn code() -> Self {
        use ThemeStyle::*;
        Self::from_table(&[
            (Text, "\x1b[38;5;0253m"),
            (SecondaryText, "\x1b[38;5;0246m"),
            (TertiaryText, "\x1b[38;5;0242m"),
            (Invalid, "\x1b[33;1m"),
            (Null, "\x1b[38;5;0038m"),
            (Name, "\x1b[38;5;0081m"),
            (String, "\x1b[38;5;0216m"),
            (Number, "\x1b[38;5;151m"),
            (Boolean, "\x1b[38;5;0038m"),
            (Scalar, "\x1b[38;5;0079m"),
            (LevelVerbose, "\x1b[37m"),
            (LevelDebug, "\x1b[37m"),
            (LevelInformation, "\x1b[37;1m"),
            (LevelWarning, "\x1b[38;5;0229m"),
            (LevelError, "\x1b[38;5;0197m\x1b[48;5;0238m"),
            (LevelFatal, "\x1b[38;5;0197m\x1b[48;5;0238m"),
        ])
    }

    /// Highly legible colors on a dark background, using 256 colors.
    pub fn literate() -> Self {
        use ThemeStyle::*;
        Self::from_table(&[
            (Text, "\x1b[38;5;0015m"),
            (SecondaryText, "\x1b[38;5;0007m"),
            (TertiaryText, "\x1b[38;5;0008m"),
            (Invalid, "\x1b[38;5;0011m"),
            (Null, "\x1b[38;5;0027m"),
            (Name, "\x1b[38;5;0007m"),
            (String, "\x1b[38;5;0045m"),
            (Number, "\x1b[38;5;0200m"),
            (Boolean, "\x1b[38;5;0027m"),
            (Scalar, "\x1b[38;5;0085m"),
            (LevelVerbose, "\x1b[38;5;0007m"),
            (LevelDebug, "\x1b[38;5;0007m"),
            (LevelInformation, "\x1b[38;5;0015m"),
            (LevelWarning, "\x1b[38;5;0011m"),
            (LevelError, "\x1b[38;5;0015m\x1b[48;5;0196m"),
            (LevelFatal, "\x1b[38;5;0015m\x1b[48;5;0196m"),
        ])
    }

    /// Shades of white and gray only.
    pub fn grayscale() -> Self {
        use ThemeStyle::*;
        Self::from_table(&[
            (Text, "\x1b[37;1m"),
            (SecondaryText, "\x1b[37m"),
            (TertiaryText, "\x1b[30;1m"),
            (Invalid, "\x1b[37;1m\x1b[47m"),
            (Null, "\x1b[1m\x1b[37m"),
            (Name, "\x1b[37m"),
            (String, "\x1b[1m\x1b[37m"),
            (Number, "\x1b[1m\x1b[37m"),
            (Boolean, "\x1b[1m\x1b[37m"),
            (Scalar, "\x1b[1m\x1b[37m"),
            (LevelVerbose, "\x1b[30;1m"),
            (LevelDebug, "\x1b[30;1m"),
            (LevelInformation, "\x1b[37;1m"),
            (LevelWarning, "\x1b[37;1m\x1b[47m"),
            (LevelError, "\x1b[30m\x1b[47m"),
            (LevelFatal, "\x1b[30m\x1b[47m"),
        ])
    }

    /// Only the basic 16 colors; text keeps the terminal's default color.
    pub fn sixteen() -> Self {
        use ThemeStyle::*;
        Self::from_table(&[
            (Invalid, "\x1b[33m"),
            (Null, "\x1b[34m"),
            (String, "\x1b[36m"),
            (Number, "\x1b[35m"),
            (Boolean, "\x1b[34m"),
            (Scalar, "\x1b[32m"),
            (LevelDebug, "\x1b[1m"),
            (LevelInformation, "\x1b[36;1m"),
            (LevelWarning, "\x1b[33;1m"),
            (LevelError, "\x1b[31;1m"),
            (LevelFatal, "\x1b[31;1m"),
        ])
    }

    /// Loads a theme from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ThemeError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|e| e.with_path(path.to_path_buf()))
    }

    /// Parses a theme from YAML.
    ///
    /// Keys are style names; values are attribute mappings or shorthand
    /// strings. An optional `extends` key names a built-in theme to start from.
    ///
    /// ```rust
    /// use livery::theme::{AnsiTheme, ThemeStyle};
    ///
    /// let theme = AnsiTheme::from_yaml(r#"
    /// extends: sixteen
    /// name: bold cyan
    /// level_error:
    ///   fg: bright_white
    ///   bg: red
    /// "#).unwrap();
    ///
    /// assert_eq!(theme.style(ThemeStyle::Name), "\x1b[1;36m");
    /// assert_eq!(theme.style(ThemeStyle::LevelError), "\x1b[97;41m");
    /// assert_eq!(theme.style(ThemeStyle::Number), "\x1b[35m");
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, ThemeError> {
        let root: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| ThemeError::Parse {
                path: None,
                message: e.to_string(),
            })?;

        let map = match root {
            serde_yaml::Value::Mapping(map) => map,
            serde_yaml::Value::Null => return Ok(Self::default()),
            other => {
                return Err(ThemeError::Parse {
                    path: None,
                    message: format!("expected a mapping of styles, got {:?}", other),
                })
            }
        };

        let mut theme = match map.get("extends") {
            Some(serde_yaml::Value::String(base)) => {
                Self::preset(base).ok_or_else(|| ThemeError::Parse {
                    path: None,
                    message: format!("unknown base theme '{}'", base),
                })?
            }
            Some(other) => {
                return Err(ThemeError::Parse {
                    path: None,
                    message: format!("'extends' must name a theme, got {:?}", other),
                })
            }
            None => Self::default(),
        };

        for (key, value) in &map {
            let name = key.as_str().ok_or_else(|| ThemeError::Parse {
                path: None,
                message: format!("non-string style name: {:?}", key),
            })?;
            if name == "extends" {
                continue;
            }
            let style: ThemeStyle = name.parse().map_err(|_| ThemeError::UnknownStyle {
                style: name.to_string(),
                path: None,
            })?;
            theme = theme.with_style(style, StyleAttributes::parse_value(value, name)?);
        }

        Ok(theme)
    }
}

impl Theme for AnsiTheme {
    fn can_buffer(&self) -> bool {
        true
    }

    fn set(&self, output: &mut dyn fmt::Write, style: ThemeStyle) -> Result<bool, fmt::Error> {
        match self.styles.get(&style) {
            Some(code) if !code.is_empty() => {
                output.write_str(code)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn reset(&self, output: &mut dyn fmt::Write) -> fmt::Result {
        output.write_str(RESET)
    }
}
