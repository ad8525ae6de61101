//! The closed set of style categories a theme maps to concrete styling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::event::LogEventLevel;

/// Abstract style categories applied by the renderers.
///
/// Names in theme files use the snake_case form (`secondary_text`,
/// `level_warning`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeStyle {
    /// Prominent text, generally content within an event's message.
    Text,
    /// Boilerplate text, for example items specified in an output template.
    SecondaryText,
    /// De-emphasized text, for example literal text in output templates and
    /// punctuation used when writing structured data.
    TertiaryText,
    /// Output demonstrating some kind of configuration issue, e.g. an invalid
    /// message template token.
    Invalid,
    Null,
    /// Property and type names.
    Name,
    String,
    Number,
    Boolean,
    /// All other scalar values, e.g. timestamps or characters.
    Scalar,
    LevelVerbose,
    LevelDebug,
    LevelInformation,
    LevelWarning,
    LevelError,
    LevelFatal,
}

impl ThemeStyle {
    pub const ALL: [ThemeStyle; 16] = [
        ThemeStyle::Text,
        ThemeStyle::SecondaryText,
        ThemeStyle::TertiaryText,
        ThemeStyle::Invalid,
        ThemeStyle::Null,
        ThemeStyle::Name,
        ThemeStyle::String,
        ThemeStyle::Number,
        ThemeStyle::Boolean,
        ThemeStyle::Scalar,
        ThemeStyle::LevelVerbose,
        ThemeStyle::LevelDebug,
        ThemeStyle::LevelInformation,
        ThemeStyle::LevelWarning,
        ThemeStyle::LevelError,
        ThemeStyle::LevelFatal,
    ];

    /// The style used for a level moniker.
    pub fn for_level(level: LogEventLevel) -> Self {
        match level {
            LogEventLevel::Verbose => ThemeStyle::LevelVerbose,
            LogEventLevel::Debug => ThemeStyle::LevelDebug,
            LogEventLevel::Information => ThemeStyle::LevelInformation,
            LogEventLevel::Warning => ThemeStyle::LevelWarning,
            LogEventLevel::Error => ThemeStyle::LevelError,
            LogEventLevel::Fatal => ThemeStyle::LevelFatal,
        }
    }

    /// The snake_case name used in theme files.
    pub fn name(&self) -> &'static str {
        match self {
            ThemeStyle::Text => "text",
            ThemeStyle::SecondaryText => "secondary_text",
            ThemeStyle::TertiaryText => "tertiary_text",
            ThemeStyle::Invalid => "invalid",
            ThemeStyle::Null => "null",
            ThemeStyle::Name => "name",
            ThemeStyle::String => "string",
            ThemeStyle::Number => "number",
            ThemeStyle::Boolean => "boolean",
            ThemeStyle::Scalar => "scalar",
            ThemeStyle::LevelVerbose => "level_verbose",
            ThemeStyle::LevelDebug => "level_debug",
            ThemeStyle::LevelInformation => "level_information",
            ThemeStyle::LevelWarning => "level_warning",
            ThemeStyle::LevelError => "level_error",
            ThemeStyle::LevelFatal => "level_fatal",
        }
    }
}

impl fmt::Display for ThemeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThemeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeStyle::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| format!("unknown theme style '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for style in ThemeStyle::ALL {
            assert_eq!(style.name().parse::<ThemeStyle>(), Ok(style));
        }
        assert!("level_trace".parse::<ThemeStyle>().is_err());
    }

    #[test]
    fn test_level_styles() {
        assert_eq!(
            ThemeStyle::for_level(LogEventLevel::Warning),
            ThemeStyle::LevelWarning
        );
        assert_eq!(
            ThemeStyle::for_level(LogEventLevel::Fatal),
            ThemeStyle::LevelFatal
        );
    }
}
