//! Themed rendering of structured property values.
//!
//! Two notations are supported. The display notation is the compact form used
//! in console output:
//!
//! ```text
//! "text"  42  true  null  [1, 2]  Point {X=1, Y=2}  {["key"]=1}
//! ```
//!
//! The JSON notation (`:j`) writes the same values as JSON:
//!
//! ```text
//! "text"  42  true  null  [1, 2]  {"X": 1, "Y": 2, "$type": "Point"}
//! ```
//!
//! Punctuation is written in [`ThemeStyle::TertiaryText`]; each kind of value
//! gets its own style.

use std::fmt;
use std::sync::Arc;

use crate::event::{LogEventPropertyValue, ScalarValue, StructureValue};
use crate::format::{format_float, format_integer, format_timestamp, FormatProvider};
use crate::theme::{Theme, ThemeStyle};

use super::write_styled;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notation {
    Display,
    Json,
}

/// Formats property values with a theme.
#[derive(Debug, Clone)]
pub struct ThemedValueFormatter {
    theme: Arc<dyn Theme>,
    provider: Arc<FormatProvider>,
    notation: Notation,
}

impl ThemedValueFormatter {
    /// The compact display notation.
    pub fn display(theme: Arc<dyn Theme>, provider: Arc<FormatProvider>) -> Self {
        Self {
            theme,
            provider,
            notation: Notation::Display,
        }
    }

    /// JSON notation.
    pub fn json(theme: Arc<dyn Theme>, provider: Arc<FormatProvider>) -> Self {
        Self {
            theme,
            provider,
            notation: Notation::Json,
        }
    }

    /// JSON when the placeholder format contains `j`, display otherwise.
    pub fn for_format(
        theme: Arc<dyn Theme>,
        provider: Arc<FormatProvider>,
        format: Option<&str>,
    ) -> Self {
        if format.is_some_and(|f| f.contains('j')) {
            Self::json(theme, provider)
        } else {
            Self::display(theme, provider)
        }
    }

    pub fn is_json(&self) -> bool {
        self.notation == Notation::Json
    }

    /// Writes `value`.
    ///
    /// With `literal_top_level`, a top-level string is written without quotes.
    pub fn format(
        &self,
        value: &LogEventPropertyValue,
        output: &mut dyn fmt::Write,
        format: Option<&str>,
        literal_top_level: bool,
    ) -> fmt::Result {
        self.visit(value, output, format, literal_top_level)
    }

    fn visit(
        &self,
        value: &LogEventPropertyValue,
        output: &mut dyn fmt::Write,
        format: Option<&str>,
        literal: bool,
    ) -> fmt::Result {
        match value {
            LogEventPropertyValue::Scalar(scalar) => match self.notation {
                Notation::Display => self.display_scalar(scalar, output, format, literal),
                Notation::Json => self.json_scalar(scalar, output),
            },
            LogEventPropertyValue::Sequence(items) => {
                self.punctuation(output, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.punctuation(output, ", ")?;
                    }
                    self.visit(item, output, format, false)?;
                }
                self.punctuation(output, "]")
            }
            LogEventPropertyValue::Structure(structure) => match self.notation {
                Notation::Display => self.display_structure(structure, output, format),
                Notation::Json => self.json_structure(structure, output, format),
            },
            LogEventPropertyValue::Dictionary(entries) => {
                self.punctuation(output, "{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        self.punctuation(output, ", ")?;
                    }
                    match self.notation {
                        Notation::Display => {
                            self.punctuation(output, "[")?;
                            self.display_scalar(key, output, format, false)?;
                            self.punctuation(output, "]=")?;
                        }
                        Notation::Json => {
                            let key = match key {
                                ScalarValue::Str(s) => s.clone(),
                                other => self.plain_scalar(other, None),
                            };
                            self.styled(output, ThemeStyle::String, &quote(&key)?)?;
                            self.punctuation(output, ": ")?;
                        }
                    }
                    self.visit(value, output, format, false)?;
                }
                self.punctuation(output, "}")
            }
        }
    }

    fn display_structure(
        &self,
        structure: &StructureValue,
        output: &mut dyn fmt::Write,
        format: Option<&str>,
    ) -> fmt::Result {
        if let Some(tag) = structure.type_tag() {
            self.styled(output, ThemeStyle::Name, tag)?;
            output.write_char(' ')?;
        }
        self.punctuation(output, "{")?;
        for (i, property) in structure.properties().iter().enumerate() {
            if i > 0 {
                self.punctuation(output, ", ")?;
            }
            self.styled(output, ThemeStyle::Name, &property.name)?;
            self.punctuation(output, "=")?;
            self.visit(&property.value, output, format, false)?;
        }
        self.punctuation(output, "}")
    }

    fn json_structure(
        &self,
        structure: &StructureValue,
        output: &mut dyn fmt::Write,
        format: Option<&str>,
    ) -> fmt::Result {
        self.punctuation(output, "{")?;
        let mut first = true;
        for property in structure.properties() {
            if !first {
                self.punctuation(output, ", ")?;
            }
            first = false;
            self.styled(output, ThemeStyle::Name, &quote(&property.name)?)?;
            self.punctuation(output, ": ")?;
            self.visit(&property.value, output, format, false)?;
        }
        if let Some(tag) = structure.type_tag() {
            if !first {
                self.punctuation(output, ", ")?;
            }
            self.styled(output, ThemeStyle::Name, "\"$type\"")?;
            self.punctuation(output, ": ")?;
            self.styled(output, ThemeStyle::String, &quote(tag)?)?;
        }
        self.punctuation(output, "}")
    }

    fn display_scalar(
        &self,
        scalar: &ScalarValue,
        output: &mut dyn fmt::Write,
        format: Option<&str>,
        literal: bool,
    ) -> fmt::Result {
        match scalar {
            ScalarValue::Null => self.styled(output, ThemeStyle::Null, "null"),
            ScalarValue::Str(s) => {
                if literal || format == Some("l") {
                    self.styled(output, ThemeStyle::String, s)
                } else {
                    self.styled(output, ThemeStyle::String, &quote(s)?)
                }
            }
            ScalarValue::Bool(b) => self.styled(output, ThemeStyle::Boolean, if *b { "true" } else { "false" }),
            ScalarValue::Char(c) => self.styled(output, ThemeStyle::Scalar, &format!("'{}'", c)),
            ScalarValue::Int(_) | ScalarValue::UInt(_) | ScalarValue::Float(_) => {
                self.styled(output, ThemeStyle::Number, &self.plain_scalar(scalar, format))
            }
            ScalarValue::Timestamp(_) => {
                self.styled(output, ThemeStyle::Scalar, &self.plain_scalar(scalar, format))
            }
        }
    }

    fn json_scalar(&self, scalar: &ScalarValue, output: &mut dyn fmt::Write) -> fmt::Result {
        match scalar {
            ScalarValue::Null => self.styled(output, ThemeStyle::Null, "null"),
            ScalarValue::Str(s) => self.styled(output, ThemeStyle::String, &quote(s)?),
            ScalarValue::Char(c) => self.styled(output, ThemeStyle::String, &quote(&c.to_string())?),
            ScalarValue::Bool(b) => self.styled(output, ThemeStyle::Boolean, if *b { "true" } else { "false" }),
            ScalarValue::Int(i) => self.styled(output, ThemeStyle::Number, &i.to_string()),
            ScalarValue::UInt(u) => self.styled(output, ThemeStyle::Number, &u.to_string()),
            ScalarValue::Float(f) if f.is_finite() => {
                self.styled(output, ThemeStyle::Number, &f.to_string())
            }
            ScalarValue::Float(f) => {
                let text = format_float(*f, None, &FormatProvider::invariant());
                self.styled(output, ThemeStyle::String, &quote(&text)?)
            }
            ScalarValue::Timestamp(ts) => {
                let text = format_timestamp(ts, Some("o"), &self.provider);
                self.styled(output, ThemeStyle::Scalar, &quote(&text)?)
            }
        }
    }

    /// The unstyled text of a scalar, honoring number and timestamp formats.
    fn plain_scalar(&self, scalar: &ScalarValue, format: Option<&str>) -> String {
        let format = value_format(format);
        match scalar {
            ScalarValue::Null => "null".to_string(),
            ScalarValue::Bool(b) => b.to_string(),
            ScalarValue::Int(i) => format_integer(i128::from(*i), format, &self.provider),
            ScalarValue::UInt(u) => format_integer(i128::from(*u), format, &self.provider),
            ScalarValue::Float(f) => format_float(*f, format, &self.provider),
            ScalarValue::Char(c) => c.to_string(),
            ScalarValue::Str(s) => s.clone(),
            ScalarValue::Timestamp(ts) => format_timestamp(ts, format, &self.provider),
        }
    }

    fn punctuation(&self, output: &mut dyn fmt::Write, text: &str) -> fmt::Result {
        self.styled(output, ThemeStyle::TertiaryText, text)
    }

    fn styled(&self, output: &mut dyn fmt::Write, style: ThemeStyle, text: &str) -> fmt::Result {
        write_styled(&*self.theme, output, style, text)
    }
}

/// Drops the rendering flags `l` and `j`, leaving a value format if any.
fn value_format(format: Option<&str>) -> Option<&str> {
    format.filter(|f| !f.chars().all(|c| c == 'l' || c == 'j'))
}

/// A JSON string literal.
pub fn quote(text: &str) -> Result<String, fmt::Error> {
    serde_json::to_string(text).map_err(|_| fmt::Error)
}
