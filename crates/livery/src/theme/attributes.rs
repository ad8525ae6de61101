//! Style attributes parsed from theme files.
//!
//! A style is either a mapping or a space-separated shorthand:
//!
//! ```yaml
//! string:
//!   fg: "#d7875f"
//! level_error:
//!   fg: bright_white
//!   bg: red
//!   bold: true
//! name: bold cyan
//! ```

use super::color::ColorDef;
use super::error::ThemeError;

/// Parsed style attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleAttributes {
    pub fg: Option<ColorDef>,
    pub bg: Option<ColorDef>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
}

impl StyleAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: ColorDef) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: ColorDef) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Parses either form of style definition.
    pub fn parse_value(value: &serde_yaml::Value, style_name: &str) -> Result<Self, ThemeError> {
        match value {
            serde_yaml::Value::String(s) => parse_shorthand(s, style_name),
            serde_yaml::Value::Mapping(map) => Self::parse_mapping(map, style_name),
            serde_yaml::Value::Null => Ok(Self::new()),
            other => Err(ThemeError::InvalidDefinition {
                style: style_name.to_string(),
                message: format!("expected a mapping or shorthand string, got {:?}", other),
                path: None,
            }),
        }
    }

    /// Parses attributes from a YAML mapping.
    pub fn parse_mapping(
        map: &serde_yaml::Mapping,
        style_name: &str,
    ) -> Result<Self, ThemeError> {
        let mut attrs = StyleAttributes::new();

        for (key, value) in map {
            let key_str = key.as_str().ok_or_else(|| ThemeError::InvalidDefinition {
                style: style_name.to_string(),
                message: format!("Non-string key in style definition: {:?}", key),
                path: None,
            })?;
            attrs.set_attribute(key_str, value, style_name)?;
        }

        Ok(attrs)
    }

    fn set_attribute(
        &mut self,
        name: &str,
        value: &serde_yaml::Value,
        style_name: &str,
    ) -> Result<(), ThemeError> {
        let color = |value| {
            ColorDef::parse_value(value).map_err(|e| ThemeError::InvalidColor {
                style: style_name.to_string(),
                value: e,
                path: None,
            })
        };
        match name {
            "fg" => self.fg = Some(color(value)?),
            "bg" => self.bg = Some(color(value)?),
            "bold" => self.bold = parse_bool(value, name, style_name)?,
            "dim" => self.dim = parse_bool(value, name, style_name)?,
            "italic" => self.italic = parse_bool(value, name, style_name)?,
            "underline" => self.underline = parse_bool(value, name, style_name)?,
            _ => {
                return Err(ThemeError::UnknownAttribute {
                    style: style_name.to_string(),
                    attribute: name.to_string(),
                    path: None,
                });
            }
        }
        Ok(())
    }

    /// Whether these attributes produce no styling at all.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// The ANSI escape sequence selecting this style, empty when plain.
    pub fn escape_sequence(&self) -> String {
        let mut params = Vec::new();
        if self.bold {
            params.push("1".to_string());
        }
        if self.dim {
            params.push("2".to_string());
        }
        if self.italic {
            params.push("3".to_string());
        }
        if self.underline {
            params.push("4".to_string());
        }
        if let Some(fg) = self.fg {
            params.push(fg.sgr(false));
        }
        if let Some(bg) = self.bg {
            params.push(bg.sgr(true));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("\x1b[{}m", params.join(";"))
        }
    }
}

fn parse_bool(
    value: &serde_yaml::Value,
    attr: &str,
    style_name: &str,
) -> Result<bool, ThemeError> {
    value.as_bool().ok_or_else(|| ThemeError::InvalidDefinition {
        style: style_name.to_string(),
        message: format!("'{}' must be a boolean, got {:?}", attr, value),
        path: None,
    })
}

/// Parses a shorthand string such as `"bold cyan"` or `"dim"`.
///
/// The first color is the foreground; `on <color>` sets the background.
pub fn parse_shorthand(s: &str, style_name: &str) -> Result<StyleAttributes, ThemeError> {
    let mut attrs = StyleAttributes::new();
    let invalid = |value: String| ThemeError::InvalidShorthand {
        style: style_name.to_string(),
        value,
        path: None,
    };

    let mut parts = s.split_whitespace();
    while let Some(part) = parts.next() {
        match part.to_lowercase().as_str() {
            "bold" => attrs.bold = true,
            "dim" => attrs.dim = true,
            "italic" => attrs.italic = true,
            "underline" => attrs.underline = true,
            "on" => {
                let color = parts
                    .next()
                    .ok_or_else(|| invalid(format!("'on' without a color in '{}'", s)))?;
                attrs.bg = Some(ColorDef::parse_string(color).map_err(invalid)?);
            }
            _ => {
                if attrs.fg.is_some() {
                    return Err(invalid(format!(
                        "Multiple colors in shorthand: already have fg, got '{}'",
                        part
                    )));
                }
                attrs.fg = Some(ColorDef::parse_string(part).map_err(invalid)?);
            }
        }
    }

    if attrs.is_plain() {
        return Err(invalid(format!("Empty or invalid shorthand: '{}'", s)));
    }

    Ok(attrs)
}
