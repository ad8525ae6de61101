//! Color values accepted in theme files.
//!
//! - Named colors: `red`, `green`, `blue`, etc. (the 8 base ANSI colors)
//! - Bright variants: `bright_red`, `bright_green`, etc.
//! - 256-color palette: `0` through `255`
//! - RGB hex: `"#ff6b35"` or `"#fff"` (3 or 6 digit)
//! - RGB tuple: `[255, 107, 53]`
//!
//! ```rust
//! use livery::theme::ColorDef;
//!
//! let red = ColorDef::parse_string("red").unwrap();
//! assert_eq!(red.sgr(false), "31");
//!
//! let orange = ColorDef::parse_value(&serde_yaml::Value::Number(208.into())).unwrap();
//! assert_eq!(orange.sgr(true), "48;5;208");
//! ```

const NAMES: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

/// Parsed color definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDef {
    /// One of the 8 base colors, by index.
    Named(u8),
    /// High-intensity variant of a base color, by index.
    Bright(u8),
    /// 256-color palette index.
    Color256(u8),
    /// True color RGB.
    Rgb(u8, u8, u8),
}

impl ColorDef {
    /// Parses a color definition from a YAML value.
    pub fn parse_value(value: &serde_yaml::Value) -> Result<Self, String> {
        match value {
            serde_yaml::Value::String(s) => Self::parse_string(s),
            serde_yaml::Value::Number(n) => {
                let index = n
                    .as_u64()
                    .ok_or_else(|| format!("Invalid color palette index: {}", n))?;
                u8::try_from(index)
                    .map(ColorDef::Color256)
                    .map_err(|_| format!("Color palette index {} out of range (0-255)", index))
            }
            serde_yaml::Value::Sequence(seq) => Self::parse_rgb_tuple(seq),
            _ => Err(format!("Invalid color value: {:?}", value)),
        }
    }

    /// Parses a named color, bright variant or hex code.
    pub fn parse_string(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        if let Ok(index) = s.parse::<u8>() {
            return Ok(ColorDef::Color256(index));
        }

        Self::parse_named(s)
    }

    fn parse_hex(hex: &str) -> Result<Self, String> {
        let component = |range: std::ops::Range<usize>, scale: u8| {
            hex.get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .map(|v| v * scale)
                .ok_or_else(|| format!("Invalid hex: {}", hex))
        };
        match hex.len() {
            3 => Ok(ColorDef::Rgb(
                component(0..1, 17)?,
                component(1..2, 17)?,
                component(2..3, 17)?,
            )),
            6 => Ok(ColorDef::Rgb(
                component(0..2, 1)?,
                component(2..4, 1)?,
                component(4..6, 1)?,
            )),
            _ => Err(format!(
                "Invalid hex color: #{} (must be 3 or 6 digits)",
                hex
            )),
        }
    }

    fn parse_named(name: &str) -> Result<Self, String> {
        let name_lower = name.to_lowercase();

        match name_lower.as_str() {
            "gray" | "grey" => return Ok(ColorDef::Named(7)),
            "dark_gray" | "dark_grey" => return Ok(ColorDef::Bright(0)),
            _ => {}
        }

        if let Some(base) = name_lower.strip_prefix("bright_") {
            return Self::index_of(base)
                .map(ColorDef::Bright)
                .ok_or_else(|| format!("Unknown bright color: bright_{}", base));
        }

        Self::index_of(&name_lower)
            .map(ColorDef::Named)
            .ok_or_else(|| format!("Unknown color name: {}", name))
    }

    fn index_of(name: &str) -> Option<u8> {
        NAMES.iter().position(|n| *n == name).map(|i| i as u8)
    }

    fn parse_rgb_tuple(seq: &[serde_yaml::Value]) -> Result<Self, String> {
        if seq.len() != 3 {
            return Err(format!(
                "RGB tuple must have exactly 3 values, got {}",
                seq.len()
            ));
        }

        let mut components = [0u8; 3];
        for (i, val) in seq.iter().enumerate() {
            let n = val
                .as_u64()
                .ok_or_else(|| format!("RGB component {} is not a number", i))?;
            components[i] = u8::try_from(n)
                .map_err(|_| format!("RGB component {} out of range (0-255): {}", i, n))?;
        }

        Ok(ColorDef::Rgb(components[0], components[1], components[2]))
    }

    /// The SGR parameter selecting this color, without the `ESC[` / `m` framing.
    pub fn sgr(&self, background: bool) -> String {
        let base = if background { 40 } else { 30 };
        match *self {
            ColorDef::Named(n) => (base + u16::from(n)).to_string(),
            ColorDef::Bright(n) => (base + 60 + u16::from(n)).to_string(),
            ColorDef::Color256(n) => format!("{};5;{}", base + 8, n),
            ColorDef::Rgb(r, g, b) => format!("{};2;{};{};{}", base + 8, r, g, b),
        }
    }
}
