//! Numeric format strings.
//!
//! Standard specifiers are a letter plus an optional precision:
//!
//! | Spec | Meaning | `1234.5` with `2` |
//! |------|---------|-------------------|
//! | `D`  | zero-padded integer | n/a |
//! | `F`  | fixed point | `1234.50` |
//! | `N`  | fixed point with group separators | `1,234.50` |
//! | `P`  | percent (value × 100) | `123,450.00 %` |
//! | `X`/`x` | hexadecimal integer | n/a |
//!
//! Custom patterns use `0` (required digit), `#` (optional digit), `,`
//! (grouping) and `.` (decimal point), e.g. `000`, `#,##0.0#`.
//! Anything unrecognized renders the value's default form.

use super::FormatProvider;

/// Formats an integer according to `format`.
pub fn format_integer(value: i128, format: Option<&str>, provider: &FormatProvider) -> String {
    let Some(format) = format.filter(|f| !f.is_empty()) else {
        return value.to_string();
    };

    if let Some((spec, precision)) = standard_spec(format) {
        match spec {
            'D' | 'd' => {
                let digits = value.unsigned_abs().to_string();
                let width = precision.unwrap_or(0);
                let sign = if value < 0 { "-" } else { "" };
                return format!("{sign}{digits:0>width$}");
            }
            'X' => return hex(value, precision, true),
            'x' => return hex(value, precision, false),
            'G' | 'g' => return value.to_string(),
            _ => {}
        }
    }

    // Values beyond f64 precision are still rendered exactly by default.
    format_float(value as f64, Some(format), provider)
}

fn hex(value: i128, precision: Option<usize>, upper: bool) -> String {
    let width = precision.unwrap_or(0);
    // Negative values use 64-bit two's complement when they fit.
    let raw = if value < 0 {
        match i64::try_from(value) {
            Ok(v) => v as u64 as u128,
            Err(_) => value as u128,
        }
    } else {
        value as u128
    };
    if upper {
        format!("{raw:0>width$X}")
    } else {
        format!("{raw:0>width$x}")
    }
}

/// Formats a floating point number according to `format`.
pub fn format_float(value: f64, format: Option<&str>, provider: &FormatProvider) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let Some(format) = format.filter(|f| !f.is_empty()) else {
        return default_float(value, provider);
    };

    if let Some((spec, precision)) = standard_spec(format) {
        let decimals = precision.unwrap_or(2);
        return match spec {
            'F' | 'f' => fixed(value, decimals, decimals, 1, false, provider),
            'N' | 'n' => fixed(value, decimals, decimals, 1, true, provider),
            'P' | 'p' => format!(
                "{} {}",
                fixed(value * 100.0, decimals, decimals, 1, true, provider),
                provider.percent_symbol
            ),
            _ => default_float(value, provider),
        };
    }

    match CustomPattern::parse(format) {
        Some(pattern) => fixed(
            value,
            pattern.min_fraction,
            pattern.max_fraction,
            pattern.min_integer,
            pattern.grouping,
            provider,
        ),
        None => default_float(value, provider),
    }
}

fn default_float(value: f64, provider: &FormatProvider) -> String {
    let text = value.to_string();
    if provider.decimal_separator == "." {
        text
    } else {
        text.replace('.', &provider.decimal_separator)
    }
}

/// Splits `F2`, `N`, `X8` style specifiers into letter and precision.
fn standard_spec(format: &str) -> Option<(char, Option<usize>)> {
    let mut chars = format.chars();
    let spec = chars.next().filter(|c| c.is_ascii_alphabetic())?;
    let rest = chars.as_str();
    if rest.is_empty() {
        return Some((spec, None));
    }
    if rest.len() <= 2 && rest.bytes().all(|b| b.is_ascii_digit()) {
        return Some((spec, rest.parse().ok()));
    }
    None
}

#[derive(Debug, PartialEq, Eq)]
struct CustomPattern {
    min_integer: usize,
    min_fraction: usize,
    max_fraction: usize,
    grouping: bool,
}

impl CustomPattern {
    fn parse(format: &str) -> Option<Self> {
        if !format.chars().all(|c| matches!(c, '0' | '#' | ',' | '.')) {
            return None;
        }
        let (integer, fraction) = match format.split_once('.') {
            Some((i, f)) => (i, f),
            None => (format, ""),
        };
        if fraction.contains('.') || fraction.contains(',') {
            return None;
        }
        let min_fraction = fraction.chars().filter(|&c| c == '0').count();
        Some(Self {
            min_integer: integer.chars().filter(|&c| c == '0').count(),
            min_fraction,
            max_fraction: min_fraction + fraction.chars().filter(|&c| c == '#').count(),
            grouping: integer.contains(','),
        })
    }
}

fn fixed(
    value: f64,
    min_fraction: usize,
    max_fraction: usize,
    min_integer: usize,
    grouping: bool,
    provider: &FormatProvider,
) -> String {
    let rendered = format!("{:.*}", max_fraction, value.abs());
    let (integer, fraction) = match rendered.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (rendered, String::new()),
    };

    let mut fraction = fraction;
    while fraction.len() > min_fraction && fraction.ends_with('0') {
        fraction.pop();
    }

    let mut integer = integer.trim_start_matches('0').to_string();
    if integer.len() < min_integer {
        integer = format!("{}{}", "0".repeat(min_integer - integer.len()), integer);
    }
    if grouping {
        integer = group(&integer, &provider.group_separator);
    }

    let is_zero = integer.chars().all(|c| !c.is_ascii_digit() || c == '0')
        && fraction.chars().all(|c| c == '0');
    let mut out = String::new();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&integer);
    if !fraction.is_empty() {
        out.push_str(&provider.decimal_separator);
        out.push_str(&fraction);
    }
    out
}

fn group(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}
