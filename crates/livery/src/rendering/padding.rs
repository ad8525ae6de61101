//! Width measurement and space padding.

use std::fmt;

use livery_template::{Alignment, AlignmentDirection};
use unicode_width::UnicodeWidthChar;

/// Display width of `text` with ANSI escape sequences removed.
///
/// Control characters count as one column each, so a line terminator can be
/// compensated for with [`Alignment::widen`].
pub fn visible_width(text: &str) -> usize {
    console::strip_ansi_codes(text)
        .chars()
        .map(|c| {
            if c.is_control() {
                1
            } else {
                c.width().unwrap_or(0)
            }
        })
        .sum()
}

/// Writes `value`, padded with spaces to the alignment's width.
///
/// Values already at least as wide are written unchanged; nothing is ever
/// truncated.
pub fn apply(output: &mut dyn fmt::Write, value: &str, alignment: Option<Alignment>) -> fmt::Result {
    let Some(alignment) = alignment else {
        return output.write_str(value);
    };

    let pad = alignment.width().saturating_sub(visible_width(value));
    if pad == 0 {
        return output.write_str(value);
    }

    match alignment.direction() {
        AlignmentDirection::Left => {
            output.write_str(value)?;
            write_spaces(output, pad)
        }
        AlignmentDirection::Right => {
            write_spaces(output, pad)?;
            output.write_str(value)
        }
    }
}

/// Writes `count` spaces.
pub fn write_spaces(output: &mut dyn fmt::Write, count: usize) -> fmt::Result {
    write!(output, "{:count$}", "")
}
