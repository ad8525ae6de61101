//! Level names for the `{Level}` placeholder.
//!
//! Formats are a case letter followed by a width: `u3` gives `INF`, `w1`
//! gives `i`, `t4` gives `Info`. Widths above 4 truncate the full name,
//! `u` and `w` on their own change the case of the full name.

use std::borrow::Cow;

use crate::event::LogEventLevel;
use crate::format::apply_casing;

const TITLE_CASE: [[&str; 4]; 6] = [
    ["V", "Vb", "Vrb", "Verb"],
    ["D", "De", "Dbg", "Dbug"],
    ["I", "In", "Inf", "Info"],
    ["W", "Wn", "Wrn", "Warn"],
    ["E", "Er", "Err", "Eror"],
    ["F", "Fa", "Ftl", "Fatl"],
];

/// The text written for `level` under `format`.
pub fn level_moniker(level: LogEventLevel, format: Option<&str>) -> Cow<'static, str> {
    let name = level.as_str();
    let Some(format) = format else {
        return Cow::Borrowed(name);
    };

    let mut chars = format.chars();
    let (Some(case), digits) = (chars.next(), chars.as_str()) else {
        return Cow::Borrowed(name);
    };
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Cow::Owned(apply_casing(name, Some(format)).into_owned());
    }
    let width: usize = digits.parse().unwrap_or(0);
    let case = case.to_string();

    if width < 1 {
        return Cow::Borrowed("");
    }

    if width > 4 {
        let truncated: String = name.chars().take(width).collect();
        return Cow::Owned(apply_casing(&truncated, Some(&case)).into_owned());
    }

    let abbreviated = TITLE_CASE[level.index()][width - 1];
    match case.as_str() {
        "t" => Cow::Borrowed(abbreviated),
        "u" | "w" => Cow::Owned(apply_casing(abbreviated, Some(&case)).into_owned()),
        _ => Cow::Owned(apply_casing(name, Some(format)).into_owned()),
    }
}
