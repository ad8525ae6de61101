//! `u` / `w` case formats shared by the level and string property renderers.

use std::borrow::Cow;

/// Upper-cases for `u`, lower-cases for `w`, leaves the text alone otherwise.
pub fn apply_casing<'a>(value: &'a str, format: Option<&str>) -> Cow<'a, str> {
    match format {
        Some("u") => Cow::Owned(value.to_uppercase()),
        Some("w") => Cow::Owned(value.to_lowercase()),
        _ => Cow::Borrowed(value),
    }
}
