//! Locale-aware formatting of numbers and timestamps.
//!
//! All formatting goes through a [`FormatProvider`], which carries the
//! separators, names and default patterns of one culture.

mod casing;
mod datetime;
mod number;
mod provider;

pub use casing::apply_casing;
pub use datetime::{format_custom, format_timestamp};
pub use number::{format_float, format_integer};
pub use provider::FormatProvider;
