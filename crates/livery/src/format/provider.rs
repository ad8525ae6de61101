//! Culture-sensitive formatting data.

use serde::{Deserialize, Serialize};

/// Locale data used when formatting numbers and timestamps.
///
/// The default is an invariant culture: `.` decimals, `,` grouping, English
/// month and day names. Deserializable so it can live in a sink configuration
/// file; every field is optional there and falls back to the invariant value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatProvider {
    pub name: String,
    pub decimal_separator: String,
    pub group_separator: String,
    pub percent_symbol: String,
    pub date_separator: String,
    pub time_separator: String,
    pub month_names: [String; 12],
    pub abbreviated_month_names: [String; 12],
    pub day_names: [String; 7],
    pub abbreviated_day_names: [String; 7],
    pub am_designator: String,
    pub pm_designator: String,
    pub short_date_pattern: String,
    pub long_date_pattern: String,
    pub short_time_pattern: String,
    pub long_time_pattern: String,
    /// Used for timestamps when the placeholder has no format.
    pub default_timestamp_pattern: String,
}

fn strings<const N: usize>(items: [&str; N]) -> [String; N] {
    items.map(str::to_string)
}

impl FormatProvider {
    pub fn invariant() -> Self {
        Self {
            name: "invariant".to_string(),
            decimal_separator: ".".to_string(),
            group_separator: ",".to_string(),
            percent_symbol: "%".to_string(),
            date_separator: "/".to_string(),
            time_separator: ":".to_string(),
            month_names: strings([
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]),
            abbreviated_month_names: strings([
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]),
            // Sunday first.
            day_names: strings([
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]),
            abbreviated_day_names: strings(["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]),
            am_designator: "AM".to_string(),
            pm_designator: "PM".to_string(),
            short_date_pattern: "MM/dd/yyyy".to_string(),
            long_date_pattern: "dddd, dd MMMM yyyy".to_string(),
            short_time_pattern: "HH:mm".to_string(),
            long_time_pattern: "HH:mm:ss".to_string(),
            default_timestamp_pattern: "yyyy-MM-dd HH:mm:ss.fff zzz".to_string(),
        }
    }
}

impl Default for FormatProvider {
    fn default() -> Self {
        Self::invariant()
    }
}
