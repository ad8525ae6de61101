//! Timestamp format strings.
//!
//! Single-letter formats are shorthands resolved through the provider
//! (`d`, `D`, `t`, `T`, `g`, `G`) or fixed layouts (`o`, `s`, `u`, `r`).
//! Longer formats are custom patterns built from runs of specifier letters:
//!
//! | Run | Output |
//! |-----|--------|
//! | `d`, `dd` | day of month, `dd` zero-padded |
//! | `ddd`, `dddd` | abbreviated / full day name |
//! | `f`..`fffffff` | fraction of a second, truncated to N digits |
//! | `F`..`FFFFFFF` | like `f`, trailing zeros removed |
//! | `h`, `hh`, `H`, `HH` | 12-hour / 24-hour clock |
//! | `m`, `mm`, `s`, `ss` | minutes, seconds |
//! | `M`, `MM`, `MMM`, `MMMM` | month number or name |
//! | `t`, `tt` | AM/PM designator (first letter / full) |
//! | `y`, `yy`, `yyy`.. | year |
//! | `z`, `zz`, `zzz`, `K` | UTC offset |
//!
//! `:` and `/` become the provider's separators, `'...'` and `"..."` are
//! literal, `\x` escapes a single character and a leading `%` lets a single
//! specifier be used as a custom pattern.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};

use super::FormatProvider;

/// Formats `timestamp`, using the provider's default pattern when `format` is absent.
pub fn format_timestamp(
    timestamp: &DateTime<FixedOffset>,
    format: Option<&str>,
    provider: &FormatProvider,
) -> String {
    let format = format
        .filter(|f| !f.is_empty())
        .unwrap_or(&provider.default_timestamp_pattern);

    let mut chars = format.chars();
    if let (Some(spec), None) = (chars.next(), chars.next()) {
        if let Some(out) = standard(timestamp, spec, provider) {
            return out;
        }
    }

    format_custom(timestamp, format, provider)
}

fn standard(
    timestamp: &DateTime<FixedOffset>,
    spec: char,
    provider: &FormatProvider,
) -> Option<String> {
    let utc = || timestamp.with_timezone(&Utc).fixed_offset();
    let out = match spec {
        'd' => format_custom(timestamp, &provider.short_date_pattern, provider),
        'D' => format_custom(timestamp, &provider.long_date_pattern, provider),
        't' => format_custom(timestamp, &provider.short_time_pattern, provider),
        'T' => format_custom(timestamp, &provider.long_time_pattern, provider),
        'g' => format!(
            "{} {}",
            format_custom(timestamp, &provider.short_date_pattern, provider),
            format_custom(timestamp, &provider.short_time_pattern, provider)
        ),
        'G' => format!(
            "{} {}",
            format_custom(timestamp, &provider.short_date_pattern, provider),
            format_custom(timestamp, &provider.long_time_pattern, provider)
        ),
        'o' | 'O' => format_invariant(timestamp, "yyyy'-'MM'-'dd'T'HH':'mm':'ss'.'fffffffzzz"),
        's' => format_invariant(timestamp, "yyyy'-'MM'-'dd'T'HH':'mm':'ss"),
        'u' => format_invariant(&utc(), "yyyy'-'MM'-'dd HH':'mm':'ss'Z'"),
        'r' | 'R' => format_invariant(&utc(), "ddd, dd MMM yyyy HH':'mm':'ss 'GMT'"),
        _ => return None,
    };
    Some(out)
}

fn format_invariant(timestamp: &DateTime<FixedOffset>, pattern: &str) -> String {
    format_custom(timestamp, pattern, &FormatProvider::invariant())
}

/// Expands a custom pattern.
pub fn format_custom(
    timestamp: &DateTime<FixedOffset>,
    pattern: &str,
    provider: &FormatProvider,
) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let run = chars[i..].iter().take_while(|&&c| c == ch).count();

        match ch {
            'd' => {
                match run {
                    1 => out.push_str(&timestamp.day().to_string()),
                    2 => push_padded(&mut out, timestamp.day(), 2),
                    3 => out.push_str(day_name(&provider.abbreviated_day_names, timestamp)),
                    _ => out.push_str(day_name(&provider.day_names, timestamp)),
                }
                i += run;
            }
            'f' | 'F' => {
                let digits = fraction_digits(timestamp);
                let mut fraction = &digits[..run.min(7)];
                if ch == 'F' {
                    fraction = fraction.trim_end_matches('0');
                    if fraction.is_empty() && out.ends_with('.') {
                        out.pop();
                    }
                }
                out.push_str(fraction);
                i += run;
            }
            'h' => {
                let hour = match timestamp.hour() % 12 {
                    0 => 12,
                    h => h,
                };
                push_number(&mut out, hour, run);
                i += run;
            }
            'H' => {
                push_number(&mut out, timestamp.hour(), run);
                i += run;
            }
            'm' => {
                push_number(&mut out, timestamp.minute(), run);
                i += run;
            }
            's' => {
                push_number(&mut out, timestamp.second().min(59), run);
                i += run;
            }
            'M' => {
                let index = timestamp.month0() as usize;
                match run {
                    1 => out.push_str(&timestamp.month().to_string()),
                    2 => push_padded(&mut out, timestamp.month(), 2),
                    3 => out.push_str(&provider.abbreviated_month_names[index]),
                    _ => out.push_str(&provider.month_names[index]),
                }
                i += run;
            }
            't' => {
                let designator = if timestamp.hour() < 12 {
                    &provider.am_designator
                } else {
                    &provider.pm_designator
                };
                if run == 1 {
                    out.extend(designator.chars().next());
                } else {
                    out.push_str(designator);
                }
                i += run;
            }
            'y' => {
                let year = timestamp.year();
                match run {
                    1 => out.push_str(&year.rem_euclid(100).to_string()),
                    2 => push_padded(&mut out, year.rem_euclid(100) as u32, 2),
                    n => push_padded(&mut out, year.unsigned_abs(), n),
                }
                i += run;
            }
            'z' => {
                push_offset(&mut out, timestamp, run.min(3));
                i += run;
            }
            'K' => {
                push_offset(&mut out, timestamp, 3);
                i += 1;
            }
            ':' => {
                out.push_str(&provider.time_separator);
                i += 1;
            }
            '/' => {
                out.push_str(&provider.date_separator);
                i += 1;
            }
            '\'' | '"' => {
                let close = chars[i + 1..].iter().position(|&c| c == ch);
                match close {
                    Some(len) => {
                        out.extend(&chars[i + 1..i + 1 + len]);
                        i += len + 2;
                    }
                    None => {
                        out.extend(&chars[i + 1..]);
                        i = chars.len();
                    }
                }
            }
            '\\' => {
                if let Some(&next) = chars.get(i + 1) {
                    out.push(next);
                }
                i += 2;
            }
            '%' => i += 1,
            other => {
                out.push(other);
                i += 1;
            }
        }
    }

    out
}

fn day_name<'a>(names: &'a [String; 7], timestamp: &DateTime<FixedOffset>) -> &'a str {
    &names[timestamp.weekday().num_days_from_sunday() as usize]
}

/// Seven digits of sub-second precision.
fn fraction_digits(timestamp: &DateTime<FixedOffset>) -> String {
    // Leap seconds report nanoseconds above one second.
    let nanos = timestamp.nanosecond() % 1_000_000_000;
    format!("{:07}", nanos / 100)
}

fn push_number(out: &mut String, value: u32, run: usize) {
    if run == 1 {
        out.push_str(&value.to_string());
    } else {
        push_padded(out, value, 2);
    }
}

fn push_padded(out: &mut String, value: u32, width: usize) {
    out.push_str(&format!("{value:0width$}"));
}

fn push_offset(out: &mut String, timestamp: &DateTime<FixedOffset>, run: usize) {
    let seconds = timestamp.offset().local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs() / 60;
    let (hours, minutes) = (minutes / 60, minutes % 60);
    out.push(sign);
    match run {
        1 => out.push_str(&hours.to_string()),
        2 => push_padded(out, hours, 2),
        _ => out.push_str(&format!("{hours:02}:{minutes:02}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 5, 14, 7, 9)
            .unwrap()
            + chrono::Duration::microseconds(123_450)
    }

    fn fmt(format: &str) -> String {
        format_timestamp(&sample(), Some(format), &FormatProvider::invariant())
    }

    #[test]
    fn test_default_pattern() {
        assert_eq!(
            format_timestamp(&sample(), None, &FormatProvider::invariant()),
            "2024-03-05 14:07:09.123 +02:00"
        );
    }

    #[test]
    fn test_clock_specifiers() {
        assert_eq!(fmt("HH:mm:ss"), "14:07:09");
        assert_eq!(fmt("h:m:s tt"), "2:7:9 PM");
        assert_eq!(fmt("hh t"), "02 P");
    }

    #[test]
    fn test_date_specifiers() {
        assert_eq!(fmt("yyyy-MM-dd"), "2024-03-05");
        assert_eq!(fmt("ddd d MMM yy"), "Tue 5 Mar 24");
        assert_eq!(fmt("dddd, MMMM"), "Tuesday, March");
    }

    #[test]
    fn test_two_digit_year_before_common_era() {
        let ancient = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(-5, 6, 1, 0, 0, 0)
            .unwrap();
        let provider = FormatProvider::invariant();
        assert_eq!(format_timestamp(&ancient, Some("yy"), &provider), "95");
        assert_eq!(format_timestamp(&ancient, Some("%y"), &provider), "95");
        assert_eq!(format_timestamp(&ancient, Some("yyyy"), &provider), "0005");
    }

    #[test]
    fn test_fraction_specifiers() {
        assert_eq!(fmt("ss.ffff"), "09.1234");
        assert_eq!(fmt("ss.FFFFFFF"), "09.12345");
        let whole = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 1)
            .unwrap();
        assert_eq!(
            format_timestamp(&whole, Some("ss.FFF"), &FormatProvider::invariant()),
            "01"
        );
    }

    #[test]
    fn test_offsets() {
        assert_eq!(fmt("z"), "+2");
        assert_eq!(fmt("zz"), "+02");
        assert_eq!(fmt("zzz"), "+02:00");
        assert_eq!(fmt("K"), "+02:00");
    }

    #[test]
    fn test_standard_formats() {
        assert_eq!(fmt("s"), "2024-03-05T14:07:09");
        assert_eq!(fmt("u"), "2024-03-05 12:07:09Z");
        assert_eq!(fmt("o"), "2024-03-05T14:07:09.1234500+02:00");
        assert_eq!(fmt("d"), "03/05/2024");
        assert_eq!(fmt("T"), "14:07:09");
    }

    #[test]
    fn test_literals_and_escapes() {
        assert_eq!(fmt("'at' HH\\h"), "at 14h");
        assert_eq!(fmt("%d"), "5");
    }

    #[test]
    fn test_provider_separators() {
        let mut provider = FormatProvider::invariant();
        provider.date_separator = ".".to_string();
        provider.time_separator = "-".to_string();
        assert_eq!(
            format_timestamp(&sample(), Some("dd/MM HH:mm"), &provider),
            "05.03 14-07"
        );
    }
}
