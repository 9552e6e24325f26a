//! Rendering of parsed pattern tokens against a locale

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::parser::parse_date_pattern;
use crate::types::{DateToken, LocaleSettings};

/// Render a datetime, taken as UTC wall time, from already tokenized pattern pieces
pub fn render_tokens(dt: &NaiveDateTime, tokens: &[DateToken], locale: &LocaleSettings) -> String {
    let mut result = String::new();

    for token in tokens {
        match token {
            DateToken::YearFourDigit => result.push_str(&format!("{:04}", dt.year())),
            DateToken::YearTwoDigit => {
                result.push_str(&format!("{:02}", dt.year().rem_euclid(100)))
            }
            DateToken::Quarter => result.push_str(&(dt.month0() / 3 + 1).to_string()),
            DateToken::MonthNum => result.push_str(&dt.month().to_string()),
            DateToken::MonthNumPadded => result.push_str(&format!("{:02}", dt.month())),
            DateToken::MonthOrdinal => result.push_str(&locale.ordinal.apply(dt.month())),
            DateToken::MonthAbbr => {
                result.push_str(&locale.short_month_names[dt.month0() as usize])
            }
            DateToken::MonthFullName => result.push_str(&locale.month_names[dt.month0() as usize]),
            DateToken::DayNum => result.push_str(&dt.day().to_string()),
            DateToken::DayNumPadded => result.push_str(&format!("{:02}", dt.day())),
            DateToken::DayOrdinal => result.push_str(&locale.ordinal.apply(dt.day())),
            DateToken::DayOfYear => result.push_str(&dt.ordinal().to_string()),
            DateToken::DayOfYearPadded => result.push_str(&format!("{:03}", dt.ordinal())),
            DateToken::WeekdayNum => {
                result.push_str(&dt.weekday().num_days_from_sunday().to_string())
            }
            DateToken::WeekdayMin => result.push_str(&locale.min_day_names[weekday(dt)]),
            DateToken::WeekdayAbbr => result.push_str(&locale.short_day_names[weekday(dt)]),
            DateToken::WeekdayFullName => result.push_str(&locale.day_names[weekday(dt)]),
            DateToken::Hour24 => result.push_str(&dt.hour().to_string()),
            DateToken::Hour24Padded => result.push_str(&format!("{:02}", dt.hour())),
            DateToken::Hour12 => result.push_str(&hour12(dt).to_string()),
            DateToken::Hour12Padded => result.push_str(&format!("{:02}", hour12(dt))),
            DateToken::MinuteNum => result.push_str(&dt.minute().to_string()),
            DateToken::MinuteNumPadded => result.push_str(&format!("{:02}", dt.minute())),
            DateToken::SecondNum => result.push_str(&dt.second().to_string()),
            DateToken::SecondNumPadded => result.push_str(&format!("{:02}", dt.second())),
            DateToken::FractionalSeconds(digits) => {
                result.push_str(&format_fractional_seconds(dt, *digits))
            }
            DateToken::MeridiemUpper => result.push_str(meridiem(dt, locale)),
            DateToken::MeridiemLower => result.push_str(&meridiem(dt, locale).to_lowercase()),
            DateToken::OffsetColon => result.push_str("+00:00"),
            DateToken::OffsetCompact => result.push_str("+0000"),
            DateToken::UnixSeconds => {
                result.push_str(&dt.and_utc().timestamp().to_string())
            }
            DateToken::UnixMillis => {
                result.push_str(&dt.and_utc().timestamp_millis().to_string())
            }
            DateToken::LongDate(which) => {
                // Normally expanded by the pattern parser already
                let pattern = locale.long_date_formats.pattern(*which);
                if let Ok(inner) = parse_date_pattern(&pattern, locale) {
                    result.push_str(&render_tokens(dt, &inner, locale));
                }
            }
            DateToken::QuotedText(text) => result.push_str(text),
            DateToken::LiteralChar(c) => result.push(*c),
        }
    }

    result
}

fn weekday(dt: &NaiveDateTime) -> usize {
    dt.weekday().num_days_from_sunday() as usize
}

fn hour12(dt: &NaiveDateTime) -> u32 {
    match dt.hour() % 12 {
        0 => 12,
        h => h,
    }
}

fn meridiem<'l>(dt: &NaiveDateTime, locale: &'l LocaleSettings) -> &'l str {
    if dt.hour() < 12 {
        &locale.meridiem[0]
    } else {
        &locale.meridiem[1]
    }
}

/// Truncate (not round) the sub-second part to `digits` places
fn format_fractional_seconds(dt: &NaiveDateTime, digits: u8) -> String {
    let digits = u32::from(digits.clamp(1, 9));
    // Leap seconds are stored as nanoseconds past 1_000_000_000
    let nanos = dt.nanosecond() % 1_000_000_000;
    let value = nanos / 10u32.pow(9 - digits);
    format!("{:0width$}", value, width = digits as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn render(pattern: &str, dt: &NaiveDateTime) -> String {
        let locale = LocaleSettings::default();
        render_tokens(dt, &parse_date_pattern(pattern, &locale).unwrap(), &locale)
    }

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2010, 2, 14)
            .unwrap()
            .and_hms_milli_opt(15, 25, 50, 125)
            .unwrap()
    }

    #[test]
    fn test_numeric_tokens() {
        let dt = sample();
        assert_eq!(render("YYYY YY Q", &dt), "2010 10 1");
        assert_eq!(render("M MM D DD", &dt), "2 02 14 14");
        assert_eq!(render("DDD DDDD", &dt), "45 045");
        assert_eq!(render("H HH h hh m mm s ss", &dt), "15 15 3 03 25 25 50 50");
        assert_eq!(render("S SS SSS SSSS", &dt), "1 12 125 1250");
    }

    #[test]
    fn test_name_tokens() {
        let dt = sample();
        assert_eq!(render("MMMM MMM", &dt), "February Feb");
        assert_eq!(render("dddd ddd dd d", &dt), "Sunday Sun Su 0");
        assert_eq!(render("Do Mo", &dt), "14th 2nd");
        assert_eq!(render("a A", &dt), "pm PM");
    }

    #[test]
    fn test_moment_example() {
        assert_eq!(
            render("dddd, MMMM Do YYYY, h:mm:ss a", &sample()),
            "Sunday, February 14th 2010, 3:25:50 pm"
        );
    }

    #[test]
    fn test_midnight_and_noon_in_twelve_hour_clock() {
        let midnight = NaiveDate::from_ymd_opt(2012, 5, 3)
            .unwrap()
            .and_hms_opt(0, 5, 0)
            .unwrap();
        let noon = midnight.with_hour(12).unwrap();
        assert_eq!(render("h:mm A", &midnight), "12:05 AM");
        assert_eq!(render("h:mm A", &noon), "12:05 PM");
    }

    #[test]
    fn test_offset_and_unix_tokens() {
        let dt = NaiveDate::from_ymd_opt(2012, 5, 3)
            .unwrap()
            .and_hms_opt(0, 0, 1)
            .unwrap();
        assert_eq!(render("Z ZZ", &dt), "+00:00 +0000");
        assert_eq!(render("X", &dt), "1336003201");
        assert_eq!(render("x", &dt), "1336003201000");
    }

    #[test]
    fn test_escaped_and_literal_text() {
        assert_eq!(render("[Year] YYYY!", &sample()), "Year 2010!");
        assert_eq!(render("[Q]Q", &sample()), "Q1");
    }

    #[test]
    fn test_composite_patterns() {
        let dt = sample();
        assert_eq!(render("L", &dt), "02/14/2010");
        assert_eq!(render("LL", &dt), "February 14, 2010");
        assert_eq!(render("LLL", &dt), "February 14, 2010 3:25 PM");
        assert_eq!(render("LLLL", &dt), "Sunday, February 14, 2010 3:25 PM");
        assert_eq!(render("l", &dt), "2/14/2010");
        assert_eq!(render("llll", &dt), "Sun, Feb 14, 2010 3:25 PM");
        assert_eq!(render("LTS", &dt), "3:25:50 PM");
    }

    #[test]
    fn test_unexpanded_composite_token() {
        let locale = LocaleSettings::default();
        let tokens = [DateToken::LongDate(crate::types::LongDateFormat::ShortDate)];
        assert_eq!(render_tokens(&sample(), &tokens, &locale), "02/14/2010");
    }
}
