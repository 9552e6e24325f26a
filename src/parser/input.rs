//! Parsing of free-form date text against a locale's patterns
//!
//! Matching is forgiving: names are compared case-insensitively, full and abbreviated month
//! names are both accepted, whitespace in the pattern matches any run of whitespace, and
//! punctuation in the pattern may be missing from the input.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use winnow::combinator::{alt, opt, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::token::{one_of, take_while};
use winnow::{ModalResult, Parser};

use crate::types::{DateToken, LocaleSettings};

/// Date and time fields collected while matching a pattern
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFields {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub day_of_year: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    pub nanosecond: Option<u32>,
    pub pm: Option<bool>,
    pub offset_seconds: Option<i32>,
    pub timestamp_millis: Option<i64>,
}

impl ParsedFields {
    /// Build the instant as UTC wall time. Missing fields default to January, the 1st and
    /// midnight; a missing year becomes `default_year`.
    pub fn to_naive_utc(&self, default_year: i32) -> Option<NaiveDateTime> {
        if let Some(millis) = self.timestamp_millis {
            return DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc());
        }

        let year = self.year.unwrap_or(default_year);
        let date = match (self.day_of_year, self.month, self.day) {
            (Some(ordinal), None, None) => NaiveDate::from_yo_opt(year, ordinal)?,
            (_, month, day) => NaiveDate::from_ymd_opt(year, month.unwrap_or(1), day.unwrap_or(1))?,
        };

        let mut hour = self.hour.unwrap_or(0);
        match self.pm {
            Some(true) if hour < 12 => hour += 12,
            Some(false) if hour == 12 => hour = 0,
            _ => {}
        }
        let time = NaiveTime::from_hms_nano_opt(
            hour,
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
            self.nanosecond.unwrap_or(0),
        )?;

        let local = NaiveDateTime::new(date, time);
        match self.offset_seconds {
            Some(offset) => local.checked_sub_signed(Duration::seconds(i64::from(offset))),
            None => Some(local),
        }
    }
}

fn number<'s>(min: usize, max: usize) -> impl Parser<&'s str, u32, ErrMode<ContextError>> {
    take_while(min..=max, |c: char| c.is_ascii_digit()).try_map(str::parse::<u32>)
}

fn signed_integer(input: &mut &str) -> ModalResult<i64> {
    (opt(one_of(['+', '-'])), take_while(1.., |c: char| c.is_ascii_digit()))
        .take()
        .try_map(str::parse::<i64>)
        .parse_next(input)
}

fn unix_seconds(input: &mut &str) -> ModalResult<i64> {
    (
        signed_integer,
        opt(preceded('.', take_while(1..=3, |c: char| c.is_ascii_digit()))),
    )
        .verify_map(|(seconds, fraction): (i64, Option<&str>)| {
            let millis = fraction.map_or(0, |f| {
                f.chars()
                    .chain(std::iter::repeat('0'))
                    .take(3)
                    .fold(0, |ms, c| ms * 10 + i64::from(c.to_digit(10).unwrap_or(0)))
            });
            let whole = seconds.checked_mul(1000)?;
            if seconds < 0 {
                whole.checked_sub(millis)
            } else {
                whole.checked_add(millis)
            }
        })
        .parse_next(input)
}

fn utc_offset(input: &mut &str) -> ModalResult<i32> {
    alt((
        one_of(['Z', 'z']).value(0),
        (one_of(['+', '-']), number(2, 2), opt(':'), number(2, 2)).map(
            |(sign, hours, _, minutes)| {
                let seconds = (hours * 3600 + minutes * 60) as i32;
                if sign == '-' { -seconds } else { seconds }
            },
        ),
    ))
    .parse_next(input)
}

fn skip_whitespace(input: &mut &str) {
    *input = input.trim_start();
}

/// Strip `prefix` from `input` comparing characters case-insensitively
fn strip_prefix_ignore_case<'s>(input: &'s str, prefix: &str) -> Option<&'s str> {
    let mut rest = input.chars();
    for expected in prefix.chars() {
        let actual = rest.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(rest.as_str())
}

/// Match the longest of the given names; returns its index and the remaining input
fn match_name<'s, 'n>(
    input: &'s str,
    candidates: impl IntoIterator<Item = (usize, &'n str)>,
) -> Option<(usize, &'s str)> {
    candidates
        .into_iter()
        .filter(|(_, name)| !name.is_empty())
        .filter_map(|(index, name)| {
            strip_prefix_ignore_case(input, name).map(|rest| (index, name.chars().count(), rest))
        })
        .max_by_key(|(_, len, _)| *len)
        .map(|(index, _, rest)| (index, rest))
}

fn month_names(locale: &LocaleSettings) -> impl Iterator<Item = (usize, &str)> {
    let full = locale.month_names.iter().map(String::as_str).enumerate();
    let short = locale.short_month_names.iter().map(String::as_str).enumerate();
    let undotted = locale
        .short_month_names
        .iter()
        .map(|name| name.trim_end_matches('.'))
        .enumerate();
    full.chain(short).chain(undotted)
}

fn day_names(locale: &LocaleSettings) -> impl Iterator<Item = (usize, &str)> {
    let full = locale.day_names.iter().map(String::as_str).enumerate();
    let short = locale.short_day_names.iter().map(String::as_str).enumerate();
    let undotted = locale
        .short_day_names
        .iter()
        .map(|name| name.trim_end_matches('.'))
        .enumerate();
    let min = locale.min_day_names.iter().map(String::as_str).enumerate();
    full.chain(short).chain(undotted).chain(min)
}

fn run<'s, O>(
    mut parser: impl Parser<&'s str, O, ErrMode<ContextError>>,
    input: &mut &'s str,
) -> Option<O> {
    parser.parse_next(input).ok()
}

/// Match `input` against a token sequence, returning the collected fields when the whole
/// input is consumed.
///
/// # Arguments
/// * `input` - Free-form date text such as "25. Februar 2014"
/// * `tokens` - Expanded pattern tokens (see [`crate::parser::parse_date_pattern`])
/// * `locale` - Locale providing month, day and meridiem names
pub fn parse_with_pattern(
    input: &str,
    tokens: &[DateToken],
    locale: &LocaleSettings,
) -> Option<ParsedFields> {
    let mut fields = ParsedFields::default();
    let mut rest = input.trim();

    for token in tokens {
        match token {
            DateToken::LiteralChar(c) if c.is_whitespace() => skip_whitespace(&mut rest),
            DateToken::LiteralChar(c) => {
                let mut buf = [0; 4];
                match strip_prefix_ignore_case(rest, c.encode_utf8(&mut buf)) {
                    Some(stripped) => rest = stripped,
                    None if c.is_alphanumeric() => return None,
                    // Punctuation is optional
                    None => {}
                }
            }
            DateToken::QuotedText(text) => {
                skip_whitespace(&mut rest);
                rest = strip_prefix_ignore_case(rest, text.trim())?;
            }
            DateToken::YearFourDigit => {
                let digits = run(take_while(1..=4, |c: char| c.is_ascii_digit()), &mut rest)?;
                let year = digits.parse::<i32>().ok()?;
                fields.year = Some(if digits.len() == 2 { two_digit_year(year) } else { year });
            }
            DateToken::YearTwoDigit => {
                let year = run(number(2, 2), &mut rest)? as i32;
                fields.year = Some(two_digit_year(year));
            }
            DateToken::Quarter => {
                let quarter = run(number(1, 1), &mut rest)?;
                if !(1..=4).contains(&quarter) {
                    return None;
                }
                if fields.month.is_none() {
                    fields.month = Some((quarter - 1) * 3 + 1);
                }
            }
            DateToken::MonthNum | DateToken::MonthNumPadded => {
                fields.month = Some(run(number(1, 2), &mut rest)?);
            }
            DateToken::MonthOrdinal => {
                fields.month = Some(run(number(1, 2), &mut rest)?);
                skip_ordinal_suffix(&mut rest);
            }
            DateToken::MonthAbbr | DateToken::MonthFullName => {
                let (index, stripped) = match_name(rest, month_names(locale))?;
                fields.month = Some(index as u32 + 1);
                rest = stripped;
            }
            DateToken::DayNum | DateToken::DayNumPadded => {
                fields.day = Some(run(number(1, 2), &mut rest)?);
            }
            DateToken::DayOrdinal => {
                fields.day = Some(run(number(1, 2), &mut rest)?);
                skip_ordinal_suffix(&mut rest);
            }
            DateToken::DayOfYear | DateToken::DayOfYearPadded => {
                fields.day_of_year = Some(run(number(1, 3), &mut rest)?);
            }
            DateToken::WeekdayNum => {
                run(number(1, 1), &mut rest)?;
            }
            DateToken::WeekdayMin | DateToken::WeekdayAbbr | DateToken::WeekdayFullName => {
                let (_, stripped) = match_name(rest, day_names(locale))?;
                rest = stripped;
            }
            DateToken::Hour24
            | DateToken::Hour24Padded
            | DateToken::Hour12
            | DateToken::Hour12Padded => {
                fields.hour = Some(run(number(1, 2), &mut rest)?);
            }
            DateToken::MinuteNum | DateToken::MinuteNumPadded => {
                fields.minute = Some(run(number(1, 2), &mut rest)?);
            }
            DateToken::SecondNum | DateToken::SecondNumPadded => {
                fields.second = Some(run(number(1, 2), &mut rest)?);
            }
            DateToken::FractionalSeconds(_) => {
                let digits = run(take_while(1..=9, |c: char| c.is_ascii_digit()), &mut rest)?;
                let nanos = digits
                    .chars()
                    .chain(std::iter::repeat('0'))
                    .take(9)
                    .fold(0, |nanos, c| nanos * 10 + c.to_digit(10).unwrap_or(0));
                fields.nanosecond = Some(nanos);
            }
            DateToken::MeridiemLower | DateToken::MeridiemUpper => {
                let markers = locale.meridiem.iter().map(String::as_str).enumerate();
                let (index, stripped) = match_name(rest, markers)?;
                fields.pm = Some(index == 1);
                rest = stripped;
            }
            DateToken::OffsetColon | DateToken::OffsetCompact => {
                fields.offset_seconds = Some(run(utc_offset, &mut rest)?);
            }
            DateToken::UnixSeconds => {
                fields.timestamp_millis = Some(run(unix_seconds, &mut rest)?);
            }
            DateToken::UnixMillis => {
                fields.timestamp_millis = Some(run(signed_integer, &mut rest)?);
            }
            // Composite tokens are expanded before matching
            DateToken::LongDate(_) => return None,
        }
    }

    rest.trim().is_empty().then_some(fields)
}

fn two_digit_year(year: i32) -> i32 {
    if year > 68 { 1900 + year } else { 2000 + year }
}

fn skip_ordinal_suffix(input: &mut &str) {
    *input = input.trim_start_matches(|c: char| c.is_alphabetic() || c == '.' || c == 'º');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocaleTable;
    use crate::parser::parse_date_pattern;

    fn parse(input: &str, pattern: &str, locale_id: &str) -> Option<NaiveDateTime> {
        let table = LocaleTable::builtin();
        let locale = table.get(locale_id).unwrap();
        let tokens = parse_date_pattern(pattern, locale).unwrap();
        parse_with_pattern(input, &tokens, locale).and_then(|fields| fields.to_naive_utc(2000))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_german_long_date() {
        assert_eq!(parse("25. Februar 2014", "LL", "de"), Some(date(2014, 2, 25)));
        assert_eq!(parse("25. februar 2014", "LL", "de"), Some(date(2014, 2, 25)));
        assert_eq!(parse("25. Feb. 2014", "LL", "de"), Some(date(2014, 2, 25)));
        assert_eq!(parse("25. Feb 2014", "LL", "de"), Some(date(2014, 2, 25)));
        assert_eq!(parse("25 Februar 2014", "LL", "de"), Some(date(2014, 2, 25)));
    }

    #[test]
    fn test_english_long_date() {
        assert_eq!(parse("February 25, 2014", "LL", "en"), Some(date(2014, 2, 25)));
        assert_eq!(parse("Feb 25 2014", "LL", "en"), Some(date(2014, 2, 25)));
        assert_eq!(parse("Februar 25, 2014", "LL", "en"), None);
    }

    #[test]
    fn test_short_dates() {
        assert_eq!(parse("03.05.2012", "L", "de"), Some(date(2012, 5, 3)));
        assert_eq!(parse("05/03/2012", "L", "en"), Some(date(2012, 5, 3)));
        assert_eq!(parse("3 de mayo de 2012", "LL", "es"), Some(date(2012, 5, 3)));
        assert_eq!(parse("25.02.14", "L", "de"), Some(date(2014, 2, 25)));
        assert_eq!(parse("25.02.99", "L", "de"), Some(date(1999, 2, 25)));
        assert_eq!(parse("25.02.014", "L", "de"), Some(date(14, 2, 25)));
    }

    #[test]
    fn test_time_with_meridiem() {
        let parsed = parse("February 25, 2014 8:40 PM", "LLL", "en").unwrap();
        assert_eq!(parsed, date(2014, 2, 25) + Duration::minutes(20 * 60 + 40));

        let parsed = parse("February 25, 2014 12:05 am", "LLL", "en").unwrap();
        assert_eq!(parsed, date(2014, 2, 25) + Duration::minutes(5));
    }

    #[test]
    fn test_weekday_is_accepted_and_ignored() {
        assert_eq!(
            parse("Dienstag, 25. Februar 2014 08:40", "LLLL", "de"),
            Some(date(2014, 2, 25) + Duration::minutes(8 * 60 + 40))
        );
    }

    #[test]
    fn test_ordinals_and_two_digit_years() {
        assert_eq!(parse("February 25th 14", "MMMM Do YY", "en"), Some(date(2014, 2, 25)));
        assert_eq!(parse("1er mars 99", "Do MMMM YY", "fr"), Some(date(1999, 3, 1)));
    }

    #[test]
    fn test_missing_year_uses_default() {
        assert_eq!(parse("25.02.", "DD.MM.", "de"), Some(date(2000, 2, 25)));
    }

    #[test]
    fn test_rejects_trailing_garbage_and_invalid_dates() {
        assert_eq!(parse("25. Februar 2014 foo", "LL", "de"), None);
        assert_eq!(parse("31.02.2014", "L", "de"), None);
        assert_eq!(parse("not-a-date", "L", "en"), None);
    }

    #[test]
    fn test_unix_timestamps() {
        let expected = DateTime::from_timestamp_millis(1_393_314_010_759)
            .unwrap()
            .naive_utc();
        assert_eq!(parse("1393314010.759", "X", "en"), Some(expected));
        assert_eq!(parse("1393314010759", "x", "en"), Some(expected));
    }

    #[test]
    fn test_unix_timestamp_overflow() {
        assert_eq!(parse("99999999999999999", "X", "en"), None);
        assert_eq!(parse("-9223372036854775.809", "X", "en"), None);
        assert_eq!(parse("99999999999999999999", "x", "en"), None);
    }
}
