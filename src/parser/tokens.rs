use winnow::combinator::{alt, delimited};
use winnow::token::{any, literal, take_till, take_while};
use winnow::{ModalResult, Parser};

use crate::types::*;

// Escaped text
pub fn parse_quoted_text(input: &mut &str) -> ModalResult<DateToken> {
    delimited('[', take_till(0.., ']'), ']')
        .map(|text: &str| DateToken::QuotedText(text.to_string()))
        .parse_next(input)
}

// Composite patterns, longest first
pub fn parse_long_date(input: &mut &str) -> ModalResult<DateToken> {
    alt((
        literal("LLLL").value(LongDateFormat::FullDateTime),
        literal("LLL").value(LongDateFormat::LongDateTime),
        literal("LTS").value(LongDateFormat::TimeWithSeconds),
        literal("LT").value(LongDateFormat::Time),
        literal("LL").value(LongDateFormat::LongDate),
        literal("L").value(LongDateFormat::ShortDate),
        literal("llll").value(LongDateFormat::FullDateTimeAbbr),
        literal("lll").value(LongDateFormat::LongDateTimeAbbr),
        literal("ll").value(LongDateFormat::LongDateAbbr),
        literal("l").value(LongDateFormat::ShortDateAbbr),
    ))
    .map(DateToken::LongDate)
    .parse_next(input)
}

// Year related parsers
pub fn parse_year(input: &mut &str) -> ModalResult<DateToken> {
    alt((
        literal("YYYY").value(DateToken::YearFourDigit),
        literal("YY").value(DateToken::YearTwoDigit),
    ))
    .parse_next(input)
}

pub fn parse_quarter(input: &mut &str) -> ModalResult<DateToken> {
    literal("Q").value(DateToken::Quarter).parse_next(input)
}

// Month related parsers
pub fn parse_month(input: &mut &str) -> ModalResult<DateToken> {
    alt((
        literal("MMMM").value(DateToken::MonthFullName),
        literal("MMM").value(DateToken::MonthAbbr),
        literal("Mo").value(DateToken::MonthOrdinal),
        literal("MM").value(DateToken::MonthNumPadded),
        literal("M").value(DateToken::MonthNum),
    ))
    .parse_next(input)
}

// Day related parsers
pub fn parse_day(input: &mut &str) -> ModalResult<DateToken> {
    alt((
        literal("DDDD").value(DateToken::DayOfYearPadded),
        literal("DDD").value(DateToken::DayOfYear),
        literal("Do").value(DateToken::DayOrdinal),
        literal("DD").value(DateToken::DayNumPadded),
        literal("D").value(DateToken::DayNum),
    ))
    .parse_next(input)
}

pub fn parse_weekday(input: &mut &str) -> ModalResult<DateToken> {
    alt((
        literal("dddd").value(DateToken::WeekdayFullName),
        literal("ddd").value(DateToken::WeekdayAbbr),
        literal("dd").value(DateToken::WeekdayMin),
        literal("d").value(DateToken::WeekdayNum),
    ))
    .parse_next(input)
}

// Time related parsers
pub fn parse_hour(input: &mut &str) -> ModalResult<DateToken> {
    alt((
        literal("HH").value(DateToken::Hour24Padded),
        literal("H").value(DateToken::Hour24),
        literal("hh").value(DateToken::Hour12Padded),
        literal("h").value(DateToken::Hour12),
    ))
    .parse_next(input)
}

pub fn parse_minute(input: &mut &str) -> ModalResult<DateToken> {
    alt((
        literal("mm").value(DateToken::MinuteNumPadded),
        literal("m").value(DateToken::MinuteNum),
    ))
    .parse_next(input)
}

pub fn parse_second(input: &mut &str) -> ModalResult<DateToken> {
    alt((
        literal("ss").value(DateToken::SecondNumPadded),
        literal("s").value(DateToken::SecondNum),
    ))
    .parse_next(input)
}

pub fn parse_fractional_seconds(input: &mut &str) -> ModalResult<DateToken> {
    take_while(1..=9, 'S')
        .map(|digits: &str| DateToken::FractionalSeconds(digits.len() as u8))
        .parse_next(input)
}

pub fn parse_meridiem(input: &mut &str) -> ModalResult<DateToken> {
    alt((
        literal("a").value(DateToken::MeridiemLower),
        literal("A").value(DateToken::MeridiemUpper),
    ))
    .parse_next(input)
}

pub fn parse_offset(input: &mut &str) -> ModalResult<DateToken> {
    alt((
        literal("ZZ").value(DateToken::OffsetCompact),
        literal("Z").value(DateToken::OffsetColon),
    ))
    .parse_next(input)
}

pub fn parse_unix(input: &mut &str) -> ModalResult<DateToken> {
    alt((
        literal("X").value(DateToken::UnixSeconds),
        literal("x").value(DateToken::UnixMillis),
    ))
    .parse_next(input)
}

pub fn parse_literal(input: &mut &str) -> ModalResult<DateToken> {
    any.map(DateToken::LiteralChar).parse_next(input)
}

/// Parse a single token from a date pattern
pub fn parse_date_token(input: &mut &str) -> ModalResult<DateToken> {
    alt((
        parse_quoted_text,
        parse_long_date,
        parse_year,
        parse_quarter,
        parse_month,
        parse_day,
        parse_weekday,
        parse_hour,
        parse_minute,
        parse_second,
        parse_fractional_seconds,
        parse_meridiem,
        parse_offset,
        parse_unix,
        parse_literal,
    ))
    .parse_next(input)
}
