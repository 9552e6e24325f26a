//! ISO-8601 input parsing
//!
//! Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD` and `YYYYMMDD`, optionally followed by a time
//! (`T` or a space, then `HH[:mm[:ss[.fff]]]`) and a UTC offset (`Z`, `±HH:mm`, `±HHmm`, `±HH`).

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use winnow::combinator::{alt, eof, opt, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::token::{one_of, take_while};
use winnow::{ModalResult, Parser};

/// Components of an ISO-8601 date, not yet checked against the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IsoDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub nanosecond: u32,
    /// Offset east of UTC in seconds, when the input carried one
    pub offset_seconds: Option<i32>,
}

impl IsoDateTime {
    /// The instant as UTC wall time, or `None` if the components are not a valid date
    pub fn to_naive_utc(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day)?;
        let time =
            NaiveTime::from_hms_nano_opt(self.hour, self.minute, self.second, self.nanosecond)?;
        let local = NaiveDateTime::new(date, time);
        match self.offset_seconds {
            Some(offset) => local.checked_sub_signed(Duration::seconds(i64::from(offset))),
            None => Some(local),
        }
    }
}

fn digits<'s>(count: usize) -> impl Parser<&'s str, u32, ErrMode<ContextError>> {
    take_while(count, |c: char| c.is_ascii_digit()).try_map(str::parse::<u32>)
}

fn date_part(input: &mut &str) -> ModalResult<(i32, u32, u32)> {
    let year = digits(4).parse_next(input)? as i32;

    if opt('-').parse_next(input)?.is_some() {
        let month = digits(2).parse_next(input)?;
        let day = opt(preceded('-', digits(2))).parse_next(input)?;
        return Ok((year, month, day.unwrap_or(1)));
    }

    let basic = opt((digits(2), digits(2))).parse_next(input)?;
    Ok(match basic {
        Some((month, day)) => (year, month, day),
        None => (year, 1, 1),
    })
}

fn fraction_to_nanos(fraction: &str) -> u32 {
    fraction
        .chars()
        .chain(std::iter::repeat('0'))
        .take(9)
        .fold(0, |nanos, c| nanos * 10 + c.to_digit(10).unwrap_or(0))
}

fn time_part(input: &mut &str) -> ModalResult<(u32, u32, u32, u32)> {
    one_of(['T', 't', ' ']).parse_next(input)?;
    let hour = digits(2).parse_next(input)?;
    let minute = opt(preceded(':', digits(2))).parse_next(input)?;
    let Some(minute) = minute else {
        return Ok((hour, 0, 0, 0));
    };
    let second = opt(preceded(':', digits(2))).parse_next(input)?;
    let Some(second) = second else {
        return Ok((hour, minute, 0, 0));
    };
    let fraction = opt(preceded(
        one_of(['.', ',']),
        take_while(1..=9, |c: char| c.is_ascii_digit()),
    ))
    .parse_next(input)?;
    Ok((hour, minute, second, fraction.map_or(0, fraction_to_nanos)))
}

fn offset_part(input: &mut &str) -> ModalResult<i32> {
    alt((
        one_of(['Z', 'z']).value(0),
        (
            one_of(['+', '-']),
            digits(2),
            opt(preceded(opt(':'), digits(2))),
        )
            .map(|(sign, hours, minutes)| {
                let seconds = (hours * 3600 + minutes.unwrap_or(0) * 60) as i32;
                if sign == '-' { -seconds } else { seconds }
            }),
    ))
    .parse_next(input)
}

fn iso8601(input: &mut &str) -> ModalResult<IsoDateTime> {
    let (year, month, day) = date_part(input)?;
    let time = opt((time_part, opt(offset_part))).parse_next(input)?;
    eof.parse_next(input)?;

    let mut parsed = IsoDateTime {
        year,
        month,
        day,
        ..IsoDateTime::default()
    };
    if let Some(((hour, minute, second, nanosecond), offset)) = time {
        parsed.hour = hour;
        parsed.minute = minute;
        parsed.second = second;
        parsed.nanosecond = nanosecond;
        parsed.offset_seconds = offset;
    }
    Ok(parsed)
}

/// Parse ISO-8601 text. Returns `None` when the text is not in an ISO-8601 shape;
/// the components are checked against the calendar by [`IsoDateTime::to_naive_utc`].
pub fn parse_iso8601(input: &str) -> Option<IsoDateTime> {
    iso8601.parse(input.trim()).ok()
}
