//! Type definitions for number and date formatting
//!
//! This module defines the values accepted by the formatters, the per-call option records,
//! the locale settings consulted while formatting, and the token stream produced by the
//! date pattern parser.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// Numeric payload of a [`NumberInput`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    /// An already numeric value
    Float(f64),
    /// A string that still has to be coerced to a number
    Text(String),
}

/// A value accepted by the number formatter: a bare number or a number carrying a unit
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawNumberInput")]
pub struct NumberInput {
    /// The numeric payload
    pub value: NumericValue,
    /// Unit appended after the formatted number, e.g. "MB" or "$"
    pub unit: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumberInput {
    Record {
        value: NumericValue,
        #[serde(default)]
        unit: Option<String>,
    },
    Bare(NumericValue),
}

impl From<RawNumberInput> for NumberInput {
    fn from(raw: RawNumberInput) -> Self {
        match raw {
            RawNumberInput::Record { value, unit } => Self { value, unit },
            RawNumberInput::Bare(value) => Self { value, unit: None },
        }
    }
}

impl NumberInput {
    /// Create an input carrying a unit suffix
    pub fn with_unit(value: impl Into<NumberInput>, unit: impl Into<String>) -> Self {
        Self {
            unit: Some(unit.into()),
            ..value.into()
        }
    }

    /// The unit to append, if any. Empty units count as absent.
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref().filter(|u| !u.is_empty())
    }
}

impl From<f64> for NumberInput {
    fn from(value: f64) -> Self {
        Self {
            value: NumericValue::Float(value),
            unit: None,
        }
    }
}

impl From<f32> for NumberInput {
    fn from(value: f32) -> Self {
        f64::from(value).into()
    }
}

macro_rules! number_input_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for NumberInput {
                fn from(value: $t) -> Self {
                    (value as f64).into()
                }
            }
        )*
    };
}

number_input_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<&str> for NumberInput {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

impl From<String> for NumberInput {
    fn from(value: String) -> Self {
        Self {
            value: NumericValue::Text(value),
            unit: None,
        }
    }
}

impl From<&NumberInput> for NumberInput {
    fn from(value: &NumberInput) -> Self {
        value.clone()
    }
}

/// A value accepted by the date formatter
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// Free-form or ISO-8601 text
    Text(String),
    /// Milliseconds since the Unix epoch
    Timestamp(i64),
    /// An already parsed date and time, taken as UTC wall time
    DateTime(NaiveDateTime),
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

impl From<i64> for DateInput {
    fn from(value: i64) -> Self {
        DateInput::Timestamp(value)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        DateInput::DateTime(value)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(value: DateTime<Utc>) -> Self {
        DateInput::DateTime(value.naive_utc())
    }
}

impl std::fmt::Display for DateInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateInput::Text(text) => write!(f, "{text:?}"),
            DateInput::Timestamp(ms) => write!(f, "{ms}"),
            DateInput::DateTime(dt) => write!(f, "{dt}"),
        }
    }
}

/// Per-call or per-formatter options for number formatting.
///
/// Every field is optional; unset fields are filled from lower-priority layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NumberOptions {
    /// Number of fractional digits
    pub scale: Option<u32>,
    /// Whether to append the input's unit
    pub unit: Option<bool>,
    /// Key into the locale table
    pub locale: Option<String>,
}

impl NumberOptions {
    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn unit(mut self, unit: bool) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// Per-call or per-formatter options for date formatting
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DateOptions {
    /// Pattern in the date pattern language, e.g. "L" or "MMMM Do YYYY"
    pub format: Option<String>,
    /// Key into the locale table
    pub locale: Option<String>,
}

impl DateOptions {
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// How ordinal numbers (`Do`, `Mo`) are written in a locale
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OrdinalRule {
    /// 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st ...
    #[default]
    English,
    /// A fixed suffix, with an optional special case for the number one (French "1er")
    Suffix { first: Option<String>, other: String },
}

impl OrdinalRule {
    /// Render `n` as an ordinal
    pub fn apply(&self, n: u32) -> String {
        match self {
            OrdinalRule::English => {
                let suffix = match (n % 10, n % 100) {
                    (_, 11..=13) => "th",
                    (1, _) => "st",
                    (2, _) => "nd",
                    (3, _) => "rd",
                    _ => "th",
                };
                format!("{n}{suffix}")
            }
            OrdinalRule::Suffix { first, other } => match first {
                Some(first) if n == 1 => format!("{n}{first}"),
                _ => format!("{n}{other}"),
            },
        }
    }
}

/// Named composite patterns of a locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongDateFormats {
    /// `LT`
    pub time: String,
    /// `LTS`
    pub time_with_seconds: String,
    /// `L`
    pub short_date: String,
    /// `LL`
    pub long_date: String,
    /// `LLL`
    pub long_date_time: String,
    /// `LLLL`
    pub full_date_time: String,
}

impl Default for LongDateFormats {
    fn default() -> Self {
        Self {
            time: "h:mm A".to_string(),
            time_with_seconds: "h:mm:ss A".to_string(),
            short_date: "MM/DD/YYYY".to_string(),
            long_date: "MMMM D, YYYY".to_string(),
            long_date_time: "MMMM D, YYYY h:mm A".to_string(),
            full_date_time: "dddd, MMMM D, YYYY h:mm A".to_string(),
        }
    }
}

impl LongDateFormats {
    /// Pattern text for a composite token. The lowercase forms abbreviate month and day names.
    pub fn pattern(&self, which: LongDateFormat) -> String {
        match which {
            LongDateFormat::Time => self.time.clone(),
            LongDateFormat::TimeWithSeconds => self.time_with_seconds.clone(),
            LongDateFormat::ShortDate => self.short_date.clone(),
            LongDateFormat::LongDate => self.long_date.clone(),
            LongDateFormat::LongDateTime => self.long_date_time.clone(),
            LongDateFormat::FullDateTime => self.full_date_time.clone(),
            LongDateFormat::ShortDateAbbr => abbreviate(&self.short_date),
            LongDateFormat::LongDateAbbr => abbreviate(&self.long_date),
            LongDateFormat::LongDateTimeAbbr => abbreviate(&self.long_date_time),
            LongDateFormat::FullDateTimeAbbr => abbreviate(&self.full_date_time),
        }
    }
}

/// Shorten `MMMM` to `MMM`, `dddd` to `ddd` and drop zero padding, leaving escaped text alone
fn abbreviate(pattern: &str) -> String {
    let mut result = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while !rest.is_empty() {
        if let Some(stripped) = rest.strip_prefix('[') {
            let end = stripped.find(']').map_or(stripped.len(), |i| i + 1);
            result.push('[');
            result.push_str(&stripped[..end]);
            rest = &stripped[end..];
        } else if let Some(stripped) = rest.strip_prefix("MMMM") {
            result.push_str("MMM");
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("dddd") {
            result.push_str("ddd");
            rest = stripped;
        } else if let Some(token) = ["MMM", "DDDD", "DDD"]
            .into_iter()
            .find(|token| rest.starts_with(token))
        {
            result.push_str(token);
            rest = &rest[token.len()..];
        } else if let Some(stripped) = rest.strip_prefix("MM") {
            result.push('M');
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("DD") {
            result.push('D');
            rest = stripped;
        } else {
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                result.push(c);
            }
            rest = chars.as_str();
        }
    }
    result
}

/// Locale-specific settings for number and date formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSettings {
    /// Separator inserted between groups of three integer digits
    pub thousands: String,
    /// Separator between the integer and fractional parts
    pub decimal: String,
    /// Full month names, January first
    pub month_names: [String; 12],
    /// Abbreviated month names
    pub short_month_names: [String; 12],
    /// Full weekday names, Sunday first
    pub day_names: [String; 7],
    /// Abbreviated weekday names
    pub short_day_names: [String; 7],
    /// Two-letter weekday names
    pub min_day_names: [String; 7],
    /// AM and PM markers
    pub meridiem: [String; 2],
    /// Ordinal number rule
    pub ordinal: OrdinalRule,
    /// Named composite date patterns
    pub long_date_formats: LongDateFormats,
}

fn strings<const N: usize>(values: [&str; N]) -> [String; N] {
    values.map(str::to_string)
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            thousands: ",".to_string(),
            decimal: ".".to_string(),
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
            short_month_names: strings([
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]),
            day_names: strings([
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]),
            short_day_names: strings(["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]),
            min_day_names: strings(["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]),
            meridiem: strings(["AM", "PM"]),
            ordinal: OrdinalRule::English,
            long_date_formats: LongDateFormats::default(),
        }
    }
}

impl LocaleSettings {
    pub fn with_separators(mut self, thousands: impl Into<String>, decimal: impl Into<String>) -> Self {
        self.thousands = thousands.into();
        self.decimal = decimal.into();
        self
    }

    pub fn with_month_names(mut self, names: [&str; 12]) -> Self {
        self.month_names = strings(names);
        self
    }

    pub fn with_short_month_names(mut self, names: [&str; 12]) -> Self {
        self.short_month_names = strings(names);
        self
    }

    pub fn with_day_names(mut self, names: [&str; 7]) -> Self {
        self.day_names = strings(names);
        self
    }

    pub fn with_short_day_names(mut self, names: [&str; 7]) -> Self {
        self.short_day_names = strings(names);
        self
    }

    pub fn with_meridiem(mut self, markers: [&str; 2]) -> Self {
        self.meridiem = strings(markers);
        self
    }

    pub fn with_ordinal(mut self, ordinal: OrdinalRule) -> Self {
        self.ordinal = ordinal;
        self
    }

    pub fn with_long_date_formats(mut self, formats: LongDateFormats) -> Self {
        self.long_date_formats = formats;
        self
    }
}

/// Named composite patterns (`LT`, `L`, `LL`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongDateFormat {
    /// LT
    Time,
    /// LTS
    TimeWithSeconds,
    /// L
    ShortDate,
    /// LL
    LongDate,
    /// LLL
    LongDateTime,
    /// LLLL
    FullDateTime,
    /// l
    ShortDateAbbr,
    /// ll
    LongDateAbbr,
    /// lll
    LongDateTimeAbbr,
    /// llll
    FullDateTimeAbbr,
}

/// Represents a single token parsed from a date pattern
#[derive(Debug, Clone, PartialEq)]
pub enum DateToken {
    /// Four-digit year (YYYY)
    YearFourDigit,
    /// Two-digit year (YY)
    YearTwoDigit,
    /// Quarter of the year, 1-4 (Q)
    Quarter,
    /// Month number, 1-12 (M)
    MonthNum,
    /// Zero-padded month number (MM)
    MonthNumPadded,
    /// Ordinal month number, e.g. 2nd (Mo)
    MonthOrdinal,
    /// Month abbreviation (MMM)
    MonthAbbr,
    /// Full month name (MMMM)
    MonthFullName,
    /// Day of month (D)
    DayNum,
    /// Zero-padded day of month (DD)
    DayNumPadded,
    /// Ordinal day of month (Do)
    DayOrdinal,
    /// Day of year, 1-366 (DDD)
    DayOfYear,
    /// Zero-padded day of year (DDDD)
    DayOfYearPadded,
    /// Day of week, Sunday is 0 (d)
    WeekdayNum,
    /// Two-letter weekday name (dd)
    WeekdayMin,
    /// Weekday abbreviation (ddd)
    WeekdayAbbr,
    /// Full weekday name (dddd)
    WeekdayFullName,
    /// Hour, 0-23 (H)
    Hour24,
    /// Zero-padded hour, 00-23 (HH)
    Hour24Padded,
    /// Hour, 1-12 (h)
    Hour12,
    /// Zero-padded hour, 01-12 (hh)
    Hour12Padded,
    /// Minute (m)
    MinuteNum,
    /// Zero-padded minute (mm)
    MinuteNumPadded,
    /// Second (s)
    SecondNum,
    /// Zero-padded second (ss)
    SecondNumPadded,
    /// Fractional seconds with the given number of digits (S, SS, SSS ...)
    FractionalSeconds(u8),
    /// Lowercase meridiem (a)
    MeridiemLower,
    /// Uppercase meridiem (A)
    MeridiemUpper,
    /// UTC offset with colon, +00:00 (Z)
    OffsetColon,
    /// UTC offset without colon, +0000 (ZZ)
    OffsetCompact,
    /// Unix timestamp in seconds (X)
    UnixSeconds,
    /// Unix timestamp in milliseconds (x)
    UnixMillis,
    /// Named composite pattern, expanded from the locale
    LongDate(LongDateFormat),
    /// Escaped text, like [Uhr]
    QuotedText(String),
    /// Literal character to display directly
    LiteralChar(char),
}
