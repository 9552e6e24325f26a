//! Date parsing and rendering backends

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};

use super::render::render_tokens;
use crate::error::{FormatError, Result};
use crate::parser::{parse_date_pattern, parse_iso8601, parse_with_pattern};
use crate::types::{DateInput, LocaleSettings, LongDateFormat};

/// Composite patterns tried, in order, when text is not ISO-8601
const PARSE_FORMATS: [LongDateFormat; 8] = [
    LongDateFormat::FullDateTime,
    LongDateFormat::LongDateTime,
    LongDateFormat::LongDate,
    LongDateFormat::ShortDate,
    LongDateFormat::FullDateTimeAbbr,
    LongDateFormat::LongDateTimeAbbr,
    LongDateFormat::LongDateAbbr,
    LongDateFormat::ShortDateAbbr,
];

/// Parses date input and renders datetimes for the date formatter.
///
/// The locale is always passed in, so one engine can serve concurrent calls that use
/// different locales.
pub trait DateEngine {
    /// Turn the input into a UTC wall time
    fn parse(&self, input: &DateInput, locale: &LocaleSettings) -> Result<NaiveDateTime>;

    /// Render a UTC wall time with a pattern such as `"DD.MM.YYYY"` or `"LL"`
    fn render(
        &self,
        datetime: &NaiveDateTime,
        pattern: &str,
        locale: &LocaleSettings,
    ) -> Result<String>;
}

impl<E: DateEngine + ?Sized> DateEngine for &E {
    fn parse(&self, input: &DateInput, locale: &LocaleSettings) -> Result<NaiveDateTime> {
        (**self).parse(input, locale)
    }

    fn render(
        &self,
        datetime: &NaiveDateTime,
        pattern: &str,
        locale: &LocaleSettings,
    ) -> Result<String> {
        (**self).render(datetime, pattern, locale)
    }
}

/// The default engine, using `chrono` for calendar arithmetic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChronoEngine;

impl ChronoEngine {
    fn parse_text(&self, text: &str, locale: &LocaleSettings) -> Result<NaiveDateTime> {
        let text = text.trim();
        let unparseable = || FormatError::UnparseableDate {
            input: text.to_string(),
        };

        if let Some(iso) = parse_iso8601(text) {
            return iso.to_naive_utc().ok_or_else(unparseable);
        }

        let current_year = Utc::now().year();
        for which in PARSE_FORMATS {
            let pattern = locale.long_date_formats.pattern(which);
            let Ok(tokens) = parse_date_pattern(&pattern, locale) else {
                continue;
            };
            if let Some(datetime) = parse_with_pattern(text, &tokens, locale)
                .and_then(|fields| fields.to_naive_utc(current_year))
            {
                tracing::trace!(input = text, pattern = %pattern, "matched locale pattern");
                return Ok(datetime);
            }
        }

        DateTime::parse_from_rfc2822(text)
            .map(|dt| dt.naive_utc())
            .map_err(|_| unparseable())
    }
}

impl DateEngine for ChronoEngine {
    fn parse(&self, input: &DateInput, locale: &LocaleSettings) -> Result<NaiveDateTime> {
        match input {
            DateInput::Text(text) => self.parse_text(text, locale),
            DateInput::Timestamp(millis) => DateTime::from_timestamp_millis(*millis)
                .map(|dt| dt.naive_utc())
                .ok_or(FormatError::DateOutOfRange),
            DateInput::DateTime(datetime) => Ok(*datetime),
        }
    }

    fn render(
        &self,
        datetime: &NaiveDateTime,
        pattern: &str,
        locale: &LocaleSettings,
    ) -> Result<String> {
        let tokens = parse_date_pattern(pattern, locale)?;
        Ok(render_tokens(datetime, &tokens, locale))
    }
}
