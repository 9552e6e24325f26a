pub mod config;
pub mod error;
pub mod formatter;
pub mod locale;
pub mod parser;
pub mod types;

// Main API
pub use config::{GlobalConfig, global_config, set_default_locale, update_global_config};
pub use error::{ConfigError, FormatError};
pub use formatter::Formatter;
pub use formatter::datetime::{ChronoEngine, DateEngine};
pub use locale::{LocaleError, LocaleTable};
pub use parser::parse_date_pattern;
pub use types::*;

/// Format a number with the process-wide configuration
///
/// Returns an empty string when the value cannot be formatted.
///
/// ```
/// use x_format::{NumberOptions, format_number};
///
/// let options = NumberOptions::default().scale(0).locale("de");
/// assert_eq!(format_number(35454354, Some(&options)), "35.454.354");
/// assert_eq!(format_number("not-a-number", None), "");
/// ```
pub fn format_number(value: impl Into<NumberInput>, options: Option<&NumberOptions>) -> String {
    Formatter::from_global().format_number(value, options)
}

/// Format a number with the process-wide configuration, reporting failures
pub fn try_format_number(
    value: impl Into<NumberInput>,
    options: Option<&NumberOptions>,
) -> Result<String, FormatError> {
    Formatter::from_global().try_format_number(value, options)
}

/// Format a date with the process-wide configuration
///
/// Returns an empty string when the date cannot be parsed.
///
/// ```
/// use x_format::{DateOptions, format_date};
///
/// let options = DateOptions::default().locale("de");
/// assert_eq!(format_date("2012-05-03", Some(&options)), "03.05.2012");
/// ```
pub fn format_date(date: impl Into<DateInput>, options: Option<&DateOptions>) -> String {
    Formatter::from_global().format_date(date, options)
}

/// Format a date with the process-wide configuration, reporting failures
pub fn try_format_date(
    date: impl Into<DateInput>,
    options: Option<&DateOptions>,
) -> Result<String, FormatError> {
    Formatter::from_global().try_format_date(date, options)
}
