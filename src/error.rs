//! Error types for formatting and configuration

use thiserror::Error;

use crate::locale::LocaleError;

/// Reasons a single formatting call can fail.
///
/// The infallible entry points log these and return an empty string; the `try_` variants
/// hand them to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The numeric input cannot be interpreted as a finite number
    #[error("cannot interpret {input:?} as a number")]
    Coercion { input: String },
    /// The resolved locale has no entry in the locale table
    #[error("locale not found: {0}")]
    UnknownLocale(String),
    /// The date input matches neither ISO-8601 nor any locale pattern
    #[error("cannot parse {input} as a date")]
    UnparseableDate { input: String },
    /// Fixed-point rounding supports 0 to 100 fractional digits
    #[error("scale {0} is out of range (0..=100)")]
    ScaleOutOfRange(u32),
    /// The date pattern could not be tokenized
    #[error("invalid date pattern: {0}")]
    InvalidPattern(String),
    /// The date lies outside the range the calendar supports
    #[error("date is out of range")]
    DateOutOfRange,
}

/// Errors raised while loading a formatter configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Locale(#[from] LocaleError),
}

pub type Result<T, E = FormatError> = std::result::Result<T, E>;
