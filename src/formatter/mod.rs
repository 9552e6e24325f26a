//! Formatting entry points
//!
//! [`Formatter`] carries everything a formatting call depends on: its own defaults, the locale
//! table and the date engine. Calls merge the process-wide configuration, the formatter's
//! defaults and the per-call options (see [`crate::config`]).

pub mod datetime;
pub mod number;

use std::sync::Arc;

use crate::config::{
    DateConfig, FormatterConfig, GlobalConfig, NumberConfig, Overlay, default_date_options,
    default_number_options, global_config,
};
use crate::error::{ConfigError, Result};
use crate::locale::LocaleTable;
use crate::types::{DateInput, DateOptions, NumberInput, NumberOptions};
use datetime::{ChronoEngine, DateEngine, format_date_with};
use number::format_number_with;

/// Formatting context for numbers and dates
///
/// # Examples
/// ```
/// use x_format::Formatter;
/// use x_format::types::NumberOptions;
///
/// let formatter = Formatter::new().with_locale("de");
/// assert_eq!(formatter.format_number(35454354.4546, None), "35.454.354,45");
/// assert_eq!(formatter.format_date("2012-05-03", None), "03.05.2012");
///
/// let options = NumberOptions::default().scale(0);
/// assert_eq!(formatter.format_number(1234.5, Some(&options)), "1.235");
/// ```
#[derive(Debug, Clone)]
pub struct Formatter<E = ChronoEngine> {
    /// Lowest layer; `None` reads the process-wide configuration on every call
    global: Option<GlobalConfig>,
    number_defaults: NumberOptions,
    date_defaults: DateOptions,
    locales: Arc<LocaleTable>,
    engine: E,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    /// A formatter with the built-in defaults, independent of the process-wide configuration
    pub fn new() -> Self {
        Self {
            global: Some(GlobalConfig::default()),
            number_defaults: default_number_options(),
            date_defaults: default_date_options(),
            locales: LocaleTable::builtin(),
            engine: ChronoEngine,
        }
    }

    /// A formatter that follows the process-wide configuration
    pub fn from_global() -> Self {
        Self {
            global: None,
            ..Self::new()
        }
    }

    /// A formatter built from a parsed configuration file
    pub fn from_config(config: FormatterConfig) -> std::result::Result<Self, ConfigError> {
        let mut formatter = Self::new();

        if let Some(locale) = config.locale {
            formatter = formatter.with_locale(locale);
        }
        formatter.number_defaults = formatter.number_defaults.overlay(&config.number);
        formatter.date_defaults = formatter.date_defaults.overlay(&config.date);

        if !config.locales.is_empty() {
            let mut table = formatter.locales.as_ref().clone();
            table.extend_from_table(&config.locales)?;
            tracing::debug!(locales = ?table.locales(), "extended locale table");
            formatter.locales = Arc::new(table);
        }

        Ok(formatter)
    }

    /// A formatter built from the TOML text of a configuration file
    ///
    /// ```
    /// use x_format::Formatter;
    ///
    /// let formatter = Formatter::from_toml_str(r#"
    ///     locale = "de"
    ///     [number]
    ///     scale = 1
    /// "#).unwrap();
    /// assert_eq!(formatter.format_number(1234.56, None), "1.234,6");
    /// ```
    pub fn from_toml_str(toml_str: &str) -> std::result::Result<Self, ConfigError> {
        Self::from_config(FormatterConfig::from_toml_str(toml_str)?)
    }
}

impl<E: DateEngine> Formatter<E> {
    /// Replace the date engine
    pub fn with_engine<F: DateEngine>(self, engine: F) -> Formatter<F> {
        Formatter {
            global: self.global,
            number_defaults: self.number_defaults,
            date_defaults: self.date_defaults,
            locales: self.locales,
            engine,
        }
    }

    /// Set the locale for both numbers and dates
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        let locale = locale.into();
        self.number_defaults.locale = Some(locale.clone());
        self.date_defaults.locale = Some(locale);
        self
    }

    /// Replace the formatter-level number defaults
    pub fn with_number_defaults(mut self, defaults: NumberOptions) -> Self {
        self.number_defaults = defaults;
        self
    }

    /// Replace the formatter-level date defaults
    pub fn with_date_defaults(mut self, defaults: DateOptions) -> Self {
        self.date_defaults = defaults;
        self
    }

    /// Use a different locale table
    pub fn with_locales(mut self, locales: impl Into<Arc<LocaleTable>>) -> Self {
        self.locales = locales.into();
        self
    }

    pub fn locales(&self) -> &LocaleTable {
        &self.locales
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn global(&self) -> GlobalConfig {
        match &self.global {
            Some(global) => global.clone(),
            None => global_config(),
        }
    }

    /// The effective number configuration for a call
    pub fn number_config(&self, options: Option<&NumberOptions>) -> NumberConfig {
        NumberConfig::resolve(&self.global(), &self.number_defaults, options)
    }

    /// The effective date configuration for a call
    pub fn date_config(&self, options: Option<&DateOptions>) -> DateConfig {
        DateConfig::resolve(&self.global(), &self.date_defaults, options)
    }

    /// Format a number, reporting why it could not be formatted
    pub fn try_format_number(
        &self,
        value: impl Into<NumberInput>,
        options: Option<&NumberOptions>,
    ) -> Result<String> {
        let config = self.number_config(options);
        format_number_with(&value.into(), &config, &self.locales)
    }

    /// Format a number; failures are logged and yield an empty string
    pub fn format_number(
        &self,
        value: impl Into<NumberInput>,
        options: Option<&NumberOptions>,
    ) -> String {
        let value = value.into();
        self.try_format_number(&value, options)
            .unwrap_or_else(|err| {
                tracing::error!(value = ?value, error = %err, "failed to format number");
                String::new()
            })
    }

    /// Format a date, reporting why it could not be formatted
    pub fn try_format_date(
        &self,
        date: impl Into<DateInput>,
        options: Option<&DateOptions>,
    ) -> Result<String> {
        let config = self.date_config(options);
        format_date_with(&date.into(), &config, &self.locales, &self.engine)
    }

    /// Format a date; failures are logged and yield an empty string
    pub fn format_date(&self, date: impl Into<DateInput>, options: Option<&DateOptions>) -> String {
        let date = date.into();
        self.try_format_date(date.clone(), options)
            .unwrap_or_else(|err| {
                tracing::error!(date = %date, error = %err, "failed to format date");
                String::new()
            })
    }
}
