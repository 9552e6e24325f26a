//! Configuration resolution
//!
//! Every formatting call merges three layers, lowest priority first:
//!
//! 1. the process-wide [`GlobalConfig`] (only the locale),
//! 2. the formatter's own defaults ([`NumberOptions`] / [`DateOptions`]),
//! 3. the options passed with the call.
//!
//! For each field the highest layer that sets it wins. Fields no layer sets fall back to
//! built-in values (scale 2, unit suffix on, pattern "L", locale "en").

use std::sync::{PoisonError, RwLock};

use serde::Deserialize;

use crate::locale::DEFAULT_LOCALE;
use crate::types::{DateOptions, NumberOptions};

/// Default number of fractional digits
pub const DEFAULT_SCALE: u32 = 2;
/// Default date pattern, the locale's short date
pub const DEFAULT_DATE_FORMAT: &str = "L";

/// Process-wide defaults shared by both formatters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    pub locale: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

// Written rarely, read by every call that does not carry its own locale
static GLOBAL_CONFIG: RwLock<Option<GlobalConfig>> = RwLock::new(None);

/// Snapshot of the process-wide configuration
pub fn global_config() -> GlobalConfig {
    GLOBAL_CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .unwrap_or_default()
}

/// Change the process-wide default locale for both formatters
pub fn set_default_locale(locale: impl Into<String>) {
    let locale = locale.into();
    update_global_config(|config| config.locale = locale);
}

/// Modify the process-wide configuration in place.
///
/// Calls already in progress keep the snapshot they started with.
pub fn update_global_config(update: impl FnOnce(&mut GlobalConfig)) {
    let mut guard = GLOBAL_CONFIG
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    update(guard.get_or_insert_with(GlobalConfig::default));
}

/// Restore the process-wide configuration to its initial state
pub fn reset_global_config() {
    *GLOBAL_CONFIG
        .write()
        .unwrap_or_else(PoisonError::into_inner) = None;
}

/// A partial configuration that can be laid over another one
pub trait Overlay: Clone + Default {
    /// Fields set in `higher` replace the ones in `self`
    fn overlay(&self, higher: &Self) -> Self;

    /// A layer carrying only the global settings
    fn from_global(global: &GlobalConfig) -> Self;
}

impl Overlay for NumberOptions {
    fn overlay(&self, higher: &Self) -> Self {
        Self {
            scale: higher.scale.or(self.scale),
            unit: higher.unit.or(self.unit),
            locale: higher.locale.clone().or_else(|| self.locale.clone()),
        }
    }

    fn from_global(global: &GlobalConfig) -> Self {
        Self {
            locale: Some(global.locale.clone()),
            ..Self::default()
        }
    }
}

impl Overlay for DateOptions {
    fn overlay(&self, higher: &Self) -> Self {
        Self {
            format: higher.format.clone().or_else(|| self.format.clone()),
            locale: higher.locale.clone().or_else(|| self.locale.clone()),
        }
    }

    fn from_global(global: &GlobalConfig) -> Self {
        Self {
            locale: Some(global.locale.clone()),
            ..Self::default()
        }
    }
}

/// Merge layers given lowest priority first. `None` layers are skipped.
pub fn resolve<'a, T, I>(layers: I) -> T
where
    T: Overlay + 'a,
    I: IntoIterator<Item = Option<&'a T>>,
{
    layers
        .into_iter()
        .flatten()
        .fold(T::default(), |merged, layer| merged.overlay(layer))
}

/// Effective number configuration for one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberConfig {
    pub scale: u32,
    pub unit: bool,
    pub locale: String,
}

impl NumberConfig {
    pub fn resolve(
        global: &GlobalConfig,
        defaults: &NumberOptions,
        call: Option<&NumberOptions>,
    ) -> Self {
        let global = NumberOptions::from_global(global);
        let merged = resolve([Some(&global), Some(defaults), call]);
        Self {
            scale: merged.scale.unwrap_or(DEFAULT_SCALE),
            unit: merged.unit.unwrap_or(true),
            locale: merged.locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
        }
    }
}

/// Effective date configuration for one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateConfig {
    pub format: String,
    pub locale: String,
}

impl DateConfig {
    pub fn resolve(
        global: &GlobalConfig,
        defaults: &DateOptions,
        call: Option<&DateOptions>,
    ) -> Self {
        let global = DateOptions::from_global(global);
        let merged = resolve([Some(&global), Some(defaults), call]);
        Self {
            format: merged
                .format
                .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
            locale: merged.locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
        }
    }
}

/// Built-in function-level defaults for the number formatter
pub fn default_number_options() -> NumberOptions {
    NumberOptions {
        scale: Some(DEFAULT_SCALE),
        unit: Some(true),
        locale: None,
    }
}

/// Built-in function-level defaults for the date formatter
pub fn default_date_options() -> DateOptions {
    DateOptions {
        format: Some(DEFAULT_DATE_FORMAT.to_string()),
        locale: None,
    }
}

/// Contents of a formatter configuration file
///
/// ```toml
/// locale = "de"
///
/// [number]
/// scale = 3
///
/// [date]
/// format = "LL"
///
/// [locales.de-ch]
/// thousands = "'"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    pub locale: Option<String>,
    pub number: NumberOptions,
    pub date: DateOptions,
    /// Extra locale entries, in the same layout as the built-in locale data
    pub locales: toml::Table,
}

impl FormatterConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
