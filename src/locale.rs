//! Locale support for number and date formatting
//!
//! This module loads the locale table: a mapping from locale identifier to the separators,
//! month and day names, and composite date patterns used by the formatters.
//! Built-in data is embedded from `locale/locale_settings.toml`; callers can extend or
//! override it with their own TOML tables.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use thiserror::Error;

use crate::error::FormatError;
use crate::types::{LocaleSettings, LongDateFormats, OrdinalRule};

/// Error type for locale operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    /// An error occurred while parsing locale data
    #[error("Error parsing locale data: {0}")]
    ParseError(String),
}

type Result<T> = std::result::Result<T, LocaleError>;

/// Identifier of the locale used when nothing else is configured
pub const DEFAULT_LOCALE: &str = "en";

const BUILTIN_LOCALE_DATA: &str = include_str!("locale/locale_settings.toml");

// Global singleton for the built-in table
static BUILTIN_TABLE: OnceLock<Arc<LocaleTable>> = OnceLock::new();

/// Maps locale identifiers to their formatting settings
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleTable {
    base: LocaleSettings,
    locales: HashMap<String, LocaleSettings>,
}

impl Default for LocaleTable {
    fn default() -> Self {
        Self::builtin().as_ref().clone()
    }
}

impl LocaleTable {
    /// An empty table whose base settings are the English defaults
    pub fn empty() -> Self {
        Self {
            base: LocaleSettings::default(),
            locales: HashMap::new(),
        }
    }

    /// The shared table built from the embedded locale data
    pub fn builtin() -> Arc<LocaleTable> {
        BUILTIN_TABLE
            .get_or_init(|| {
                let table = Self::from_toml_str(BUILTIN_LOCALE_DATA).unwrap_or_else(|e| {
                    tracing::error!(error = %e, "failed to load embedded locale data");
                    let mut table = Self::empty();
                    table.insert(DEFAULT_LOCALE, LocaleSettings::default());
                    table
                });
                Arc::new(table)
            })
            .clone()
    }

    /// Build a table from TOML locale data
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let mut table = Self::empty();
        table.extend_from_toml_str(toml_str)?;
        Ok(table)
    }

    /// Add or override locales from TOML locale data
    pub fn extend_from_toml_str(&mut self, toml_str: &str) -> Result<()> {
        let parsed: toml::Table =
            toml::from_str(toml_str).map_err(|e| LocaleError::ParseError(e.to_string()))?;
        self.extend_from_table(&parsed)
    }

    /// Add or override locales from an already parsed TOML table.
    ///
    /// A `base` entry updates the settings new locales start from. Other entries start from
    /// the existing entry of the same id, then from their primary language, then from base.
    pub fn extend_from_table(&mut self, table: &toml::Table) -> Result<()> {
        if let Some(base) = table.get("base") {
            let mut base_settings = self.base.clone();
            apply_settings(&mut base_settings, base)?;
            self.base = base_settings;
        }

        // Primary languages first so regional variants can inherit from them
        let mut entries: Vec<(&String, &toml::Value)> =
            table.iter().filter(|(id, _)| id.as_str() != "base").collect();
        entries.sort_by_key(|(id, _)| normalize(id).contains('-'));

        for (locale_id, value) in entries {
            let id = normalize(locale_id);
            let mut settings = self
                .locales
                .get(&id)
                .or_else(|| primary_subtag(&id).and_then(|primary| self.locales.get(primary)))
                .unwrap_or(&self.base)
                .clone();
            apply_settings(&mut settings, value)?;
            self.locales.insert(id, settings);
        }

        Ok(())
    }

    /// Insert or replace a locale
    pub fn insert(&mut self, locale_id: &str, settings: LocaleSettings) {
        self.locales.insert(normalize(locale_id), settings);
    }

    /// Get locale settings by exact identifier (case and `-`/`_` insensitive)
    pub fn get(&self, locale_id: &str) -> Option<&LocaleSettings> {
        self.locales.get(&normalize(locale_id))
    }

    /// Find the settings for a locale, falling back from a regional id to its primary language
    pub fn resolve(&self, locale_id: &str) -> std::result::Result<&LocaleSettings, FormatError> {
        let id = normalize(locale_id);
        self.locales
            .get(&id)
            .or_else(|| primary_subtag(&id).and_then(|primary| self.locales.get(primary)))
            .ok_or_else(|| FormatError::UnknownLocale(locale_id.to_string()))
    }

    /// Like [`LocaleTable::resolve`], but unknown locales fall back to the default locale
    pub fn resolve_or_default(&self, locale_id: &str) -> &LocaleSettings {
        self.resolve(locale_id).unwrap_or_else(|_| {
            tracing::debug!(locale = locale_id, "unknown locale, using {DEFAULT_LOCALE}");
            self.locales.get(DEFAULT_LOCALE).unwrap_or(&self.base)
        })
    }

    /// List all available locale identifiers, sorted
    pub fn locales(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

/// Lowercase the identifier and use `-` between subtags
fn normalize(locale_id: &str) -> String {
    locale_id.trim().replace('_', "-").to_ascii_lowercase()
}

fn primary_subtag(normalized_id: &str) -> Option<&str> {
    normalized_id
        .split_once('-')
        .map(|(primary, _)| primary)
        .filter(|primary| !primary.is_empty())
}

/// Apply the settings from one TOML locale entry over `settings`
fn apply_settings(settings: &mut LocaleSettings, value: &toml::Value) -> Result<()> {
    let table = value
        .as_table()
        .ok_or_else(|| LocaleError::ParseError("Locale setting is not a table".to_string()))?;

    if let Some(decimal) = string_value(table, "decimal")? {
        settings.decimal = decimal;
    }
    if let Some(thousands) = string_value(table, "thousands")? {
        settings.thousands = thousands;
    }

    if let Some(names) = string_array(table, "month_names")? {
        settings.month_names = names;
    }
    if let Some(names) = string_array(table, "month_abbreviations")? {
        settings.short_month_names = names;
    }
    if let Some(names) = string_array(table, "day_names")? {
        settings.day_names = names;
    }
    if let Some(names) = string_array(table, "day_abbreviations")? {
        settings.short_day_names = names;
    }
    if let Some(names) = string_array(table, "day_min_names")? {
        settings.min_day_names = names;
    }
    if let Some(markers) = string_array(table, "ampm")? {
        settings.meridiem = markers;
    }

    apply_ordinal(settings, table)?;

    if let Some(formats) = table.get("formats") {
        apply_formats(&mut settings.long_date_formats, formats)?;
    }

    Ok(())
}

fn apply_ordinal(settings: &mut LocaleSettings, table: &toml::Table) -> Result<()> {
    match string_value(table, "ordinal")?.as_deref() {
        Some("english") => settings.ordinal = OrdinalRule::English,
        Some(other) => {
            return Err(LocaleError::ParseError(format!(
                "unknown ordinal rule '{other}'"
            )));
        }
        None => {}
    }

    let suffix = string_value(table, "ordinal_suffix")?;
    let first = string_value(table, "ordinal_first")?;
    if suffix.is_some() || first.is_some() {
        settings.ordinal = OrdinalRule::Suffix {
            first,
            other: suffix.unwrap_or_default(),
        };
    }

    Ok(())
}

fn apply_formats(formats: &mut LongDateFormats, value: &toml::Value) -> Result<()> {
    let table = value
        .as_table()
        .ok_or_else(|| LocaleError::ParseError("formats is not a table".to_string()))?;

    for (key, target) in [
        ("LT", &mut formats.time),
        ("LTS", &mut formats.time_with_seconds),
        ("L", &mut formats.short_date),
        ("LL", &mut formats.long_date),
        ("LLL", &mut formats.long_date_time),
        ("LLLL", &mut formats.full_date_time),
    ] {
        if let Some(pattern) = string_value(table, key)? {
            *target = pattern;
        }
    }

    Ok(())
}

fn string_value(table: &toml::Table, key: &str) -> Result<Option<String>> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| LocaleError::ParseError(format!("{key} is not a string"))),
    }
}

fn string_array<const N: usize>(table: &toml::Table, key: &str) -> Result<Option<[String; N]>> {
    let Some(value) = table.get(key) else {
        return Ok(None);
    };

    let items = value
        .as_array()
        .ok_or_else(|| LocaleError::ParseError(format!("{key} is not an array")))?;

    let names: Vec<String> = items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| LocaleError::ParseError(format!("{key} contains a non-string")))
        })
        .collect::<Result<_>>()?;

    let len = names.len();
    names.try_into().map(Some).map_err(|_| {
        LocaleError::ParseError(format!("{key} must have {N} entries, found {len}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_loading() {
        let table = LocaleTable::builtin();
        let locales = table.locales();
        assert!(!locales.is_empty(), "Should have loaded some locales");
        assert!(locales.contains(&"en"));
        assert!(locales.contains(&"de"));

        let en = table.get("en").expect("Should have en locale");
        assert_eq!(en.decimal, ".");
        assert_eq!(en.thousands, ",");

        let de = table.get("de").expect("Should have de locale");
        assert_eq!(de.decimal, ",");
        assert_eq!(de.thousands, ".");
        assert_eq!(de.month_names[1], "Februar");
        assert_eq!(de.long_date_formats.short_date, "DD.MM.YYYY");
    }

    #[test]
    fn test_locales_inherit_base() {
        let table = LocaleTable::builtin();
        let en = table.get("en").unwrap();
        assert_eq!(en, &LocaleSettings::default());

        // German data does not override the meridiem markers
        let de = table.get("de").unwrap();
        assert_eq!(de.meridiem, ["AM".to_string(), "PM".to_string()]);
    }

    #[test]
    fn test_resolve_regional_variant() {
        let table = LocaleTable::builtin();
        assert_eq!(table.resolve("de_DE").unwrap().decimal, ",");
        assert_eq!(table.resolve("EN-us").unwrap().decimal, ".");
        assert_eq!(
            table.resolve("xx"),
            Err(FormatError::UnknownLocale("xx".to_string()))
        );
        assert_eq!(table.resolve_or_default("xx").thousands, ",");
    }

    #[test]
    fn test_extend_with_regional_locale() {
        let mut table = LocaleTable::default();
        table
            .extend_from_toml_str(
                r#"
                [de-ch]
                thousands = "'"
                decimal = "."
                "#,
            )
            .unwrap();

        let swiss = table.get("de_CH").unwrap();
        assert_eq!(swiss.thousands, "'");
        assert_eq!(swiss.decimal, ".");
        // Names come from the primary language
        assert_eq!(swiss.month_names[2], "März");
    }

    #[test]
    fn test_invalid_locale_data() {
        let err = LocaleTable::from_toml_str("[xx]\nmonth_names = [\"a\", \"b\"]").unwrap_err();
        assert!(matches!(err, LocaleError::ParseError(_)));

        let err = LocaleTable::from_toml_str("[xx]\nordinal = \"roman\"").unwrap_err();
        assert!(matches!(err, LocaleError::ParseError(_)));

        assert!(LocaleTable::from_toml_str("xx = 1").is_err());
    }
}
