//! Date formatting module
//!
//! Parses date input (ISO-8601, locale-specific text, RFC 2822 or timestamps) and renders it
//! with a moment-style pattern such as `"DD.MM.YYYY"` or `"LL"`.

mod engine;
mod render;

// Re-export the public interface
pub use engine::{ChronoEngine, DateEngine};
pub use render::render_tokens;

use crate::config::DateConfig;
use crate::error::Result;
use crate::locale::LocaleTable;
use crate::types::DateInput;

/// Format a date according to an effective configuration
///
/// An unknown locale falls back to the table's default locale.
pub fn format_date_with<E: DateEngine + ?Sized>(
    input: &DateInput,
    config: &DateConfig,
    locales: &LocaleTable,
    engine: &E,
) -> Result<String> {
    let locale = locales.resolve_or_default(&config.locale);
    let datetime = engine.parse(input, locale)?;
    engine.render(&datetime, &config.format, locale)
}
