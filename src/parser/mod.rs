//! Date pattern and date input parsing module
//!
//! This module tokenizes date patterns (`YYYY-MM-DD`, `LL`, `[Uhr]` ...) and parses date
//! text, either ISO-8601 or free-form text matching a locale's patterns.
//! The main entry point is the `parse_date_pattern` function.

mod input;
mod iso;
mod pattern;
mod tokens;

pub use input::{ParsedFields, parse_with_pattern};
pub use iso::{IsoDateTime, parse_iso8601};
pub use pattern::{parse_date_pattern, tokenize_date_pattern};
