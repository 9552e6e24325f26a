use winnow::Parser;
use winnow::combinator::repeat;

use crate::error::FormatError;
use crate::parser::tokens::parse_date_token;
use crate::types::*;

/// Composite patterns may refer to other composite patterns, but not endlessly
const MAX_EXPANSION_DEPTH: usize = 4;

/// Tokenize a date pattern without expanding composite patterns
pub fn tokenize_date_pattern(pattern: &str) -> Result<Vec<DateToken>, FormatError> {
    repeat(0.., parse_date_token)
        .parse(pattern)
        .map_err(|e| FormatError::InvalidPattern(format!("{pattern:?}: {e}")))
}

/// Parse a date pattern
///
/// Composite tokens such as `L` or `LLL` are replaced by the tokens of the locale's
/// pattern, so the result only contains tokens that render directly.
///
/// # Arguments
/// * `pattern` - The pattern string to parse
/// * `locale` - Locale providing the composite patterns
///
/// # Examples
/// ```
/// use x_format::parser::parse_date_pattern;
/// use x_format::types::{DateToken, LocaleSettings};
///
/// let tokens = parse_date_pattern("YYYY", &LocaleSettings::default()).unwrap();
/// assert_eq!(tokens, vec![DateToken::YearFourDigit]);
/// ```
pub fn parse_date_pattern(
    pattern: &str,
    locale: &LocaleSettings,
) -> Result<Vec<DateToken>, FormatError> {
    let mut expanded = Vec::new();
    expand_into(pattern, locale, 0, &mut expanded)?;
    Ok(expanded)
}

fn expand_into(
    pattern: &str,
    locale: &LocaleSettings,
    depth: usize,
    expanded: &mut Vec<DateToken>,
) -> Result<(), FormatError> {
    if depth > MAX_EXPANSION_DEPTH {
        return Err(FormatError::InvalidPattern(format!(
            "composite patterns nested too deeply in {pattern:?}"
        )));
    }

    for token in tokenize_date_pattern(pattern)? {
        match token {
            DateToken::LongDate(which) => {
                let inner = locale.long_date_formats.pattern(which);
                expand_into(&inner, locale, depth + 1, expanded)?;
            }
            other => expanded.push(other),
        }
    }

    Ok(())
}
