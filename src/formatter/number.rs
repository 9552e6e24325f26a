//! Number formatting implementation
//!
//! Coerces the input to a number, rounds it to a fixed number of fractional digits and
//! applies the locale's separators.

use crate::config::NumberConfig;
use crate::error::{FormatError, Result};
use crate::locale::LocaleTable;
use crate::types::{NumberInput, NumericValue};

/// Largest supported number of fractional digits
pub const MAX_SCALE: u32 = 100;

// Fractional digits in the exact decimal expansion of the smallest subnormal f64
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Format a number according to an effective configuration
///
/// # Arguments
/// * `input` - The number, optionally carrying a unit
/// * `config` - Resolved scale, unit flag and locale
/// * `locales` - Table the locale is looked up in
///
/// # Examples
/// ```
/// use x_format::config::NumberConfig;
/// use x_format::formatter::number::format_number_with;
/// use x_format::locale::LocaleTable;
///
/// let config = NumberConfig { scale: 2, unit: true, locale: "de".to_string() };
/// let result = format_number_with(&1234.5.into(), &config, &LocaleTable::builtin());
/// assert_eq!(result.unwrap(), "1.234,50");
/// ```
pub fn format_number_with(
    input: &NumberInput,
    config: &NumberConfig,
    locales: &LocaleTable,
) -> Result<String> {
    let value = coerce_number(&input.value)?;
    let fixed = to_fixed(value, config.scale)?;

    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let locale = locales.resolve(&config.locale)?;

    let mut result = String::with_capacity(fixed.len() * 2);
    result.push_str(sign);
    result.push_str(&group_thousands(integer, &locale.thousands));
    if let Some(fraction) = fraction {
        result.push_str(&locale.decimal);
        result.push_str(fraction);
    }

    if config.unit {
        if let Some(unit) = input.unit() {
            result.push(' ');
            result.push_str(unit);
        }
    }

    Ok(result)
}

/// Interpret the payload as a finite number
///
/// Text follows the usual script-language rules: surrounding whitespace is ignored, an empty
/// string is zero, and `0x`, `0o` and `0b` prefixes select a radix.
pub fn coerce_number(value: &NumericValue) -> Result<f64> {
    let number = match value {
        NumericValue::Float(number) => Some(*number),
        NumericValue::Text(text) => parse_numeric_text(text),
    };

    match number {
        Some(number) if number.is_finite() => Ok(number),
        _ => Err(FormatError::Coercion {
            input: match value {
                NumericValue::Float(number) => number.to_string(),
                NumericValue::Text(text) => text.clone(),
            },
        }),
    }
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            if digits.is_empty() {
                return None;
            }
            return digits.chars().try_fold(0.0, |acc: f64, c| {
                c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
            });
        }
    }

    // f64::from_str also takes "inf" and "NaN"
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Round to `scale` fractional digits, half away from zero, and zero pad.
///
/// Rounding works on the exact binary value, so `1.005` (stored as 1.00499...) rounds down
/// while `0.125` rounds up. The result carries a leading `-` whenever `value` is negative.
pub fn to_fixed(value: f64, scale: u32) -> Result<String> {
    if scale > MAX_SCALE {
        return Err(FormatError::ScaleOutOfRange(scale));
    }
    let scale = scale as usize;

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (integer, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().take(scale))
        .map(|b| b - b'0')
        .collect();

    let round_up = fraction.as_bytes().get(scale).is_some_and(|&b| b >= b'5');
    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let integer_len = digits.len() - scale;
    let mut result = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        result.push('-');
    }
    for (i, digit) in digits.iter().enumerate() {
        if i == integer_len {
            result.push('.');
        }
        result.push(char::from(b'0' + digit));
    }
    Ok(result)
}

/// Insert `separator` between groups of three digits, counting from the right
pub fn group_thousands(digits: &str, separator: &str) -> String {
    let int_digits: Vec<char> = digits.chars().collect();
    let mut grouped =
        String::with_capacity(digits.len() + separator.len() * (int_digits.len() / 3));

    for (i, digit) in int_digits.iter().enumerate() {
        if i > 0 && (int_digits.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(*digit);
    }

    grouped
}
