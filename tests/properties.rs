use proptest::prelude::*;
use x_format::config::resolve;
use x_format::formatter::number::{group_thousands, to_fixed};
use x_format::types::NumberOptions;
use x_format::{Formatter, parse_date_pattern};

fn swap_separators(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            ',' => '.',
            '.' => ',',
            other => other,
        })
        .collect()
}

fn number_options() -> impl Strategy<Value = NumberOptions> {
    (
        proptest::option::of(0u32..=10),
        proptest::option::of(any::<bool>()),
        proptest::option::of(prop_oneof![Just("en"), Just("de"), Just("fr")]),
    )
        .prop_map(|(scale, unit, locale)| NumberOptions {
            scale,
            unit,
            locale: locale.map(str::to_string),
        })
}

proptest! {
    /// Integer digits are grouped by three from the right
    #[test]
    fn grouping_by_three(value in -1e15f64..1e15, scale in 0u32..6) {
        let options = NumberOptions::default().scale(scale).locale("en");
        let formatted = Formatter::new().format_number(value, Some(&options));

        let unsigned = formatted.trim_start_matches('-');
        let integer = unsigned.split('.').next().unwrap_or_default();
        let groups: Vec<&str> = integer.split(',').collect();

        prop_assert!(!groups[0].is_empty() && groups[0].len() <= 3, "{formatted}");
        for group in &groups[1..] {
            prop_assert_eq!(group.len(), 3, "{}", formatted);
        }
        prop_assert!(integer.replace(',', "").chars().all(|c| c.is_ascii_digit()));
    }

    /// German output is English output with the separators swapped
    #[test]
    fn german_swaps_separators(value in -1e12f64..1e12, scale in 0u32..6) {
        let formatter = Formatter::new();
        let en = formatter.format_number(value, Some(&NumberOptions::default().scale(scale).locale("en")));
        let de = formatter.format_number(value, Some(&NumberOptions::default().scale(scale).locale("de")));
        prop_assert_eq!(de, swap_separators(&en));
    }

    /// The fixed-point string has exactly `scale` fractional digits
    #[test]
    fn fixed_point_width(value in any::<f64>().prop_filter("finite", |v| v.is_finite()), scale in 0u32..=20) {
        let fixed = to_fixed(value, scale).unwrap();
        match fixed.split_once('.') {
            Some((_, fraction)) => prop_assert_eq!(fraction.len() as u32, scale),
            None => prop_assert_eq!(scale, 0),
        }
        prop_assert_eq!(fixed.starts_with('-'), value < 0.0);
    }

    /// Rounding moves the value by at most half a unit in the last place
    #[test]
    fn fixed_point_is_close(value in -1e9f64..1e9, scale in 0u32..6) {
        let fixed: f64 = to_fixed(value, scale).unwrap().parse().unwrap();
        let half_unit = 0.5 * 10f64.powi(-(scale as i32));
        let slack = value.abs().max(1.0) * f64::EPSILON * 4.0;
        prop_assert!((fixed - value).abs() <= half_unit + slack, "{} -> {}", value, fixed);
    }

    /// Grouping never changes the digits
    #[test]
    fn grouping_keeps_digits(digits in "[1-9][0-9]{0,30}") {
        let grouped = group_thousands(&digits, "'");
        prop_assert_eq!(grouped.replace('\'', ""), digits.clone());
        prop_assert_eq!(grouped.matches('\'').count(), (digits.len() - 1) / 3);
    }

    /// Resolving an already resolved configuration changes nothing
    #[test]
    fn resolution_is_idempotent(
        global in number_options(),
        defaults in number_options(),
        call in number_options(),
    ) {
        let once = resolve([Some(&global), Some(&defaults), Some(&call)]);
        let twice = resolve([Some(&once), Some(&defaults), Some(&call)]);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(resolve([Some(&once), Some(&once)]), once.clone());
        prop_assert_eq!(once.scale, call.scale.or(defaults.scale).or(global.scale));
    }

    /// Any pattern tokenizes; unknown characters become literals
    #[test]
    fn any_pattern_tokenizes(pattern in "\\PC{0,40}") {
        let locale = x_format::LocaleSettings::default();
        prop_assert!(parse_date_pattern(&pattern, &locale).is_ok());
    }
}
