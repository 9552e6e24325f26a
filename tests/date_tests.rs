use chrono::{NaiveDate, TimeZone, Utc};
use x_format::types::{DateInput, DateOptions};
use x_format::{FormatError, format_date, try_format_date};

fn opts(format: &str, locale: &str) -> DateOptions {
    DateOptions::default().format(format).locale(locale)
}

fn locale(locale: &str) -> DateOptions {
    DateOptions::default().locale(locale)
}

#[test]
fn test_default_short_date_per_locale() {
    assert_eq!(format_date("2012-05-03", Some(&locale("de"))), "03.05.2012");
    assert_eq!(format_date("2012-05-03", Some(&locale("en"))), "05/03/2012");
    assert_eq!(format_date("2012-05-03", Some(&locale("fr"))), "03/05/2012");
    assert_eq!(format_date("2012-05-03", None), "05/03/2012");
}

#[test]
fn test_bare_year() {
    assert_eq!(format_date("2014", None), "01/01/2014");
    assert_eq!(format_date("2014", Some(&locale("de"))), "01.01.2014");
}

#[test]
fn test_locale_specific_input() {
    assert_eq!(
        format_date("25. Februar 2014", Some(&locale("de"))),
        "25.02.2014"
    );
    assert_eq!(
        format_date("25. februar 2014", Some(&locale("de"))),
        "25.02.2014"
    );
    assert_eq!(
        format_date("25. Feb. 2014", Some(&locale("de"))),
        "25.02.2014"
    );
    assert_eq!(
        format_date("February 25, 2014", Some(&opts("YYYY-MM-DD", "en"))),
        "2014-02-25"
    );
    assert_eq!(
        format_date("25/02/2014", Some(&opts("YYYY-MM-DD", "it"))),
        "2014-02-25"
    );
}

#[test]
fn test_english_text_is_not_german() {
    assert_eq!(format_date("February 25, 2014", Some(&locale("de"))), "");
}

#[test]
fn test_long_patterns() {
    let date = "2012-05-03T14:07:09";
    assert_eq!(format_date(date, Some(&opts("LL", "en"))), "May 3, 2012");
    assert_eq!(format_date(date, Some(&opts("LL", "de"))), "3. Mai 2012");
    assert_eq!(format_date(date, Some(&opts("LL", "fr"))), "3 mai 2012");
    assert_eq!(
        format_date(date, Some(&opts("LL", "es"))),
        "3 de mayo de 2012"
    );
    assert_eq!(
        format_date(date, Some(&opts("LLL", "en"))),
        "May 3, 2012 2:07 PM"
    );
    assert_eq!(
        format_date(date, Some(&opts("LLLL", "de"))),
        "Donnerstag, 3. Mai 2012 14:07"
    );
    assert_eq!(
        format_date(date, Some(&opts("llll", "en"))),
        "Thu, May 3, 2012 2:07 PM"
    );
    assert_eq!(format_date(date, Some(&opts("LTS", "de"))), "14:07:09");
}

#[test]
fn test_custom_patterns() {
    let date = "2012-05-03T14:07:09";
    assert_eq!(
        format_date(date, Some(&opts("MMMM Do YYYY, h:mm:ss a", "en"))),
        "May 3rd 2012, 2:07:09 pm"
    );
    assert_eq!(
        format_date(date, Some(&opts("dddd, [der] Do MMMM", "de"))),
        "Donnerstag, der 3. Mai"
    );
    assert_eq!(format_date("2012-05-01", Some(&opts("Do MMMM", "fr"))), "1er mai");
    assert_eq!(format_date("2012-05-02", Some(&opts("Do MMMM", "fr"))), "2e mai");
    assert_eq!(format_date(date, Some(&opts("[Q]Q YYYY", "en"))), "Q2 2012");
}

#[test]
fn test_offsets_normalize_to_utc() {
    assert_eq!(
        format_date(
            "2012-05-03T01:30:00+02:00",
            Some(&opts("YYYY-MM-DD HH:mm Z", "en"))
        ),
        "2012-05-02 23:30 +00:00"
    );
}

#[test]
fn test_timestamp_and_datetime_inputs() {
    let iso = opts("YYYY-MM-DDTHH:mm:ss", "en");
    assert_eq!(format_date(1_336_003_200_000_i64, Some(&iso)), "2012-05-03T00:00:00");
    assert_eq!(format_date(0_i64, Some(&iso)), "1970-01-01T00:00:00");

    let naive = NaiveDate::from_ymd_opt(2012, 5, 3)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    assert_eq!(format_date(naive, Some(&iso)), "2012-05-03T08:00:00");

    let utc = Utc.with_ymd_and_hms(2012, 5, 3, 8, 0, 0).unwrap();
    assert_eq!(format_date(utc, Some(&locale("de"))), "03.05.2012");
    assert_eq!(format_date(DateInput::from(utc), Some(&opts("x", "en"))), "1336032000000");
}

#[test]
fn test_rfc2822_input() {
    assert_eq!(
        format_date("Thu, 03 May 2012 10:00:00 +0200", Some(&opts("L LT", "de"))),
        "03.05.2012 08:00"
    );
}

#[test]
fn test_unknown_locale_falls_back_to_english() {
    assert_eq!(format_date("2012-05-03", Some(&locale("xx"))), "05/03/2012");
    assert_eq!(format_date("2012-05-03", Some(&locale("de-CH"))), "03.05.2012");
}

#[test]
fn test_malformed_input() {
    assert_eq!(format_date("not-a-date", None), "");
    assert_eq!(format_date("2014-13-01", None), "");
    assert_eq!(format_date(i64::MIN, None), "");
    assert_eq!(
        try_format_date("not-a-date", None),
        Err(FormatError::UnparseableDate {
            input: "not-a-date".to_string()
        })
    );
    assert_eq!(try_format_date(i64::MAX, None), Err(FormatError::DateOutOfRange));
}
