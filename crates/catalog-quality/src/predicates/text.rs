use crate::error::Result;
use crate::table::Table;
use crate::types::{CheckOutcome, MatchCollector};
use crate::utils::{is_digit_string, text_cells};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Curly single quotes plus the characters their UTF-8 bytes turn into when
/// read back as cp1252 (`’` -> `â€™`, `‘` -> `â€˜`).
static BAD_ENCODING: Lazy<Regex> = Lazy::new(|| {
    Regex::new("[\u{2018}\u{2019}\u{e2}\u{20ac}\u{2122}\u{2dc}]")
        .expect("Invalid regex: bad encoding")
});

/// Expected casing of a text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasingPolicy {
    /// No uppercase letters
    #[default]
    Lower,
    /// No lowercase letters
    Upper,
    /// Every word starts with an uppercase letter followed by lowercase ones
    Title,
}

impl CasingPolicy {
    /// Whether a value satisfies the policy.
    ///
    /// Values without any cased character (digits, punctuation) satisfy
    /// every policy.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            CasingPolicy::Lower => !value.chars().any(char::is_uppercase),
            CasingPolicy::Upper => !value.chars().any(char::is_lowercase),
            CasingPolicy::Title => is_title_case(value),
        }
    }
}

impl fmt::Display for CasingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CasingPolicy::Lower => f.write_str("lower"),
            CasingPolicy::Upper => f.write_str("upper"),
            CasingPolicy::Title => f.write_str("title"),
        }
    }
}

fn is_title_case(value: &str) -> bool {
    let mut previous_cased = false;
    for c in value.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
        } else {
            previous_cased = false;
        }
    }
    true
}

/// Walk the non-null text cells of a column, flagging those `is_anomaly`
/// accepts. Null cells never match.
fn scan_text(
    table: &Table,
    column: &str,
    is_anomaly: impl Fn(&str) -> bool,
) -> Result<CheckOutcome> {
    let series = table.series(column)?;
    let mut collector = MatchCollector::with_rows(series.len());
    for value in text_cells(series)? {
        match value {
            Some(v) if is_anomaly(&v) => collector.flag(&v),
            _ => collector.pass(),
        }
    }
    Ok(collector.finish())
}

/// Flag non-null text values that do not satisfy the casing policy.
pub fn text_format(table: &Table, column: &str, policy: CasingPolicy) -> Result<CheckOutcome> {
    scan_text(table, column, |v| !policy.accepts(v))
}

/// Flag text values containing curly quotes or their double-encoded forms.
pub fn encoding_anomaly(table: &Table, column: &str) -> Result<CheckOutcome> {
    scan_text(table, column, |v| BAD_ENCODING.is_match(v))
}

/// Flag non-null values that are not literally one of the two boolean tokens.
///
/// Columns stored as native booleans, as JSON `true`/`false` load, satisfy
/// the domain. CSV sources keep boolean-looking columns as text.
pub fn boolean_domain(
    table: &Table,
    column: &str,
    true_token: &str,
    false_token: &str,
) -> Result<CheckOutcome> {
    if matches!(table.series(column)?.dtype(), DataType::Boolean) {
        return scan_text(table, column, |_| false);
    }
    scan_text(table, column, |v| v != true_token && v != false_token)
}

/// Flag non-null values that are not made entirely of digits.
pub fn numeric_string(table: &Table, column: &str) -> Result<CheckOutcome> {
    scan_text(table, column, |v| !is_digit_string(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QualityError;

    fn table(df: DataFrame) -> Table {
        Table::new(df).unwrap()
    }

    #[test]
    fn test_lower_policy_excludes_nulls() {
        let t = table(df!["track_name" => [Some("abc"), Some("ABC"), Some("AbC"), None]].unwrap());

        let outcome = text_format(&t, "track_name", CasingPolicy::Lower).unwrap();
        let result = outcome.anomalies().unwrap();
        assert_eq!(result.matched_count, 2);
        assert_eq!(result.matched_values, vec!["ABC", "AbC"]);
        assert_eq!(result.mask, vec![false, true, true, false]);
    }

    #[test]
    fn test_upper_and_title_policies() {
        assert!(CasingPolicy::Upper.accepts("ALL TOO WELL"));
        assert!(!CasingPolicy::Upper.accepts("All Too Well"));
        assert!(CasingPolicy::Title.accepts("All Too Well"));
        // an apostrophe starts a new word, so the trailing `s` must be uppercase
        assert!(!CasingPolicy::Title.accepts("Shake It Off (Taylor's Version)"));
        assert!(CasingPolicy::Title.accepts("Style - 1989"));
        assert!(!CasingPolicy::Title.accepts("all too well"));
        assert!(!CasingPolicy::Title.accepts("ALL"));
    }

    #[test]
    fn test_uncased_values_accepted_by_every_policy() {
        for policy in [CasingPolicy::Lower, CasingPolicy::Upper, CasingPolicy::Title] {
            assert!(policy.accepts("22"), "{policy} should accept digits");
        }
    }

    #[test]
    fn test_encoding_anomaly_detects_mojibake() {
        let t = table(
            df!["track_name" => [
                Some("Don't Blame Me"),
                Some("Don\u{e2}\u{20ac}\u{2122}t Blame Me"),
                Some("It\u{2019}s Nice To Have A Friend"),
                None,
            ]]
            .unwrap(),
        );

        let outcome = encoding_anomaly(&t, "track_name").unwrap();
        assert_eq!(outcome.anomalies().unwrap().matched_rows(), vec![1, 2]);
    }

    #[test]
    fn test_boolean_domain_is_literal() {
        let t = table(df!["explicit" => [Some("True"), Some("False"), Some("true"), Some("1"), None]].unwrap());

        let outcome = boolean_domain(&t, "explicit", "True", "False").unwrap();
        let result = outcome.anomalies().unwrap();
        assert_eq!(result.matched_count, 2);
        assert_eq!(result.matched_values, vec!["true", "1"]);
    }

    #[test]
    fn test_boolean_domain_on_boolean_dtype_is_clean() {
        let t = table(df!["explicit" => [true, false, true]].unwrap());
        assert!(boolean_domain(&t, "explicit", "True", "False").unwrap().is_clean());
    }

    #[test]
    fn test_numeric_string() {
        let t = table(df!["album_total_tracks" => [Some("13"), Some("13.0"), Some("thirteen"), None]].unwrap());

        let outcome = numeric_string(&t, "album_total_tracks").unwrap();
        assert_eq!(outcome.anomalies().unwrap().matched_values, vec!["13.0", "thirteen"]);
    }

    #[test]
    fn test_numeric_string_on_integer_column_is_clean() {
        let t = table(df!["album_total_tracks" => [13i64, 16, 22]].unwrap());
        assert!(numeric_string(&t, "album_total_tracks").unwrap().is_clean());
    }

    #[test]
    fn test_text_checks_unknown_column() {
        let t = table(df!["track_name" => ["a"]].unwrap());
        assert!(matches!(
            encoding_anomaly(&t, "title"),
            Err(QualityError::UnknownColumn(_))
        ));
    }
}
