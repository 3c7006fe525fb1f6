use super::{CheckKind, DateCeiling, RangeSpec, RuleDescriptor, RuleTarget};
use crate::config::EvaluationConfig;
use crate::types::Dimension;
use chrono::NaiveDate;

/// Earliest plausible album release date in the catalog.
pub const RELEASE_DATE_FLOOR: NaiveDate = match NaiveDate::from_ymd_opt(2006, 1, 1) {
    Some(date) => date,
    None => panic!("invalid release date floor"),
};

/// Numeric plausibility bounds, `(column, min, max)`.
const NUMERIC_RANGES: [(&str, f64, f64); 10] = [
    ("audio_features.danceability", 0.0, 1.0),
    ("audio_features.energy", 0.0, 1.0),
    ("audio_features.acousticness", 0.0, 1.0),
    ("audio_features.liveness", 0.0, 1.0),
    ("audio_features.key", -1.0, 11.0),
    ("audio_features.loudness", -60.0, 0.0),
    ("audio_features.time_signature", 3.0, 7.0),
    ("track_popularity", 0.0, 100.0),
    ("artist_popularity", 0.0, 100.0),
    ("duration_ms", 82_000.0, 10_000_000.0),
];

/// The rule table for music catalog datasets.
///
/// Consistency and Timeliness carry a single fixed-zero placeholder so every
/// dimension is present in the evaluation.
pub fn catalog_rules(config: &EvaluationConfig) -> Vec<RuleDescriptor> {
    let mut rules = vec![
        RuleDescriptor::new(
            Dimension::Completeness,
            RuleTarget::AllColumns,
            CheckKind::Null,
        ),
        RuleDescriptor::new(
            Dimension::Uniqueness,
            RuleTarget::WholeTable,
            CheckKind::DuplicateRows,
        ),
        RuleDescriptor::column(
            Dimension::Validity,
            "track_name",
            CheckKind::TextFormat {
                policy: config.casing_policy,
            },
        ),
        RuleDescriptor::column(Dimension::Validity, "track_name", CheckKind::EncodingAnomaly),
        RuleDescriptor::column(
            Dimension::Validity,
            "explicit",
            CheckKind::BooleanDomain {
                true_token: config.true_token.clone(),
                false_token: config.false_token.clone(),
            },
        ),
        RuleDescriptor::column(
            Dimension::Validity,
            "album_total_tracks",
            CheckKind::NumericString,
        ),
        RuleDescriptor::column(
            Dimension::Validity,
            "audio_features.instrumentalness",
            CheckKind::NumericStorage,
        ),
        RuleDescriptor::column(
            Dimension::Validity,
            "audio_features.instrumentalness",
            CheckKind::Convertible,
        ),
        RuleDescriptor::column(Dimension::Validity, "track_id", CheckKind::Null),
    ];

    rules.extend(NUMERIC_RANGES.iter().map(|&(column, min, max)| {
        RuleDescriptor::column(
            Dimension::Accuracy,
            column,
            CheckKind::Range {
                bounds: RangeSpec::Numeric { min, max },
            },
        )
    }));

    rules.push(RuleDescriptor::column(
        Dimension::Accuracy,
        "album_release_date",
        CheckKind::Range {
            bounds: RangeSpec::Date {
                min: config.release_date_floor,
                max: DateCeiling::AsOf,
            },
        },
    ));

    for dimension in [Dimension::Consistency, Dimension::Timeliness] {
        rules.push(RuleDescriptor::new(
            dimension,
            RuleTarget::Nothing,
            CheckKind::FixedZero,
        ));
    }

    rules
}
