//! Column-level quality predicates.
//!
//! Every predicate is a pure function of a [`Table`](crate::table::Table), a
//! column name and its parameters. Cell-level predicates return a
//! [`CheckOutcome`](crate::types::CheckOutcome): `Clean` when nothing matched,
//! otherwise the row mask, the match count and the distinct offending values.
//! Column-level predicates return a plain `bool`.
//!
//! A predicate only fails when the column does not exist
//! ([`QualityError::UnknownColumn`](crate::error::QualityError::UnknownColumn));
//! an empty but well-typed column is always `Clean`.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_quality::predicates::{text_format, CasingPolicy};
//!
//! let outcome = text_format(&table, "track_name", CasingPolicy::Lower)?;
//! if let Some(result) = outcome.anomalies() {
//!     println!("{} names are not lowercase: {:?}", result.matched_count, result.examples(4));
//! }
//! ```

mod missing;
mod numeric;
mod text;

pub use missing::{duplicate_rows, null_cells, null_check};
pub use numeric::{RangeBounds, all_convertible, convertibility, is_numeric_column, range_check};
pub use text::{CasingPolicy, boolean_domain, encoding_anomaly, numeric_string, text_format};
