//! SAT result records.

use serde::{Deserialize, Serialize};

/// One entry of the SAT results dataset, exactly as received.
///
/// The API reports suppressed values as the literal string `"s"`; those fail
/// numeric validation like any other garbage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSatScore {
  #[serde(default)]
  pub dbn:               Option<String>,
  #[serde(default)]
  pub school_name:       Option<String>,
  #[serde(default, rename = "num_of_sat_test_takers")]
  pub test_taker_count:  Option<String>,
  #[serde(default, rename = "sat_critical_reading_avg_score")]
  pub reading_avg_score: Option<String>,
  #[serde(default, rename = "sat_math_avg_score")]
  pub math_avg_score:    Option<String>,
  #[serde(default, rename = "sat_writing_avg_score")]
  pub writing_avg_score: Option<String>,
}

/// A SAT record with every field present and numeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SatScore {
  pub dbn:                   String,
  pub test_taker_count:      i64,
  pub math_average_score:    i64,
  pub writing_average_score: i64,
  pub reading_average_score: i64,
}
