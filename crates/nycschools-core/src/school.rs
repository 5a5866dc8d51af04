//! School records at each stage of the pipeline.
//!
//! [`RawSchool`] is what the directory endpoint sends, [`ValidatedSchool`] is
//! what survives validation, and [`MergedSchool`] is the persisted entity
//! carrying SAT results alongside the directory fields.

use serde::{Deserialize, Serialize};

// ─── Raw ─────────────────────────────────────────────────────────────────────

/// One entry of the school directory, exactly as received.
///
/// Every field is a nullable string; nothing here is trusted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSchool {
  #[serde(default)]
  pub dbn:            Option<String>,
  #[serde(default)]
  pub school_name:    Option<String>,
  #[serde(default)]
  pub start_time:     Option<String>,
  #[serde(default)]
  pub subway:         Option<String>,
  #[serde(default, rename = "zip")]
  pub zip_code:       Option<String>,
  #[serde(default)]
  pub website:        Option<String>,
  #[serde(default)]
  pub total_students: Option<String>,
}

// ─── Validated ───────────────────────────────────────────────────────────────

/// A directory entry whose key, name, and student count are well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSchool {
  pub dbn:            String,
  pub name:           String,
  pub start_time:     Option<String>,
  pub subway:         Option<String>,
  pub zip_code:       Option<String>,
  pub website:        Option<String>,
  pub total_students: i64,
}

// ─── Merged ──────────────────────────────────────────────────────────────────

/// A school joined with its SAT results; the unit stored in and returned
/// from the cache.
///
/// All score fields are `None` when the SAT dataset had no usable record for
/// this school. `percentage_of_sat_takers` is additionally `None` when the
/// school reports zero students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedSchool {
  pub dbn:                       String,
  pub name:                      String,
  pub start_time:                Option<String>,
  pub subway:                    Option<String>,
  pub zip_code:                  Option<String>,
  pub website:                   Option<String>,
  pub total_students:            i64,
  pub count_of_sat_takers:       Option<i64>,
  pub percentage_of_sat_takers:  Option<i64>,
  pub math_sat_average_score:    Option<i64>,
  pub writing_sat_average_score: Option<i64>,
  pub reading_sat_average_score: Option<i64>,
}

impl MergedSchool {
  /// Whether a SAT record was joined onto this school.
  pub fn has_sat_scores(&self) -> bool { self.count_of_sat_takers.is_some() }
}
