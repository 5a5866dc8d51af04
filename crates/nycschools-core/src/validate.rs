//! Record validation: loosely-typed API records in, strict domain values out.
//!
//! Validation is per record. A bad record is rejected with a [`Rejection`],
//! logged, and dropped; it never aborts the rest of the batch.

use thiserror::Error;

use crate::{
  sat::{RawSatScore, SatScore},
  school::{RawSchool, ValidatedSchool},
};

/// Why a raw record was turned away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
  #[error("dbn is missing or blank")]
  MissingKey,

  #[error("school name is missing or blank")]
  MissingName,

  #[error("{field} is missing")]
  MissingNumber { field: &'static str },

  #[error("{field} is not a base-10 integer: {value:?}")]
  InvalidNumber { field: &'static str, value: String },

  #[error("{field} must not be negative: {value}")]
  NegativeCount { field: &'static str, value: i64 },
}

/// The survivors of a batch plus how many were dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated<T> {
  pub accepted: Vec<T>,
  pub rejected: usize,
}

// ─── Field rules ─────────────────────────────────────────────────────────────

fn non_blank(value: Option<&str>) -> Option<&str> {
  value.filter(|v| !v.trim().is_empty())
}

fn integer(field: &'static str, value: Option<&str>) -> Result<i64, Rejection> {
  let raw = value.ok_or(Rejection::MissingNumber { field })?;
  raw.parse::<i64>().map_err(|_| Rejection::InvalidNumber {
    field,
    value: raw.to_owned(),
  })
}

fn count(field: &'static str, value: Option<&str>) -> Result<i64, Rejection> {
  let n = integer(field, value)?;
  if n < 0 {
    return Err(Rejection::NegativeCount { field, value: n });
  }
  Ok(n)
}

// ─── Single records ──────────────────────────────────────────────────────────

/// Validate one directory entry.
///
/// Start time, subway, zip code, and website are passed through untouched.
pub fn validate_school(raw: &RawSchool) -> Result<ValidatedSchool, Rejection> {
  let dbn = non_blank(raw.dbn.as_deref()).ok_or(Rejection::MissingKey)?;
  let name = non_blank(raw.school_name.as_deref()).ok_or(Rejection::MissingName)?;
  let total_students = count("total_students", raw.total_students.as_deref())?;

  Ok(ValidatedSchool {
    dbn: dbn.to_owned(),
    name: name.to_owned(),
    start_time: raw.start_time.clone(),
    subway: raw.subway.clone(),
    zip_code: raw.zip_code.clone(),
    website: raw.website.clone(),
    total_students,
  })
}

/// Validate one SAT record. All five fields must be present and numeric.
pub fn validate_sat_score(raw: &RawSatScore) -> Result<SatScore, Rejection> {
  let dbn = non_blank(raw.dbn.as_deref()).ok_or(Rejection::MissingKey)?;
  non_blank(raw.school_name.as_deref()).ok_or(Rejection::MissingName)?;

  Ok(SatScore {
    dbn:                   dbn.to_owned(),
    test_taker_count:      count("num_of_sat_test_takers", raw.test_taker_count.as_deref())?,
    reading_average_score: integer(
      "sat_critical_reading_avg_score",
      raw.reading_avg_score.as_deref(),
    )?,
    math_average_score:    integer("sat_math_avg_score", raw.math_avg_score.as_deref())?,
    writing_average_score: integer("sat_writing_avg_score", raw.writing_avg_score.as_deref())?,
  })
}

// ─── Batches ─────────────────────────────────────────────────────────────────

/// Validate a directory batch, logging every rejection with its raw record.
pub fn validate_schools(raws: &[RawSchool]) -> Validated<ValidatedSchool> {
  let mut accepted = Vec::with_capacity(raws.len());
  let mut rejected = 0;
  for raw in raws {
    match validate_school(raw) {
      Ok(school) => accepted.push(school),
      Err(reason) => {
        tracing::warn!(%reason, record = ?raw, "rejected school record from API");
        rejected += 1;
      }
    }
  }
  Validated { accepted, rejected }
}

/// Validate a SAT batch, logging every rejection with its raw record.
pub fn validate_sat_scores(raws: &[RawSatScore]) -> Validated<SatScore> {
  let mut accepted = Vec::with_capacity(raws.len());
  let mut rejected = 0;
  for raw in raws {
    match validate_sat_score(raw) {
      Ok(score) => accepted.push(score),
      Err(reason) => {
        tracing::warn!(%reason, record = ?raw, "rejected SAT record from API");
        rejected += 1;
      }
    }
  }
  Validated { accepted, rejected }
}
