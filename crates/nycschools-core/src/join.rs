//! Left join of validated schools onto validated SAT results.

use std::collections::HashMap;

use crate::{
  sat::SatScore,
  school::{MergedSchool, ValidatedSchool},
};

/// Collapse SAT records into a `dbn → record` map.
///
/// The API does not guarantee unique keys. When two records share a `dbn`
/// the one appearing later in `scores` replaces the earlier one.
pub fn index_by_dbn(scores: Vec<SatScore>) -> HashMap<String, SatScore> {
  let mut index = HashMap::with_capacity(scores.len());
  for score in scores {
    if let Some(previous) = index.insert(score.dbn.clone(), score) {
      tracing::debug!(dbn = %previous.dbn, "duplicate SAT record; keeping the later one");
    }
  }
  index
}

/// Share of a school's students that took the SAT, as a whole percentage.
///
/// Rounds half away from zero, which is half-up for the non-negative inputs
/// validation admits. `None` when the school reports no students.
pub fn take_rate_percentage(test_takers: i64, total_students: i64) -> Option<i64> {
  if total_students == 0 {
    return None;
  }
  let ratio = test_takers as f64 / total_students as f64;
  Some((ratio * 100.0).round() as i64)
}

/// Join `schools` with `scores` by exact `dbn` match.
///
/// Every school yields exactly one [`MergedSchool`], in input order; schools
/// without a matching SAT record get `None` for every score field.
pub fn merge(schools: Vec<ValidatedSchool>, scores: Vec<SatScore>) -> Vec<MergedSchool> {
  let index = index_by_dbn(scores);

  schools
    .into_iter()
    .map(|school| {
      let score = index.get(&school.dbn);
      MergedSchool {
        count_of_sat_takers:       score.map(|s| s.test_taker_count),
        percentage_of_sat_takers:  score
          .and_then(|s| take_rate_percentage(s.test_taker_count, school.total_students)),
        math_sat_average_score:    score.map(|s| s.math_average_score),
        writing_sat_average_score: score.map(|s| s.writing_average_score),
        reading_sat_average_score: score.map(|s| s.reading_average_score),
        dbn:                       school.dbn,
        name:                      school.name,
        start_time:                school.start_time,
        subway:                    school.subway,
        zip_code:                  school.zip_code,
        website:                   school.website,
        total_students:            school.total_students,
      }
    })
    .collect()
}
