//! Plain-text rendering of merged school records.

use std::fmt::Write as _;

use nycschools_core::school::MergedSchool;

fn or_dash<T: ToString>(value: Option<T>) -> String {
  value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// One line per school: key, name, and SAT summary.
pub fn summary_line(school: &MergedSchool) -> String {
  let sat = match school.percentage_of_sat_takers {
    Some(pct) => format!(
      "SAT takers {pct}%  math {}  reading {}  writing {}",
      or_dash(school.math_sat_average_score),
      or_dash(school.reading_sat_average_score),
      or_dash(school.writing_sat_average_score),
    ),
    None if school.has_sat_scores() => "SAT takers n/a".to_string(),
    None => "no SAT data".to_string(),
  };
  format!("{:<8} {}  ({sat})", school.dbn, school.name)
}

/// Every field of one school, one per line.
pub fn detail(school: &MergedSchool) -> String {
  let mut out = String::new();
  let fields = [
    ("DBN", school.dbn.clone()),
    ("Name", school.name.clone()),
    ("Start time", or_dash(school.start_time.as_deref())),
    ("Subway", or_dash(school.subway.as_deref())),
    ("Zip code", or_dash(school.zip_code.as_deref())),
    ("Website", or_dash(school.website.as_deref())),
    ("Total students", school.total_students.to_string()),
    ("SAT takers", or_dash(school.count_of_sat_takers)),
    ("SAT takers %", or_dash(school.percentage_of_sat_takers)),
    ("SAT math", or_dash(school.math_sat_average_score)),
    ("SAT reading", or_dash(school.reading_sat_average_score)),
    ("SAT writing", or_dash(school.writing_sat_average_score)),
  ];
  for (label, value) in fields {
    let _ = writeln!(out, "{label:<15} {value}");
  }
  out
}
