//! Mapping between [`MergedSchool`] and rows of the `schools` table.
//!
//! Every column maps one-to-one onto a field; absent score fields are stored
//! as SQL `NULL`.

use nycschools_core::school::MergedSchool;
use rusqlite::{Row, Statement};

/// Read a row selected with [`SCHOOL_COLUMNS`](crate::schema::SCHOOL_COLUMNS).
pub fn decode_school(row: &Row<'_>) -> rusqlite::Result<MergedSchool> {
  Ok(MergedSchool {
    dbn:                       row.get(0)?,
    name:                      row.get(1)?,
    start_time:                row.get(2)?,
    subway:                    row.get(3)?,
    zip_code:                  row.get(4)?,
    website:                   row.get(5)?,
    total_students:            row.get(6)?,
    count_of_sat_takers:       row.get(7)?,
    percentage_of_sat_takers:  row.get(8)?,
    math_sat_average_score:    row.get(9)?,
    writing_sat_average_score: row.get(10)?,
    reading_sat_average_score: row.get(11)?,
  })
}

/// Execute a prepared `INSERT` binding every column of `school`.
pub fn insert_school(stmt: &mut Statement<'_>, school: &MergedSchool) -> rusqlite::Result<()> {
  stmt.execute(rusqlite::params![
    school.dbn,
    school.name,
    school.start_time,
    school.subway,
    school.zip_code,
    school.website,
    school.total_students,
    school.count_of_sat_takers,
    school.percentage_of_sat_takers,
    school.math_sat_average_score,
    school.writing_sat_average_score,
    school.reading_sat_average_score,
  ])?;
  Ok(())
}
