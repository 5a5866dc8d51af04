//! SQL schema for the schools cache.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per school, written once by the populating sync and never updated.
CREATE TABLE IF NOT EXISTS schools (
    dbn                       TEXT PRIMARY KEY,
    name                      TEXT NOT NULL,
    start_time                TEXT,
    subway                    TEXT,
    zip_code                  TEXT,
    website                   TEXT,
    total_students            INTEGER NOT NULL CHECK (total_students >= 0),
    sat_test_taker_count      INTEGER,
    sat_test_taker_percentage INTEGER,
    math_sat_average_score    INTEGER,
    writing_sat_average_score INTEGER,
    reading_sat_average_score INTEGER
);

CREATE INDEX IF NOT EXISTS schools_name_idx ON schools(name COLLATE NOCASE);

PRAGMA user_version = 1;
";

/// Column list shared by every `SELECT`, in the order [`crate::encode`]
/// reads them.
pub const SCHOOL_COLUMNS: &str = "dbn, name, start_time, subway, zip_code, website, \
   total_students, sat_test_taker_count, sat_test_taker_percentage, \
   math_sat_average_score, writing_sat_average_score, reading_sat_average_score";
