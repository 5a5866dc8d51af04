//! Pipeline tests for `CacheFirstRepository` against in-memory fakes.

use std::{
  sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
  },
  time::Duration,
};

use thiserror::Error;
use tokio::sync::Notify;

use crate::{
  CacheFirstRepository, Error,
  sat::RawSatScore,
  school::{MergedSchool, RawSchool},
  source::SchoolDataSource,
  store::SchoolStore,
};

// ─── Fakes ───────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
#[error("{0}")]
struct FakeError(String);

/// A data source with canned responses that counts how often it is asked.
#[derive(Default)]
struct FakeSource {
  schools:    Option<Vec<RawSchool>>,
  sat_scores: Option<Vec<RawSatScore>>,
  calls:      AtomicUsize,
  gate:       Option<Arc<Notify>>,
}

impl FakeSource {
  fn new(schools: Option<Vec<RawSchool>>, sat_scores: Option<Vec<RawSatScore>>) -> Self {
    Self { schools, sat_scores, ..Default::default() }
  }

  /// Hold the school request until `gate` is notified.
  fn gated(mut self, gate: Arc<Notify>) -> Self {
    self.gate = Some(gate);
    self
  }

  fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
}

impl SchoolDataSource for FakeSource {
  type Error = FakeError;

  async fn fetch_schools(&self) -> Result<Vec<RawSchool>, FakeError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if let Some(gate) = &self.gate {
      gate.notified().await;
    }
    self.schools.clone().ok_or_else(|| FakeError("HTTP 500".into()))
  }

  async fn fetch_sat_scores(&self) -> Result<Vec<RawSatScore>, FakeError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    self.sat_scores.clone().ok_or_else(|| FakeError("HTTP 503".into()))
  }
}

/// An insertion-ordered store whose batch writes are all-or-nothing.
#[derive(Default)]
struct MemoryStore {
  rows:         Mutex<Vec<MergedSchool>>,
  fail_inserts: AtomicBool,
}

impl MemoryStore {
  fn rows(&self) -> Vec<MergedSchool> { self.rows.lock().unwrap().clone() }
}

impl SchoolStore for MemoryStore {
  type Error = FakeError;

  async fn select_all(&self) -> Result<Vec<MergedSchool>, FakeError> { Ok(self.rows()) }

  async fn select_by_dbn(&self, dbn: &str) -> Result<Option<MergedSchool>, FakeError> {
    Ok(self.rows().into_iter().find(|s| s.dbn == dbn))
  }

  async fn insert_all(&self, schools: Vec<MergedSchool>) -> Result<(), FakeError> {
    if self.fail_inserts.load(Ordering::SeqCst) {
      return Err(FakeError("disk full".into()));
    }
    let mut rows = self.rows.lock().unwrap();
    let mut staged = rows.clone();
    for school in schools {
      if staged.iter().any(|s| s.dbn == school.dbn) {
        return Err(FakeError(format!("duplicate dbn {}", school.dbn)));
      }
      staged.push(school);
    }
    *rows = staged;
    Ok(())
  }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn raw_school(dbn: &str, name: &str, total: &str) -> RawSchool {
  RawSchool {
    dbn:            Some(dbn.into()),
    school_name:    Some(name.into()),
    total_students: Some(total.into()),
    ..Default::default()
  }
}

fn raw_sat(dbn: &str, takers: &str, reading: &str, math: &str, writing: &str) -> RawSatScore {
  RawSatScore {
    dbn:               Some(dbn.into()),
    school_name:       Some("name".into()),
    test_taker_count:  Some(takers.into()),
    reading_avg_score: Some(reading.into()),
    math_avg_score:    Some(math.into()),
    writing_avg_score: Some(writing.into()),
  }
}

fn fixture(
  source: FakeSource,
) -> (CacheFirstRepository<FakeSource, MemoryStore>, Arc<FakeSource>, Arc<MemoryStore>) {
  let source = Arc::new(source);
  let store = Arc::new(MemoryStore::default());
  (CacheFirstRepository::new(Arc::clone(&source), Arc::clone(&store)), source, store)
}

// ─── load_all ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn load_all_fetches_merges_and_caches() {
  let (repo, source, store) = fixture(FakeSource::new(
    Some(vec![raw_school("dbn1", "school1", "100")]),
    Some(vec![raw_sat("dbn1", "100", "100", "101", "102")]),
  ));

  let schools = repo.load_all().await.unwrap();

  assert_eq!(
    schools,
    vec![MergedSchool {
      dbn:                       "dbn1".into(),
      name:                      "school1".into(),
      start_time:                None,
      subway:                    None,
      zip_code:                  None,
      website:                   None,
      total_students:            100,
      count_of_sat_takers:       Some(100),
      percentage_of_sat_takers:  Some(100),
      math_sat_average_score:    Some(101),
      writing_sat_average_score: Some(102),
      reading_sat_average_score: Some(100),
    }]
  );
  assert_eq!(store.rows(), schools);
  assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn second_load_all_reads_cache_without_fetching() {
  let (repo, source, _store) = fixture(FakeSource::new(
    Some(vec![raw_school("a", "Alpha", "10"), raw_school("b", "Beta", "20")]),
    Some(vec![]),
  ));

  let first = repo.load_all().await.unwrap();
  let calls_after_first = source.calls();
  let second = repo.load_all().await.unwrap();

  assert_eq!(first, second);
  assert_eq!(source.calls(), calls_after_first);
}

#[tokio::test]
async fn non_empty_store_is_never_refetched() {
  let (repo, source, store) = fixture(FakeSource::default());
  store
    .insert_all(vec![MergedSchool {
      dbn:                       "cached".into(),
      name:                      "Cached".into(),
      start_time:                None,
      subway:                    None,
      zip_code:                  None,
      website:                   None,
      total_students:            1,
      count_of_sat_takers:       None,
      percentage_of_sat_takers:  None,
      math_sat_average_score:    None,
      writing_sat_average_score: None,
      reading_sat_average_score: None,
    }])
    .await
    .unwrap();

  let schools = repo.load_all().await.unwrap();
  assert_eq!(schools.len(), 1);
  assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn invalid_records_are_left_out() {
  let (repo, _source, _store) = fixture(FakeSource::new(
    Some(vec![
      raw_school("good", "Good", "40"),
      raw_school("", "Blank key", "40"),
      raw_school("nan", "Bad count", "forty"),
    ]),
    Some(vec![
      raw_sat("good", "s", "s", "s", "s"),
      raw_sat("nan", "10", "400", "400", "400"),
    ]),
  ));

  let report = repo.ensure_populated().await.unwrap().unwrap();
  assert_eq!(report.schools_received, 3);
  assert_eq!(report.schools_rejected, 2);
  assert_eq!(report.sat_scores_rejected, 1);
  assert_eq!(report.persisted, 1);

  let schools = repo.load_all().await.unwrap();
  assert_eq!(schools.len(), 1);
  assert_eq!(schools[0].dbn, "good");
  assert!(!schools[0].has_sat_scores());
}

#[tokio::test]
async fn failed_sat_fetch_still_caches_schools() {
  let (repo, _source, _store) =
    fixture(FakeSource::new(Some(vec![raw_school("dbn1", "school1", "100")]), None));

  let report = repo.ensure_populated().await.unwrap().unwrap();
  assert!(report.sat_scores_failed);
  assert!(!report.schools_failed);

  let schools = repo.load_all().await.unwrap();
  assert_eq!(schools.len(), 1);
  assert_eq!(schools[0].count_of_sat_takers, None);
  assert_eq!(schools[0].percentage_of_sat_takers, None);
}

#[tokio::test]
async fn failed_school_fetch_yields_empty_result_and_retries_next_time() {
  let (repo, source, store) =
    fixture(FakeSource::new(None, Some(vec![raw_sat("dbn1", "1", "1", "1", "1")])));

  let schools = repo.load_all().await.unwrap();
  assert!(schools.is_empty());
  assert!(store.rows().is_empty());

  // Nothing was cached, so the next call goes back to the network.
  repo.load_all().await.unwrap();
  assert_eq!(source.calls(), 4);
}

#[tokio::test]
async fn persistence_failure_propagates_and_writes_nothing() {
  let (repo, _source, store) = fixture(FakeSource::new(
    Some(vec![raw_school("a", "A", "1"), raw_school("b", "B", "2")]),
    Some(vec![]),
  ));
  store.fail_inserts.store(true, Ordering::SeqCst);

  let err = repo.load_all().await.unwrap_err();
  assert!(matches!(err, Error::Store(_)));
  assert!(store.select_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_school_keys_roll_back_the_whole_batch() {
  let (repo, _source, store) = fixture(FakeSource::new(
    Some(vec![
      raw_school("a", "A", "1"),
      raw_school("dup", "First", "2"),
      raw_school("dup", "Second", "3"),
    ]),
    Some(vec![]),
  ));

  let err = repo.load_all().await.unwrap_err();
  assert!(matches!(err, Error::Store(_)));
  assert!(store.rows().is_empty());
}

// ─── Concurrency ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn sync_outlives_a_cancelled_caller() {
  let gate = Arc::new(Notify::new());
  let (repo, _source, store) = fixture(
    FakeSource::new(
      Some(vec![raw_school("dbn1", "school1", "100")]),
      Some(vec![raw_sat("dbn1", "50", "400", "410", "420")]),
    )
    .gated(Arc::clone(&gate)),
  );

  let attempt = tokio::time::timeout(Duration::from_millis(20), repo.load_all()).await;
  assert!(attempt.is_err(), "load_all should still be waiting on the gated fetch");
  assert!(store.rows().is_empty());

  gate.notify_one();
  for _ in 0..100 {
    if !store.rows().is_empty() {
      break;
    }
    tokio::time::sleep(Duration::from_millis(10)).await;
  }

  let rows = store.rows();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].percentage_of_sat_takers, Some(50));
}

#[tokio::test]
async fn concurrent_load_all_fetches_once() {
  let (repo, source, _store) = fixture(FakeSource::new(
    Some(vec![raw_school("a", "A", "10")]),
    Some(vec![raw_sat("a", "5", "500", "500", "500")]),
  ));

  let (first, second) = tokio::join!(repo.load_all(), repo.load_all());
  assert_eq!(first.unwrap(), second.unwrap());
  assert_eq!(source.calls(), 2);
}

// ─── load_by_dbn ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn load_by_dbn_finds_cached_school() {
  let (repo, _source, _store) = fixture(FakeSource::new(
    Some(vec![raw_school("a", "Alpha", "10"), raw_school("b", "Beta", "20")]),
    Some(vec![raw_sat("b", "5", "500", "510", "520")]),
  ));
  repo.load_all().await.unwrap();

  let b = repo.load_by_dbn("b").await.unwrap();
  assert_eq!(b.name, "Beta");
  assert_eq!(b.percentage_of_sat_takers, Some(25));
}

#[tokio::test]
async fn load_by_dbn_reports_not_found_without_fetching() {
  let (repo, source, _store) =
    fixture(FakeSource::new(Some(vec![raw_school("a", "A", "1")]), Some(vec![])));

  let err = repo.load_by_dbn("a").await.unwrap_err();
  assert!(err.is_not_found());
  assert!(matches!(err, Error::SchoolNotFound(ref dbn) if dbn == "a"));
  assert_eq!(source.calls(), 0);
}
