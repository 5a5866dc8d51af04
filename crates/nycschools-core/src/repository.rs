//! [`CacheFirstRepository`]: read from the store, populate it from the API
//! only when it is empty.
//!
//! The cached dataset is treated as immutable once written: there is no
//! freshness check and no refresh path. Per process the cache moves from
//! empty, through a single populating sync, to populated.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
  Error, Result,
  join::merge,
  school::MergedSchool,
  source::{SchoolDataSource, fetch_all},
  store::SchoolStore,
  validate::{validate_sat_scores, validate_schools},
};

/// Counters from one fetch-validate-merge-persist run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
  pub schools_received:    usize,
  pub sat_scores_received: usize,
  pub schools_rejected:    usize,
  pub sat_scores_rejected: usize,
  pub schools_failed:      bool,
  pub sat_scores_failed:   bool,
  pub persisted:           usize,
}

/// Cache-first access to the merged school dataset.
///
/// Clones share the source, the store, and the sync gate.
pub struct CacheFirstRepository<A, S> {
  source:    Arc<A>,
  store:     Arc<S>,
  sync_gate: Arc<Mutex<()>>,
}

impl<A, S> Clone for CacheFirstRepository<A, S> {
  fn clone(&self) -> Self {
    Self {
      source:    Arc::clone(&self.source),
      store:     Arc::clone(&self.store),
      sync_gate: Arc::clone(&self.sync_gate),
    }
  }
}

impl<A, S> CacheFirstRepository<A, S>
where
  A: SchoolDataSource + 'static,
  S: SchoolStore + 'static,
{
  pub fn new(source: Arc<A>, store: Arc<S>) -> Self {
    Self { source, store, sync_gate: Arc::new(Mutex::new(())) }
  }

  /// Return every cached school, populating the cache from the API first if
  /// it is empty.
  ///
  /// A non-empty store is returned as-is without touching the network. On
  /// the populating path the rows are re-read after the write commits so the
  /// store's ordering applies.
  pub async fn load_all(&self) -> Result<Vec<MergedSchool>> {
    let cached = self.store.select_all().await.map_err(Error::store)?;
    if !cached.is_empty() {
      tracing::debug!(count = cached.len(), "returning schools from cache");
      return Ok(cached);
    }

    self.ensure_populated().await?;

    let schools = self.store.select_all().await.map_err(Error::store)?;
    tracing::debug!(count = schools.len(), "returning freshly cached schools");
    Ok(schools)
  }

  /// Return the cached school with this `dbn`.
  ///
  /// Never fetches; an unpopulated cache simply yields
  /// [`Error::SchoolNotFound`].
  pub async fn load_by_dbn(&self, dbn: &str) -> Result<MergedSchool> {
    self
      .store
      .select_by_dbn(dbn)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::SchoolNotFound(dbn.to_owned()))
  }

  /// Run the populating sync if the store is still empty.
  ///
  /// The sync runs on a detached task: dropping the returned future does not
  /// cancel the fetch, and its result is still persisted. Concurrent callers
  /// are serialised on the sync gate; the ones that lose the race find the
  /// store populated and return `Ok(None)`.
  pub async fn ensure_populated(&self) -> Result<Option<SyncReport>> {
    let task = tokio::spawn(populate(
      Arc::clone(&self.source),
      Arc::clone(&self.store),
      Arc::clone(&self.sync_gate),
    ));
    task.await?
  }
}

async fn populate<A, S>(
  source: Arc<A>,
  store: Arc<S>,
  sync_gate: Arc<Mutex<()>>,
) -> Result<Option<SyncReport>>
where
  A: SchoolDataSource,
  S: SchoolStore,
{
  let _guard = sync_gate.lock().await;

  if !store.select_all().await.map_err(Error::store)?.is_empty() {
    tracing::debug!("cache already populated; skipping sync");
    return Ok(None);
  }

  tracing::info!("cache is empty; loading schools and SAT scores from the API");
  let fetched = fetch_all(source.as_ref()).await;

  let schools = validate_schools(&fetched.schools);
  let scores = validate_sat_scores(&fetched.sat_scores);

  let mut report = SyncReport {
    schools_received:    fetched.schools.len(),
    sat_scores_received: fetched.sat_scores.len(),
    schools_rejected:    schools.rejected,
    sat_scores_rejected: scores.rejected,
    schools_failed:      fetched.schools_failed,
    sat_scores_failed:   fetched.sat_scores_failed,
    persisted:           0,
  };

  let merged = merge(schools.accepted, scores.accepted);
  report.persisted = merged.len();

  store.insert_all(merged).await.map_err(Error::store)?;

  tracing::info!(
    received = report.schools_received,
    sat_received = report.sat_scores_received,
    rejected = report.schools_rejected,
    sat_rejected = report.sat_scores_rejected,
    persisted = report.persisted,
    "cached merged school data"
  );
  Ok(Some(report))
}
