//! The remote-data abstraction and the Fetch Coordinator.
//!
//! [`SchoolDataSource`] is implemented by `nycschools-opendata` (and by fakes
//! in tests). [`fetch_all`] issues both requests concurrently and folds
//! failures into empty lists.

use std::future::Future;

use crate::{sat::RawSatScore, school::RawSchool};

/// Abstraction over the open-data API serving both datasets.
pub trait SchoolDataSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the whole high-school directory.
  fn fetch_schools(
    &self,
  ) -> impl Future<Output = Result<Vec<RawSchool>, Self::Error>> + Send + '_;

  /// Fetch the whole SAT results table.
  fn fetch_sat_scores(
    &self,
  ) -> impl Future<Output = Result<Vec<RawSatScore>, Self::Error>> + Send + '_;
}

/// Both raw datasets from one coordinated fetch.
#[derive(Debug, Clone, Default)]
pub struct FetchedData {
  pub schools:           Vec<RawSchool>,
  pub sat_scores:        Vec<RawSatScore>,
  /// Set when the directory request failed and `schools` is a stand-in.
  pub schools_failed:    bool,
  /// Set when the SAT request failed and `sat_scores` is a stand-in.
  pub sat_scores_failed: bool,
}

/// Fetch both datasets concurrently and wait for both.
///
/// A failed request is logged and replaced by an empty list. Downstream this
/// is indistinguishable from an empty dataset; the `*_failed` flags exist for
/// reporting only and do not change what gets merged.
pub async fn fetch_all<A>(source: &A) -> FetchedData
where
  A: SchoolDataSource,
{
  tracing::debug!("starting concurrent fetch of schools and SAT scores");
  let (schools, sat_scores) = tokio::join!(source.fetch_schools(), source.fetch_sat_scores());

  let (schools, schools_failed) = or_empty("schools", schools);
  let (sat_scores, sat_scores_failed) = or_empty("SAT scores", sat_scores);

  FetchedData { schools, sat_scores, schools_failed, sat_scores_failed }
}

fn or_empty<T, E: std::error::Error>(dataset: &str, result: Result<Vec<T>, E>) -> (Vec<T>, bool) {
  match result {
    Ok(items) => {
      tracing::debug!(dataset, count = items.len(), "fetch finished");
      (items, false)
    }
    Err(err) => {
      tracing::warn!(dataset, error = %err, "fetch failed; continuing with an empty list");
      (Vec::new(), true)
    }
  }
}
