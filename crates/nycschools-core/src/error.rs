//! Error types for `nycschools-core`.

use thiserror::Error;

/// Failures surfaced by the [`CacheFirstRepository`](crate::CacheFirstRepository).
///
/// Record rejections and fetch failures never appear here; they are absorbed
/// inside the pipeline and only logged.
#[derive(Debug, Error)]
pub enum Error {
  #[error("school not found: {0}")]
  SchoolNotFound(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("sync task failed: {0}")]
  SyncTask(#[from] tokio::task::JoinError),
}

impl Error {
  pub(crate) fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(err))
  }

  /// `true` for the distinct "no such key" condition, as opposed to a
  /// structural failure.
  pub fn is_not_found(&self) -> bool { matches!(self, Error::SchoolNotFound(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
