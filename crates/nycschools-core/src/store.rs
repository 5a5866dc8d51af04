//! The `SchoolStore` trait.
//!
//! Implemented by storage backends (e.g. `nycschools-store-sqlite`). The
//! [`CacheFirstRepository`](crate::CacheFirstRepository) depends on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::school::MergedSchool;

/// Abstraction over the persistent, `dbn`-indexed school cache.
///
/// All methods return `Send` futures so the trait can be used from spawned
/// tokio tasks.
pub trait SchoolStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every cached school, in the store's own order.
  fn select_all(
    &self,
  ) -> impl Future<Output = Result<Vec<MergedSchool>, Self::Error>> + Send + '_;

  /// The school with this `dbn`, if cached.
  fn select_by_dbn<'a>(
    &'a self,
    dbn: &'a str,
  ) -> impl Future<Output = Result<Option<MergedSchool>, Self::Error>> + Send + 'a;

  /// Write all `schools` in one transaction.
  ///
  /// Either every row is committed or, on any failure, none is.
  fn insert_all(
    &self,
    schools: Vec<MergedSchool>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
