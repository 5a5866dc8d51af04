//! Core types and pipeline for the NYC schools SAT cache.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! remote API and the persistent store are reached through the
//! [`source::SchoolDataSource`] and [`store::SchoolStore`] traits; concrete
//! implementations live in `nycschools-opendata` and
//! `nycschools-store-sqlite`.

pub mod error;
pub mod join;
pub mod repository;
pub mod sat;
pub mod school;
pub mod source;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
pub use repository::{CacheFirstRepository, SyncReport};

#[cfg(test)]
mod tests;
