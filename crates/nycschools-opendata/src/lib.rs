//! Async HTTP client for the NYC Open Data (Socrata) school datasets.
//!
//! [`OpenDataClient`] implements [`SchoolDataSource`], fetching the high
//! school directory and the SAT results table as full lists.

mod client;

pub mod error;

pub use client::{
  DEFAULT_BASE_URL, OpenDataClient, OpenDataConfig, SAT_SCORES_PATH, SCHOOLS_PATH,
};
pub use error::{Error, Result};
