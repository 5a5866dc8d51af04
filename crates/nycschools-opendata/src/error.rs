//! Error type for `nycschools-opendata`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("GET {path} failed: {source}")]
  Http {
    path:   &'static str,
    #[source]
    source: reqwest::Error,
  },

  #[error("GET {path} → {status}")]
  Status {
    path:   &'static str,
    status: reqwest::StatusCode,
  },

  #[error("deserialising {path}: {source}")]
  Decode {
    path:   &'static str,
    #[source]
    source: serde_json::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
