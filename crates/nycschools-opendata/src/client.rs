//! [`OpenDataClient`]: the `reqwest` implementation of [`SchoolDataSource`].

use std::time::Duration;

use nycschools_core::{sat::RawSatScore, school::RawSchool, source::SchoolDataSource};
use reqwest::{
  Client,
  header::{HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;

use crate::{Error, Result};

/// Where the city publishes its open datasets.
pub const DEFAULT_BASE_URL: &str = "https://data.cityofnewyork.us/resource/";

/// 2017 DOE high school directory.
pub const SCHOOLS_PATH: &str = "s3k6-pzi2.json";

/// 2012 SAT results.
pub const SAT_SCORES_PATH: &str = "f9bf-2cp4.json";

const USER_AGENT_VALUE: &str = concat!("nycschools/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the open-data API.
#[derive(Debug, Clone)]
pub struct OpenDataConfig {
  pub base_url: String,
  pub timeout:  Duration,
}

impl Default for OpenDataConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_string(),
      timeout:  Duration::from_secs(30),
    }
  }
}

/// Async HTTP client for the two school datasets.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct OpenDataClient {
  client: Client,
  config: OpenDataConfig,
}

impl OpenDataClient {
  pub fn new(config: OpenDataConfig) -> Result<Self> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

    let client = Client::builder()
      .timeout(config.timeout)
      .default_headers(headers)
      .build()
      .map_err(Error::Client)?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// `GET {base}/{path}` and decode a JSON array.
  async fn get_list<T: DeserializeOwned>(&self, path: &'static str) -> Result<Vec<T>> {
    tracing::debug!(path, "request start");

    let resp = self
      .client
      .get(self.url(path))
      .send()
      .await
      .map_err(|source| Error::Http { path, source })?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::Status { path, status });
    }

    let body = resp.bytes().await.map_err(|source| Error::Http { path, source })?;
    let items: Vec<T> =
      serde_json::from_slice(&body).map_err(|source| Error::Decode { path, source })?;

    tracing::debug!(path, count = items.len(), "request finish");
    Ok(items)
  }
}

impl SchoolDataSource for OpenDataClient {
  type Error = Error;

  /// `GET /s3k6-pzi2.json`
  async fn fetch_schools(&self) -> Result<Vec<RawSchool>> { self.get_list(SCHOOLS_PATH).await }

  /// `GET /f9bf-2cp4.json`
  async fn fetch_sat_scores(&self) -> Result<Vec<RawSatScore>> {
    self.get_list(SAT_SCORES_PATH).await
  }
}
