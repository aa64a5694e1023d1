//! Metrics-warehouse adapter.
//!
//! The warehouse is a credentialed, SQL-backed aggregation API: POST a
//! `QuerySpec`, get back rows in one of two shapes — grouped point lists
//! (`{id, points: [[date, value], ...]}`) or flat key/value records. The
//! API key travels in a header; a missing key fails at construction, before
//! any request exists to fail.

use super::query::QuerySpec;
use super::{QueryExecutor, RawPoint, SourceError};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

const API_KEY_HEADER: &str = "x-api-key";

/// Blocking client for the metrics warehouse.
pub struct WarehouseClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

/// Decoded warehouse response.
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseResponse {
    pub rows: Vec<Row>,
    /// When the warehouse last refreshed the underlying dataset.
    #[serde(default)]
    pub last_refreshed: Option<DateTime<Utc>>,
}

/// A single row, in either of the warehouse's two shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Row {
    Points(PointsRow),
    Flat(FlatRow),
}

/// Grouped point-list row: one identifier, many `[date, value]` pairs.
///
/// Point order is whatever the warehouse's sort produced — ascending for
/// some datasets, descending for others.
#[derive(Debug, Clone, Deserialize)]
pub struct PointsRow {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub points: Vec<(String, f64)>,
}

/// Flat key/value row, optionally tagged with the group it was split by.
#[derive(Debug, Clone, Deserialize)]
pub struct FlatRow {
    pub key: String,
    pub value: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl PointsRow {
    /// The row's points as provider-order raw observations.
    pub fn raw_points(&self) -> Vec<RawPoint> {
        self.points
            .iter()
            .map(|(date, value)| RawPoint::new(date.clone(), *value))
            .collect()
    }
}

impl Row {
    pub fn as_flat(&self) -> Option<&FlatRow> {
        match self {
            Row::Flat(row) => Some(row),
            Row::Points(_) => None,
        }
    }

    pub fn as_points(&self) -> Option<&PointsRow> {
        match self {
            Row::Points(row) => Some(row),
            Row::Flat(_) => None,
        }
    }
}

impl WarehouseClient {
    /// Build a client. Fails with `MissingCredential` when no API key is
    /// configured — no request is ever attempted without one.
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let api_key = api_key
            .filter(|k| !k.is_empty())
            .ok_or(SourceError::MissingCredential {
                provider: "metrics warehouse",
            })?;

        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Network {
                url: base_url.to_string(),
                message: format!("build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn query_url(&self) -> String {
        format!("{}/v1/query", self.base_url)
    }
}

impl QueryExecutor for WarehouseClient {
    fn provider_name(&self) -> &'static str {
        "metrics warehouse"
    }

    fn execute(&self, spec: &QuerySpec) -> Result<WarehouseResponse, SourceError> {
        let url = self.query_url();

        let resp = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(spec)
            .send()
            .map_err(|e| SourceError::Network {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Upstream {
                status: status.as_u16(),
                url,
            });
        }

        resp.json::<WarehouseResponse>()
            .map_err(|e| SourceError::Decode {
                url,
                message: e.to_string(),
            })
    }
}
