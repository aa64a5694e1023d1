//! Provider adapters and the pagination merger.
//!
//! Each adapter builds one provider-specific request, issues exactly one
//! HTTP call, and parses the response into an intermediate shape. No retries
//! happen at this layer — a failed call propagates to the pipeline boundary,
//! except where the pagination merger's later-pages-optional rule applies.

pub mod llama;
pub mod paginate;
pub mod query;
pub mod warehouse;

pub use llama::{LlamaClient, TreasuryRecord};
pub use paginate::{fetch_pages, PagedRows};
pub use query::{AggFunc, Aggregation, Filter, Interval, QuerySpec, Sort, SortDir};
pub use warehouse::{FlatRow, PointsRow, Row, WarehouseClient, WarehouseResponse};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single observation as received from a provider.
///
/// `date` is an ISO-ish date key. Ordering is provider-defined: some
/// providers return ascending-by-date lists, others descending. Nothing
/// downstream may assume either until it has normalized explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    pub date: String,
    pub value: f64,
}

impl RawPoint {
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}

/// Structured errors for provider calls.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Required credential absent — raised before any request is sent.
    #[error("missing credential for {provider}")]
    MissingCredential { provider: &'static str },

    /// Non-success HTTP status.
    #[error("upstream returned {status} for {url}")]
    Upstream { status: u16, url: String },

    /// Transport-level failure (DNS, connect, timeout).
    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },

    /// Body did not match the provider's documented shape.
    #[error("undecodable response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl SourceError {
    /// The URL the failing call attempted, for boundary logging.
    pub fn url(&self) -> Option<&str> {
        match self {
            SourceError::MissingCredential { .. } => None,
            SourceError::Upstream { url, .. }
            | SourceError::Network { url, .. }
            | SourceError::Decode { url, .. } => Some(url),
        }
    }
}

/// One filtered-aggregation query against the warehouse.
///
/// Abstracted as a trait so the pagination merger can run against scripted
/// page outcomes in tests without a live endpoint.
pub trait QueryExecutor {
    /// Provider name used in log context.
    fn provider_name(&self) -> &'static str;

    /// Issue exactly one request for `spec` and decode the response.
    fn execute(&self, spec: &QuerySpec) -> Result<WarehouseResponse, SourceError>;
}
