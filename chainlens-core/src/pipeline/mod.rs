//! Pipeline orchestration.
//!
//! Every top-level invocation follows the same control flow: validate
//! configuration (fail fast, no network), fetch, transform, wrap in an
//! `Envelope`. Any stage failure is attached to the operation's context,
//! logged exactly once here at the boundary, and returned to the caller —
//! the presentation layer owns fallback rendering. The only tolerated
//! degradation is the pagination merger's later-pages rule.

pub mod fees;
pub mod stablecoins;
pub mod treasuries;
pub mod tvl_share;
pub mod validators;

pub use fees::{compute_fee_summary, FeeSummary};
pub use stablecoins::{compute_stablecoin_supply, StablecoinSupply};
pub use treasuries::{compute_treasury_holdings, TRACKED_TREASURIES};
pub use tvl_share::{compute_tvl_share, BucketShares, TvlShare};
pub use validators::{compute_validator_summary, ValidatorSummary};

use crate::config::ConfigError;
use crate::data::SourceError;
use crate::metrics::MetricsError;
use crate::rank::RankError;
use crate::series::SeriesError;
use thiserror::Error;
use tracing::error;

/// A stage failure with the invocation context attached.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{operation}: config: {source}")]
    Config {
        operation: &'static str,
        #[source]
        source: ConfigError,
    },
    #[error("{operation}: fetch: {source}")]
    Fetch {
        operation: &'static str,
        #[source]
        source: SourceError,
    },
    #[error("{operation}: series: {source}")]
    Series {
        operation: &'static str,
        #[source]
        source: SeriesError,
    },
    #[error("{operation}: ranking: {source}")]
    Rank {
        operation: &'static str,
        #[source]
        source: RankError,
    },
    #[error("{operation}: metrics: {source}")]
    Metrics {
        operation: &'static str,
        #[source]
        source: MetricsError,
    },
}

impl PipelineError {
    /// The operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            PipelineError::Config { operation, .. }
            | PipelineError::Fetch { operation, .. }
            | PipelineError::Series { operation, .. }
            | PipelineError::Rank { operation, .. }
            | PipelineError::Metrics { operation, .. } => operation,
        }
    }

    /// The URL the failing fetch attempted, when there was one.
    pub fn url(&self) -> Option<&str> {
        match self {
            PipelineError::Fetch { source, .. } => source.url(),
            _ => None,
        }
    }
}

/// Log a failed invocation once, with structured context, then hand the
/// error back unchanged. Success passes through untouched.
pub(crate) fn finish<T>(
    operation: &'static str,
    result: Result<T, PipelineError>,
) -> Result<T, PipelineError> {
    if let Err(ref err) = result {
        error!(
            operation,
            url = err.url().unwrap_or("-"),
            error = %err,
            "pipeline invocation failed"
        );
    }
    result
}
