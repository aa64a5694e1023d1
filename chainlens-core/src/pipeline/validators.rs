//! Validator / node counts.
//!
//! One flat warehouse list, reduced to the scalar figures the security
//! section of the dashboard displays.

use super::{finish, PipelineError};
use crate::config::CoreConfig;
use crate::data::{AggFunc, QueryExecutor, QuerySpec, WarehouseClient};
use crate::domain::{Envelope, SourceInfo};
use crate::metrics::share;
use serde::Serialize;

const OPERATION: &str = "validators";

/// Scalar validator-count figures.
#[derive(Debug, Clone, Serialize)]
pub struct ValidatorSummary {
    /// Node count on the anchor network.
    pub anchor_count: f64,
    /// Largest node count among all other networks.
    pub largest_other: f64,
    /// Anchor count as a fraction of the total across networks.
    pub anchor_share: f64,
}

/// Compute the validator summary.
pub fn compute_validator_summary(
    cfg: &CoreConfig,
) -> Result<Envelope<ValidatorSummary>, PipelineError> {
    finish(OPERATION, run(cfg))
}

fn run(cfg: &CoreConfig) -> Result<Envelope<ValidatorSummary>, PipelineError> {
    let registry = cfg.registry().map_err(|source| PipelineError::Config {
        operation: OPERATION,
        source,
    })?;

    let warehouse = WarehouseClient::new(
        &cfg.warehouse_url,
        cfg.warehouse_api_key.as_deref(),
        cfg.request_timeout(),
    )
    .map_err(fetch_err)?;

    let spec = QuerySpec::new("validator_count").aggregate("network", AggFunc::Latest);
    let resp = warehouse.execute(&spec).map_err(fetch_err)?;

    let mut anchor_count = 0.0;
    let mut largest_other = 0.0;
    let mut total = 0.0;
    for row in resp.rows.iter().filter_map(|r| r.as_flat()) {
        let value = if row.value.is_finite() { row.value } else { 0.0 };
        total += value;
        if registry.is_anchor(&row.key) {
            anchor_count += value;
        } else if value > largest_other {
            largest_other = value;
        }
    }

    let data = ValidatorSummary {
        anchor_count,
        largest_other,
        anchor_share: share(anchor_count, total),
    };

    let source = Some(SourceInfo::new("Metrics Warehouse", &cfg.warehouse_url));
    Ok(match resp.last_refreshed {
        Some(ts) => Envelope::with_timestamp(data, ts, source),
        None => Envelope::new(data, source),
    })
}

fn fetch_err(source: crate::data::SourceError) -> PipelineError {
    PipelineError::Fetch {
        operation: OPERATION,
        source,
    }
}
