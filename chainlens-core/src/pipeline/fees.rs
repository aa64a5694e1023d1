//! Network-weighted transaction cost.
//!
//! Two flat warehouse lists — median fee per transaction and transaction
//! count per network — joined by network id into one weighted average.
//! Networks covered by only one of the two datasets drop out of the join.

use super::{finish, PipelineError};
use crate::config::CoreConfig;
use crate::data::{AggFunc, QueryExecutor, QuerySpec, Row, WarehouseClient};
use crate::domain::{Envelope, SourceInfo};
use crate::metrics::weighted_average;
use serde::Serialize;
use std::collections::HashMap;

const OPERATION: &str = "fees";

/// Fleet-wide cost per transaction, weighted by transaction volume.
#[derive(Debug, Clone, Serialize)]
pub struct FeeSummary {
    pub avg_cost_per_tx: f64,
    /// Networks present in both the fee and the volume dataset.
    pub networks_covered: usize,
}

/// Compute the weighted fee summary.
pub fn compute_fee_summary(cfg: &CoreConfig) -> Result<Envelope<FeeSummary>, PipelineError> {
    finish(OPERATION, run(cfg))
}

fn run(cfg: &CoreConfig) -> Result<Envelope<FeeSummary>, PipelineError> {
    let warehouse = WarehouseClient::new(
        &cfg.warehouse_url,
        cfg.warehouse_api_key.as_deref(),
        cfg.request_timeout(),
    )
    .map_err(fetch_err)?;

    let fee_spec = QuerySpec::new("tx_fee_usd").aggregate("network", AggFunc::Avg);
    let count_spec = QuerySpec::new("tx_count").aggregate("network", AggFunc::Sum);

    let fee_resp = warehouse.execute(&fee_spec).map_err(fetch_err)?;
    let count_resp = warehouse.execute(&count_spec).map_err(fetch_err)?;

    let values = flat_map(&fee_resp.rows);
    let weights = flat_map(&count_resp.rows);

    let avg_cost_per_tx = weighted_average(&values, &weights);
    let networks_covered = values.keys().filter(|k| weights.contains_key(*k)).count();

    let data = FeeSummary {
        avg_cost_per_tx,
        networks_covered,
    };

    let last_refreshed = match (fee_resp.last_refreshed, count_resp.last_refreshed) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    };

    let source = Some(SourceInfo::new("Metrics Warehouse", &cfg.warehouse_url));
    Ok(match last_refreshed {
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

/// Flat rows → id-keyed map. Later duplicates overwrite earlier ones;
/// non-finite values count as zero.
pub fn flat_map(rows: &[Row]) -> HashMap<String, f64> {
    rows.iter()
        .filter_map(Row::as_flat)
        .map(|r| {
            let value = if r.value.is_finite() { r.value } else { 0.0 };
            (r.key.clone(), value)
        })
        .collect()
}
