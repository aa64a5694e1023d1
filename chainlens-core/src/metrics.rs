//! Derived metrics — pure scalar functions over bucketed values.
//!
//! Every function here guards its denominator. The presentation layer
//! formats whatever comes back as a number; a NaN escaping this module
//! renders as a blank cell somewhere on the dashboard.

use std::collections::HashMap;
use thiserror::Error;

/// Errors from derived-metric computation.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// A multiplier against a zero runner-up is undefined; callers guard
    /// the pool before asking.
    #[error("multiplier undefined: runner-up value is zero")]
    ZeroRunnerUp,
}

/// Market-share ratio: `part / total`, zero when the total is zero.
pub fn share(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        part / total
    }
}

/// Weighted average over identifiers present in *both* maps.
///
/// Identifiers present in only one map are skipped silently — providers
/// rarely cover identical network sets. A zero weight sum yields zero.
pub fn weighted_average(values: &HashMap<String, f64>, weights: &HashMap<String, f64>) -> f64 {
    let mut num = 0.0;
    let mut den = 0.0;

    for (id, value) in values {
        if let Some(weight) = weights.get(id) {
            num += value * weight;
            den += weight;
        }
    }

    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// How many times larger the leader is than the runner-up.
pub fn multiplier(leader: f64, runner_up: f64) -> Result<f64, MetricsError> {
    if runner_up == 0.0 {
        return Err(MetricsError::ZeroRunnerUp);
    }
    Ok(leader / runner_up)
}
