//! Stablecoin supply on the anchor network vs. its layers.
//!
//! One chart fetch per chain. The layer charts are aligned by date and
//! summed into a single series; both series are then trimmed to the
//! 1st/15th calendar grid for display. Current values are captured before
//! trimming — the headline figures must not move when the chart thins out.

use super::{finish, PipelineError};
use crate::config::CoreConfig;
use crate::data::LlamaClient;
use crate::domain::{Envelope, SeriesWithCurrent, SourceInfo};
use crate::series::{current_of, from_raw, on_month_days, sum_aligned, with_current, DEFAULT_MONTH_DAYS};
use serde::Serialize;

const OPERATION: &str = "stablecoins";

/// Supply series for the anchor chain and the summed layer set.
#[derive(Debug, Clone, Serialize)]
pub struct StablecoinSupply {
    pub mainnet: SeriesWithCurrent,
    pub layers: SeriesWithCurrent,
}

/// Compute the stablecoin supply view.
pub fn compute_stablecoin_supply(
    cfg: &CoreConfig,
) -> Result<Envelope<StablecoinSupply>, PipelineError> {
    finish(OPERATION, run(cfg))
}

fn run(cfg: &CoreConfig) -> Result<Envelope<StablecoinSupply>, PipelineError> {
    let registry = cfg.registry().map_err(|source| PipelineError::Config {
        operation: OPERATION,
        source,
    })?;

    let llama = LlamaClient::new(&cfg.llama_url, cfg.request_timeout()).map_err(fetch_err)?;

    let mainnet_raw = llama.stablecoin_chart(&registry.anchor).map_err(fetch_err)?;
    let mainnet_full = with_current(&mainnet_raw).map_err(series_err)?;
    let mainnet = SeriesWithCurrent {
        series: on_month_days(&mainnet_full.series, &DEFAULT_MONTH_DAYS),
        current: mainnet_full.current,
    };

    let mut layer_series = Vec::with_capacity(registry.anchor_layers.len());
    let mut layer_current = 0.0;
    for chain in &registry.anchor_layers {
        let raw = llama.stablecoin_chart(chain).map_err(fetch_err)?;
        layer_current += current_of(&raw).map_err(series_err)?;
        layer_series.push(from_raw(&raw));
    }

    let merged = sum_aligned(&layer_series);
    let layers = SeriesWithCurrent {
        series: on_month_days(&merged, &DEFAULT_MONTH_DAYS),
        current: layer_current,
    };

    let data = StablecoinSupply { mainnet, layers };
    let source = Some(SourceInfo::new("DefiLlama", "https://defillama.com"));
    Ok(Envelope::new(data, source))
}

fn fetch_err(source: crate::data::SourceError) -> PipelineError {
    PipelineError::Fetch {
        operation: OPERATION,
        source,
    }
}

fn series_err(source: crate::series::SeriesError) -> PipelineError {
    PipelineError::Series {
        operation: OPERATION,
        source,
    }
}
