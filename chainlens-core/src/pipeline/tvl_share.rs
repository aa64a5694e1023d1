//! TVL market share by network.
//!
//! The warehouse's `tvl_breakdown` dataset returns one flat row per
//! (network, asset category). Categories on the registry's exclusion list
//! are dropped, the remainder sum into one latest value per network, and
//! the ranking engine folds the networks into the fixed display buckets.

use super::{finish, PipelineError};
use crate::config::CoreConfig;
use crate::data::{fetch_pages, AggFunc, QuerySpec, Row, SortDir, WarehouseClient};
use crate::domain::{Entity, Envelope, NetworkRegistry, SourceInfo};
use crate::metrics::{multiplier, share};
use crate::rank::{bucket_by_rank, ShareBuckets};
use serde::Serialize;
use std::collections::HashMap;

const OPERATION: &str = "tvl_share";

/// Per-bucket fraction of the grand total.
#[derive(Debug, Clone, Serialize)]
pub struct BucketShares {
    pub anchor: f64,
    pub anchor_group: f64,
    pub second: f64,
    pub third: f64,
    pub rest: f64,
}

/// The bucketed TVL view plus its derived ratios.
#[derive(Debug, Clone, Serialize)]
pub struct TvlShare {
    pub buckets: ShareBuckets,
    pub shares: BucketShares,
    /// Anchor TVL as a multiple of the second-ranked network's.
    pub anchor_multiple: f64,
    pub second_id: String,
    pub third_id: String,
}

/// Compute the TVL market-share view.
pub fn compute_tvl_share(cfg: &CoreConfig) -> Result<Envelope<TvlShare>, PipelineError> {
    finish(OPERATION, run(cfg))
}

fn run(cfg: &CoreConfig) -> Result<Envelope<TvlShare>, PipelineError> {
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

    let spec = QuerySpec::new("tvl_breakdown")
        .aggregate("network", AggFunc::Latest)
        .sort("value", SortDir::Desc)
        .page_size(cfg.page_size);

    let merged = fetch_pages(&warehouse, &spec, cfg.max_pages).map_err(fetch_err)?;

    let entities = entities_from_rows(&merged.rows, &registry);
    let ranked = bucket_by_rank(
        &entities,
        |e| registry.is_anchor(&e.id),
        |e| registry.in_layers(&e.id),
    )
    .map_err(|source| PipelineError::Rank {
        operation: OPERATION,
        source,
    })?;

    let total = ranked.buckets.total();
    let shares = BucketShares {
        anchor: share(ranked.buckets.anchor, total),
        anchor_group: share(ranked.buckets.anchor_group, total),
        second: share(ranked.buckets.second, total),
        third: share(ranked.buckets.third, total),
        rest: share(ranked.buckets.rest, total),
    };

    let anchor_multiple = multiplier(ranked.buckets.anchor, ranked.buckets.second).map_err(
        |source| PipelineError::Metrics {
            operation: OPERATION,
            source,
        },
    )?;

    let data = TvlShare {
        buckets: ranked.buckets,
        shares,
        anchor_multiple,
        second_id: ranked.second.id,
        third_id: ranked.third.id,
    };

    let source = Some(SourceInfo::new("Metrics Warehouse", &cfg.warehouse_url));
    Ok(match merged.last_refreshed {
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

/// Fold flat (network, category, value) rows into one entity per network.
///
/// First-appearance order is preserved — the warehouse sorts descending by
/// value and the ranking engine's tie-break leans on that order. Rows in an
/// excluded category are skipped before summing.
pub fn entities_from_rows(rows: &[Row], registry: &NetworkRegistry) -> Vec<Entity> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut entities: Vec<Entity> = Vec::new();

    for row in rows {
        let Some(flat) = row.as_flat() else { continue };
        if flat
            .category
            .as_deref()
            .is_some_and(|c| registry.is_excluded_category(c))
        {
            continue;
        }
        let value = if flat.value.is_finite() { flat.value } else { 0.0 };

        match index.get(&flat.key) {
            Some(&i) => entities[i].latest += value,
            None => {
                index.insert(flat.key.clone(), entities.len());
                let name = flat.name.clone().unwrap_or_else(|| flat.key.clone());
                entities.push(Entity::new(flat.key.clone(), name, value));
            }
        }
    }

    entities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FlatRow;

    fn flat(key: &str, category: Option<&str>, value: f64) -> Row {
        Row::Flat(FlatRow {
            key: key.into(),
            value,
            category: category.map(String::from),
            name: None,
        })
    }

    #[test]
    fn sums_categories_per_network_and_skips_excluded() {
        let registry = NetworkRegistry::default_btc();
        let rows = vec![
            flat("ethereum", Some("dex"), 30.0),
            flat("ethereum", Some("lending"), 20.0),
            flat("ethereum", Some("double-counted"), 999.0),
            flat("tron", Some("dex"), 7.0),
        ];
        let entities = entities_from_rows(&rows, &registry);
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0], Entity::new("ethereum", "ethereum", 50.0));
        assert_eq!(entities[1].latest, 7.0);
    }

    #[test]
    fn first_appearance_order_survives_interleaving() {
        let registry = NetworkRegistry::default_btc();
        let rows = vec![
            flat("solana", None, 1.0),
            flat("tron", None, 2.0),
            flat("solana", None, 3.0),
        ];
        let entities = entities_from_rows(&rows, &registry);
        assert_eq!(entities[0].id, "solana");
        assert_eq!(entities[0].latest, 4.0);
        assert_eq!(entities[1].id, "tron");
    }

    #[test]
    fn non_finite_row_values_count_as_zero() {
        let registry = NetworkRegistry::default_btc();
        let rows = vec![
            flat("solana", None, f64::NAN),
            flat("solana", None, 5.0),
        ];
        let entities = entities_from_rows(&rows, &registry);
        assert_eq!(entities[0].latest, 5.0);
    }

    #[test]
    fn points_rows_are_ignored_by_this_pipeline() {
        let registry = NetworkRegistry::default_btc();
        let rows = vec![Row::Points(crate::data::PointsRow {
            id: "bitcoin".into(),
            name: None,
            points: vec![("2024-01-01".into(), 1.0)],
        })];
        assert!(entities_from_rows(&rows, &registry).is_empty());
    }
}
