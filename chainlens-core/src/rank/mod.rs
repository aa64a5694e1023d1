//! Ranking & bucketing engine.
//!
//! Every "market share by network" view on the dashboard is the same shape:
//! one anchor network, the sum of its layers, the two biggest competitors
//! individually, and everything else folded into a rest bucket. This module
//! is that shape, parameterized by membership predicates, so the per-domain
//! call sites stop re-implementing it with subtle drift.

pub mod slots;

pub use slots::{match_slots, SlotRecord, SlotTable};

use crate::domain::Entity;
use serde::Serialize;
use thiserror::Error;

/// Errors from ranked bucketing.
#[derive(Debug, Error)]
pub enum RankError {
    /// Ranking needs at least two pool candidates for the second and third
    /// slots; upstream data makes no size guarantee.
    #[error("ranking pool has {have} candidates, need at least {need}")]
    InsufficientPool { have: usize, need: usize },
}

/// The fixed output slots, each a single value.
///
/// Invariant: the slot sum equals the sum of every entity fed in — no
/// entity is double-counted or dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareBuckets {
    pub anchor: f64,
    pub anchor_group: f64,
    pub second: f64,
    pub third: f64,
    pub rest: f64,
}

impl ShareBuckets {
    pub fn total(&self) -> f64 {
        self.anchor + self.anchor_group + self.second + self.third + self.rest
    }
}

/// Bucketing result: the slot values plus the identities of the ranked
/// runners-up, which the presentation layer labels charts with.
#[derive(Debug, Clone, Serialize)]
pub struct Ranked {
    pub buckets: ShareBuckets,
    pub second: Entity,
    pub third: Entity,
}

/// Partition entities and fill the fixed buckets.
///
/// Entities matching `is_anchor` sum into the anchor slot (usually exactly
/// one matches), entities matching `in_anchor_group` into the group slot,
/// and the rest form the pool. The pool is sorted descending by latest
/// value with a stable sort — entities with equal values keep their input
/// order, which is the upstream sort order. Pool sizes below 2 fail rather
/// than fabricate empty rank slots.
pub fn bucket_by_rank(
    entities: &[Entity],
    is_anchor: impl Fn(&Entity) -> bool,
    in_anchor_group: impl Fn(&Entity) -> bool,
) -> Result<Ranked, RankError> {
    let mut anchor = 0.0;
    let mut anchor_group = 0.0;
    let mut pool: Vec<&Entity> = Vec::new();

    for entity in entities {
        if is_anchor(entity) {
            anchor += entity.latest;
        } else if in_anchor_group(entity) {
            anchor_group += entity.latest;
        } else {
            pool.push(entity);
        }
    }

    if pool.len() < 2 {
        return Err(RankError::InsufficientPool {
            have: pool.len(),
            need: 2,
        });
    }

    pool.sort_by(|a, b| b.latest.total_cmp(&a.latest));

    let second = pool[0].clone();
    let third = pool[1].clone();
    let rest = pool[2..].iter().map(|e| e.latest).sum();

    Ok(Ranked {
        buckets: ShareBuckets {
            anchor,
            anchor_group,
            second: second.latest,
            third: third.latest,
            rest,
        },
        second,
        third,
    })
}
