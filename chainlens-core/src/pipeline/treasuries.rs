//! Corporate treasury holdings — the fixed-slot example table.
//!
//! A caller-fixed list of treasury names is matched against the DefiLlama
//! treasuries listing. Companies the listing doesn't cover are simply
//! missing from the table; the envelope's freshness is the latest report
//! date among the matches.

use super::{finish, PipelineError};
use crate::config::CoreConfig;
use crate::data::LlamaClient;
use crate::domain::{Envelope, SourceInfo};
use crate::rank::{match_slots, SlotRecord, SlotTable};
use chrono::NaiveDate;

const OPERATION: &str = "treasuries";

/// The treasuries the dashboard showcases.
pub const TRACKED_TREASURIES: [&str; 5] =
    ["microstrategy", "marathon", "tesla", "block", "coinbase"];

/// Compute the treasury holdings table.
pub fn compute_treasury_holdings(cfg: &CoreConfig) -> Result<Envelope<SlotTable>, PipelineError> {
    finish(OPERATION, run(cfg))
}

fn run(cfg: &CoreConfig) -> Result<Envelope<SlotTable>, PipelineError> {
    let llama = LlamaClient::new(&cfg.llama_url, cfg.request_timeout()).map_err(fetch_err)?;

    let records: Vec<SlotRecord> = llama
        .treasuries()
        .map_err(fetch_err)?
        .into_iter()
        .map(|t| SlotRecord {
            id: t.id,
            name: t.name,
            value: t.holdings_usd,
            as_of: t.last_report,
        })
        .collect();

    let table = match_slots(&records, &TRACKED_TREASURIES);

    let source = Some(SourceInfo::new("DefiLlama", "https://defillama.com"));
    Ok(match table.last_updated.and_then(midnight_utc) {
        Some(ts) => Envelope::with_timestamp(table, ts, source),
        None => Envelope::new(table, source),
    })
}

fn midnight_utc(date: NaiveDate) -> Option<chrono::DateTime<chrono::Utc>> {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}

fn fetch_err(source: crate::data::SourceError) -> PipelineError {
    PipelineError::Fetch {
        operation: OPERATION,
        source,
    }
}
