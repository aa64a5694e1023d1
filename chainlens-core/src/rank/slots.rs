//! Fixed-slot matching — the simpler sibling of ranked bucketing.
//!
//! Instead of a ranked top-K, the caller names the identifiers it wants and
//! each is matched against the record set. Identifiers that match nothing
//! are simply absent from the result; the table's freshness is the max
//! report date across whatever matched.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// A matchable record from a provider listing.
#[derive(Debug, Clone)]
pub struct SlotRecord {
    pub id: Option<String>,
    pub name: String,
    pub value: f64,
    pub as_of: Option<NaiveDate>,
}

/// Named slots filled from matched records.
#[derive(Debug, Clone, Serialize)]
pub struct SlotTable {
    pub slots: BTreeMap<String, f64>,
    /// Max `as_of` across matched records; None when nothing matched or no
    /// matched record carried a date.
    pub last_updated: Option<NaiveDate>,
}

/// Fill `wanted` slots from `records`.
///
/// Matching is case-insensitive substring against the record's id and name;
/// the first matching record wins a slot. Unmatched wanted keys do not
/// appear in the table — absence is the contract, not an error.
pub fn match_slots(records: &[SlotRecord], wanted: &[&str]) -> SlotTable {
    let mut slots = BTreeMap::new();
    let mut last_updated: Option<NaiveDate> = None;

    for key in wanted {
        let needle = key.to_lowercase();
        let hit = records.iter().find(|r| {
            r.name.to_lowercase().contains(&needle)
                || r.id
                    .as_deref()
                    .is_some_and(|id| id.to_lowercase().contains(&needle))
        });

        if let Some(record) = hit {
            slots.insert(key.to_string(), record.value);
            last_updated = match (last_updated, record.as_of) {
                (Some(a), Some(b)) => Some(a.max(b)),
                (a, b) => a.or(b),
            };
        }
    }

    SlotTable {
        slots,
        last_updated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: Option<&str>, name: &str, value: f64, as_of: Option<&str>) -> SlotRecord {
        SlotRecord {
            id: id.map(String::from),
            name: name.to_string(),
            value,
            as_of: as_of.map(|d| d.parse().unwrap()),
        }
    }

    #[test]
    fn matches_by_name_substring_case_insensitive() {
        let records = vec![
            record(None, "MicroStrategy Inc.", 14.2e9, Some("2024-05-01")),
            record(Some("mara"), "Marathon Digital", 1.1e9, Some("2024-04-15")),
        ];
        let table = match_slots(&records, &["microstrategy", "marathon"]);
        assert_eq!(table.slots["microstrategy"], 14.2e9);
        assert_eq!(table.slots["marathon"], 1.1e9);
    }

    #[test]
    fn unmatched_keys_are_absent_not_errors() {
        let records = vec![record(None, "Tesla", 0.5e9, None)];
        let table = match_slots(&records, &["tesla", "block"]);
        assert_eq!(table.slots.len(), 1);
        assert!(!table.slots.contains_key("block"));
    }

    #[test]
    fn freshness_is_max_date_across_matches() {
        let records = vec![
            record(None, "Tesla", 0.5e9, Some("2024-03-01")),
            record(None, "Block", 0.2e9, Some("2024-06-01")),
            record(None, "Unmatched", 9.9e9, Some("2025-01-01")),
        ];
        let table = match_slots(&records, &["tesla", "block"]);
        assert_eq!(table.last_updated.unwrap().to_string(), "2024-06-01");
    }

    #[test]
    fn no_matches_means_no_freshness() {
        let records = vec![record(None, "Tesla", 0.5e9, Some("2024-03-01"))];
        let table = match_slots(&records, &["block"]);
        assert!(table.slots.is_empty());
        assert!(table.last_updated.is_none());
    }

    #[test]
    fn first_matching_record_wins() {
        let records = vec![
            record(None, "Block Inc.", 0.2e9, None),
            record(None, "Blockstream", 0.9e9, None),
        ];
        let table = match_slots(&records, &["block"]);
        assert_eq!(table.slots["block"], 0.2e9);
    }
}
