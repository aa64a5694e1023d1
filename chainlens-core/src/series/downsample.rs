//! Two downsampling strategies with different anchoring semantics.
//!
//! `stride_from_end` anchors the kept set to the last element and steps
//! backward by a fixed stride; kept dates drift across the calendar as the
//! series grows. `on_month_days` keeps calendar-aligned points (1st and
//! 15th by default) and force-appends the true last observation. The chart
//! callers depend on exactly one of these behaviors each — do not unify.

use super::extract::sort_ascending;
use crate::domain::Series;
use chrono::{Datelike, NaiveDate};

/// Day-of-month targets used by the chart pipelines.
pub const DEFAULT_MONTH_DAYS: [u32; 2] = [1, 15];

/// Keep every `m`-th element, anchored so the last element survives.
///
/// Keeps indices `i` with `i % m == (len - 1) % m`. No re-sort: "last"
/// means the last element at its original index, whatever order the series
/// is in.
pub fn stride_from_end(series: &Series, m: usize) -> Series {
    if m <= 1 || series.is_empty() {
        return series.clone();
    }
    let keep_rem = (series.len() - 1) % m;
    series
        .iter()
        .enumerate()
        .filter(|(i, _)| i % m == keep_rem)
        .map(|(_, p)| p.clone())
        .collect()
}

/// Keep points falling on the given UTC days of the month.
///
/// The input is re-sorted ascending first. The chronologically last point
/// is always retained: if its day is not in the target set it is appended
/// (once — deduplicated by date). Fewer than 2 matches means downsampling
/// is pointless, so the full sorted series comes back unfiltered.
pub fn on_month_days(series: &Series, days: &[u32]) -> Series {
    let mut sorted = series.clone();
    sort_ascending(&mut sorted);

    let matches: Series = sorted
        .iter()
        .filter(|p| day_of_month(&p.date).is_some_and(|d| days.contains(&d)))
        .cloned()
        .collect();

    if matches.len() < 2 {
        return sorted;
    }

    let mut kept = matches;
    if let Some(last) = sorted.last() {
        if kept.iter().all(|p| p.date != last.date) {
            kept.push(last.clone());
        }
    }
    kept
}

fn day_of_month(date: &str) -> Option<u32> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.day())
}
