//! Series — the canonical date-keyed observation sequence.

use serde::{Deserialize, Serialize};

/// One observation in a canonical series.
///
/// `date` is an ISO `YYYY-MM-DD` key, so lexicographic order is
/// chronological order. Values are always finite; non-finite upstream
/// values are coerced to zero at the extraction boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: String,
    pub value: f64,
}

/// Ordered sequence of observations.
///
/// Ordering is whatever the producing stage says it is: extraction preserves
/// provider order, alignment preserves first-occurrence order. Callers that
/// need chronological order sort explicitly (`series::sort_ascending`).
/// After alignment no two points share a date.
pub type Series = Vec<SeriesPoint>;

/// A series together with its headline "current" figure.
///
/// `current` is the value of the chronologically last raw observation as
/// received from the provider, captured *before* any downsampling. Trimming
/// a series for display must never change the reported current value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesWithCurrent {
    pub series: Series,
    pub current: f64,
}

impl SeriesPoint {
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}
