//! Date-keyed alignment of multiple series into one.

use crate::domain::{Series, SeriesPoint};
use std::collections::HashMap;

/// Merge N series by summing values that share a date key.
///
/// A date present in only some inputs contributes zero for the others — it
/// is kept, not dropped. Output order is insertion order of each date's
/// first occurrence across the inputs; callers needing chronological order
/// sort explicitly afterwards.
pub fn sum_aligned(inputs: &[Series]) -> Series {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut merged: Series = Vec::new();

    for series in inputs {
        for point in series {
            match index.get(&point.date) {
                Some(&i) => merged[i].value += point.value,
                None => {
                    index.insert(point.date.clone(), merged.len());
                    merged.push(SeriesPoint::new(point.date.clone(), point.value));
                }
            }
        }
    }

    merged
}
