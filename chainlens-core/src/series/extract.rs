//! Raw point lists → canonical series.
//!
//! Providers disagree about point order: some return ascending-by-date,
//! others descending. Extraction therefore never re-sorts implicitly — it
//! maps in list order, and "current" means the last element *as received*.
//! Callers that need chronological order say so with `sort_ascending`.

use super::SeriesError;
use crate::data::RawPoint;
use crate::domain::{Series, SeriesPoint, SeriesWithCurrent};

/// Coerce a provider value to something safe to sum.
///
/// NaN and infinities become zero rather than poisoning every aggregate
/// downstream.
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Map raw points into a series, preserving provider order.
pub fn from_raw(points: &[RawPoint]) -> Series {
    points
        .iter()
        .map(|p| SeriesPoint::new(p.date.clone(), finite_or_zero(p.value)))
        .collect()
}

/// The value of the last raw point as received from the provider.
///
/// On a descending-by-date list this is the *oldest* observation — callers
/// pick the extraction that matches their provider's documented order.
pub fn current_of(points: &[RawPoint]) -> Result<f64, SeriesError> {
    points
        .last()
        .map(|p| finite_or_zero(p.value))
        .ok_or(SeriesError::Empty)
}

/// Series plus current value, in one pass.
///
/// `current` is captured from the raw list before any trimming, so later
/// downsampling cannot change the reported headline figure.
pub fn with_current(points: &[RawPoint]) -> Result<SeriesWithCurrent, SeriesError> {
    let current = current_of(points)?;
    Ok(SeriesWithCurrent {
        series: from_raw(points),
        current,
    })
}

/// Explicit chronological normalization.
///
/// ISO date keys sort lexicographically; the sort is stable so duplicate
/// dates keep their relative order.
pub fn sort_ascending(series: &mut Series) {
    series.sort_by(|a, b| a.date.cmp(&b.date));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(points: &[(&str, f64)]) -> Vec<RawPoint> {
        points
            .iter()
            .map(|(d, v)| RawPoint::new(*d, *v))
            .collect()
    }

    #[test]
    fn preserves_provider_order() {
        // Descending-by-date input stays descending.
        let points = raw(&[("2024-01-03", 3.0), ("2024-01-02", 2.0), ("2024-01-01", 1.0)]);
        let series = from_raw(&points);
        assert_eq!(series[0].date, "2024-01-03");
        assert_eq!(series[2].date, "2024-01-01");
    }

    #[test]
    fn current_is_last_as_received() {
        let descending = raw(&[("2024-01-03", 3.0), ("2024-01-01", 1.0)]);
        assert_eq!(current_of(&descending).unwrap(), 1.0);

        let ascending = raw(&[("2024-01-01", 1.0), ("2024-01-03", 3.0)]);
        assert_eq!(current_of(&ascending).unwrap(), 3.0);
    }

    #[test]
    fn empty_input_is_a_series_error() {
        assert!(matches!(current_of(&[]), Err(SeriesError::Empty)));
        assert!(matches!(with_current(&[]), Err(SeriesError::Empty)));
    }

    #[test]
    fn non_finite_values_coerced_to_zero() {
        let points = raw(&[("2024-01-01", f64::NAN), ("2024-01-02", f64::INFINITY)]);
        let series = from_raw(&points);
        assert_eq!(series[0].value, 0.0);
        assert_eq!(series[1].value, 0.0);
        assert_eq!(current_of(&points).unwrap(), 0.0);
    }

    #[test]
    fn current_unaffected_by_downsampling() {
        let points = raw(&[
            ("2024-01-01", 1.0),
            ("2024-01-02", 2.0),
            ("2024-01-03", 3.0),
        ]);
        let swc = with_current(&points).unwrap();
        let trimmed = crate::series::stride_from_end(&swc.series, 2);
        assert!(trimmed.len() < swc.series.len());
        assert_eq!(swc.current, 3.0);
    }

    #[test]
    fn sort_ascending_normalizes() {
        let mut series = from_raw(&raw(&[
            ("2024-01-03", 3.0),
            ("2024-01-01", 1.0),
            ("2024-01-02", 2.0),
        ]));
        sort_ascending(&mut series);
        let dates: Vec<&str> = series.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, ["2024-01-01", "2024-01-02", "2024-01-03"]);
    }
}
