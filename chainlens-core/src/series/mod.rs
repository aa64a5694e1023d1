//! Series stages: extraction, alignment, downsampling.

pub mod align;
pub mod downsample;
pub mod extract;

pub use align::sum_aligned;
pub use downsample::{on_month_days, stride_from_end, DEFAULT_MONTH_DAYS};
pub use extract::{current_of, from_raw, sort_ascending, with_current};

use thiserror::Error;

/// Errors from series-stage operations.
#[derive(Debug, Error)]
pub enum SeriesError {
    /// Latest-value extraction on a series with no points.
    #[error("empty series: no current value to extract")]
    Empty,
}
