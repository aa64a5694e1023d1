//! Pagination merger.
//!
//! One logical dataset can span several warehouse pages. Pages are fetched
//! sequentially; the first page is essential and its failure kills the
//! merge, while later pages are enrichment — a failed later page is logged,
//! replaced by an empty row set, and the merge continues. The page cap
//! (typically 2) exists to stay under the warehouse response-size ceiling.

use super::query::QuerySpec;
use super::warehouse::Row;
use super::{QueryExecutor, SourceError};
use chrono::{DateTime, Utc};
use tracing::warn;

/// Rows concatenated across pages, in page order.
#[derive(Debug)]
pub struct PagedRows {
    pub rows: Vec<Row>,
    /// Max refresh timestamp across the successfully fetched pages.
    pub last_refreshed: Option<DateTime<Utc>>,
    pub pages_fetched: u32,
}

/// Fetch up to `max_pages` pages of `spec` and concatenate the rows.
///
/// A page shorter than `spec.page_size` ends the walk early — the warehouse
/// has nothing further. Page 1 failure propagates; failure of any later
/// page contributes zero rows instead.
pub fn fetch_pages(
    executor: &dyn QueryExecutor,
    spec: &QuerySpec,
    max_pages: u32,
) -> Result<PagedRows, SourceError> {
    let mut rows: Vec<Row> = Vec::new();
    let mut last_refreshed: Option<DateTime<Utc>> = None;
    let mut pages_fetched = 0;

    for page in 1..=max_pages.max(1) {
        match executor.execute(&spec.with_page(page)) {
            Ok(resp) => {
                pages_fetched += 1;
                let short_page = (resp.rows.len() as u32) < spec.page_size;
                last_refreshed = match (last_refreshed, resp.last_refreshed) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    (a, b) => a.or(b),
                };
                rows.extend(resp.rows);
                if short_page {
                    break;
                }
            }
            Err(e) if page == 1 => return Err(e),
            Err(e) => {
                warn!(
                    provider = executor.provider_name(),
                    dataset = %spec.dataset,
                    page,
                    error = %e,
                    "supplementary page failed, continuing with partial data"
                );
            }
        }
    }

    Ok(PagedRows {
        rows,
        last_refreshed,
        pages_fetched,
    })
}
