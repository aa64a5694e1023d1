//! Warehouse query descriptor.
//!
//! The metrics warehouse accepts a JSON body describing filters, an optional
//! grouped aggregation, a sort, and pagination. This module models that body
//! with serde so query construction is typo-proof at the call sites.

use serde::Serialize;

/// A single filter predicate.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Filter {
    /// Column equals value.
    Eq { column: String, value: serde_json::Value },
    /// Column does not equal value.
    Ne { column: String, value: serde_json::Value },
    /// Column date is on or after the given ISO date.
    OnOrAfter { column: String, date: String },
    /// Column value is one of the given set.
    In {
        column: String,
        values: Vec<serde_json::Value>,
    },
}

/// Aggregation function applied per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggFunc {
    Sum,
    Avg,
    Count,
    Latest,
}

/// Bucketing interval for time-grouped aggregations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Interval {
    Day,
    Week,
    Month,
}

/// Group-by aggregation spec.
#[derive(Debug, Clone, Serialize)]
pub struct Aggregation {
    pub group_by: String,
    pub func: AggFunc,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDir {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sort {
    pub column: String,
    pub dir: SortDir,
}

/// The complete query body sent to the warehouse.
#[derive(Debug, Clone, Serialize)]
pub struct QuerySpec {
    pub dataset: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Aggregation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
}

impl QuerySpec {
    pub fn new(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            filters: Vec::new(),
            aggregation: None,
            sort: None,
            page: 1,
            page_size: 100,
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn aggregate(mut self, group_by: impl Into<String>, func: AggFunc) -> Self {
        self.aggregation = Some(Aggregation {
            group_by: group_by.into(),
            func,
            interval: None,
        });
        self
    }

    pub fn interval(mut self, interval: Interval) -> Self {
        if let Some(agg) = self.aggregation.as_mut() {
            agg.interval = Some(interval);
        }
        self
    }

    pub fn sort(mut self, column: impl Into<String>, dir: SortDir) -> Self {
        self.sort = Some(Sort {
            column: column.into(),
            dir,
        });
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// The same query pointed at a different page.
    pub fn with_page(&self, page: u32) -> Self {
        let mut spec = self.clone();
        spec.page = page;
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_body_shape() {
        let spec = QuerySpec::new("tvl_breakdown")
            .filter(Filter::Ne {
                column: "category".into(),
                value: "double-counted".into(),
            })
            .aggregate("network", AggFunc::Latest)
            .sort("value", SortDir::Desc)
            .page_size(50);

        let body = serde_json::to_value(&spec).unwrap();
        assert_eq!(body["dataset"], "tvl_breakdown");
        assert_eq!(body["filters"][0]["op"], "ne");
        assert_eq!(body["filters"][0]["column"], "category");
        assert_eq!(body["aggregation"]["group_by"], "network");
        assert_eq!(body["aggregation"]["func"], "latest");
        assert_eq!(body["sort"]["dir"], "desc");
        assert_eq!(body["page"], 1);
        assert_eq!(body["page_size"], 50);
    }

    #[test]
    fn empty_filters_omitted() {
        let spec = QuerySpec::new("validator_count");
        let body = serde_json::to_value(&spec).unwrap();
        assert!(body.get("filters").is_none());
        assert!(body.get("aggregation").is_none());
    }

    #[test]
    fn with_page_changes_only_the_page() {
        let spec = QuerySpec::new("tvl_breakdown").page_size(25);
        let p2 = spec.with_page(2);
        assert_eq!(p2.page, 2);
        assert_eq!(p2.page_size, 25);
        assert_eq!(p2.dataset, spec.dataset);
        assert_eq!(spec.page, 1);
    }

    #[test]
    fn date_filter_serializes_iso() {
        let spec = QuerySpec::new("tx_fees").filter(Filter::OnOrAfter {
            column: "day".into(),
            date: "2024-01-01".into(),
        });
        let body = serde_json::to_value(&spec).unwrap();
        assert_eq!(body["filters"][0]["op"], "on_or_after");
        assert_eq!(body["filters"][0]["date"], "2024-01-01");
    }
}
