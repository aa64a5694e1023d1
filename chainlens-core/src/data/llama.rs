//! DefiLlama adapter.
//!
//! Uncredentialed GET endpoints. Two are used here: per-chain stablecoin
//! circulating-supply charts and the treasuries listing. Chart dates arrive
//! as unix-second strings and are converted to ISO date keys at this
//! boundary; list order is preserved exactly as the API returned it.

use super::{RawPoint, SourceError};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use std::time::Duration;

/// Blocking client for the DefiLlama open API.
pub struct LlamaClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

/// One point of a stablecoin chart: unix-second date string plus the
/// circulating total, nested the way the API nests it.
#[derive(Debug, Deserialize)]
struct StablecoinChartPoint {
    date: String,
    #[serde(rename = "totalCirculatingUSD")]
    total_circulating_usd: CirculatingBreakdown,
}

#[derive(Debug, Deserialize)]
struct CirculatingBreakdown {
    #[serde(rename = "peggedUSD", default)]
    pegged_usd: f64,
}

/// One entry of the treasuries listing.
#[derive(Debug, Clone, Deserialize)]
pub struct TreasuryRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    /// Total treasury holdings, USD.
    #[serde(rename = "holdingsUsd", default)]
    pub holdings_usd: f64,
    /// ISO date of the last filed report, when known.
    #[serde(rename = "lastReport", default)]
    pub last_report: Option<NaiveDate>,
}

impl LlamaClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Network {
                url: base_url.to_string(),
                message: format!("build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Stablecoin circulating supply over time for one chain.
    pub fn stablecoin_chart(&self, chain: &str) -> Result<Vec<RawPoint>, SourceError> {
        let url = format!("{}/stablecoincharts/{chain}", self.base_url);
        let body = self.get_text(&url)?;
        Self::parse_stablecoin_chart(&url, &body)
    }

    /// The full treasuries listing, in API order.
    pub fn treasuries(&self) -> Result<Vec<TreasuryRecord>, SourceError> {
        let url = format!("{}/treasuries", self.base_url);
        let body = self.get_text(&url)?;
        serde_json::from_str(&body).map_err(|e| SourceError::Decode {
            url,
            message: e.to_string(),
        })
    }

    fn get_text(&self, url: &str) -> Result<String, SourceError> {
        let resp = self.http.get(url).send().map_err(|e| SourceError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Upstream {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        resp.text().map_err(|e| SourceError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Convert the chart body into raw points, unix seconds → ISO dates.
    ///
    /// Point order is preserved; this API happens to return ascending-by-date
    /// today, but nothing downstream is allowed to rely on that.
    fn parse_stablecoin_chart(url: &str, body: &str) -> Result<Vec<RawPoint>, SourceError> {
        let chart: Vec<StablecoinChartPoint> =
            serde_json::from_str(body).map_err(|e| SourceError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        chart
            .into_iter()
            .map(|p| {
                let secs: i64 = p.date.parse().map_err(|_| SourceError::Decode {
                    url: url.to_string(),
                    message: format!("bad unix date key: {:?}", p.date),
                })?;
                let date = DateTime::from_timestamp(secs, 0)
                    .ok_or_else(|| SourceError::Decode {
                        url: url.to_string(),
                        message: format!("unix date out of range: {secs}"),
                    })?
                    .date_naive()
                    .format("%Y-%m-%d")
                    .to_string();
                Ok(RawPoint::new(date, p.total_circulating_usd.pegged_usd))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chart_points_in_order() {
        let body = r#"[
            {"date": "1704067200", "totalCirculatingUSD": {"peggedUSD": 120.5}},
            {"date": "1704153600", "totalCirculatingUSD": {"peggedUSD": 121.0}}
        ]"#;
        let points = LlamaClient::parse_stablecoin_chart("test://chart", body).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], RawPoint::new("2024-01-01", 120.5));
        assert_eq!(points[1], RawPoint::new("2024-01-02", 121.0));
    }

    #[test]
    fn missing_pegged_breakdown_decodes_as_zero() {
        // Chains with no USD-pegged assets return an empty breakdown object.
        let body = r#"[{"date": "1704067200", "totalCirculatingUSD": {}}]"#;
        let points = LlamaClient::parse_stablecoin_chart("test://chart", body).unwrap();
        assert_eq!(points[0].value, 0.0);
    }

    #[test]
    fn bad_date_key_is_a_decode_error() {
        let body = r#"[{"date": "not-a-number", "totalCirculatingUSD": {"peggedUSD": 1.0}}]"#;
        let err = LlamaClient::parse_stablecoin_chart("test://chart", body).unwrap_err();
        assert!(matches!(err, SourceError::Decode { .. }));
    }

    #[test]
    fn treasury_records_decode() {
        let body = r#"[
            {"id": "microstrategy", "name": "MicroStrategy", "holdingsUsd": 14.2e9, "lastReport": "2024-05-01"},
            {"name": "Unnamed DAO"}
        ]"#;
        let records: Vec<TreasuryRecord> = serde_json::from_str(body).unwrap();
        assert_eq!(records[0].last_report.unwrap().to_string(), "2024-05-01");
        assert_eq!(records[1].holdings_usd, 0.0);
        assert!(records[1].id.is_none());
    }
}
