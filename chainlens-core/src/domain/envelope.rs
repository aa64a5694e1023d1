//! Envelope — the uniform wrapper every pipeline returns.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Attribution for the upstream source of an envelope's data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    pub name: String,
    pub href: String,
}

impl SourceInfo {
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: href.into(),
        }
    }
}

/// Timestamped, source-attributed result of one pipeline invocation.
///
/// `last_updated` reflects the freshness of the underlying data: a
/// provider-supplied refresh timestamp when the fetch produced one,
/// otherwise wall-clock time at fetch completion. Never a cached value —
/// envelopes are constructed fresh per invocation and discarded after the
/// caller renders them.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub data: T,
    pub last_updated: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceInfo>,
}

impl<T> Envelope<T> {
    /// Wrap `data`, stamped with wall-clock time now.
    pub fn new(data: T, source: Option<SourceInfo>) -> Self {
        Self {
            data,
            last_updated: Utc::now(),
            source,
        }
    }

    /// Wrap `data` with a provider-supplied freshness timestamp.
    pub fn with_timestamp(data: T, last_updated: DateTime<Utc>, source: Option<SourceInfo>) -> Self {
        Self {
            data,
            last_updated,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn provider_timestamp_wins_over_wall_clock() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let env = Envelope::with_timestamp(7u32, ts, None);
        assert_eq!(env.last_updated, ts);
    }

    #[test]
    fn source_omitted_from_json_when_absent() {
        let env = Envelope::new(1u32, None);
        let json = serde_json::to_string(&env).unwrap();
        assert!(!json.contains("source"));

        let env = Envelope::new(1u32, Some(SourceInfo::new("DefiLlama", "https://defillama.com")));
        let json = serde_json::to_string(&env).unwrap();
        assert!(json.contains("DefiLlama"));
    }
}
