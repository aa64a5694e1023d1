//! Network registry — which network anchors the dashboard, which networks
//! count as its layers, and which asset categories are excluded from sums.
//!
//! Stored as a TOML file so deployments can re-anchor the dashboard without
//! a rebuild. Ships with a Bitcoin-centric default.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Membership sets driving the ranking engine's partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkRegistry {
    /// The network the dashboard is centered on.
    pub anchor: String,
    /// Layer-2s / sidechains counted with the anchor rather than against it.
    pub anchor_layers: Vec<String>,
    /// Asset categories excluded from TVL sums by business rule
    /// (e.g. double-counted wrapped positions).
    #[serde(default)]
    pub excluded_categories: Vec<String>,
}

impl NetworkRegistry {
    /// Load a registry from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("read registry file: {e}"))?;
        Self::from_toml(&content)
    }

    /// Parse a registry from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("parse registry TOML: {e}"))
    }

    /// Serialize the registry to TOML.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("serialize registry: {e}"))
    }

    /// The default Bitcoin-centric registry.
    pub fn default_btc() -> Self {
        Self {
            anchor: "bitcoin".into(),
            anchor_layers: vec![
                "lightning".into(),
                "liquid".into(),
                "rootstock".into(),
                "stacks".into(),
            ],
            excluded_categories: vec!["double-counted".into()],
        }
    }

    pub fn is_anchor(&self, id: &str) -> bool {
        self.anchor.eq_ignore_ascii_case(id)
    }

    pub fn in_layers(&self, id: &str) -> bool {
        self.anchor_layers.iter().any(|l| l.eq_ignore_ascii_case(id))
    }

    pub fn is_excluded_category(&self, category: &str) -> bool {
        self.excluded_categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_membership() {
        let r = NetworkRegistry::default_btc();
        assert!(r.is_anchor("bitcoin"));
        assert!(r.is_anchor("Bitcoin"));
        assert!(!r.is_anchor("ethereum"));
        assert!(r.in_layers("lightning"));
        assert!(!r.in_layers("bitcoin"));
        assert!(r.is_excluded_category("double-counted"));
    }

    #[test]
    fn toml_roundtrip() {
        let r = NetworkRegistry::default_btc();
        let toml_str = r.to_toml().unwrap();
        let parsed = NetworkRegistry::from_toml(&toml_str).unwrap();
        assert_eq!(parsed.anchor, r.anchor);
        assert_eq!(parsed.anchor_layers, r.anchor_layers);
    }

    #[test]
    fn excluded_categories_default_to_empty() {
        let r = NetworkRegistry::from_toml(
            "anchor = \"ethereum\"\nanchor_layers = [\"base\", \"arbitrum\"]\n",
        )
        .unwrap();
        assert!(r.excluded_categories.is_empty());
        assert!(r.in_layers("base"));
    }
}
