//! Entity — a rankable network, asset, or protocol.

use serde::{Deserialize, Serialize};

/// A named thing being ranked, with its scalar latest value.
///
/// Entities are built fresh per pipeline invocation, usually by summing a
/// network's per-category sub-values (minus business-rule exclusions), and
/// fed to the ranking engine in upstream order — the engine's tie-break
/// depends on that order being preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable identifier (e.g. "ethereum").
    pub id: String,
    /// Display name as reported by the provider.
    pub name: String,
    /// Latest aggregate value, always finite.
    pub latest: f64,
}

impl Entity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, latest: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            latest,
        }
    }
}
