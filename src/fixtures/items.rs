//! Item Fixtures

use serde::Deserialize;

/// Wrapper for items in YAML
#[derive(Debug, Deserialize)]
pub struct ItemsFixture {
    /// SKUs in scan order
    pub items: Vec<String>,
}
