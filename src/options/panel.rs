use serde::{Deserialize, Serialize};

/// Debug panel presentation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PanelOptions {
    /// Start with the panel's folder collapsed.
    pub start_folded: bool,
    /// Start with the panel hidden entirely (toggle with `H`).
    pub start_hidden: bool,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            start_folded: true,
            start_hidden: false,
        }
    }
}
