//! Server-provided banner configuration.

use serde::{Deserialize, Serialize};

/// Header/footer banner text and colors. Empty strings mean "not configured".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub footer: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub background: String,
}

impl UiConfig {
    pub fn has_header(&self) -> bool {
        !self.header.trim().is_empty()
    }

    pub fn has_footer(&self) -> bool {
        !self.footer.trim().is_empty()
    }

    pub fn has_banner(&self) -> bool {
        self.has_header() || self.has_footer()
    }
}
