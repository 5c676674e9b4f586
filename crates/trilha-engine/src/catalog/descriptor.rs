use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::badges::ledger::UnlockRequirement;

/// Content descriptor for a course, loaded once at startup from
/// `content.json`. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDescriptor {
    /// Ordered modules; order defines the linear sequence.
    pub modules: Vec<ModuleDescriptor>,
}

/// A module: an ordered group of pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub id: String,
    pub title: String,
    /// Ordered pages; order is significant.
    pub pages: Vec<PageDescriptor>,
}

/// A single page entry in the descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDescriptor {
    pub id: String,
    pub title: String,
    /// URL of the page body. `.md` files are rendered as Markdown by the host.
    pub file: String,
    /// Page-level bonus marker ("extras"). The module id is the usual
    /// discriminator; both are honored.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Badge requirement gating this page when it lives in the extras module.
    /// Absent means no badge requirement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<UnlockRequirement>,
}

/// Failure to load or validate the content descriptor.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("content descriptor is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("duplicate page id in descriptor: {id}")]
    DuplicatePage { id: String },
}

impl CourseDescriptor {
    /// Parse a descriptor from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }
}
