//! Template model definitions.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::PlanItemContent;

/// An identity-free bundle of plan item content.
///
/// Templates can be replayed onto any draft any number of times; each replay
/// produces a fresh batch of new items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
    /// Name of the template
    pub name: String,

    /// Optional description of what the template is for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Item content in replay order
    #[serde(default)]
    pub items: Vec<PlanItemContent>,
}

/// A template as persisted by the template store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedTemplate {
    /// Identity assigned by the store
    pub id: u64,

    #[serde(flatten)]
    pub template: Template,

    /// Timestamp when the template was saved (UTC)
    pub created_at: Timestamp,
}
