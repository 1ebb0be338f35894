//! Plan model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::PlanItem;

/// A coaching plan as owned by the plan store.
///
/// The editor only ever holds a working copy of this; the store's copy is
/// authoritative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Title of the plan
    pub title: String,

    /// Optional description of the plan
    pub description: Option<String>,

    /// Items belonging to the plan
    #[serde(default)]
    pub items: Vec<PlanItem>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}
