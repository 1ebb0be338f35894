//! Raw input parameters for draft edits.
//!
//! Front ends (the CLI, an editor form, a scripted test) hand the core
//! loosely-typed input: categories as strings, times as `HH:MM` text,
//! durations as whatever number the user typed. The structures here carry
//! that input unchanged and convert into the typed models with `TryFrom`,
//! reporting problems as `DraftError::Validation` against the offending
//! field.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  JSON / form    │    │    ItemInput    │    │ PlanItemContent │
//! │     input       │───▶│  (raw strings)  │───▶│    (typed)      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! An edit script is a list of [`EditOp`] values applied in order to an
//! [`crate::EditSession`]:
//!
//! ```rust
//! use coachplan_core::params::EditOp;
//!
//! let script = EditOp::parse_script(r#"[
//!     {"op": "set_title", "title": "Week 2"},
//!     {"op": "add", "item": {"title": "Walk", "category": "fitness", "frequency": "daily"}},
//!     {"op": "delete", "target": {"id": 4}}
//! ]"#)?;
//! assert_eq!(script.len(), 3);
//! # Ok::<(), coachplan_core::DraftError>(())
//! ```

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

use crate::{
    draft::{DraftId, ItemKey},
    error::DraftError,
    models::{Category, Frequency, ItemId, PlanItemContent, Template},
};

/// Unvalidated plan item fields as entered by a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemInput {
    /// Title of the item (required)
    pub title: String,
    /// Optional longer instructions; blank means none
    #[serde(default)]
    pub description: Option<String>,
    /// Category name, e.g. "nutrition"
    pub category: String,
    /// Frequency name, e.g. "weekdays"
    pub frequency: String,
    /// Time of day as `HH:MM`; blank means none
    #[serde(default)]
    pub scheduled_time: Option<String>,
    /// Duration in minutes; must be positive when present
    #[serde(default)]
    pub duration_minutes: Option<i64>,
}

impl TryFrom<ItemInput> for PlanItemContent {
    type Error = DraftError;

    fn try_from(input: ItemInput) -> Result<Self, Self::Error> {
        let category: Category = input
            .category
            .parse()
            .map_err(|reason: String| DraftError::validation("category").with_reason(reason))?;
        let frequency: Frequency = input
            .frequency
            .parse()
            .map_err(|reason: String| DraftError::validation("frequency").with_reason(reason))?;

        let scheduled_time = match input.scheduled_time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(text.parse::<Time>().map_err(|e| {
                DraftError::validation("scheduled_time")
                    .with_reason(format!("Invalid time of day '{text}': {e}"))
            })?),
        };

        let duration_minutes = input
            .duration_minutes
            .map(|minutes| {
                u32::try_from(minutes)
                    .ok()
                    .filter(|&m| m > 0)
                    .ok_or_else(|| {
                        DraftError::validation("duration_minutes")
                            .with_reason("Duration must be a positive number of minutes")
                    })
            })
            .transpose()?;

        let content = PlanItemContent {
            title: input.title,
            description: input.description.filter(|text| !text.trim().is_empty()),
            category,
            frequency,
            scheduled_time,
            duration_minutes,
        };
        content.validate()?;
        Ok(content)
    }
}

/// Reference to an item in a draft, either persisted or draft-only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ItemRef {
    /// Identity assigned by the plan store
    Id(u64),
    /// Identity of an item added in this draft
    Draft(u64),
}

impl From<ItemRef> for ItemKey {
    fn from(item: ItemRef) -> Self {
        match item {
            ItemRef::Id(id) => ItemKey::Persisted(ItemId(id)),
            ItemRef::Draft(id) => ItemKey::Draft(DraftId(id)),
        }
    }
}

impl From<ItemKey> for ItemRef {
    fn from(key: ItemKey) -> Self {
        match key {
            ItemKey::Persisted(ItemId(id)) => ItemRef::Id(id),
            ItemKey::Draft(DraftId(id)) => ItemRef::Draft(id),
        }
    }
}

/// One step of an edit script.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    /// Stage a new item
    Add { item: ItemInput },
    /// Replace the content of a visible item
    Edit { target: ItemRef, item: ItemInput },
    /// Remove a visible item
    Delete { target: ItemRef },
    SetTitle { title: String },
    /// Set the plan description; blank clears it
    SetDescription { description: String },
    /// Stage every item of an inline template
    ApplyTemplate { template: Template },
    /// Throw away all pending changes
    Discard,
}

impl EditOp {
    /// Short name of the operation, matching its serialized tag.
    pub fn name(&self) -> &'static str {
        match self {
            EditOp::Add { .. } => "add",
            EditOp::Edit { .. } => "edit",
            EditOp::Delete { .. } => "delete",
            EditOp::SetTitle { .. } => "set_title",
            EditOp::SetDescription { .. } => "set_description",
            EditOp::ApplyTemplate { .. } => "apply_template",
            EditOp::Discard => "discard",
        }
    }

    /// Parses a JSON array of edit operations.
    ///
    /// Item fields are not validated here; that happens when each step is
    /// applied.
    ///
    /// # Errors
    ///
    /// * `DraftError::Serialization` - When the text is not a valid script
    pub fn parse_script(text: &str) -> crate::error::Result<Vec<EditOp>> {
        Ok(serde_json::from_str(text)?)
    }
}
