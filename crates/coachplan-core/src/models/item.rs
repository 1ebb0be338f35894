//! Plan item model definition and field validation.

use std::fmt;

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

use super::{Category, Frequency};
use crate::error::{DraftError, Result};

/// Identity assigned to a plan item by the plan store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The editable content of a plan item, free of any identity.
///
/// This is what the editor stages, what the plan store receives on create
/// and update, and what templates carry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanItemContent {
    /// Short title of the item (must not be blank)
    pub title: String,

    /// Optional longer instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Category the item is grouped under
    pub category: Category,

    /// How often the item recurs
    pub frequency: Frequency,

    /// Wall-clock time of day the item is scheduled for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<Time>,

    /// Expected duration in minutes (positive when present)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

impl PlanItemContent {
    /// Creates content with only the required fields set.
    pub fn new(title: impl Into<String>, category: Category, frequency: Frequency) -> Self {
        Self {
            title: title.into(),
            description: None,
            category,
            frequency,
            scheduled_time: None,
            duration_minutes: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_scheduled_time(mut self, time: Time) -> Self {
        self.scheduled_time = Some(time);
        self
    }

    pub fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Checks the content against the plan item rules.
    ///
    /// Category and frequency are enforced by their types; unknown strings
    /// are rejected when converting raw input (see
    /// [`crate::params::ItemInput`]).
    ///
    /// # Errors
    ///
    /// * `DraftError::Validation` - When the title is blank
    /// * `DraftError::Validation` - When the duration is zero
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(DraftError::validation("title").with_reason("Title cannot be empty"));
        }
        if self.duration_minutes == Some(0) {
            return Err(DraftError::validation("duration_minutes")
                .with_reason("Duration must be a positive number of minutes"));
        }
        Ok(())
    }
}

/// A plan item as persisted by the plan store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanItem {
    /// Identity assigned by the store
    pub id: ItemId,

    /// ID of the parent plan
    pub plan_id: u64,

    #[serde(flatten)]
    pub content: PlanItemContent,

    /// Display order within the item's category; ties keep insertion order
    #[serde(default)]
    pub sort_order: i32,
}
