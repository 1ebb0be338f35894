//! In-memory working copy of a plan and its items.
//!
//! A [`DraftStore`] is seeded from a fetched [`Plan`], mutated locally by the
//! editor, and later reconciled against the plan store by
//! [`crate::reconciler::Reconciler`]. None of the operations here perform
//! I/O.
//!
//! # Item lifecycle
//!
//! ```text
//!   seed ──▶ Unchanged ──edit──▶ Modified
//!                │                  │
//!                └──delete──▶ Deleted ◀──delete──┘
//!
//!   add ──▶ Created ──edit──▶ Created
//!              │
//!              └──delete──▶ (removed outright)
//! ```
//!
//! The only way back to `Unchanged` is a fresh [`DraftStore::seed`].
//!
//! # Examples
//!
//! ```rust
//! use coachplan_core::{
//!     draft::{ChangeState, DraftStore},
//!     models::{Category, Frequency, PlanItemContent},
//! };
//!
//! let mut draft = DraftStore::new();
//! let id = draft.add_item(PlanItemContent::new(
//!     "Evening stretch",
//!     Category::Recovery,
//!     Frequency::Daily,
//! ))?;
//!
//! let visible = draft.visible_items();
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].change_state(), ChangeState::Created);
//!
//! draft.delete_item(id.into())?;
//! assert!(draft.visible_items().is_empty());
//! # Ok::<(), coachplan_core::DraftError>(())
//! ```

use std::collections::BTreeMap;

use log::debug;

use crate::{
    error::{DraftError, Result},
    models::{Category, Plan, PlanItemContent, Template},
};

pub mod item;


pub use item::{ChangeState, DraftId, DraftItem, ItemKey};

/// Working copy of one plan's metadata and items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftStore {
    source_plan_id: Option<u64>,
    title: String,
    description: Option<String>,
    items: Vec<DraftItem>,
    next_draft_id: u64,
}

impl DraftStore {
    /// Creates an empty draft with no backing plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a draft seeded from `plan`.
    pub fn from_plan(plan: &Plan) -> Self {
        let mut draft = Self::new();
        draft.seed(plan);
        draft
    }

    /// Replaces all state with a copy of `plan`.
    ///
    /// Every item enters as `Unchanged` and pending draft identities are
    /// dropped; the draft id counter restarts so seeding the same plan twice
    /// yields identical drafts.
    pub fn seed(&mut self, plan: &Plan) {
        debug!("Seeding draft from plan {} ({} items)", plan.id, plan.items.len());
        self.source_plan_id = Some(plan.id);
        self.title = plan.title.clone();
        self.description = plan.description.clone();
        self.items = plan.items.iter().map(DraftItem::seeded).collect();
        self.next_draft_id = 0;
    }

    /// Resets to an empty draft with no backing plan.
    pub fn clear(&mut self) {
        debug!("Clearing draft");
        *self = Self::default();
    }

    /// The plan this draft tracks, if any.
    pub fn source_plan_id(&self) -> Option<u64> {
        self.source_plan_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// All draft items including deleted ones, in insertion order.
    pub fn items(&self) -> &[DraftItem] {
        &self.items
    }

    pub fn set_title(&mut self, text: impl Into<String>) {
        self.title = text.into();
    }

    /// Sets the description; blank text clears it.
    pub fn set_description(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.description = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
    }

    /// Stages a new item and returns its draft identity.
    ///
    /// # Errors
    ///
    /// * `DraftError::Validation` - When the content is invalid; the draft is
    ///   left untouched
    pub fn add_item(&mut self, content: PlanItemContent) -> Result<DraftId> {
        content.validate()?;
        let sort_order = self.visible_count() as i32;
        Ok(self.push_created(content, sort_order))
    }

    /// Replaces the content of a visible item.
    ///
    /// # Errors
    ///
    /// * `DraftError::Validation` - When the content is invalid
    /// * `DraftError::NotFound` - When no visible item has the given key
    pub fn edit_item(&mut self, key: ItemKey, content: PlanItemContent) -> Result<()> {
        content.validate()?;
        let item = self.visible_mut(key)?;
        item.replace_content(content);
        debug!("Edited {key}, now {}", item.change_state());
        Ok(())
    }

    /// Removes a visible item.
    ///
    /// Items that were never committed disappear outright; persisted items
    /// are kept as `Deleted` so the commit can still address them.
    ///
    /// # Errors
    ///
    /// * `DraftError::NotFound` - When no visible item has the given key
    pub fn delete_item(&mut self, key: ItemKey) -> Result<()> {
        let item = self.visible_mut(key)?;
        if item.change_state() == ChangeState::Created {
            self.items.retain(|item| item.key() != key);
            debug!("Dropped uncommitted item {key}");
        } else {
            item.mark_deleted();
            debug!("Marked {key} deleted");
        }
        Ok(())
    }

    /// Looks up a visible item.
    pub fn get(&self, key: ItemKey) -> Option<&DraftItem> {
        self.items
            .iter()
            .find(|item| item.key() == key && item.is_visible())
    }

    /// Items that are not deleted, ordered by category then sort order.
    ///
    /// The sort is stable, so equal sort orders keep insertion order.
    pub fn visible_items(&self) -> Vec<&DraftItem> {
        let mut visible: Vec<&DraftItem> =
            self.items.iter().filter(|item| item.is_visible()).collect();
        visible.sort_by_key(|item| (item.content().category, item.sort_order()));
        visible
    }

    pub fn visible_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_visible()).count()
    }

    /// Visible items grouped by category; empty categories are omitted.
    pub fn items_by_category(&self) -> BTreeMap<Category, Vec<&DraftItem>> {
        let mut groups: BTreeMap<Category, Vec<&DraftItem>> = BTreeMap::new();
        for item in self.visible_items() {
            groups.entry(item.content().category).or_default().push(item);
        }
        groups
    }

    /// Stages every item of `template` as new items in one step.
    ///
    /// All template items are validated before any is added, so an invalid
    /// template leaves the draft untouched.
    ///
    /// # Errors
    ///
    /// * `DraftError::Validation` - When any template item is invalid
    pub fn append_template_items(&mut self, template: &Template) -> Result<Vec<DraftId>> {
        for (index, content) in template.items.iter().enumerate() {
            content.validate().map_err(|err| match err {
                DraftError::Validation { field, reason } => DraftError::validation(format!(
                    "items[{index}].{field}"
                ))
                .with_reason(reason),
                other => other,
            })?;
        }

        let start = self.visible_count() as i32;
        let ids = template
            .items
            .iter()
            .zip(start..)
            .map(|(content, sort_order)| self.push_created(content.clone(), sort_order))
            .collect::<Vec<_>>();
        debug!(
            "Appended {} items from template '{}'",
            ids.len(),
            template.name
        );
        Ok(ids)
    }

    fn push_created(&mut self, content: PlanItemContent, sort_order: i32) -> DraftId {
        let id = DraftId(self.next_draft_id);
        self.next_draft_id += 1;
        debug!("Staged new item {id} '{}'", content.title);
        self.items.push(DraftItem::created(id, content, sort_order));
        id
    }

    fn visible_mut(&mut self, key: ItemKey) -> Result<&mut DraftItem> {
        self.items
            .iter_mut()
            .find(|item| item.key() == key && item.is_visible())
            .ok_or(DraftError::NotFound { key })
    }
}
