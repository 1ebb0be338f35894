//! Draft item wrapper, change states and draft identities.

use std::{fmt, str::FromStr};

use crate::models::{ItemId, PlanItem, PlanItemContent};

/// Local stand-in identity for an item that has never been committed.
///
/// Kept distinct from [`ItemId`] so a draft-only identity can never be sent
/// to the plan store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DraftId(pub u64);

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "draft-{}", self.0)
    }
}

/// Addresses a draft item either by its persisted or its draft identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKey {
    Persisted(ItemId),
    Draft(DraftId),
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Persisted(id) => write!(f, "item-{id}"),
            ItemKey::Draft(id) => write!(f, "{id}"),
        }
    }
}

impl From<ItemId> for ItemKey {
    fn from(id: ItemId) -> Self {
        ItemKey::Persisted(id)
    }
}

impl From<DraftId> for ItemKey {
    fn from(id: DraftId) -> Self {
        ItemKey::Draft(id)
    }
}

/// The pending change carried by a draft item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeState {
    /// Matches the last fetched plan
    Unchanged,

    /// Added locally, not yet known to the plan store
    Created,

    /// Persisted item whose content was edited locally
    Modified,

    /// Persisted item removed locally; hidden but kept for the commit
    Deleted,
}

impl ChangeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeState::Unchanged => "unchanged",
            ChangeState::Created => "created",
            ChangeState::Modified => "modified",
            ChangeState::Deleted => "deleted",
        }
    }

    /// Returns true for every state the commit has to act on.
    pub fn is_pending(&self) -> bool {
        !matches!(self, ChangeState::Unchanged)
    }

    /// Short marker shown next to a draft item.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coachplan_core::draft::ChangeState;
    ///
    /// assert_eq!(ChangeState::Created.marker(), "+");
    /// assert_eq!(ChangeState::Modified.marker(), "~");
    /// assert_eq!(ChangeState::Deleted.marker(), "-");
    /// assert_eq!(ChangeState::Unchanged.marker(), " ");
    /// ```
    pub fn marker(&self) -> &'static str {
        match self {
            ChangeState::Unchanged => " ",
            ChangeState::Created => "+",
            ChangeState::Modified => "~",
            ChangeState::Deleted => "-",
        }
    }
}

impl FromStr for ChangeState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unchanged" => Ok(ChangeState::Unchanged),
            "created" => Ok(ChangeState::Created),
            "modified" => Ok(ChangeState::Modified),
            "deleted" => Ok(ChangeState::Deleted),
            _ => Err(format!("Invalid change state: {s}")),
        }
    }
}

impl fmt::Display for ChangeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A plan item staged in a [`super::DraftStore`].
///
/// Fields are private so the pairing of identity and state stays sound: an
/// item is `Created` exactly when it is addressed by a [`DraftId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftItem {
    key: ItemKey,
    content: PlanItemContent,
    sort_order: i32,
    state: ChangeState,
}

impl DraftItem {
    pub(super) fn seeded(item: &PlanItem) -> Self {
        Self {
            key: ItemKey::Persisted(item.id),
            content: item.content.clone(),
            sort_order: item.sort_order,
            state: ChangeState::Unchanged,
        }
    }

    pub(super) fn created(id: DraftId, content: PlanItemContent, sort_order: i32) -> Self {
        Self {
            key: ItemKey::Draft(id),
            content,
            sort_order,
            state: ChangeState::Created,
        }
    }

    pub fn key(&self) -> ItemKey {
        self.key
    }

    /// Persisted identity, absent for items that were never committed.
    pub fn remote_id(&self) -> Option<ItemId> {
        match self.key {
            ItemKey::Persisted(id) => Some(id),
            ItemKey::Draft(_) => None,
        }
    }

    pub fn draft_id(&self) -> Option<DraftId> {
        match self.key {
            ItemKey::Draft(id) => Some(id),
            ItemKey::Persisted(_) => None,
        }
    }

    pub fn content(&self) -> &PlanItemContent {
        &self.content
    }

    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }

    pub fn change_state(&self) -> ChangeState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state != ChangeState::Deleted
    }

    /// Replaces the content and applies the edit transition.
    ///
    /// `Created` stays `Created`; `Unchanged` becomes `Modified` unless the
    /// new content is identical.
    pub(super) fn replace_content(&mut self, content: PlanItemContent) {
        if self.state == ChangeState::Unchanged && self.content != content {
            self.state = ChangeState::Modified;
        }
        self.content = content;
    }

    pub(super) fn mark_deleted(&mut self) {
        self.state = ChangeState::Deleted;
    }
}
